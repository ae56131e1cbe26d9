//! Importing, updating and removing the workflow files of a workspace.

use vidflow_core::assets::find_package_root;
use vidflow_core::config::{is_workspace, load_workspace_config};
use vidflow_core::scaffold::{
    import_workflow, install_skills, remove_workflow, ImportItem, AGENT_DIR,
};

use crate::app::App;
use crate::prompt;
use crate::ui::{self, tr};

pub fn run(app: &mut App) {
    let lang = app.lang;
    if !is_workspace(&app.start_dir) {
        ui::error(tr(
            lang,
            "Not inside a workspace. Initialize one first.",
            "当前目录不是工作区，请先初始化。",
        ));
        return;
    }
    let config = match load_workspace_config(&app.start_dir) {
        Ok(Some(config)) => config,
        Ok(None) => {
            ui::error(tr(
                lang,
                "This workspace has no config; run the initialization menu first.",
                "该工作区缺少配置，请先运行初始化菜单。",
            ));
            return;
        }
        Err(err) => {
            ui::error(&format!(
                "{}: {err}",
                tr(lang, "Workspace config unreadable", "工作区配置无法读取")
            ));
            return;
        }
    };

    ui::section(tr(lang, "Workflow files", "工作流文件"));
    let actions = [
        tr(lang, "Import or update files", "导入 / 更新文件"),
        tr(lang, "Remove workflow files", "删除工作流文件"),
        tr(lang, "Back", "返回"),
    ];
    match prompt::select(tr(lang, "Pick an action", "请选择操作"), &actions, 0) {
        0 => {
            let agent_missing = !app.start_dir.join(AGENT_DIR).exists();
            let selected: Vec<ImportItem> = if agent_missing
                && prompt::confirm(
                    tr(
                        lang,
                        "No workflow files found. Import everything?",
                        "未找到工作流文件，全部导入吗？",
                    ),
                    true,
                ) {
                ImportItem::ALL.to_vec()
            } else {
                let labels: Vec<&str> =
                    ImportItem::ALL.iter().map(|i| i.label(lang)).collect();
                prompt::multi_select(tr(lang, "Files to update", "选择要更新的文件"), &labels)
                    .into_iter()
                    .map(|i| ImportItem::ALL[i])
                    .collect()
            };
            if selected.is_empty() {
                ui::info(tr(lang, "Nothing selected.", "未选择任何条目。"));
                return;
            }
            let package_root = find_package_root(&app.start_dir);
            match import_workflow(&app.start_dir, &config, &selected, package_root.as_deref()) {
                Ok(written) => {
                    for file in &written {
                        ui::item(file);
                    }
                    ui::success(tr(lang, "Workflow files updated", "工作流文件已更新"));
                    if selected.contains(&ImportItem::AgentConfig) {
                        let skills = install_skills(&app.start_dir.join(AGENT_DIR));
                        if !skills.is_empty() {
                            ui::success(&format!(
                                "{}: {}",
                                tr(lang, "Skills installed", "已安装技能"),
                                skills.join(", ")
                            ));
                        }
                    }
                }
                Err(err) => ui::error(&format!(
                    "{}: {err}",
                    tr(lang, "Import failed", "导入失败")
                )),
            }
        }
        1 => {
            ui::warn(tr(
                lang,
                "This deletes the .agent directory and the workspace documents.",
                "此操作将删除 .agent 目录和工作区文档。",
            ));
            let answer = prompt::input(
                tr(lang, "Type YES to confirm", "输入 YES 确认"),
                None,
            );
            if answer != "YES" {
                ui::info(tr(lang, "Cancelled.", "已取消。"));
                return;
            }
            match remove_workflow(&app.start_dir) {
                Ok(removed) => {
                    for file in &removed {
                        ui::item(file);
                    }
                    ui::success(tr(lang, "Workflow files removed", "工作流文件已删除"));
                }
                Err(err) => ui::error(&format!(
                    "{}: {err}",
                    tr(lang, "Removal failed", "删除失败")
                )),
            }
        }
        _ => {}
    }
}

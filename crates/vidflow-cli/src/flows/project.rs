//! Project management: creation, listing and index repair.

use std::path::{Path, PathBuf};

use vidflow_core::config::{find_scripts_dir_upward, load_workspace_config};
use vidflow_core::index::{read_index, repair_index, upsert_entry, IndexEntry};
use vidflow_core::locale::{dir_name, DirKey, Locale, StageKind};
use vidflow_core::project::create_project;

use crate::app::App;
use crate::prompt;
use crate::ui::{self, tr};

pub fn run(app: &mut App) {
    let lang = app.lang;
    let Some(scripts_dir) = resolve_scripts_dir(app) else {
        ui::error(tr(
            lang,
            "No scripts directory found here or above. Initialize a workspace first.",
            "未在当前目录或上层找到脚本目录，请先初始化工作区。",
        ));
        return;
    };

    ui::section(tr(lang, "Projects", "项目管理"));
    let items = [
        tr(lang, "New project", "新建项目"),
        tr(lang, "List projects", "查看项目列表"),
        tr(lang, "Repair project index", "修复项目索引"),
        tr(lang, "Back", "返回"),
    ];
    match prompt::select(tr(lang, "Pick an action", "请选择操作"), &items, 0) {
        0 => new_project(app, &scripts_dir),
        1 => list_projects(app, &scripts_dir),
        2 => repair(app, &scripts_dir),
        _ => {}
    }
}

/// Scripts directory for the current location: prefer the workspace
/// config's directory language, fall back to an upward search so the
/// wizard also works from inside a project directory.
fn resolve_scripts_dir(app: &App) -> Option<PathBuf> {
    if let Ok(Some(config)) = load_workspace_config(&app.start_dir) {
        let dir = app
            .start_dir
            .join(dir_name(DirKey::Scripts, config.dir_lang));
        if dir.is_dir() {
            return Some(dir);
        }
    }
    find_scripts_dir_upward(&app.start_dir)
}

fn workspace_dir_lang(app: &App, scripts_dir: &Path) -> Locale {
    if let Some(root) = scripts_dir.parent() {
        if let Ok(Some(config)) = load_workspace_config(root) {
            return config.dir_lang;
        }
    }
    app.lang
}

fn new_project(app: &App, scripts_dir: &Path) {
    let lang = app.lang;
    let dir_lang = workspace_dir_lang(app, scripts_dir);

    let name = prompt::input(tr(lang, "Project name", "项目名称"), None);
    if name.trim().is_empty() {
        ui::error(tr(lang, "A project needs a name.", "项目名称不能为空。"));
        return;
    }
    let description = prompt::input(
        tr(lang, "One-line description (optional)", "一句话描述（可选）"),
        None,
    );

    match create_project(scripts_dir, &name, &description, dir_lang) {
        Ok(created) => {
            if let Err(err) = upsert_entry(scripts_dir, IndexEntry::from_meta(&created.meta)) {
                ui::warn(&format!(
                    "{}: {err}",
                    tr(lang, "Index update failed", "索引更新失败")
                ));
            }
            ui::success(&format!(
                "{} {}",
                tr(lang, "Project created at", "项目已创建于"),
                created.project_dir.display()
            ));
            ui::item(&format!(
                "{}: {}",
                tr(lang, "First stage", "第一阶段"),
                StageKind::IdeaCommunication.relative_file(dir_lang)
            ));
        }
        Err(err) => ui::error(&format!(
            "{}: {err}",
            tr(lang, "Project creation failed", "项目创建失败")
        )),
    }
    prompt::pause(tr(lang, "Press Enter to continue", "按回车返回"));
}

fn list_projects(app: &App, scripts_dir: &Path) {
    let lang = app.lang;
    match read_index(scripts_dir) {
        Ok(Some(index)) if !index.projects.is_empty() => {
            ui::section(&format!(
                "{} ({})",
                tr(lang, "Projects", "项目列表"),
                index.total_projects
            ));
            for entry in &index.projects {
                let stage = StageKind::ALL
                    .iter()
                    .find(|s| s.id() == entry.stage)
                    .map(|s| s.display_name(lang))
                    .unwrap_or(tr(lang, "not started", "未开始"));
                ui::item(&format!(
                    "{}  [{}] {}",
                    entry.project_id,
                    entry.status.as_str(),
                    stage
                ));
            }
        }
        Ok(_) => ui::info(tr(
            lang,
            "No projects yet. The index is rebuilt by the repair action if needed.",
            "暂无项目。如索引缺失可使用修复功能重建。",
        )),
        Err(err) => {
            ui::error(&format!(
                "{}: {err}",
                tr(lang, "Index unreadable", "索引无法读取")
            ));
            ui::info(tr(
                lang,
                "Use the repair action to rebuild it from the project metadata.",
                "可使用修复功能从项目元数据重建索引。",
            ));
        }
    }
    prompt::pause(tr(lang, "Press Enter to continue", "按回车返回"));
}

fn repair(app: &App, scripts_dir: &Path) {
    let lang = app.lang;
    match repair_index(scripts_dir) {
        Ok(report) => {
            ui::success(&format!(
                "{} {}",
                report.total,
                tr(lang, "projects indexed", "个项目已写入索引")
            ));
            for id in &report.added {
                ui::item(&format!("+ {id}"));
            }
            for id in &report.removed {
                ui::item(&format!("- {id}"));
            }
        }
        Err(err) => ui::error(&format!(
            "{}: {err}",
            tr(lang, "Repair failed", "索引修复失败")
        )),
    }
    prompt::pause(tr(lang, "Press Enter to continue", "按回车返回"));
}

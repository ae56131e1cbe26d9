//! Workspace initialization and modification.

use vidflow_core::assets::find_package_root;
use vidflow_core::config::{is_workspace, load_workspace_config, WorkspaceConfig};
use vidflow_core::locale::Locale;
use vidflow_core::scaffold::{init_workspace, install_skills, relocalize_workspace};

use crate::app::App;
use crate::prompt;
use crate::ui::{self, tr};

pub fn run(app: &mut App) {
    if is_workspace(&app.start_dir) {
        modify_workspace(app);
    } else {
        create_workspace(app);
    }
}

fn ask_profile(lang: Locale, config: &mut WorkspaceConfig) {
    ui::info(tr(
        lang,
        "A few optional questions; press Enter to skip any of them.",
        "以下为可选问题，直接回车即可跳过。",
    ));
    config.profile.niche = prompt::optional_input(tr(lang, "Content niche", "内容领域"));
    config.profile.platform = prompt::optional_input(tr(lang, "Main platform", "主要平台"));
    config.profile.audience = prompt::optional_input(tr(lang, "Target audience", "目标观众"));
    config.profile.target_duration =
        prompt::optional_input(tr(lang, "Typical video length", "常见视频时长"));
    config.profile.account_name = prompt::optional_input(tr(lang, "Account name", "账号名称"));
}

fn create_workspace(app: &mut App) {
    let lang = app.lang;
    ui::section(tr(lang, "New workspace", "新建工作区"));

    let name = prompt::input(
        tr(lang, "Workspace directory name", "工作区目录名"),
        Some("video-workspace"),
    );
    let dir_lang = prompt::select_locale(
        tr(lang, "Directory and file language", "目录与文件语言"),
        lang,
    );
    let ai_lang = prompt::select_locale(
        tr(lang, "Assistant writing language", "助手写作语言"),
        dir_lang,
    );

    let mut config = WorkspaceConfig::new(dir_lang, ai_lang);
    ask_profile(lang, &mut config);

    let target = app.start_dir.join(&name);
    let package_root = find_package_root(&app.start_dir);
    match init_workspace(&target, &config, package_root.as_deref()) {
        Ok(summary) => {
            ui::success(&format!(
                "{} {}",
                tr(lang, "Workspace created at", "工作区已创建于"),
                summary.root.display()
            ));
            ui::item(&format!("  {}", summary.scripts_dir.display()));
            ui::item(&format!("  {}", summary.references_dir.display()));
            ui::item(&format!("  {}", summary.agent_dir.display()));
            let skills = install_skills(&summary.agent_dir);
            if !skills.is_empty() {
                ui::success(&format!(
                    "{}: {}",
                    tr(lang, "Skills installed", "已安装技能"),
                    skills.join(", ")
                ));
            }
            ui::info(tr(
                lang,
                "Restart the wizard from inside the workspace to manage it.",
                "请在工作区目录内重新运行本工具进行管理。",
            ));
        }
        Err(err) => ui::error(&format!(
            "{}: {err}",
            tr(lang, "Workspace creation failed", "工作区创建失败")
        )),
    }
    prompt::pause(tr(lang, "Press Enter to continue", "按回车返回"));
}

fn modify_workspace(app: &mut App) {
    let lang = app.lang;
    let mut config = match load_workspace_config(&app.start_dir) {
        Ok(Some(config)) => config,
        Ok(None) => {
            // marker without a config: recreate the record in place
            ui::warn(tr(
                lang,
                "This workspace has no config yet; creating one.",
                "该工作区尚无配置文件，现在创建。",
            ));
            first_configuration(app);
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

    ui::section(tr(lang, "Modify workspace", "修改工作区"));
    let items = [
        tr(lang, "Change directory language", "更改目录语言"),
        tr(lang, "Change assistant language", "更改助手语言"),
        tr(lang, "Edit creator profile", "编辑创作者信息"),
        tr(lang, "Back", "返回"),
    ];
    match prompt::select(tr(lang, "What to change?", "要修改什么？"), &items, 0) {
        0 => {
            let new_dir_lang = prompt::select_locale(
                tr(lang, "Directory and file language", "目录与文件语言"),
                config.dir_lang,
            );
            if new_dir_lang == config.dir_lang {
                ui::info(tr(lang, "Nothing to change.", "无需修改。"));
                return;
            }
            ui::warn(tr(
                lang,
                "Top-level directories and documents will be renamed.",
                "顶层目录和文档将被重命名。",
            ));
            if !prompt::confirm(tr(lang, "Continue?", "继续吗？"), false) {
                return;
            }
            match relocalize_workspace(&app.start_dir, &mut config, new_dir_lang) {
                Ok(renamed) => {
                    for entry in &renamed {
                        ui::item(entry);
                    }
                    ui::success(tr(lang, "Workspace updated", "工作区已更新"));
                }
                Err(err) => ui::error(&format!(
                    "{}: {err}",
                    tr(lang, "Rename failed", "重命名失败")
                )),
            }
        }
        1 => {
            config.ai_lang = prompt::select_locale(
                tr(lang, "Assistant writing language", "助手写作语言"),
                config.ai_lang,
            );
            save_config(app, &mut config);
        }
        2 => {
            ask_profile(lang, &mut config);
            save_config(app, &mut config);
        }
        _ => {}
    }
}

/// Marker present but `config.json` missing, typically after a manual
/// deletion. Rebuild the record without touching the directory tree.
fn first_configuration(app: &mut App) {
    let lang = app.lang;
    let dir_lang = prompt::select_locale(
        tr(lang, "Directory and file language", "目录与文件语言"),
        lang,
    );
    let ai_lang = prompt::select_locale(
        tr(lang, "Assistant writing language", "助手写作语言"),
        dir_lang,
    );
    let mut config = WorkspaceConfig::new(dir_lang, ai_lang);
    ask_profile(lang, &mut config);
    save_config(app, &mut config);
}

fn save_config(app: &App, config: &mut WorkspaceConfig) {
    let lang = app.lang;
    config.touch();
    match vidflow_core::config::save_workspace_config(&app.start_dir, config) {
        Ok(()) => ui::success(tr(lang, "Configuration saved", "配置已保存")),
        Err(err) => ui::error(&format!(
            "{}: {err}",
            tr(lang, "Could not save the configuration", "配置保存失败")
        )),
    }
}

//! Viewing and editing the workspace configuration record.

use std::fs;

use vidflow_core::config::{
    is_workspace, load_workspace_config, save_workspace_config, workspace_config_path,
    WorkspaceConfig,
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
        Ok(config) => config,
        Err(err) => {
            ui::error(&format!(
                "{}: {err}",
                tr(lang, "Workspace config unreadable", "工作区配置无法读取")
            ));
            if prompt::confirm(
                tr(
                    lang,
                    "Replace the broken config with a fresh one?",
                    "用新配置替换损坏的配置吗？",
                ),
                false,
            ) {
                create(app);
            }
            return;
        }
    };

    match config {
        None => {
            ui::info(tr(
                lang,
                "This workspace has no config yet.",
                "该工作区尚无配置文件。",
            ));
            if prompt::confirm(tr(lang, "Create one now?", "现在创建吗？"), true) {
                create(app);
            }
        }
        Some(mut config) => {
            show(app, &config);
            let items = [
                tr(lang, "Change assistant language", "更改助手语言"),
                tr(lang, "Edit creator profile", "编辑创作者信息"),
                tr(lang, "Delete config", "删除配置"),
                tr(lang, "Back", "返回"),
            ];
            match prompt::select(tr(lang, "Pick an action", "请选择操作"), &items, 3) {
                0 => {
                    config.ai_lang = prompt::select_locale(
                        tr(lang, "Assistant writing language", "助手写作语言"),
                        config.ai_lang,
                    );
                    save(app, &mut config);
                }
                1 => {
                    edit_profile(app, &mut config);
                    save(app, &mut config);
                }
                2 => delete(app),
                _ => {}
            }
        }
    }
}

fn show(app: &App, config: &WorkspaceConfig) {
    let lang = app.lang;
    ui::section(tr(lang, "Workspace configuration", "工作区配置"));
    ui::item(&format!(
        "{}: {}",
        tr(lang, "Directory language", "目录语言"),
        config.dir_lang.label()
    ));
    ui::item(&format!(
        "{}: {}",
        tr(lang, "Assistant language", "助手语言"),
        config.ai_lang.label()
    ));
    let profile = [
        (tr(lang, "Niche", "内容领域"), &config.profile.niche),
        (tr(lang, "Platform", "主要平台"), &config.profile.platform),
        (tr(lang, "Audience", "目标观众"), &config.profile.audience),
        (
            tr(lang, "Video length", "视频时长"),
            &config.profile.target_duration,
        ),
        (
            tr(lang, "Account", "账号名称"),
            &config.profile.account_name,
        ),
    ];
    for (label, value) in profile {
        if let Some(value) = value {
            ui::item(&format!("{label}: {value}"));
        }
    }
    ui::item(&format!(
        "{}: {}",
        tr(lang, "Updated", "更新时间"),
        config.updated_at
    ));
}

fn edit_profile(app: &App, config: &mut WorkspaceConfig) {
    let lang = app.lang;
    ui::info(tr(
        lang,
        "Press Enter to clear a field.",
        "直接回车可清空该项。",
    ));
    config.profile.niche = prompt::optional_input(tr(lang, "Content niche", "内容领域"));
    config.profile.platform = prompt::optional_input(tr(lang, "Main platform", "主要平台"));
    config.profile.audience = prompt::optional_input(tr(lang, "Target audience", "目标观众"));
    config.profile.target_duration =
        prompt::optional_input(tr(lang, "Typical video length", "常见视频时长"));
    config.profile.account_name = prompt::optional_input(tr(lang, "Account name", "账号名称"));
}

fn create(app: &App) {
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
    edit_profile(app, &mut config);
    save(app, &mut config);
}

fn save(app: &App, config: &mut WorkspaceConfig) {
    let lang = app.lang;
    config.touch();
    match save_workspace_config(&app.start_dir, config) {
        Ok(()) => ui::success(tr(lang, "Configuration saved", "配置已保存")),
        Err(err) => ui::error(&format!(
            "{}: {err}",
            tr(lang, "Could not save the configuration", "配置保存失败")
        )),
    }
}

fn delete(app: &App) {
    let lang = app.lang;
    let answer = prompt::input(tr(lang, "Type YES to confirm", "输入 YES 确认"), None);
    if answer != "YES" {
        ui::info(tr(lang, "Cancelled.", "已取消。"));
        return;
    }
    match fs::remove_file(workspace_config_path(&app.start_dir)) {
        Ok(()) => ui::success(tr(lang, "Config deleted", "配置已删除")),
        Err(err) => ui::error(&format!(
            "{}: {err}",
            tr(lang, "Could not delete the config", "配置删除失败")
        )),
    }
}

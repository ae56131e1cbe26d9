//! The per-user assistant instructions at `~/.agent/AGENT.md`: view,
//! edit in `$EDITOR`, or reset to the bundled template.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use vidflow_core::assets::{load_doc, Doc};
use vidflow_core::config::resolve_user_home_dir;

use crate::app::App;
use crate::prompt;
use crate::ui::{self, tr};

fn global_agent_file() -> Option<PathBuf> {
    resolve_user_home_dir().map(|home| home.join(".agent").join("AGENT.md"))
}

pub fn run(app: &mut App) {
    let lang = app.lang;
    let Some(path) = global_agent_file() else {
        ui::error(tr(
            lang,
            "Could not determine the home directory.",
            "无法确定用户主目录。",
        ));
        return;
    };

    ui::section(tr(lang, "Global assistant config", "全局助手配置"));
    ui::item(&path.display().to_string());
    let items = [
        tr(lang, "View", "查看"),
        tr(lang, "Edit in $EDITOR", "用 $EDITOR 编辑"),
        tr(lang, "Reset to the bundled template", "重置为内置模板"),
        tr(lang, "Back", "返回"),
    ];
    match prompt::select(tr(lang, "Pick an action", "请选择操作"), &items, 0) {
        0 => view(app, &path),
        1 => edit(app, &path),
        2 => reset(app, &path),
        _ => {}
    }
}

fn view(app: &App, path: &Path) {
    let lang = app.lang;
    match fs::read_to_string(path) {
        Ok(content) => {
            println!();
            println!("{content}");
        }
        Err(_) => ui::info(tr(
            lang,
            "No global config yet. Use reset to create one.",
            "尚无全局配置，可使用重置功能创建。",
        )),
    }
    prompt::pause(tr(lang, "Press Enter to continue", "按回车返回"));
}

fn edit(app: &App, path: &Path) {
    let lang = app.lang;
    if !path.is_file() {
        ui::info(tr(
            lang,
            "No global config yet; creating one from the template first.",
            "尚无全局配置，先从模板创建。",
        ));
        if write_template(app, path).is_err() {
            return;
        }
    }
    let Some(editor) = find_editor() else {
        ui::error(tr(
            lang,
            "No editor found. Set $EDITOR or $VISUAL.",
            "未找到编辑器，请设置 $EDITOR 或 $VISUAL。",
        ));
        return;
    };
    match Command::new(&editor).arg(path).status() {
        Ok(status) if status.success() => {
            ui::success(tr(lang, "Saved", "已保存"));
        }
        Ok(_) | Err(_) => ui::warn(&format!(
            "{}: {}",
            tr(lang, "Editor exited abnormally", "编辑器异常退出"),
            editor.display()
        )),
    }
}

fn reset(app: &App, path: &Path) {
    let lang = app.lang;
    if path.is_file() {
        let backup = path.with_file_name(format!(
            "AGENT.md.bak-{}",
            chrono::Utc::now().format("%Y%m%d%H%M%S")
        ));
        match fs::copy(path, &backup) {
            Ok(_) => ui::info(&format!(
                "{}: {}",
                tr(lang, "Previous version backed up to", "旧版本已备份至"),
                backup.display()
            )),
            Err(err) => {
                ui::error(&format!(
                    "{}: {err}",
                    tr(lang, "Backup failed, not resetting", "备份失败，取消重置")
                ));
                return;
            }
        }
    }
    if write_template(app, path).is_ok() {
        ui::success(tr(lang, "Global config reset", "全局配置已重置"));
    }
}

fn write_template(app: &App, path: &Path) -> Result<(), ()> {
    let lang = app.lang;
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, load_doc(None, Doc::AgentInstructions, lang))
    };
    write().map_err(|err| {
        ui::error(&format!(
            "{}: {err}",
            tr(lang, "Could not write the config", "配置写入失败")
        ));
    })
}

/// `$VISUAL`, then `$EDITOR`, then whichever common editor is on PATH.
fn find_editor() -> Option<PathBuf> {
    for var in ["VISUAL", "EDITOR"] {
        if let Ok(value) = std::env::var(var) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
    }
    for candidate in ["nano", "vim", "vi", "notepad"] {
        if let Ok(path) = which::which(candidate) {
            return Some(path);
        }
    }
    None
}

//! Registry version check and self-uninstall, both best-effort: a
//! missing cargo or a network failure degrades to an informational
//! message, never an error.

use std::process::Command;

use crate::app::App;
use crate::prompt;
use crate::ui::{self, tr};

pub fn check_update(app: &mut App) {
    let lang = app.lang;
    let Ok(cargo) = which::which("cargo") else {
        ui::info(tr(
            lang,
            "cargo is not on PATH; cannot check the registry.",
            "未找到 cargo，无法查询版本。",
        ));
        return;
    };
    let output = Command::new(cargo)
        .args(["search", "vidflow", "--limit", "1"])
        .output();
    let latest = match output {
        Ok(out) if out.status.success() => {
            parse_search_version(&String::from_utf8_lossy(&out.stdout))
        }
        _ => None,
    };
    match latest {
        Some(latest) => {
            let current = vidflow_core::version();
            if latest == current {
                ui::success(&format!(
                    "{} (v{current})",
                    tr(lang, "You are up to date", "当前已是最新版本")
                ));
            } else {
                ui::info(&format!(
                    "{}: v{current} → v{latest}",
                    tr(lang, "Update available", "有新版本可用")
                ));
                ui::item(tr(
                    lang,
                    "Install it with: cargo install vidflow",
                    "更新命令：cargo install vidflow",
                ));
            }
        }
        None => ui::info(tr(
            lang,
            "Could not reach the registry; try again later.",
            "无法连接注册表，请稍后重试。",
        )),
    }
    prompt::pause(tr(lang, "Press Enter to continue", "按回车返回"));
}

/// First line of `cargo search` output looks like
/// `vidflow = "0.2.0"    # description`.
fn parse_search_version(stdout: &str) -> Option<String> {
    let line = stdout
        .lines()
        .find(|l| l.trim_start().starts_with("vidflow "))?;
    let (_, rest) = line.split_once('"')?;
    let (version, _) = rest.split_once('"')?;
    if version.is_empty() {
        None
    } else {
        Some(version.to_string())
    }
}

pub fn uninstall(app: &mut App) {
    let lang = app.lang;
    ui::warn(tr(
        lang,
        "This removes the vidflow binary. Workspaces are not touched.",
        "此操作将移除 vidflow 程序，工作区数据不受影响。",
    ));
    if !prompt::confirm(tr(lang, "Uninstall?", "确认卸载吗？"), false) {
        ui::info(tr(lang, "Cancelled.", "已取消。"));
        return;
    }
    let Ok(cargo) = which::which("cargo") else {
        ui::error(tr(
            lang,
            "cargo is not on PATH; remove the binary manually.",
            "未找到 cargo，请手动删除程序文件。",
        ));
        return;
    };
    match Command::new(cargo).args(["uninstall", "vidflow"]).status() {
        Ok(status) if status.success() => {
            ui::success(tr(lang, "Uninstalled. Goodbye!", "已卸载，再见！"));
            std::process::exit(0);
        }
        Ok(_) | Err(_) => ui::error(tr(
            lang,
            "Uninstall failed; remove the binary manually.",
            "卸载失败，请手动删除程序文件。",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_search_version;

    #[test]
    fn parses_a_search_line() {
        let out = "vidflow = \"0.2.0\"    # workspace wizard\n";
        assert_eq!(parse_search_version(out), Some("0.2.0".to_string()));
    }

    #[test]
    fn ignores_other_crates_and_garbage() {
        assert_eq!(parse_search_version("vidflow-extras = \"1.0.0\"\n"), None);
        assert_eq!(parse_search_version("error: no matches\n"), None);
        assert_eq!(parse_search_version(""), None);
    }
}

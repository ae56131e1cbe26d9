//! The main menu loop and the bits of state it carries around.

use std::path::PathBuf;

use anyhow::Result;
use vidflow_core::config::{
    is_workspace, load_global_config, load_workspace_config, save_global_config, GlobalConfig,
};
use vidflow_core::locale::Locale;
use vidflow_core::migrate::{migrate_workspace, needs_migration};

use crate::flows;
use crate::prompt;
use crate::ui::{self, tr};

pub struct App {
    /// Directory the wizard operates on; workspace lookups start here.
    pub start_dir: PathBuf,
    /// Interface language, from the per-user global config.
    pub lang: Locale,
}

impl App {
    pub fn new(start_dir: PathBuf) -> Result<App> {
        ui::banner();
        let lang = match load_global_config() {
            Ok(Some(config)) => config.language,
            Ok(None) => Self::pick_initial_language()?,
            Err(err) => {
                ui::warn(&format!("Could not read the global config: {err}"));
                Locale::En
            }
        };
        Ok(App { start_dir, lang })
    }

    fn pick_initial_language() -> Result<Locale> {
        let lang = prompt::select_locale("Language / 语言", Locale::En);
        if let Err(err) = save_global_config(&GlobalConfig::new(lang)) {
            ui::warn(&format!("Could not save the language choice: {err}"));
        }
        Ok(lang)
    }

    pub fn run(&mut self) -> Result<()> {
        self.offer_migration();
        if !is_workspace(&self.start_dir) {
            self.first_run_guide();
        }
        loop {
            let lang = self.lang;
            ui::section(tr(lang, "Main menu", "主菜单"));
            let items = [
                tr(lang, "Initialize or modify workspace", "初始化 / 修改工作区"),
                tr(lang, "Import or update workflow files", "导入 / 更新工作流文件"),
                tr(lang, "Projects", "项目管理"),
                tr(lang, "Workspace configuration", "工作区配置"),
                tr(lang, "Global assistant config", "全局助手配置"),
                tr(lang, "Interface language", "界面语言"),
                tr(lang, "Check for updates", "检查更新"),
                tr(lang, "Uninstall", "卸载"),
                tr(lang, "Quit", "退出"),
            ];
            match prompt::select(tr(lang, "Pick an action", "请选择操作"), &items, 0) {
                0 => flows::init::run(self),
                1 => flows::import::run(self),
                2 => flows::project::run(self),
                3 => flows::config::run(self),
                4 => flows::global_config::run(self),
                5 => self.switch_language(),
                6 => flows::other::check_update(self),
                7 => flows::other::uninstall(self),
                _ => {
                    ui::goodbye();
                    return Ok(());
                }
            }
        }
    }

    fn switch_language(&mut self) {
        self.lang = prompt::select_locale(
            tr(self.lang, "Interface language", "界面语言"),
            self.lang,
        );
        if let Err(err) = save_global_config(&GlobalConfig::new(self.lang)) {
            ui::warn(&format!("Could not save the language choice: {err}"));
        }
        ui::success(tr(self.lang, "Language updated", "界面语言已更新"));
    }

    /// On entering a Chinese workspace with a legacy layout, offer to
    /// migrate before anything else touches it.
    fn offer_migration(&self) {
        let lang = self.lang;
        if !is_workspace(&self.start_dir) {
            return;
        }
        let config = match load_workspace_config(&self.start_dir) {
            Ok(Some(config)) => config,
            Ok(None) => return,
            Err(err) => {
                ui::warn(&format!(
                    "{}: {err}",
                    tr(lang, "Workspace config unreadable", "工作区配置无法读取")
                ));
                return;
            }
        };
        if config.dir_lang != Locale::Zh || !needs_migration(&self.start_dir, config.dir_lang) {
            return;
        }

        ui::section(tr(lang, "Legacy layout detected", "检测到旧版目录结构"));
        let preview = migrate_workspace(&self.start_dir, config.dir_lang, false);
        for entry in &preview.migrated {
            ui::item(entry);
        }
        if !prompt::confirm(
            tr(lang, "Rename these now?", "现在重命名这些条目吗？"),
            true,
        ) {
            ui::info(tr(
                lang,
                "Skipped. You will be asked again next time.",
                "已跳过，下次启动会再次询问。",
            ));
            return;
        }

        let report = migrate_workspace(&self.start_dir, config.dir_lang, true);
        ui::success(&format!(
            "{} {}",
            report.migrated.len(),
            tr(lang, "entries migrated", "个条目已迁移")
        ));
        for entry in &report.skipped {
            ui::warn(&format!("{}: {entry}", tr(lang, "skipped", "已跳过")));
        }
    }

    /// A short orientation for people who launched the wizard outside
    /// any workspace.
    fn first_run_guide(&mut self) {
        let lang = self.lang;
        ui::section(tr(lang, "Welcome", "欢迎"));
        ui::item(tr(
            lang,
            "No workspace found here. A workspace is a directory that",
            "当前目录不是工作区。工作区是一个包含脚本项目、",
        ));
        ui::item(tr(
            lang,
            "holds your script projects, reference material and the",
            "参考资料以及写作助手配置的目录，",
        ));
        ui::item(tr(
            lang,
            "assistant configuration.",
            "由本工具创建和维护。",
        ));
        if prompt::confirm(
            tr(lang, "Create one now?", "现在创建一个工作区吗？"),
            true,
        ) {
            flows::init::run(self);
        }
    }
}

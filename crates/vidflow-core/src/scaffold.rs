//! Workspace scaffolding: initial creation, workflow-file updates and
//! removal.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::assets::{doc_file_name, load_doc, Doc};
use crate::config::{
    save_workspace_config, write_workspace_marker, ConfigError, WorkspaceConfig,
};
use crate::fs_util::copy_dir_all;
use crate::index::{write_index, IndexError, ScriptsIndex};
use crate::locale::{dir_name, DirKey, Locale};

/// Directory holding assistant instructions, templates and skills.
pub const AGENT_DIR: &str = ".agent";
pub const AGENT_TEMPLATE_DIR: &str = "template";
pub const AGENT_SKILLS_DIR: &str = "skills";

/// External skill installer looked up on PATH, invoked best-effort.
const SKILL_INSTALLER: &str = "agent-skills";

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Target already exists: {0}")]
    TargetExists(PathBuf),
    #[error("Not a workspace: {0}")]
    NotAWorkspace(PathBuf),
    #[error("Scaffold IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Index(#[from] IndexError),
}

#[derive(Debug)]
pub struct InitSummary {
    pub root: PathBuf,
    pub scripts_dir: PathBuf,
    pub references_dir: PathBuf,
    pub agent_dir: PathBuf,
}

/// Create a fresh workspace at `target`.
///
/// `target` must not exist yet. If anything fails midway the partial
/// tree is removed, so the caller can fix the cause and retry without
/// hand-cleaning.
pub fn init_workspace(
    target: &Path,
    config: &WorkspaceConfig,
    package_root: Option<&Path>,
) -> Result<InitSummary, ScaffoldError> {
    if target.exists() {
        return Err(ScaffoldError::TargetExists(target.to_path_buf()));
    }
    match build_workspace_tree(target, config, package_root) {
        Ok(summary) => Ok(summary),
        Err(err) => {
            let _ = fs::remove_dir_all(target);
            Err(err)
        }
    }
}

fn build_workspace_tree(
    target: &Path,
    config: &WorkspaceConfig,
    package_root: Option<&Path>,
) -> Result<InitSummary, ScaffoldError> {
    let dir_lang = config.dir_lang;
    fs::create_dir_all(target)?;

    for doc in [Doc::Readme, Doc::Quickstart] {
        fs::write(
            target.join(doc_file_name(doc, dir_lang)),
            load_doc(package_root, doc, dir_lang),
        )?;
    }

    let references_dir = target.join(dir_name(DirKey::References, dir_lang));
    for sub in [DirKey::Research, DirKey::Videos, DirKey::Channels] {
        fs::create_dir_all(references_dir.join(dir_name(sub, dir_lang)))?;
    }
    fs::write(
        references_dir.join(doc_file_name(Doc::ReferencesGuide, dir_lang)),
        load_doc(package_root, Doc::ReferencesGuide, dir_lang),
    )?;

    let scripts_dir = target.join(dir_name(DirKey::Scripts, dir_lang));
    fs::create_dir_all(&scripts_dir)?;
    fs::write(
        scripts_dir.join(doc_file_name(Doc::ScriptsGuide, dir_lang)),
        load_doc(package_root, Doc::ScriptsGuide, dir_lang),
    )?;
    write_index(&scripts_dir, &mut ScriptsIndex::empty())?;

    let agent_dir = target.join(AGENT_DIR);
    write_agent_dir(&agent_dir, config, package_root)?;

    write_workspace_marker(target)?;
    save_workspace_config(target, config)?;

    Ok(InitSummary {
        root: target.to_path_buf(),
        scripts_dir,
        references_dir,
        agent_dir,
    })
}

/// (Re)build the `.agent` directory: instructions in the assistant
/// language, the script template, and any skills bundled with the
/// package checkout.
fn write_agent_dir(
    agent_dir: &Path,
    config: &WorkspaceConfig,
    package_root: Option<&Path>,
) -> Result<(), ScaffoldError> {
    fs::create_dir_all(agent_dir)?;
    fs::write(
        agent_dir.join(doc_file_name(Doc::AgentInstructions, config.ai_lang)),
        load_doc(package_root, Doc::AgentInstructions, config.ai_lang),
    )?;

    let template_dir = agent_dir.join(AGENT_TEMPLATE_DIR);
    fs::create_dir_all(&template_dir)?;
    fs::write(
        template_dir.join(doc_file_name(Doc::ScriptTemplate, config.ai_lang)),
        load_doc(package_root, Doc::ScriptTemplate, config.ai_lang),
    )?;

    let skills_dir = agent_dir.join(AGENT_SKILLS_DIR);
    fs::create_dir_all(&skills_dir)?;
    if let Some(root) = package_root {
        let bundled = root.join("templates/agent").join(AGENT_SKILLS_DIR);
        if bundled.is_dir() {
            copy_dir_all(&bundled, &skills_dir)?;
        }
    }
    Ok(())
}

/// Workflow pieces that can be re-imported into an existing workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportItem {
    AgentConfig,
    Readme,
    Quickstart,
    ReferencesGuide,
    ScriptsGuide,
}

impl ImportItem {
    pub const ALL: [ImportItem; 5] = [
        ImportItem::AgentConfig,
        ImportItem::Readme,
        ImportItem::Quickstart,
        ImportItem::ReferencesGuide,
        ImportItem::ScriptsGuide,
    ];

    pub fn label(self, locale: Locale) -> &'static str {
        match locale {
            Locale::Zh => match self {
                ImportItem::AgentConfig => "助手配置 (.agent)",
                ImportItem::Readme => "工作区说明",
                ImportItem::Quickstart => "快速开始",
                ImportItem::ReferencesGuide => "参考资料指南",
                ImportItem::ScriptsGuide => "脚本目录指南",
            },
            Locale::En => match self {
                ImportItem::AgentConfig => "Assistant config (.agent)",
                ImportItem::Readme => "Workspace README",
                ImportItem::Quickstart => "Quickstart",
                ImportItem::ReferencesGuide => "References guide",
                ImportItem::ScriptsGuide => "Scripts guide",
            },
        }
    }
}

/// Overwrite the selected workflow files with fresh copies. Returns a
/// description of each file written, for display.
pub fn import_workflow(
    root: &Path,
    config: &WorkspaceConfig,
    items: &[ImportItem],
    package_root: Option<&Path>,
) -> Result<Vec<String>, ScaffoldError> {
    if !crate::config::is_workspace(root) {
        return Err(ScaffoldError::NotAWorkspace(root.to_path_buf()));
    }
    let dir_lang = config.dir_lang;
    let mut written = Vec::new();
    for item in items {
        match item {
            ImportItem::AgentConfig => {
                let agent_dir = root.join(AGENT_DIR);
                if agent_dir.exists() {
                    fs::remove_dir_all(&agent_dir)?;
                }
                write_agent_dir(&agent_dir, config, package_root)?;
                written.push(AGENT_DIR.to_string());
            }
            ImportItem::Readme => {
                let name = doc_file_name(Doc::Readme, dir_lang);
                fs::write(root.join(name), load_doc(package_root, Doc::Readme, dir_lang))?;
                written.push(name.to_string());
            }
            ImportItem::Quickstart => {
                let name = doc_file_name(Doc::Quickstart, dir_lang);
                fs::write(
                    root.join(name),
                    load_doc(package_root, Doc::Quickstart, dir_lang),
                )?;
                written.push(name.to_string());
            }
            ImportItem::ReferencesGuide => {
                let references_dir = root.join(dir_name(DirKey::References, dir_lang));
                fs::create_dir_all(&references_dir)?;
                let name = doc_file_name(Doc::ReferencesGuide, dir_lang);
                fs::write(
                    references_dir.join(name),
                    load_doc(package_root, Doc::ReferencesGuide, dir_lang),
                )?;
                written.push(format!(
                    "{}/{}",
                    dir_name(DirKey::References, dir_lang),
                    name
                ));
            }
            ImportItem::ScriptsGuide => {
                let scripts_dir = root.join(dir_name(DirKey::Scripts, dir_lang));
                fs::create_dir_all(&scripts_dir)?;
                let name = doc_file_name(Doc::ScriptsGuide, dir_lang);
                fs::write(
                    scripts_dir.join(name),
                    load_doc(package_root, Doc::ScriptsGuide, dir_lang),
                )?;
                written.push(format!("{}/{}", dir_name(DirKey::Scripts, dir_lang), name));
            }
        }
    }
    Ok(written)
}

/// Delete the workflow files from a workspace: the `.agent` directory
/// and the top-level documents in both locales. Project content is
/// never touched.
pub fn remove_workflow(root: &Path) -> Result<Vec<String>, ScaffoldError> {
    if !crate::config::is_workspace(root) {
        return Err(ScaffoldError::NotAWorkspace(root.to_path_buf()));
    }
    let mut removed = Vec::new();
    let agent_dir = root.join(AGENT_DIR);
    if agent_dir.exists() {
        fs::remove_dir_all(&agent_dir)?;
        removed.push(AGENT_DIR.to_string());
    }
    for locale in Locale::ALL {
        for doc in [Doc::Readme, Doc::Quickstart] {
            let name = doc_file_name(doc, locale);
            let path = root.join(name);
            if path.is_file() {
                fs::remove_file(&path)?;
                removed.push(name.to_string());
            }
        }
    }
    Ok(removed)
}

/// Switch the on-disk language of an existing workspace: rename the
/// top-level directories and documents to the new locale's names and
/// rewrite the config's name tables. Project directories are left to
/// the migration engine. A rename whose target already exists is
/// skipped and reported.
pub fn relocalize_workspace(
    root: &Path,
    config: &mut WorkspaceConfig,
    new_dir_lang: Locale,
) -> Result<Vec<String>, ScaffoldError> {
    if !crate::config::is_workspace(root) {
        return Err(ScaffoldError::NotAWorkspace(root.to_path_buf()));
    }
    let old_dir_lang = config.dir_lang;
    let mut renamed = Vec::new();
    if old_dir_lang != new_dir_lang {
        let mut pairs: Vec<(String, String)> = [DirKey::Scripts, DirKey::References]
            .iter()
            .map(|k| {
                (
                    dir_name(*k, old_dir_lang).to_string(),
                    dir_name(*k, new_dir_lang).to_string(),
                )
            })
            .collect();
        for doc in [Doc::Readme, Doc::Quickstart] {
            pairs.push((
                doc_file_name(doc, old_dir_lang).to_string(),
                doc_file_name(doc, new_dir_lang).to_string(),
            ));
        }
        for (old, new) in pairs {
            let old_path = root.join(&old);
            let new_path = root.join(&new);
            if !old_path.exists() {
                continue;
            }
            if new_path.exists() {
                renamed.push(format!("{old} (skipped, {new} exists)"));
                continue;
            }
            fs::rename(&old_path, &new_path)?;
            renamed.push(format!("{old} → {new}"));
        }
    }
    config.relocalize(new_dir_lang);
    config.touch();
    save_workspace_config(root, config)?;
    Ok(renamed)
}

/// Run the external skill installer over every skill directory, when
/// the installer is on PATH. Failures are ignored; a missing installer
/// just returns an empty list.
pub fn install_skills(agent_dir: &Path) -> Vec<String> {
    let Ok(installer) = which::which(SKILL_INSTALLER) else {
        return Vec::new();
    };
    let skills_dir = agent_dir.join(AGENT_SKILLS_DIR);
    let Ok(entries) = fs::read_dir(&skills_dir) else {
        return Vec::new();
    };
    let mut installed = Vec::new();
    for entry in entries.filter_map(Result::ok) {
        if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        let status = Command::new(&installer)
            .arg("install")
            .arg(entry.path())
            .output();
        if matches!(status, Ok(ref out) if out.status.success()) {
            installed.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    installed.sort();
    installed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{is_workspace, load_workspace_config};
    use crate::index::read_index;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn init_builds_a_chinese_workspace() {
        let tmp = TempDir::new().expect("tempdir");
        let target = tmp.path().join("工作区");
        let config = WorkspaceConfig::new(Locale::Zh, Locale::Zh);
        let summary = init_workspace(&target, &config, None).expect("init");

        assert!(is_workspace(&target));
        assert!(target.join("说明.md").is_file());
        assert!(target.join("快速开始.md").is_file());
        assert!(target.join("参考资料/调研").is_dir());
        assert!(target.join("参考资料/_GUIDE.md").is_file());
        assert!(target.join("脚本/_GUIDE.md").is_file());
        assert!(target.join(".agent/AGENT.md").is_file());
        assert!(target.join(".agent/template/通用版.md").is_file());
        assert!(target.join(".agent/skills").is_dir());

        let index = read_index(&summary.scripts_dir).expect("read").expect("some");
        assert_eq!(index.total_projects, 0);
        assert!(load_workspace_config(&target).expect("load").is_some());
    }

    #[test]
    fn init_refuses_an_existing_target() {
        let tmp = TempDir::new().expect("tempdir");
        let config = WorkspaceConfig::new(Locale::En, Locale::En);
        assert!(matches!(
            init_workspace(tmp.path(), &config, None),
            Err(ScaffoldError::TargetExists(_))
        ));
    }

    #[test]
    fn mixed_language_workspace_uses_each_locale_where_it_belongs() {
        let tmp = TempDir::new().expect("tempdir");
        let target = tmp.path().join("ws");
        // English directories, Chinese assistant output
        let config = WorkspaceConfig::new(Locale::En, Locale::Zh);
        init_workspace(&target, &config, None).expect("init");

        assert!(target.join("README.md").is_file());
        assert!(target.join("scripts").is_dir());
        let agent = fs::read_to_string(target.join(".agent/AGENT.md")).expect("read");
        assert!(agent.contains("写作助手"));
    }

    #[test]
    fn import_overwrites_only_the_selected_items() {
        let tmp = TempDir::new().expect("tempdir");
        let target = tmp.path().join("ws");
        let config = WorkspaceConfig::new(Locale::En, Locale::En);
        init_workspace(&target, &config, None).expect("init");

        fs::write(target.join("README.md"), "hand edited").expect("write");
        fs::write(target.join("QUICKSTART.md"), "hand edited").expect("write");

        let written =
            import_workflow(&target, &config, &[ImportItem::Readme], None).expect("import");
        assert_eq!(written, vec!["README.md".to_string()]);
        assert_ne!(
            fs::read_to_string(target.join("README.md")).expect("read"),
            "hand edited"
        );
        assert_eq!(
            fs::read_to_string(target.join("QUICKSTART.md")).expect("read"),
            "hand edited"
        );
    }

    #[test]
    fn import_outside_a_workspace_is_refused() {
        let tmp = TempDir::new().expect("tempdir");
        let config = WorkspaceConfig::new(Locale::En, Locale::En);
        assert!(matches!(
            import_workflow(tmp.path(), &config, &[ImportItem::Readme], None),
            Err(ScaffoldError::NotAWorkspace(_))
        ));
    }

    #[test]
    fn remove_deletes_workflow_files_but_not_projects() {
        let tmp = TempDir::new().expect("tempdir");
        let target = tmp.path().join("ws");
        let config = WorkspaceConfig::new(Locale::En, Locale::En);
        init_workspace(&target, &config, None).expect("init");
        crate::project::create_project(&target.join("scripts"), "keepme", "", Locale::En)
            .expect("create");

        let removed = remove_workflow(&target).expect("remove");
        assert!(removed.contains(&".agent".to_string()));
        assert!(!target.join(".agent").exists());
        assert!(!target.join("README.md").exists());
        // project data stays
        let scripts = fs::read_dir(target.join("scripts")).expect("read");
        assert!(scripts
            .filter_map(Result::ok)
            .any(|e| e.file_name().to_string_lossy().starts_with("keepme")));
    }

    #[test]
    fn relocalize_renames_top_level_entries_and_config() {
        let tmp = TempDir::new().expect("tempdir");
        let target = tmp.path().join("ws");
        let mut config = WorkspaceConfig::new(Locale::Zh, Locale::Zh);
        init_workspace(&target, &config, None).expect("init");

        let renamed =
            relocalize_workspace(&target, &mut config, Locale::En).expect("relocalize");
        assert!(renamed.contains(&"脚本 → scripts".to_string()));
        assert!(target.join("scripts").is_dir());
        assert!(target.join("references").is_dir());
        assert!(target.join("README.md").is_file());
        assert!(!target.join("说明.md").exists());

        let loaded = load_workspace_config(&target).expect("load").expect("some");
        assert_eq!(loaded.dir_lang, Locale::En);
        assert_eq!(loaded.dir_names[&crate::locale::DirKey::Scripts], "scripts");
    }

    #[test]
    fn bundled_skills_are_copied_from_the_package_root() {
        let tmp = TempDir::new().expect("tempdir");
        let package = tmp.path().join("checkout");
        fs::create_dir_all(package.join("templates/agent/skills/outline-helper")).expect("mkdir");
        fs::write(
            package.join("templates/agent/skills/outline-helper/SKILL.md"),
            "# outline helper\n",
        )
        .expect("write");

        let target = tmp.path().join("ws");
        let config = WorkspaceConfig::new(Locale::En, Locale::En);
        init_workspace(&target, &config, Some(&package)).expect("init");
        assert!(target
            .join(".agent/skills/outline-helper/SKILL.md")
            .is_file());
    }
}

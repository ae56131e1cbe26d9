//! Project directories and their `_meta.json` records.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::locale::{dir_name, DirKey, Locale, StageKind};
use crate::now_timestamp;

pub const PROJECT_META_FILENAME: &str = "_meta.json";
pub const PROJECT_META_VERSION: u32 = 1;
pub const PROJECT_CONTEXT_FILENAME: &str = "_context.md";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Project IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse project metadata: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unsupported project metadata version: {0}")]
    UnsupportedVersion(u32),
    #[error("Project name must not be empty")]
    EmptyName,
    #[error("Project already exists: {0}")]
    AlreadyExists(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Explore,
    Active,
    Completed,
    Archived,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Explore,
        ProjectStatus::Active,
        ProjectStatus::Completed,
        ProjectStatus::Archived,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Explore => "explore",
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Archived => "archived",
        }
    }
}

/// One of the seven production stages, as recorded in `_meta.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageMeta {
    pub id: u32,
    pub name: String,
    pub display_name: String,
    /// Stage document path relative to the project root.
    pub file: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMeta {
    pub version: u32,
    pub project_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: ProjectStatus,
    /// Id of the stage currently in progress, 0 before work starts.
    pub stage: u32,
    pub stages: Vec<StageMeta>,
    pub created_at: String,
    pub updated_at: String,
}

impl ProjectMeta {
    pub fn new(project_id: &str, name: &str, description: &str, locale: Locale) -> Self {
        let now = now_timestamp();
        ProjectMeta {
            version: PROJECT_META_VERSION,
            project_id: project_id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            status: ProjectStatus::Explore,
            stage: 0,
            stages: StageKind::ALL
                .iter()
                .map(|stage| StageMeta {
                    id: stage.id(),
                    name: stage.canonical_name().to_string(),
                    display_name: stage.display_name(locale).to_string(),
                    file: stage.relative_file(locale),
                    completed: false,
                })
                .collect(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = now_timestamp();
    }
}

pub fn project_meta_path(project_dir: &Path) -> PathBuf {
    project_dir.join(PROJECT_META_FILENAME)
}

pub fn load_project_meta(project_dir: &Path) -> Result<Option<ProjectMeta>, ProjectError> {
    let path = project_meta_path(project_dir);
    if !path.is_file() {
        return Ok(None);
    }
    let raw = fs::read_to_string(&path)?;
    let meta: ProjectMeta = serde_json::from_str(&raw)?;
    if meta.version != PROJECT_META_VERSION {
        return Err(ProjectError::UnsupportedVersion(meta.version));
    }
    Ok(Some(meta))
}

pub fn save_project_meta(project_dir: &Path, meta: &ProjectMeta) -> Result<(), ProjectError> {
    let raw = serde_json::to_string_pretty(meta)?;
    fs::write(project_meta_path(project_dir), format!("{raw}\n"))?;
    Ok(())
}

/// Directory name and id for a new project: the trimmed name with a
/// date suffix, so two takes on the same topic sort chronologically.
pub fn project_id_for(name: &str, date: chrono::NaiveDate) -> String {
    format!("{}-{}", name.trim(), date.format("%Y%m%d"))
}

#[derive(Debug)]
pub struct CreatedProject {
    pub project_dir: PathBuf,
    pub meta: ProjectMeta,
}

/// Create a project directory skeleton under `scripts_dir`.
///
/// On any failure after the directory is created, the partial tree is
/// removed so a retry starts clean.
pub fn create_project(
    scripts_dir: &Path,
    name: &str,
    description: &str,
    locale: Locale,
) -> Result<CreatedProject, ProjectError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ProjectError::EmptyName);
    }
    let project_id = project_id_for(name, chrono::Utc::now().date_naive());
    let project_dir = scripts_dir.join(&project_id);
    if project_dir.exists() {
        return Err(ProjectError::AlreadyExists(project_dir));
    }

    match build_project_tree(&project_dir, &project_id, name, description, locale) {
        Ok(meta) => Ok(CreatedProject { project_dir, meta }),
        Err(err) => {
            let _ = fs::remove_dir_all(&project_dir);
            Err(err)
        }
    }
}

fn build_project_tree(
    project_dir: &Path,
    project_id: &str,
    name: &str,
    description: &str,
    locale: Locale,
) -> Result<ProjectMeta, ProjectError> {
    fs::create_dir_all(project_dir.join(dir_name(DirKey::Stages, locale)))?;
    let contexts = project_dir.join(dir_name(DirKey::Contexts, locale));
    for sub in [DirKey::Research, DirKey::Videos, DirKey::Channels] {
        fs::create_dir_all(contexts.join(dir_name(sub, locale)))?;
    }
    fs::create_dir_all(project_dir.join(dir_name(DirKey::Archives, locale)))?;

    let meta = ProjectMeta::new(project_id, name, description, locale);
    save_project_meta(project_dir, &meta)?;
    fs::write(
        project_dir.join(PROJECT_CONTEXT_FILENAME),
        context_document(&meta, locale),
    )?;
    Ok(meta)
}

fn context_document(meta: &ProjectMeta, locale: Locale) -> String {
    let mut out = String::new();
    match locale {
        Locale::Zh => {
            out.push_str(&format!("# {}\n\n", meta.name));
            if !meta.description.is_empty() {
                out.push_str(&format!("{}\n\n", meta.description));
            }
            out.push_str("## 项目背景\n\n（补充选题来源、目标与约束）\n\n## 阶段清单\n\n");
        }
        Locale::En => {
            out.push_str(&format!("# {}\n\n", meta.name));
            if !meta.description.is_empty() {
                out.push_str(&format!("{}\n\n", meta.description));
            }
            out.push_str("## Background\n\n(topic source, goals, constraints)\n\n## Stages\n\n");
        }
    }
    for stage in &meta.stages {
        out.push_str(&format!(
            "- [ ] {} ({})\n",
            stage.display_name, stage.file
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn project_id_appends_the_date() {
        let date = chrono::NaiveDate::from_ymd_opt(2026, 1, 7).expect("date");
        assert_eq!(project_id_for("AI 泡沫", date), "AI 泡沫-20260107");
        assert_eq!(project_id_for("  trimmed  ", date), "trimmed-20260107");
    }

    #[test]
    fn create_project_builds_localized_skeleton() {
        let tmp = TempDir::new().expect("tempdir");
        let created =
            create_project(tmp.path(), "测试项目", "一个描述", Locale::Zh).expect("create");

        assert!(created.project_dir.join("阶段输出").is_dir());
        assert!(created.project_dir.join("补充资料/调研").is_dir());
        assert!(created.project_dir.join("补充资料/视频").is_dir());
        assert!(created.project_dir.join("补充资料/账号").is_dir());
        assert!(created.project_dir.join("_历史版本").is_dir());
        assert!(created.project_dir.join("_context.md").is_file());

        let meta = load_project_meta(&created.project_dir)
            .expect("load")
            .expect("present");
        assert_eq!(meta.name, "测试项目");
        assert_eq!(meta.status, ProjectStatus::Explore);
        assert_eq!(meta.stage, 0);
        assert_eq!(meta.stages.len(), 7);
        assert_eq!(meta.stages[0].file, "阶段输出/选题沟通.md");
        assert_eq!(meta.stages[6].file, "最终脚本.md");
        assert!(meta.stages.iter().all(|s| !s.completed));
    }

    #[test]
    fn duplicate_project_is_rejected() {
        let tmp = TempDir::new().expect("tempdir");
        create_project(tmp.path(), "dup", "", Locale::En).expect("create");
        assert!(matches!(
            create_project(tmp.path(), "dup", "", Locale::En),
            Err(ProjectError::AlreadyExists(_))
        ));
    }

    #[test]
    fn empty_name_is_rejected() {
        let tmp = TempDir::new().expect("tempdir");
        assert!(matches!(
            create_project(tmp.path(), "   ", "", Locale::En),
            Err(ProjectError::EmptyName)
        ));
    }

    #[test]
    fn meta_round_trips() {
        let tmp = TempDir::new().expect("tempdir");
        let mut meta = ProjectMeta::new("p-20260107", "p", "", Locale::En);
        meta.status = ProjectStatus::Active;
        meta.stage = 3;
        meta.stages[0].completed = true;
        save_project_meta(tmp.path(), &meta).expect("save");

        let loaded = load_project_meta(tmp.path()).expect("load").expect("some");
        assert_eq!(loaded.status, ProjectStatus::Active);
        assert_eq!(loaded.stage, 3);
        assert!(loaded.stages[0].completed);
    }

    #[test]
    fn unknown_meta_version_is_rejected() {
        let tmp = TempDir::new().expect("tempdir");
        let mut meta = ProjectMeta::new("p-20260107", "p", "", Locale::En);
        meta.version = 9;
        save_project_meta(tmp.path(), &meta).expect("save");
        assert!(matches!(
            load_project_meta(tmp.path()),
            Err(ProjectError::UnsupportedVersion(9))
        ));
    }
}

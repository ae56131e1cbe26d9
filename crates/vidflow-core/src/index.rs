//! The scripts index: `_meta.json` at the top of the scripts directory,
//! summarizing every project so menus can list them without opening each
//! project record. The per-project `_meta.json` files remain the source
//! of truth; `repair_index` rebuilds the summary from them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::project::{load_project_meta, ProjectMeta, ProjectStatus};
use crate::now_timestamp;

pub const INDEX_FILENAME: &str = "_meta.json";
pub const INDEX_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Index IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse scripts index: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unsupported scripts index version: {0}")]
    UnsupportedVersion(u32),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    pub project_id: String,
    pub name: String,
    pub status: ProjectStatus,
    pub stage: u32,
    pub updated_at: String,
}

impl IndexEntry {
    pub fn from_meta(meta: &ProjectMeta) -> Self {
        IndexEntry {
            project_id: meta.project_id.clone(),
            name: meta.name.clone(),
            status: meta.status,
            stage: meta.stage,
            updated_at: meta.updated_at.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptsIndex {
    pub version: u32,
    pub last_updated: String,
    pub total_projects: usize,
    pub projects: Vec<IndexEntry>,
}

impl ScriptsIndex {
    pub fn empty() -> Self {
        ScriptsIndex {
            version: INDEX_VERSION,
            last_updated: now_timestamp(),
            total_projects: 0,
            projects: Vec::new(),
        }
    }
}

pub fn index_path(scripts_dir: &Path) -> PathBuf {
    scripts_dir.join(INDEX_FILENAME)
}

pub fn read_index(scripts_dir: &Path) -> Result<Option<ScriptsIndex>, IndexError> {
    let path = index_path(scripts_dir);
    if !path.is_file() {
        return Ok(None);
    }
    let raw = fs::read_to_string(&path)?;
    let index: ScriptsIndex = serde_json::from_str(&raw)?;
    if index.version != INDEX_VERSION {
        return Err(IndexError::UnsupportedVersion(index.version));
    }
    Ok(Some(index))
}

/// Write the index, refreshing its bookkeeping fields and keeping the
/// entries sorted by project id.
pub fn write_index(scripts_dir: &Path, index: &mut ScriptsIndex) -> Result<(), IndexError> {
    index
        .projects
        .sort_by(|a, b| a.project_id.cmp(&b.project_id));
    index.total_projects = index.projects.len();
    index.last_updated = now_timestamp();
    let raw = serde_json::to_string_pretty(index)?;
    fs::write(index_path(scripts_dir), format!("{raw}\n"))?;
    Ok(())
}

/// Insert or replace the entry for one project.
pub fn upsert_entry(scripts_dir: &Path, entry: IndexEntry) -> Result<(), IndexError> {
    let mut index = read_index(scripts_dir)?.unwrap_or_else(ScriptsIndex::empty);
    match index
        .projects
        .iter_mut()
        .find(|e| e.project_id == entry.project_id)
    {
        Some(existing) => *existing = entry,
        None => index.projects.push(entry),
    }
    write_index(scripts_dir, &mut index)
}

/// Drop the entry for one project. Returns whether anything was removed.
pub fn remove_entry(scripts_dir: &Path, project_id: &str) -> Result<bool, IndexError> {
    let mut index = read_index(scripts_dir)?.unwrap_or_else(ScriptsIndex::empty);
    let before = index.projects.len();
    index.projects.retain(|e| e.project_id != project_id);
    let removed = index.projects.len() != before;
    if removed {
        write_index(scripts_dir, &mut index)?;
    }
    Ok(removed)
}

#[derive(Debug, Default)]
pub struct RepairReport {
    pub total: usize,
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

/// Rebuild the index from the project directories on disk.
///
/// Directories without a readable, current-version `_meta.json` are
/// ignored, as are dot-directories and loose files. A corrupt index
/// file is replaced rather than reported as fatal.
pub fn repair_index(scripts_dir: &Path) -> Result<RepairReport, IndexError> {
    let previous: Vec<String> = match read_index(scripts_dir) {
        Ok(Some(index)) => index.projects.into_iter().map(|e| e.project_id).collect(),
        Ok(None) | Err(IndexError::Parse(_)) | Err(IndexError::UnsupportedVersion(_)) => Vec::new(),
        Err(err) => return Err(err),
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(scripts_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let dir_name = entry.file_name();
        if dir_name.to_string_lossy().starts_with('.') {
            continue;
        }
        if let Some(meta) = load_project_meta(&entry.path()).ok().flatten() {
            entries.push(IndexEntry::from_meta(&meta));
        }
    }

    let current: Vec<String> = entries.iter().map(|e| e.project_id.clone()).collect();
    let report = RepairReport {
        total: entries.len(),
        added: current
            .iter()
            .filter(|id| !previous.contains(id))
            .cloned()
            .collect(),
        removed: previous
            .iter()
            .filter(|id| !current.contains(id))
            .cloned()
            .collect(),
    };

    let mut index = ScriptsIndex::empty();
    index.projects = entries;
    write_index(scripts_dir, &mut index)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use crate::project::create_project;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn entry(id: &str) -> IndexEntry {
        IndexEntry {
            project_id: id.to_string(),
            name: id.to_string(),
            status: ProjectStatus::Explore,
            stage: 0,
            updated_at: now_timestamp(),
        }
    }

    #[test]
    fn upsert_adds_then_replaces() {
        let tmp = TempDir::new().expect("tempdir");
        upsert_entry(tmp.path(), entry("b-20260101")).expect("upsert");
        upsert_entry(tmp.path(), entry("a-20260101")).expect("upsert");

        let mut updated = entry("b-20260101");
        updated.stage = 4;
        upsert_entry(tmp.path(), updated).expect("upsert");

        let index = read_index(tmp.path()).expect("read").expect("present");
        assert_eq!(index.total_projects, 2);
        // sorted by id, and the second upsert replaced rather than duplicated
        assert_eq!(index.projects[0].project_id, "a-20260101");
        assert_eq!(index.projects[1].stage, 4);
    }

    #[test]
    fn remove_reports_whether_it_removed() {
        let tmp = TempDir::new().expect("tempdir");
        upsert_entry(tmp.path(), entry("a-20260101")).expect("upsert");
        assert!(remove_entry(tmp.path(), "a-20260101").expect("remove"));
        assert!(!remove_entry(tmp.path(), "a-20260101").expect("remove"));
        let index = read_index(tmp.path()).expect("read").expect("present");
        assert_eq!(index.total_projects, 0);
    }

    #[test]
    fn repair_rebuilds_from_project_metadata() {
        let tmp = TempDir::new().expect("tempdir");
        create_project(tmp.path(), "alpha", "", Locale::En).expect("create");
        create_project(tmp.path(), "beta", "", Locale::En).expect("create");

        // stale entry for a project that no longer exists
        upsert_entry(tmp.path(), entry("ghost-20250101")).expect("upsert");
        // junk the scanner must ignore
        fs::create_dir(tmp.path().join(".hidden")).expect("mkdir");
        fs::create_dir(tmp.path().join("no-meta-here")).expect("mkdir");
        fs::write(tmp.path().join("loose.txt"), "x").expect("write");

        let report = repair_index(tmp.path()).expect("repair");
        assert_eq!(report.total, 2);
        assert_eq!(report.removed, vec!["ghost-20250101".to_string()]);
        assert_eq!(report.added.len(), 2);

        let index = read_index(tmp.path()).expect("read").expect("present");
        assert_eq!(index.total_projects, 2);
        assert!(index
            .projects
            .iter()
            .all(|e| e.project_id.starts_with("alpha") || e.project_id.starts_with("beta")));
    }

    #[test]
    fn repair_replaces_a_corrupt_index() {
        let tmp = TempDir::new().expect("tempdir");
        create_project(tmp.path(), "alpha", "", Locale::En).expect("create");
        fs::write(index_path(tmp.path()), "not json at all").expect("write");

        let report = repair_index(tmp.path()).expect("repair");
        assert_eq!(report.total, 1);
        assert!(read_index(tmp.path()).expect("read").is_some());
    }
}

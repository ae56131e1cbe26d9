//! Configuration records and their on-disk locations.
//!
//! Three records live here: the per-user global config in the home
//! directory, the per-workspace `config.json`, and the `.workspace`
//! marker that identifies a directory as a vidflow workspace. All are
//! versioned JSON; a record that fails to parse or carries an unknown
//! version is an error, never silently replaced with defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::locale::{dir_name, file_name, DirKey, FileKey, Locale};
use crate::now_timestamp;

pub const GLOBAL_CONFIG_FILENAME: &str = ".vidflow-config.json";
pub const WORKSPACE_CONFIG_FILENAME: &str = "config.json";
pub const WORKSPACE_MARKER_FILENAME: &str = ".workspace";

pub const GLOBAL_CONFIG_VERSION: u32 = 1;
pub const WORKSPACE_CONFIG_VERSION: u32 = 1;
pub const WORKSPACE_MARKER_KIND: &str = "vidflow-workspace";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config record: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unsupported config record version: {0}")]
    UnsupportedVersion(u32),
    #[error("Not a vidflow workspace marker (kind '{0}')")]
    UnknownMarkerKind(String),
    #[error("Could not determine the user home directory")]
    NoHomeDir,
}

/// Per-user settings stored in the home directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    pub version: u32,
    pub language: Locale,
    pub created_at: String,
    pub updated_at: String,
}

impl GlobalConfig {
    pub fn new(language: Locale) -> Self {
        let now = now_timestamp();
        GlobalConfig {
            version: GLOBAL_CONFIG_VERSION,
            language,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Marker file written at the workspace root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceMarker {
    pub kind: String,
    pub version: String,
    pub created_at: String,
    pub created_by: String,
}

impl WorkspaceMarker {
    pub fn new() -> Self {
        WorkspaceMarker {
            kind: WORKSPACE_MARKER_KIND.to_string(),
            version: crate::version().to_string(),
            created_at: now_timestamp(),
            created_by: "vidflow".to_string(),
        }
    }
}

impl Default for WorkspaceMarker {
    fn default() -> Self {
        WorkspaceMarker::new()
    }
}

/// Optional creator-profile answers collected during setup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub niche: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
}

/// Per-workspace settings. The directory and file name tables are
/// snapshotted at creation time so a workspace keeps working even if a
/// later release renames something in the canonical tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub version: u32,
    /// Locale the on-disk directory and file names use.
    pub dir_lang: Locale,
    /// Locale the assistant is asked to write in.
    pub ai_lang: Locale,
    #[serde(default)]
    pub profile: WorkspaceProfile,
    pub dir_names: BTreeMap<DirKey, String>,
    pub file_names: BTreeMap<FileKey, String>,
    pub created_at: String,
    pub updated_at: String,
}

impl WorkspaceConfig {
    pub fn new(dir_lang: Locale, ai_lang: Locale) -> Self {
        let now = now_timestamp();
        WorkspaceConfig {
            version: WORKSPACE_CONFIG_VERSION,
            dir_lang,
            ai_lang,
            profile: WorkspaceProfile::default(),
            dir_names: DirKey::ALL
                .iter()
                .map(|k| (*k, dir_name(*k, dir_lang).to_string()))
                .collect(),
            file_names: FileKey::ALL
                .iter()
                .map(|k| (*k, file_name(*k, dir_lang).to_string()))
                .collect(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Refresh the name tables after a dir-language change.
    pub fn relocalize(&mut self, dir_lang: Locale) {
        self.dir_lang = dir_lang;
        self.dir_names = DirKey::ALL
            .iter()
            .map(|k| (*k, dir_name(*k, dir_lang).to_string()))
            .collect();
        self.file_names = FileKey::ALL
            .iter()
            .map(|k| (*k, file_name(*k, dir_lang).to_string()))
            .collect();
    }

    pub fn touch(&mut self) {
        self.updated_at = now_timestamp();
    }
}

/// Home directory from the environment. `HOME` on Unix-likes,
/// `USERPROFILE` on Windows.
pub fn resolve_user_home_dir() -> Option<PathBuf> {
    for var in ["HOME", "USERPROFILE"] {
        if let Ok(value) = std::env::var(var) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
    }
    None
}

pub fn global_config_path() -> Option<PathBuf> {
    resolve_user_home_dir().map(|home| home.join(GLOBAL_CONFIG_FILENAME))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    if !path.is_file() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&raw)?))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    let raw = serde_json::to_string_pretty(value)?;
    fs::write(path, format!("{raw}\n"))?;
    Ok(())
}

pub fn load_global_config_at(path: &Path) -> Result<Option<GlobalConfig>, ConfigError> {
    let config: Option<GlobalConfig> = read_json(path)?;
    if let Some(ref config) = config {
        if config.version != GLOBAL_CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion(config.version));
        }
    }
    Ok(config)
}

pub fn load_global_config() -> Result<Option<GlobalConfig>, ConfigError> {
    match global_config_path() {
        Some(path) => load_global_config_at(&path),
        None => Ok(None),
    }
}

pub fn save_global_config_at(path: &Path, config: &GlobalConfig) -> Result<(), ConfigError> {
    write_json(path, config)
}

pub fn save_global_config(config: &GlobalConfig) -> Result<(), ConfigError> {
    let path = global_config_path().ok_or(ConfigError::NoHomeDir)?;
    save_global_config_at(&path, config)
}

pub fn workspace_config_path(root: &Path) -> PathBuf {
    root.join(WORKSPACE_CONFIG_FILENAME)
}

pub fn load_workspace_config(root: &Path) -> Result<Option<WorkspaceConfig>, ConfigError> {
    let config: Option<WorkspaceConfig> = read_json(&workspace_config_path(root))?;
    if let Some(ref config) = config {
        if config.version != WORKSPACE_CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion(config.version));
        }
    }
    Ok(config)
}

pub fn save_workspace_config(root: &Path, config: &WorkspaceConfig) -> Result<(), ConfigError> {
    write_json(&workspace_config_path(root), config)
}

pub fn workspace_marker_path(root: &Path) -> PathBuf {
    root.join(WORKSPACE_MARKER_FILENAME)
}

pub fn write_workspace_marker(root: &Path) -> Result<(), ConfigError> {
    write_json(&workspace_marker_path(root), &WorkspaceMarker::new())
}

pub fn read_workspace_marker(root: &Path) -> Result<Option<WorkspaceMarker>, ConfigError> {
    let marker: Option<WorkspaceMarker> = read_json(&workspace_marker_path(root))?;
    if let Some(ref marker) = marker {
        if marker.kind != WORKSPACE_MARKER_KIND {
            return Err(ConfigError::UnknownMarkerKind(marker.kind.clone()));
        }
    }
    Ok(marker)
}

/// True when `root` carries a valid workspace marker.
pub fn is_workspace(root: &Path) -> bool {
    matches!(read_workspace_marker(root), Ok(Some(_)))
}

/// Walk from `start` toward the filesystem root looking for a directory
/// that holds a valid workspace config. Returns that directory.
pub fn find_config_upward(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    start
        .ancestors()
        .find(|dir| matches!(load_workspace_config(dir), Ok(Some(_))))
        .map(Path::to_path_buf)
}

/// Walk from `start` toward the filesystem root looking for a scripts
/// directory in either locale. Returns the scripts directory itself.
pub fn find_scripts_dir_upward(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    for dir in start.ancestors() {
        for locale in Locale::ALL {
            let candidate = dir.join(dir_name(DirKey::Scripts, locale));
            if candidate.is_dir() {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn workspace_config_round_trips() {
        let tmp = TempDir::new().expect("tempdir");
        let config = WorkspaceConfig::new(Locale::Zh, Locale::En);
        save_workspace_config(tmp.path(), &config).expect("save");

        let loaded = load_workspace_config(tmp.path())
            .expect("load")
            .expect("present");
        assert_eq!(loaded.dir_lang, Locale::Zh);
        assert_eq!(loaded.ai_lang, Locale::En);
        assert_eq!(loaded.dir_names[&DirKey::Scripts], "脚本");
        assert_eq!(loaded.file_names[&FileKey::Script], "最终脚本.md");
    }

    #[test]
    fn missing_config_reads_as_none() {
        let tmp = TempDir::new().expect("tempdir");
        assert!(load_workspace_config(tmp.path()).expect("load").is_none());
    }

    #[test]
    fn malformed_config_is_an_error_not_a_default() {
        let tmp = TempDir::new().expect("tempdir");
        fs::write(workspace_config_path(tmp.path()), "{\"niche\": 42}").expect("write");
        assert!(load_workspace_config(tmp.path()).is_err());
    }

    #[test]
    fn future_version_is_rejected() {
        let tmp = TempDir::new().expect("tempdir");
        let mut config = WorkspaceConfig::new(Locale::En, Locale::En);
        config.version = 99;
        save_workspace_config(tmp.path(), &config).expect("save");
        assert!(matches!(
            load_workspace_config(tmp.path()),
            Err(ConfigError::UnsupportedVersion(99))
        ));
    }

    #[test]
    fn marker_identifies_a_workspace() {
        let tmp = TempDir::new().expect("tempdir");
        assert!(!is_workspace(tmp.path()));
        write_workspace_marker(tmp.path()).expect("marker");
        assert!(is_workspace(tmp.path()));

        let marker = read_workspace_marker(tmp.path())
            .expect("read")
            .expect("present");
        assert_eq!(marker.kind, WORKSPACE_MARKER_KIND);
        assert_eq!(marker.created_by, "vidflow");
    }

    #[test]
    fn foreign_marker_kind_is_rejected() {
        let tmp = TempDir::new().expect("tempdir");
        fs::write(
            workspace_marker_path(tmp.path()),
            r#"{"kind":"other-tool","version":"1","created_at":"x","created_by":"y"}"#,
        )
        .expect("write");
        assert!(!is_workspace(tmp.path()));
        assert!(matches!(
            read_workspace_marker(tmp.path()),
            Err(ConfigError::UnknownMarkerKind(_))
        ));
    }

    #[test]
    fn config_is_found_from_a_nested_directory() {
        let tmp = TempDir::new().expect("tempdir");
        let config = WorkspaceConfig::new(Locale::En, Locale::En);
        save_workspace_config(tmp.path(), &config).expect("save");

        let nested = tmp.path().join("scripts/some-project-20260107/stages");
        fs::create_dir_all(&nested).expect("mkdir");
        let found = find_config_upward(&nested).expect("found");
        assert_eq!(
            found.canonicalize().expect("canon"),
            tmp.path().canonicalize().expect("canon")
        );
    }

    #[test]
    fn scripts_dir_is_found_in_either_locale() {
        let tmp = TempDir::new().expect("tempdir");
        let scripts = tmp.path().join("脚本");
        let nested = scripts.join("proj/补充资料");
        fs::create_dir_all(&nested).expect("mkdir");

        let found = find_scripts_dir_upward(&nested).expect("found");
        assert_eq!(
            found.canonicalize().expect("canon"),
            scripts.canonicalize().expect("canon")
        );
    }

    #[test]
    fn relocalize_swaps_the_name_tables() {
        let mut config = WorkspaceConfig::new(Locale::Zh, Locale::Zh);
        config.relocalize(Locale::En);
        assert_eq!(config.dir_names[&DirKey::Archives], "_archive");
        assert_eq!(config.file_names[&FileKey::Idea], "idea.md");
    }
}

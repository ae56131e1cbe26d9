//! Legacy-name migration for Chinese workspaces.
//!
//! Earlier releases used different directory and file names (English
//! names inside Chinese workspaces, unprefixed archive directories,
//! numbered stage files). `migrate_workspace` walks a workspace and
//! renames every legacy entry to its canonical name. One function
//! serves both the dry-run preview and the real migration, selected by
//! the `apply` flag, so the two can never disagree about what needs
//! doing.
//!
//! The walk is idempotent: every action is gated on the legacy entry
//! still existing, so a second run finds nothing to do.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::fs_util::is_dir_effectively_empty;
use crate::locale::{dir_name, file_name, DirKey, FileKey, Locale};

/// What a migration pass did (or, in dry-run, would do).
#[derive(Debug, Default)]
pub struct MigrationReport {
    /// Renames performed or pending, as `old → new` descriptions.
    pub migrated: Vec<String>,
    /// Entries left alone, with the reason.
    pub skipped: Vec<String>,
}

impl MigrationReport {
    pub fn is_clean(&self) -> bool {
        self.migrated.is_empty() && self.skipped.is_empty()
    }
}

/// Legacy directory names and the canonical key they map to. Includes
/// both older Chinese names and English names left over from workspaces
/// created before localization.
const LEGACY_DIRS: &[(&str, DirKey)] = &[
    ("上下文", DirKey::Contexts),
    ("补充资料", DirKey::Contexts),
    ("阶段", DirKey::Stages),
    ("历史版本", DirKey::Archives),
    ("_context", DirKey::Contexts),
    ("contexts", DirKey::Contexts),
    ("_archive", DirKey::Archives),
    ("stages", DirKey::Stages),
    ("scripts", DirKey::Scripts),
    ("references", DirKey::References),
];

/// Legacy stage-file names and the canonical key they map to.
const LEGACY_FILES: &[(&str, FileKey)] = &[
    ("01_选题沟通.md", FileKey::Idea),
    ("02_框架搭建.md", FileKey::Frame),
    ("03_内容调研.md", FileKey::Research),
    ("04_大纲确认.md", FileKey::Outline),
    ("05_脚本草稿.md", FileKey::Draft),
    ("idea.md", FileKey::Idea),
    ("frame.md", FileKey::Frame),
    ("research.md", FileKey::Research),
    ("outline.md", FileKey::Outline),
    ("draft.md", FileKey::Draft),
    ("script.md", FileKey::Script),
];

/// Workspace-level documents that gained localized names.
const LEGACY_WORKSPACE_DOCS: &[(&str, &str)] = &[
    ("README.md", "说明.md"),
    ("QUICKSTART.md", "快速开始.md"),
];

/// Directory names an old archive directory may appear under.
const LEGACY_ARCHIVE_DIRS: &[&str] = &["历史版本", "_archive", "archives"];

/// `<basename>_v<NN>.<ext>`, the archived-draft naming convention.
fn versioned_file_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+)_v(\d+)\.([^.]+)$").expect("static regex"))
}

/// True when a migration pass over `root` would rename anything.
pub fn needs_migration(root: &Path, dir_lang: Locale) -> bool {
    !migrate_workspace(root, dir_lang, false).migrated.is_empty()
}

/// Walk the workspace and rename legacy entries to their canonical
/// names. With `apply` false nothing is touched; the report lists what
/// a real run would rename. Only Chinese workspaces have legacy layouts
/// to fix, so other locales return an empty report.
pub fn migrate_workspace(root: &Path, dir_lang: Locale, apply: bool) -> MigrationReport {
    let mut report = MigrationReport::default();
    if dir_lang != Locale::Zh {
        return report;
    }

    for (old, new) in LEGACY_WORKSPACE_DOCS {
        migrate_item(root, old, new, apply, "", &mut report);
    }
    for (legacy, key) in LEGACY_DIRS {
        let canonical = dir_name(*key, dir_lang);
        if *legacy != canonical {
            migrate_item(root, legacy, canonical, apply, "", &mut report);
        }
    }

    let scripts_dir = root.join(dir_name(DirKey::Scripts, dir_lang));
    if !scripts_dir.is_dir() {
        return report;
    }
    for project in project_dir_names(&scripts_dir) {
        let project_dir = scripts_dir.join(&project);

        for (legacy, key) in LEGACY_DIRS {
            let canonical = dir_name(*key, dir_lang);
            if *legacy != canonical {
                let prefix = format!("{project}/");
                migrate_item(&project_dir, legacy, canonical, apply, &prefix, &mut report);
            }
        }

        // Stage files may sit in the canonical stages directory (after
        // the rename above) or still in a legacy one during dry-run.
        let canonical_stages = dir_name(DirKey::Stages, dir_lang);
        for stages_name in [canonical_stages, "阶段", "stages"] {
            let stages_dir = project_dir.join(stages_name);
            if !stages_dir.is_dir() {
                continue;
            }
            let prefix = format!("{project}/{stages_name}/");
            for (legacy, key) in LEGACY_FILES {
                let canonical = file_name(*key, dir_lang);
                if *legacy != canonical {
                    migrate_item(&stages_dir, legacy, canonical, apply, &prefix, &mut report);
                }
            }
        }

        let canonical_archives = dir_name(DirKey::Archives, dir_lang);
        let mut archive_dirs = vec![canonical_archives];
        for alias in LEGACY_ARCHIVE_DIRS {
            if *alias != canonical_archives {
                archive_dirs.push(*alias);
            }
        }
        for archives_name in archive_dirs {
            let archives_dir = project_dir.join(archives_name);
            if archives_dir.is_dir() {
                let prefix = format!("{project}/{archives_name}/");
                migrate_archive_files(&archives_dir, dir_lang, apply, &prefix, &mut report);
            }
        }
    }

    report
}

fn project_dir_names(scripts_dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = match fs::read_dir(scripts_dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|name| !name.starts_with('.'))
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}

/// Decide and (in apply mode) perform the migration of one entry.
///
/// Rules when both the legacy and the canonical name exist:
/// - both directories, legacy effectively empty: drop the legacy one;
///   not reported in dry-run since nothing of value moves
/// - both directories, canonical effectively empty: replace it with the
///   legacy one
/// - both directories with content: merge, existing canonical files win
/// - anything else: skip and report the conflict
fn migrate_item(
    base: &Path,
    old_name: &str,
    new_name: &str,
    apply: bool,
    prefix: &str,
    report: &mut MigrationReport,
) {
    let old_path = base.join(old_name);
    let new_path = base.join(new_name);
    if !old_path.exists() {
        return;
    }

    if !new_path.exists() {
        if !apply {
            report.migrated.push(format!("{prefix}{old_name} → {new_name}"));
            return;
        }
        match fs::rename(&old_path, &new_path) {
            Ok(()) => report.migrated.push(format!("{prefix}{old_name} → {new_name}")),
            Err(err) => report
                .skipped
                .push(format!("{prefix}{old_name} (rename failed: {err})")),
        }
        return;
    }

    if !(old_path.is_dir() && new_path.is_dir()) {
        report
            .skipped
            .push(format!("{prefix}{old_name} ({new_name} already exists)"));
        return;
    }

    let outcome = (|| -> std::io::Result<Option<String>> {
        if is_dir_effectively_empty(&old_path)? {
            if !apply {
                return Ok(None);
            }
            fs::remove_dir_all(&old_path)?;
            return Ok(Some(format!(
                "{prefix}{old_name} → {new_name} (empty legacy dir removed)"
            )));
        }
        if is_dir_effectively_empty(&new_path)? {
            if apply {
                fs::remove_dir_all(&new_path)?;
                fs::rename(&old_path, &new_path)?;
            }
            return Ok(Some(format!("{prefix}{old_name} → {new_name}")));
        }
        if apply {
            merge_directories(&old_path, &new_path)?;
            fs::remove_dir_all(&old_path)?;
        }
        Ok(Some(format!("{prefix}{old_name} → {new_name} (merged)")))
    })();

    match outcome {
        Ok(Some(description)) => report.migrated.push(description),
        Ok(None) => {}
        Err(err) => report
            .skipped
            .push(format!("{prefix}{old_name} (migration failed: {err})")),
    }
}

/// Copy `src` into `dst` recursively. Files already present at the
/// destination are kept as-is.
fn merge_directories(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            if !target.exists() {
                fs::create_dir_all(&target)?;
            }
            merge_directories(&entry.path(), &target)?;
        } else if !target.exists() {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Rename versioned archive files (`draft_v01.md` and the like) whose
/// basename is a legacy stage-file name, keeping the version suffix.
fn migrate_archive_files(
    archives_dir: &Path,
    dir_lang: Locale,
    apply: bool,
    prefix: &str,
    report: &mut MigrationReport,
) {
    let mut names: Vec<String> = match fs::read_dir(archives_dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|name| !name.starts_with('.'))
            .collect(),
        Err(err) => {
            report
                .skipped
                .push(format!("{prefix} (read failed: {err})"));
            return;
        }
    };
    names.sort();

    for name in names {
        let Some(caps) = versioned_file_pattern().captures(&name) else {
            continue;
        };
        let basename = &caps[1];
        let version = &caps[2];
        let ext = &caps[3];

        let Some(key) = legacy_file_key(basename) else {
            continue;
        };
        let canonical_base = file_stem(file_name(key, dir_lang));
        if canonical_base == basename {
            continue;
        }
        let new_name = format!("{canonical_base}_v{version}.{ext}");
        migrate_item(archives_dir, &name, &new_name, apply, prefix, report);
    }
}

fn legacy_file_key(basename: &str) -> Option<FileKey> {
    LEGACY_FILES
        .iter()
        .find(|(legacy, _)| file_stem(legacy) == basename)
        .map(|(_, key)| *key)
}

fn file_stem(name: &str) -> &str {
    name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(name)
}

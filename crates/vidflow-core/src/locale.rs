//! Canonical locale tables.
//!
//! Every directory and file the tool creates is named through these
//! tables, keyed by a closed enum rather than free-form strings so a
//! missing translation is a compile error, not a runtime fallback.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported workspace languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Zh,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Zh, Locale::En];

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Zh => "zh",
            Locale::En => "en",
        }
    }

    /// Human-readable label for selection menus.
    pub fn label(self) -> &'static str {
        match self {
            Locale::Zh => "中文 (Chinese)",
            Locale::En => "English",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown locale: '{0}'")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zh" | "zh-CN" => Ok(Locale::Zh),
            "en" => Ok(Locale::En),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}

/// Directories a workspace or project is built from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DirKey {
    Scripts,
    References,
    Stages,
    Contexts,
    Research,
    Videos,
    Channels,
    Archives,
}

impl DirKey {
    pub const ALL: [DirKey; 8] = [
        DirKey::Scripts,
        DirKey::References,
        DirKey::Stages,
        DirKey::Contexts,
        DirKey::Research,
        DirKey::Videos,
        DirKey::Channels,
        DirKey::Archives,
    ];
}

/// Canonical on-disk name for a directory in the given locale.
pub fn dir_name(key: DirKey, locale: Locale) -> &'static str {
    match locale {
        Locale::Zh => match key {
            DirKey::Scripts => "脚本",
            DirKey::References => "参考资料",
            DirKey::Stages => "阶段输出",
            DirKey::Contexts => "补充资料",
            DirKey::Research => "调研",
            DirKey::Videos => "视频",
            DirKey::Channels => "账号",
            DirKey::Archives => "_历史版本",
        },
        Locale::En => match key {
            DirKey::Scripts => "scripts",
            DirKey::References => "references",
            DirKey::Stages => "stages",
            DirKey::Contexts => "contexts",
            DirKey::Research => "research",
            DirKey::Videos => "videos",
            DirKey::Channels => "channels",
            DirKey::Archives => "_archive",
        },
    }
}

/// Stage documents produced inside a project.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FileKey {
    Idea,
    Frame,
    Research,
    Outline,
    Draft,
    Script,
}

impl FileKey {
    pub const ALL: [FileKey; 6] = [
        FileKey::Idea,
        FileKey::Frame,
        FileKey::Research,
        FileKey::Outline,
        FileKey::Draft,
        FileKey::Script,
    ];
}

/// Canonical on-disk name for a stage document in the given locale.
pub fn file_name(key: FileKey, locale: Locale) -> &'static str {
    match locale {
        Locale::Zh => match key {
            FileKey::Idea => "选题沟通.md",
            FileKey::Frame => "框架搭建.md",
            FileKey::Research => "内容调研.md",
            FileKey::Outline => "大纲确认.md",
            FileKey::Draft => "脚本草稿.md",
            FileKey::Script => "最终脚本.md",
        },
        Locale::En => match key {
            FileKey::Idea => "idea.md",
            FileKey::Frame => "frame.md",
            FileKey::Research => "research.md",
            FileKey::Outline => "outline.md",
            FileKey::Draft => "draft.md",
            FileKey::Script => "script.md",
        },
    }
}

/// The seven production stages a project moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    IdeaCommunication,
    FrameworkBuilding,
    ContentResearch,
    OutlineConfirmation,
    ScriptWriting,
    Optimization,
    FinalOutput,
}

impl StageKind {
    pub const ALL: [StageKind; 7] = [
        StageKind::IdeaCommunication,
        StageKind::FrameworkBuilding,
        StageKind::ContentResearch,
        StageKind::OutlineConfirmation,
        StageKind::ScriptWriting,
        StageKind::Optimization,
        StageKind::FinalOutput,
    ];

    /// 1-based stage id as recorded in project metadata.
    pub fn id(self) -> u32 {
        match self {
            StageKind::IdeaCommunication => 1,
            StageKind::FrameworkBuilding => 2,
            StageKind::ContentResearch => 3,
            StageKind::OutlineConfirmation => 4,
            StageKind::ScriptWriting => 5,
            StageKind::Optimization => 6,
            StageKind::FinalOutput => 7,
        }
    }

    /// Stable machine name used inside metadata records.
    pub fn canonical_name(self) -> &'static str {
        match self {
            StageKind::IdeaCommunication => "idea_communication",
            StageKind::FrameworkBuilding => "framework_building",
            StageKind::ContentResearch => "content_research",
            StageKind::OutlineConfirmation => "outline_confirmation",
            StageKind::ScriptWriting => "script_writing",
            StageKind::Optimization => "optimization",
            StageKind::FinalOutput => "final_output",
        }
    }

    pub fn display_name(self, locale: Locale) -> &'static str {
        match locale {
            Locale::Zh => match self {
                StageKind::IdeaCommunication => "选题沟通",
                StageKind::FrameworkBuilding => "框架搭建",
                StageKind::ContentResearch => "内容调研",
                StageKind::OutlineConfirmation => "大纲确认",
                StageKind::ScriptWriting => "脚本撰写",
                StageKind::Optimization => "优化调整",
                StageKind::FinalOutput => "最终产出",
            },
            Locale::En => match self {
                StageKind::IdeaCommunication => "Idea Communication",
                StageKind::FrameworkBuilding => "Framework Building",
                StageKind::ContentResearch => "Content Research",
                StageKind::OutlineConfirmation => "Outline Confirmation",
                StageKind::ScriptWriting => "Script Writing",
                StageKind::Optimization => "Optimization",
                StageKind::FinalOutput => "Final Output",
            },
        }
    }

    /// The document this stage is written into, if it has one of its own.
    /// The optimization stage revises the draft in place, so it shares
    /// the draft file.
    pub fn file_key(self) -> FileKey {
        match self {
            StageKind::IdeaCommunication => FileKey::Idea,
            StageKind::FrameworkBuilding => FileKey::Frame,
            StageKind::ContentResearch => FileKey::Research,
            StageKind::OutlineConfirmation => FileKey::Outline,
            StageKind::ScriptWriting | StageKind::Optimization => FileKey::Draft,
            StageKind::FinalOutput => FileKey::Script,
        }
    }

    /// Path of the stage document relative to the project root. The
    /// final script lives at the project root, everything else under
    /// the stages directory.
    pub fn relative_file(self, locale: Locale) -> String {
        let file = file_name(self.file_key(), locale);
        match self {
            StageKind::FinalOutput => file.to_string(),
            _ => format!("{}/{}", dir_name(DirKey::Stages, locale), file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn locale_round_trips_through_str() {
        for locale in Locale::ALL {
            assert_eq!(locale.as_str().parse::<Locale>().ok(), Some(locale));
        }
        assert!("de".parse::<Locale>().is_err());
    }

    #[test]
    fn dir_tables_are_total_and_distinct() {
        for locale in Locale::ALL {
            let names: Vec<&str> = DirKey::ALL.iter().map(|k| dir_name(*k, locale)).collect();
            for name in &names {
                assert!(!name.is_empty());
            }
            let mut deduped = names.clone();
            deduped.sort();
            deduped.dedup();
            assert_eq!(deduped.len(), names.len(), "duplicate dir name in {locale}");
        }
    }

    #[test]
    fn archive_names_carry_sort_prefix() {
        assert_eq!(dir_name(DirKey::Archives, Locale::Zh), "_历史版本");
        assert_eq!(dir_name(DirKey::Archives, Locale::En), "_archive");
    }

    #[test]
    fn stage_ids_are_sequential() {
        for (i, stage) in StageKind::ALL.iter().enumerate() {
            assert_eq!(stage.id() as usize, i + 1);
        }
    }

    #[test]
    fn final_stage_file_sits_at_project_root() {
        assert_eq!(StageKind::FinalOutput.relative_file(Locale::En), "script.md");
        assert_eq!(
            StageKind::ScriptWriting.relative_file(Locale::Zh),
            "阶段输出/脚本草稿.md"
        );
    }

    #[test]
    fn optimization_shares_the_draft_file() {
        assert_eq!(StageKind::Optimization.file_key(), FileKey::Draft);
        assert_eq!(StageKind::ScriptWriting.file_key(), FileKey::Draft);
    }
}

//! Bundled workspace documents.
//!
//! Templates are embedded at compile time so the installed binary is
//! self-contained. When a checkout of the repository can be found above
//! the current directory (marked by `templates/.vidflow-templates`),
//! the on-disk copy wins, which keeps template editing a plain
//! save-and-rerun loop during development.

use std::fs;
use std::path::{Path, PathBuf};

use crate::locale::Locale;

const TEMPLATES_DIR: &str = "templates";
const TEMPLATES_MARKER: &str = ".vidflow-templates";

const README_EN: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../templates/README.md"
));
const README_ZH: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../templates/zh-CN/README.md"
));
const QUICKSTART_EN: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../templates/QUICKSTART.md"
));
const QUICKSTART_ZH: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../templates/zh-CN/QUICKSTART.md"
));
const AGENT_EN: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../templates/AGENT.md"
));
const AGENT_ZH: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../templates/zh-CN/AGENT.md"
));
const REFERENCES_GUIDE_EN: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../templates/references/_GUIDE.md"
));
const REFERENCES_GUIDE_ZH: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../templates/references/_GUIDE_CN.md"
));
const SCRIPTS_GUIDE_EN: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../templates/scripts/_GUIDE.md"
));
const SCRIPTS_GUIDE_ZH: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../templates/scripts/_GUIDE_CN.md"
));
const SCRIPT_TEMPLATE_EN: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../templates/agent/template/general.md"
));
const SCRIPT_TEMPLATE_ZH: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../templates/agent/template/通用版.md"
));

/// The documents a workspace is seeded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Doc {
    Readme,
    Quickstart,
    AgentInstructions,
    ReferencesGuide,
    ScriptsGuide,
    ScriptTemplate,
}

impl Doc {
    pub const ALL: [Doc; 6] = [
        Doc::Readme,
        Doc::Quickstart,
        Doc::AgentInstructions,
        Doc::ReferencesGuide,
        Doc::ScriptsGuide,
        Doc::ScriptTemplate,
    ];
}

fn embedded(doc: Doc, locale: Locale) -> &'static str {
    match (doc, locale) {
        (Doc::Readme, Locale::En) => README_EN,
        (Doc::Readme, Locale::Zh) => README_ZH,
        (Doc::Quickstart, Locale::En) => QUICKSTART_EN,
        (Doc::Quickstart, Locale::Zh) => QUICKSTART_ZH,
        (Doc::AgentInstructions, Locale::En) => AGENT_EN,
        (Doc::AgentInstructions, Locale::Zh) => AGENT_ZH,
        (Doc::ReferencesGuide, Locale::En) => REFERENCES_GUIDE_EN,
        (Doc::ReferencesGuide, Locale::Zh) => REFERENCES_GUIDE_ZH,
        (Doc::ScriptsGuide, Locale::En) => SCRIPTS_GUIDE_EN,
        (Doc::ScriptsGuide, Locale::Zh) => SCRIPTS_GUIDE_ZH,
        (Doc::ScriptTemplate, Locale::En) => SCRIPT_TEMPLATE_EN,
        (Doc::ScriptTemplate, Locale::Zh) => SCRIPT_TEMPLATE_ZH,
    }
}

/// File name the document is written under inside a workspace.
pub fn doc_file_name(doc: Doc, locale: Locale) -> &'static str {
    match (doc, locale) {
        (Doc::Readme, Locale::En) => "README.md",
        (Doc::Readme, Locale::Zh) => "说明.md",
        (Doc::Quickstart, Locale::En) => "QUICKSTART.md",
        (Doc::Quickstart, Locale::Zh) => "快速开始.md",
        (Doc::AgentInstructions, _) => "AGENT.md",
        (Doc::ReferencesGuide, _) | (Doc::ScriptsGuide, _) => "_GUIDE.md",
        (Doc::ScriptTemplate, Locale::En) => "general.md",
        (Doc::ScriptTemplate, Locale::Zh) => "通用版.md",
    }
}

/// Path of the document inside the repository `templates/` directory.
fn template_rel_path(doc: Doc, locale: Locale) -> &'static str {
    match (doc, locale) {
        (Doc::Readme, Locale::En) => "README.md",
        (Doc::Readme, Locale::Zh) => "zh-CN/README.md",
        (Doc::Quickstart, Locale::En) => "QUICKSTART.md",
        (Doc::Quickstart, Locale::Zh) => "zh-CN/QUICKSTART.md",
        (Doc::AgentInstructions, Locale::En) => "AGENT.md",
        (Doc::AgentInstructions, Locale::Zh) => "zh-CN/AGENT.md",
        (Doc::ReferencesGuide, Locale::En) => "references/_GUIDE.md",
        (Doc::ReferencesGuide, Locale::Zh) => "references/_GUIDE_CN.md",
        (Doc::ScriptsGuide, Locale::En) => "scripts/_GUIDE.md",
        (Doc::ScriptsGuide, Locale::Zh) => "scripts/_GUIDE_CN.md",
        (Doc::ScriptTemplate, Locale::En) => "agent/template/general.md",
        (Doc::ScriptTemplate, Locale::Zh) => "agent/template/通用版.md",
    }
}

/// Walk upward from `start` looking for a repository checkout carrying
/// the templates marker.
pub fn find_package_root(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    start
        .ancestors()
        .find(|dir| dir.join(TEMPLATES_DIR).join(TEMPLATES_MARKER).is_file())
        .map(Path::to_path_buf)
}

/// Document content, preferring an on-disk template under
/// `package_root` and falling back to the embedded copy.
pub fn load_doc(package_root: Option<&Path>, doc: Doc, locale: Locale) -> String {
    if let Some(root) = package_root {
        let path = root.join(TEMPLATES_DIR).join(template_rel_path(doc, locale));
        if let Ok(content) = fs::read_to_string(&path) {
            return content;
        }
    }
    embedded(doc, locale).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn embedded_docs_are_nonempty_for_every_locale() {
        for doc in Doc::ALL {
            for locale in Locale::ALL {
                assert!(!embedded(doc, locale).trim().is_empty());
                assert!(!doc_file_name(doc, locale).is_empty());
            }
        }
    }

    #[test]
    fn on_disk_template_overrides_the_embedded_copy() {
        let tmp = TempDir::new().expect("tempdir");
        let templates = tmp.path().join("templates");
        fs::create_dir_all(&templates).expect("mkdir");
        fs::write(templates.join(TEMPLATES_MARKER), "marker\n").expect("write");
        fs::write(templates.join("README.md"), "# Custom\n").expect("write");

        let nested = tmp.path().join("somewhere/deep");
        fs::create_dir_all(&nested).expect("mkdir");
        let root = find_package_root(&nested).expect("root");
        assert_eq!(
            root.canonicalize().expect("canon"),
            tmp.path().canonicalize().expect("canon")
        );

        assert_eq!(load_doc(Some(&root), Doc::Readme, Locale::En), "# Custom\n");
        // missing on-disk file falls back to the embedded copy
        assert_eq!(
            load_doc(Some(&root), Doc::Quickstart, Locale::En),
            embedded(Doc::Quickstart, Locale::En)
        );
    }

    #[test]
    fn no_package_root_means_embedded_content() {
        assert_eq!(
            load_doc(None, Doc::AgentInstructions, Locale::Zh),
            embedded(Doc::AgentInstructions, Locale::Zh)
        );
    }
}

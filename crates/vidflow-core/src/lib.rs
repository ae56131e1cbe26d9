//! Core library for vidflow: locale tables, workspace scaffolding,
//! project records, the scripts index and the legacy-name migration
//! engine. Everything here is plain filesystem plus JSON logic; the
//! interactive surface lives in the `vidflow` binary crate.

pub mod assets;
pub mod config;
pub mod fs_util;
pub mod index;
pub mod locale;
pub mod migrate;
pub mod project;
pub mod scaffold;

/// Crate version as embedded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Current UTC time as an RFC 3339 timestamp, the format used by every
/// JSON record this crate writes.
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_nonempty() {
        assert!(!version().is_empty());
    }

    #[test]
    fn timestamp_is_rfc3339() {
        let ts = now_timestamp();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}

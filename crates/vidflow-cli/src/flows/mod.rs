//! One module per top-level menu entry.

pub mod config;
pub mod global_config;
pub mod import;
pub mod init;
pub mod other;
pub mod project;

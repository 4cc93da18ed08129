//! CLI commands

pub mod build;
pub mod clean;
pub mod init;
pub mod list;
pub mod search;
pub mod theme;

//! CLI command implementations

pub mod utils;

pub mod claim;
pub mod completions;
pub mod dashboard;
pub mod food;
pub mod import;
pub mod init;
pub mod provider;
pub mod receiver;
pub mod report;

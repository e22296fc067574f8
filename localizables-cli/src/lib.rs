//! CLI library for testing purposes

pub mod config;
pub mod logging;
pub mod output;
pub mod update;
pub mod validation;

pub use config::Config;
pub use update::{FileOptions, FolderOptions, run_file_command, run_folder_command};

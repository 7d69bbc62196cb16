pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::cli::LocalStorage;
pub use crate::core::archiver::{archive, Archiver};
pub use crate::domain::model::{ArchivePlan, ArchiveReport, FileEntry, Group, WrittenArchive};
pub use crate::utils::error::{ArchiveError, Result};

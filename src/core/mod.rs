pub mod archiver;
pub mod grouping;

pub use crate::domain::model::{ArchivePlan, ArchiveReport, FileEntry, Group};
pub use crate::domain::ports::ArchiveStorage;
pub use crate::utils::error::Result;

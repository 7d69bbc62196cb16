use std::path::PathBuf;
use thiserror::Error;

/// Why a single group's archive could not be produced.
#[derive(Error, Debug)]
pub enum WriteCause {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip operation failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("two files would be stored as '{0}'")]
    DuplicateEntry(String),

    #[error("archive would overwrite its own input file {}", .0.display())]
    OverwritesInput(PathBuf),
}

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("No input directory selected.")]
    MissingInputDirectory,

    #[error("No output directory selected.")]
    MissingOutputDirectory,

    #[error("Cannot list input directory {}: {source}", path.display())]
    ListingFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write archive {} for group '{group}': {source}", archive.display())]
    WriteFailure {
        group: String,
        archive: PathBuf,
        #[source]
        source: WriteCause,
    },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caught before any filesystem access.
    Validation,
    /// Reading the input directory.
    Source,
    /// Creating or writing an archive.
    Destination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ArchiveError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingInputDirectory
            | Self::MissingOutputDirectory
            | Self::InvalidConfigValue { .. } => ErrorCategory::Validation,
            Self::ListingFailure { .. } => ErrorCategory::Source,
            Self::WriteFailure { .. } => ErrorCategory::Destination,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingInputDirectory
            | Self::MissingOutputDirectory
            | Self::InvalidConfigValue { .. } => ErrorSeverity::Medium,
            Self::ListingFailure { .. } => ErrorSeverity::High,
            Self::WriteFailure { source, .. } => match source {
                WriteCause::Zip(zip::result::ZipError::Io(_)) | WriteCause::Io(_) => {
                    ErrorSeverity::Critical
                }
                _ => ErrorSeverity::High,
            },
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::Source => 1,
            ErrorCategory::Destination => 2,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::MissingInputDirectory => "Pass the directory holding the files to zip".to_string(),
            Self::MissingOutputDirectory => {
                "Pass the directory the archives should be written to".to_string()
            }
            Self::ListingFailure { path, .. } => format!(
                "Check that {} exists, is a directory and is readable",
                path.display()
            ),
            Self::WriteFailure { source, archive, .. } => match source {
                WriteCause::OverwritesInput(_) => {
                    "Use an output directory different from the input directory".to_string()
                }
                WriteCause::DuplicateEntry(_) => "Rename one of the conflicting files".to_string(),
                _ => format!(
                    "Check free space and write permission for {}",
                    archive.parent().unwrap_or(archive.as_path()).display()
                ),
            },
            Self::InvalidConfigValue { field, .. } => format!("Fix the value passed for {}", field),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingInputDirectory | Self::MissingOutputDirectory => self.to_string(),
            Self::ListingFailure { path, source } => {
                format!("Could not read input folder {}: {}", path.display(), source)
            }
            Self::WriteFailure { group, source, .. } => {
                format!("Could not create zip file for '{}': {}", group, source)
            }
            Self::InvalidConfigValue { field, reason, .. } => format!("{}: {}", field, reason),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArchiveError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_categories_and_exit_codes() {
        assert_eq!(
            ArchiveError::MissingInputDirectory.category(),
            ErrorCategory::Validation
        );
        let listing = ArchiveError::ListingFailure {
            path: PathBuf::from("/missing"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(listing.category(), ErrorCategory::Source);
        assert_eq!(listing.exit_code(), 1);

        let write = ArchiveError::WriteFailure {
            group: "a".to_string(),
            archive: PathBuf::from("/out/a.zip"),
            source: WriteCause::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
        };
        assert_eq!(write.category(), ErrorCategory::Destination);
        assert_eq!(write.severity(), ErrorSeverity::Critical);
        assert_eq!(write.exit_code(), 2);
    }

    #[test]
    fn test_write_failure_names_group() {
        let err = ArchiveError::WriteFailure {
            group: "report".to_string(),
            archive: PathBuf::from("/out/report.zip"),
            source: WriteCause::DuplicateEntry("report.txt".to_string()),
        };
        let message = err.to_string();
        assert!(message.contains("'report'"));
        assert!(message.contains("report.txt"));
        assert!(err.user_friendly_message().contains("report"));
    }

    #[test]
    fn test_missing_directory_messages() {
        assert_eq!(
            ArchiveError::MissingInputDirectory.user_friendly_message(),
            "No input directory selected."
        );
        assert_eq!(
            ArchiveError::MissingOutputDirectory.to_string(),
            "No output directory selected."
        );
    }
}

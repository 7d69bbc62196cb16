pub mod cli;

#[cfg(feature = "cli")]
use crate::utils::error::{ArchiveError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{require_directory, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "file-zipper")]
#[command(version)]
#[command(about = "Zip files that share a base name into one archive per name")]
pub struct CliConfig {
    /// Directory holding the files to group
    pub input_dir: Option<PathBuf>,

    /// Directory the archives are written to
    pub output_dir: Option<PathBuf>,

    /// Show the archives that would be created without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the result as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Emit log lines as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Open the output directory in the file browser after a successful run
    #[arg(long)]
    pub open: bool,

    /// Log CPU and memory usage
    #[arg(long)]
    pub monitor: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn input_dir(&self) -> Option<&Path> {
        self.input_dir.as_deref()
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let input_dir = require_directory(self.input_dir(), ArchiveError::MissingInputDirectory)?;
        let output_dir =
            require_directory(self.output_dir(), ArchiveError::MissingOutputDirectory)?;
        validate_path("input_dir", input_dir)?;
        validate_path("output_dir", output_dir)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positional_directories() {
        let config = CliConfig::parse_from(["file-zipper", "in", "out", "--dry-run", "-v"]);
        assert_eq!(config.input_dir(), Some(Path::new("in")));
        assert_eq!(config.output_dir(), Some(Path::new("out")));
        assert!(config.dry_run);
        assert!(config.verbose);
        assert!(!config.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_missing_directories() {
        let config = CliConfig::parse_from(["file-zipper"]);
        assert!(matches!(
            config.validate(),
            Err(ArchiveError::MissingInputDirectory)
        ));

        let config = CliConfig::parse_from(["file-zipper", "in"]);
        assert!(matches!(
            config.validate(),
            Err(ArchiveError::MissingOutputDirectory)
        ));
    }
}

use crate::domain::model::{ArchivePlan, FileEntry};
use crate::utils::error::{ArchiveError, Result};
use std::fs;
use std::path::Path;

/// Strips the final extension from a file name.
///
/// Splits at the last `.`, ignoring leading dots, so `.bashrc` keeps its name,
/// `report.v2.csv` becomes `report.v2` and `trailing.` becomes `trailing`.
pub fn base_name(file_name: &str) -> &str {
    let leading_dots = file_name.len() - file_name.trim_start_matches('.').len();
    match file_name[leading_dots..].rfind('.') {
        Some(dot) => &file_name[..leading_dots + dot],
        None => file_name,
    }
}

/// Lists the direct children of `dir` that are not directories, in listing order.
pub fn scan_directory(dir: &Path) -> Result<Vec<FileEntry>> {
    let listing_failure = |source: std::io::Error| ArchiveError::ListingFailure {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for dir_entry in fs::read_dir(dir).map_err(listing_failure)? {
        let dir_entry = dir_entry.map_err(listing_failure)?;
        let path = dir_entry.path();

        // Follows symlinks, so a link to a directory is skipped too.
        if path.is_dir() {
            tracing::debug!("Skipping directory {}", path.display());
            continue;
        }

        let raw_name = dir_entry.file_name();
        let file_name = match raw_name.to_str() {
            Some(name) => name.to_string(),
            None => {
                let lossy = raw_name.to_string_lossy().into_owned();
                tracing::warn!(
                    "File name {:?} is not valid UTF-8, storing it as '{}'",
                    raw_name,
                    lossy
                );
                lossy
            }
        };

        let base = base_name(&file_name).to_string();
        tracing::debug!("Found {} (group '{}')", file_name, base);
        entries.push(FileEntry {
            path,
            file_name,
            base_name: base,
        });
    }

    Ok(entries)
}

pub fn group_entries(entries: Vec<FileEntry>) -> ArchivePlan {
    entries.into_iter().collect()
}

/// Scans `input_dir` and groups what it finds by base name.
pub fn plan(input_dir: &Path) -> Result<ArchivePlan> {
    let entries = scan_directory(input_dir)?;
    let plan = group_entries(entries);
    tracing::debug!(
        "Planned {} archives from {} files in {}",
        plan.len(),
        plan.file_count(),
        input_dir.display()
    );
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("a.txt"), "a");
        assert_eq!(base_name("report.v2.csv"), "report.v2");
        assert_eq!(base_name("archive.tar.gz"), "archive.tar");
        assert_eq!(base_name("noext"), "noext");
        assert_eq!(base_name(".bashrc"), ".bashrc");
        assert_eq!(base_name("..hidden"), "..hidden");
        assert_eq!(base_name(".config.toml"), ".config");
        assert_eq!(base_name("trailing."), "trailing");
        assert_eq!(base_name(""), "");
    }

    #[test]
    fn test_scan_skips_directories() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("a.txt"), b"a").unwrap();
        std::fs::create_dir(temp_dir.path().join("sub")).unwrap();
        std::fs::write(temp_dir.path().join("sub").join("a.json"), b"nested").unwrap();

        let entries = scan_directory(temp_dir.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].file_name, "a.txt");
        assert_eq!(entries[0].base_name, "a");
    }

    #[test]
    fn test_scan_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does-not-exist");

        match scan_directory(&missing) {
            Err(ArchiveError::ListingFailure { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected ListingFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_scan_file_instead_of_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("plain.txt");
        std::fs::write(&file, b"x").unwrap();

        assert!(matches!(
            scan_directory(&file),
            Err(ArchiveError::ListingFailure { .. })
        ));
    }

    #[test]
    fn test_plan_groups_by_base_name() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["a.txt", "a.json", "b.txt", "report.v2.csv", "report.v2.pdf"] {
            std::fs::write(temp_dir.path().join(name), name.as_bytes()).unwrap();
        }

        let planned = plan(temp_dir.path()).unwrap();
        assert_eq!(planned.len(), 3);
        assert_eq!(planned.file_count(), 5);
        assert_eq!(planned.get("a").unwrap().entries.len(), 2);
        assert_eq!(planned.get("b").unwrap().entries.len(), 1);
        assert_eq!(planned.get("report.v2").unwrap().entries.len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_directory_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(temp_dir.path().join("real"), temp_dir.path().join("link"))
            .unwrap();
        std::fs::write(temp_dir.path().join("kept.txt"), b"k").unwrap();

        let entries = scan_directory(temp_dir.path()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.file_name.as_str()).collect();
        assert_eq!(names, vec!["kept.txt"]);
    }
}

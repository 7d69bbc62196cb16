use crate::domain::ports::ArchiveStorage;
use std::fs::{File, OpenOptions};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Writes archives into a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl ArchiveStorage for LocalStorage {
    type Writer = BufWriter<File>;

    fn create(&self, archive_name: &str) -> std::io::Result<Self::Writer> {
        // The output directory is never created here; a missing one is a write failure.
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.location(archive_name))?;
        Ok(BufWriter::new(file))
    }

    fn root(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_create_truncates_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("a.zip"), b"old contents that are long").unwrap();

        let storage = LocalStorage::new(temp_dir.path());
        let mut writer = storage.create("a.zip").unwrap();
        writer.write_all(b"new").unwrap();
        drop(writer);

        assert_eq!(std::fs::read(temp_dir.path().join("a.zip")).unwrap(), b"new");
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("missing"));
        assert!(storage.create("a.zip").is_err());
    }
}

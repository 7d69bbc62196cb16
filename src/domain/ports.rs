use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

/// Destination for finished archives.
pub trait ArchiveStorage {
    type Writer: Write + Seek;

    /// Opens `archive_name` for writing, truncating anything already there.
    fn create(&self, archive_name: &str) -> std::io::Result<Self::Writer>;

    /// Directory the archives end up in.
    fn root(&self) -> &Path;

    fn location(&self, archive_name: &str) -> PathBuf {
        self.root().join(archive_name)
    }
}

use crate::config::cli::LocalStorage;
use crate::core::grouping;
use crate::domain::model::{ArchivePlan, ArchiveReport, FileEntry, Group, WrittenArchive};
use crate::domain::ports::ArchiveStorage;
use crate::utils::error::{ArchiveError, Result, WriteCause};
use crate::utils::validation::require_directory;
use chrono::{DateTime, Datelike, Local, Timelike};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Seek, Write};
use std::path::{Path, PathBuf};
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

/// Groups the files directly inside `input_dir` by base name and writes one
/// `<base name>.zip` per group into `output_dir`.
///
/// Both directories are checked for presence before anything touches the
/// filesystem. The run stops at the first group that cannot be written;
/// archives finished before that point are left in place.
pub fn archive(input_dir: Option<&Path>, output_dir: Option<&Path>) -> Result<ArchiveReport> {
    let input_dir = require_directory(input_dir, ArchiveError::MissingInputDirectory)?;
    let output_dir = require_directory(output_dir, ArchiveError::MissingOutputDirectory)?;

    Archiver::new(LocalStorage::new(output_dir)).run(input_dir)
}

pub struct Archiver<S: ArchiveStorage> {
    storage: S,
}

impl<S: ArchiveStorage> Archiver<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn run(&self, input_dir: &Path) -> Result<ArchiveReport> {
        let plan = grouping::plan(input_dir)?;
        self.write_plan(&plan)
    }

    pub fn write_plan(&self, plan: &ArchivePlan) -> Result<ArchiveReport> {
        let mut report = ArchiveReport::new(self.storage.root());

        for group in plan {
            let written = self.write_group(group)?;
            tracing::info!(
                "Created {} ({} files)",
                written.path.display(),
                written.entries.len()
            );
            report.archives.push(written);
        }

        Ok(report)
    }

    /// Writes one group. The writer lives only for the duration of this call.
    pub fn write_group(&self, group: &Group) -> Result<WrittenArchive> {
        let archive_name = group.archive_name();
        let archive_path = self.storage.location(&archive_name);
        let write_failure = |source: WriteCause| ArchiveError::WriteFailure {
            group: group.base_name.clone(),
            archive: archive_path.clone(),
            source,
        };

        check_entry_names(group).map_err(write_failure)?;
        if let Some(input) = find_own_input(group, &archive_path) {
            return Err(write_failure(WriteCause::OverwritesInput(input)));
        }

        let writer = self
            .storage
            .create(&archive_name)
            .map_err(|e| write_failure(e.into()))?;
        let entries = write_entries(writer, &group.entries).map_err(write_failure)?;

        Ok(WrittenArchive {
            base_name: group.base_name.clone(),
            path: archive_path.clone(),
            entries,
        })
    }
}

fn write_entries<W: Write + Seek>(
    writer: W,
    entries: &[FileEntry],
) -> std::result::Result<Vec<String>, WriteCause> {
    let mut zip = ZipWriter::new(writer);
    let mut stored = Vec::with_capacity(entries.len());

    for entry in entries {
        let mut source = File::open(&entry.path)?;
        let metadata = source.metadata()?;

        tracing::debug!("Adding {} as {}", entry.path.display(), entry.file_name);
        zip.start_file(entry.file_name.as_str(), entry_options(&metadata))?;
        io::copy(&mut source, &mut zip)?;
        stored.push(entry.file_name.clone());
    }

    let mut writer = zip.finish()?;
    writer.flush()?;
    Ok(stored)
}

/// Deflate rather than the stored (uncompressed) method; entries of 4 GiB
/// and up are written with ZIP64 extensions.
fn entry_options(metadata: &fs::Metadata) -> SimpleFileOptions {
    let mut options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .large_file(metadata.len() >= u64::from(u32::MAX));

    if let Some(modified) = metadata.modified().ok().and_then(zip_timestamp) {
        options = options.last_modified_time(modified);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        options = options.unix_permissions(metadata.permissions().mode() & 0o7777);
    }

    options
}

/// Converts a filesystem timestamp to the zip format's local-time representation.
/// Returns `None` outside the representable range (1980..=2107).
fn zip_timestamp(modified: std::time::SystemTime) -> Option<zip::DateTime> {
    let local: DateTime<Local> = modified.into();
    let year = u16::try_from(local.year()).ok()?;
    zip::DateTime::from_date_and_time(
        year,
        local.month() as u8,
        local.day() as u8,
        local.hour() as u8,
        local.minute() as u8,
        local.second() as u8,
    )
    .ok()
}

fn check_entry_names(group: &Group) -> std::result::Result<(), WriteCause> {
    let mut seen = HashSet::new();
    for entry in &group.entries {
        if !seen.insert(entry.file_name.as_str()) {
            return Err(WriteCause::DuplicateEntry(entry.file_name.clone()));
        }
    }
    Ok(())
}

/// Finds a group member that is the very file the archive would be written to.
fn find_own_input(group: &Group, archive_path: &Path) -> Option<PathBuf> {
    let target = fs::canonicalize(archive_path).ok()?;
    group
        .entries
        .iter()
        .find(|entry| fs::canonicalize(&entry.path).is_ok_and(|path| path == target))
        .map(|entry| entry.path.clone())
}

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A non-directory entry found directly inside the input directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: PathBuf,
    /// Final path component; used verbatim as the stored name inside the archive.
    pub file_name: String,
    pub base_name: String,
}

/// All entries sharing one base name, in directory-listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub base_name: String,
    pub entries: Vec<FileEntry>,
}

impl Group {
    pub fn new(base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            entries: Vec::new(),
        }
    }

    pub fn archive_name(&self) -> String {
        format!("{}.zip", self.base_name)
    }
}

/// Groups keyed by base name. Keeps the order in which base names were first seen.
#[derive(Debug, Clone, Default)]
pub struct ArchivePlan {
    groups: Vec<Group>,
    index: HashMap<String, usize>,
}

impl ArchivePlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: FileEntry) {
        let position = match self.index.get(&entry.base_name) {
            Some(&position) => position,
            None => {
                let position = self.groups.len();
                self.index.insert(entry.base_name.clone(), position);
                self.groups.push(Group::new(entry.base_name.clone()));
                position
            }
        };
        self.groups[position].entries.push(entry);
    }

    pub fn get(&self, base_name: &str) -> Option<&Group> {
        self.index.get(base_name).map(|&position| &self.groups[position])
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.groups.iter().map(|group| group.entries.len()).sum()
    }
}

impl FromIterator<FileEntry> for ArchivePlan {
    fn from_iter<I: IntoIterator<Item = FileEntry>>(iter: I) -> Self {
        let mut plan = Self::new();
        for entry in iter {
            plan.insert(entry);
        }
        plan
    }
}

impl<'a> IntoIterator for &'a ArchivePlan {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenArchive {
    pub base_name: String,
    pub path: PathBuf,
    pub entries: Vec<String>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveReport {
    pub output_dir: PathBuf,
    pub archives: Vec<WrittenArchive>,
}

impl ArchiveReport {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            archives: Vec::new(),
        }
    }

    pub fn archive_count(&self) -> usize {
        self.archives.len()
    }

    pub fn file_count(&self) -> usize {
        self.archives.iter().map(|archive| archive.entries.len()).sum()
    }
}

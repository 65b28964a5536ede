use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
}

/// One child of a listed directory, before any filtering.
#[derive(Debug, Clone)]
pub struct RawEntry {
    /// File name
    pub name: String,
    pub full_path: PathBuf,
    /// Kind of the entry, or of its target for symlinks
    pub kind: EntryKind,
    pub is_symlink: bool,
    /// Last modification time, when the platform reports one
    pub last_modified: Option<DateTime<Utc>>,
}

impl RawEntry {
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// An entry as handed to callers of the browser and the search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub location: String,
    pub display_name: String,
    pub is_folder: bool,
    pub last_modified: Option<DateTime<Utc>>,
}

impl DirectoryEntry {
    pub fn path(&self) -> &Path {
        Path::new(&self.location)
    }

    /// Directory containing this entry, as a location string.
    pub fn parent_location(&self) -> String {
        self.path()
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl From<RawEntry> for DirectoryEntry {
    fn from(raw: RawEntry) -> Self {
        DirectoryEntry {
            location: raw.full_path.to_string_lossy().into_owned(),
            is_folder: raw.is_dir(),
            display_name: raw.name,
            last_modified: raw.last_modified,
        }
    }
}

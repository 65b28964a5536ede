use std::{
    fs::{self, read_dir},
    io,
    path::Path,
    time::SystemTime,
};

use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::{
    error::FsError,
    record::{EntryKind, RawEntry},
};

/// List the immediate children of `dir`.
///
/// Fails when `dir` cannot be read as a directory. Entries that cannot be
/// inspected, names that are not valid UTF-8, and special files are skipped.
/// Nothing is cached: every call reflects the filesystem at call time.
pub fn list_dir(dir: &Path) -> Result<Vec<RawEntry>, FsError> {
    let meta = fs::metadata(dir).map_err(|e| FsError::from_io(dir, e))?;
    if !meta.is_dir() {
        return Err(FsError::NotADirectory(dir.to_path_buf()));
    }

    let rd = read_dir(dir).map_err(|e| FsError::from_io(dir, e))?;

    let mut entries = Vec::new();
    for entry_res in rd {
        let entry = match entry_res {
            Ok(e) => e,
            Err(e) => {
                warn!("[lister] error reading entry in {:?}: {e}", dir);
                continue;
            }
        };

        match inspect_entry(&entry) {
            Ok(Some(raw)) => entries.push(raw),
            Ok(None) => {}
            Err(e) => {
                debug!("[lister] skipping {:?}: {e}", entry.path());
            }
        }
    }

    Ok(entries)
}

fn inspect_entry(entry: &fs::DirEntry) -> io::Result<Option<RawEntry>> {
    let name = match entry.file_name().into_string() {
        Ok(s) => s,
        Err(os) => {
            debug!("[lister] non UTF-8 name {:?}", os);
            return Ok(None);
        }
    };

    let full_path = entry.path();
    let link_meta = entry.metadata()?;
    let is_symlink = link_meta.is_symlink();

    // Classify symlinks by what they point at; dangling links are dropped.
    let meta = if is_symlink {
        match fs::metadata(&full_path) {
            Ok(m) => m,
            Err(_) => return Ok(None),
        }
    } else {
        link_meta
    };

    let kind = if meta.is_dir() {
        EntryKind::Dir
    } else if meta.is_file() {
        EntryKind::File
    } else {
        return Ok(None);
    };

    Ok(Some(RawEntry {
        name,
        full_path,
        kind,
        is_symlink,
        last_modified: to_datetime(meta.modified().ok()),
    }))
}

fn to_datetime(t: Option<SystemTime>) -> Option<DateTime<Utc>> {
    t.map(DateTime::<Utc>::from)
}

#[cfg(test)]
#[path = "lister_tests.rs"]
mod tests;

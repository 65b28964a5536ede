use std::path::Path;

use hashbrown::HashMap;
use log::debug;

use crate::{
    collate::{compare_names, is_document_name},
    context::ScanContext,
    error::FsError,
    lister::list_dir,
    record::DirectoryEntry,
};

/// One directory's visible contents: folders first, then documents, each
/// group in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderListing {
    entries: Vec<DirectoryEntry>,
    folder_count: usize,
}

impl FolderListing {
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<DirectoryEntry> {
        self.entries
    }

    pub fn folders(&self) -> &[DirectoryEntry] {
        &self.entries[..self.folder_count]
    }

    pub fn files(&self) -> &[DirectoryEntry] {
        &self.entries[self.folder_count..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// List `path` one level deep, keeping folders and PDF documents.
pub fn browse(ctx: &ScanContext, path: &Path) -> Result<FolderListing, FsError> {
    ctx.ensure_access(path)?;

    let parent_is_root = ctx.rules.is_storage_root(path);
    let raw = list_dir(path)?;
    let listed = raw.len();

    let mut folders = Vec::new();
    let mut files = Vec::new();
    for entry in raw {
        if ctx.rules.excludes(&entry, parent_is_root) {
            continue;
        }
        if entry.is_dir() {
            folders.push(DirectoryEntry::from(entry));
        } else if is_document_name(&entry.name) {
            files.push(DirectoryEntry::from(entry));
        }
    }

    folders.sort_by(|a, b| compare_names(&a.display_name, &b.display_name));
    files.sort_by(|a, b| compare_names(&a.display_name, &b.display_name));

    debug!(
        "[browse] {}: {} listed, {} folders, {} documents",
        path.display(),
        listed,
        folders.len(),
        files.len()
    );

    let folder_count = folders.len();
    folders.extend(files);

    Ok(FolderListing {
        entries: folders,
        folder_count,
    })
}

/// Group a flat entry list by parent directory, parents in name order and
/// entries keeping their relative order.
pub fn group_by_parent(entries: &[DirectoryEntry]) -> Vec<(String, Vec<DirectoryEntry>)> {
    let mut groups: HashMap<String, Vec<DirectoryEntry>> = HashMap::new();
    for entry in entries {
        groups
            .entry(entry.parent_location())
            .or_default()
            .push(entry.clone());
    }

    let mut groups: Vec<_> = groups.into_iter().collect();
    groups.sort_by(|(a, _), (b, _)| compare_names(a, b));
    groups
}

#[cfg(test)]
#[path = "browser_tests.rs"]
mod tests;

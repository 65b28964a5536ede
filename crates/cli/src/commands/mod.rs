pub mod access;
pub mod browse;
pub mod favorites;
pub mod open;
pub mod recents;
pub mod search;

use std::{
    io,
    path::{Path, PathBuf},
};

use clap::{Args, Subcommand};
use folio_fs::{
    DirectoryEntry, ExcludeRules, IgnoreEngine, IgnoreOptions, PermissionGate, ScanContext,
    absolutize, group_by_parent,
};
use folio_runtime::{DocumentIndex, FileStore, default_storage_root};

pub use access::AccessArgs;
pub use browse::BrowseArgs;
pub use favorites::FavoritesArgs;
pub use open::OpenArgs;
pub use recents::RecentsArgs;
pub use search::{AllArgs, SearchArgs};

use crate::printer::{ColorChoice, OutputFormat, PrintContext, PrinterConfig, Row, RowPrinter};

/// Common error type for command handlers
pub type CommandResult<T> = anyhow::Result<T>;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check storage access, optionally asking for more.
    Access(AccessArgs),

    /// List folders and PDF documents in one directory.
    ///
    /// Example:
    ///   folio browse ~/Documents
    Browse(BrowseArgs),

    /// Find PDF documents whose name contains a query.
    ///
    /// Example:
    ///   folio search invoice
    ///   folio search --root ~/Downloads --group report
    Search(SearchArgs),

    /// List every PDF document under the storage root, newest first.
    All(AllArgs),

    /// Record a document as opened and print its viewer source.
    Open(OpenArgs),

    /// Show recently opened documents.
    Recents(RecentsArgs),

    /// Show or change favorite documents.
    Favorites(FavoritesArgs),
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone, Default)]
pub struct GlobalOptions {
    /// Storage root of interest (defaults to FOLIO_STORAGE_ROOT or the home directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub storage_root: Option<PathBuf>,

    /// Directory holding recents and favorites (defaults to FOLIO_STATE_DIR or the XDG state dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub state_dir: Option<PathBuf>,

    /// Never list or descend into this path (repeatable)
    #[arg(long = "exclude", global = true, value_name = "PATH")]
    pub excludes: Vec<PathBuf>,

    /// Gitignore-style pattern to hide, relative to the storage root (repeatable)
    #[arg(long = "ignore", global = true, value_name = "PATTERN")]
    pub ignore_patterns: Vec<String>,
}

impl GlobalOptions {
    /// Storage root made absolute, so relative spellings like `./docs`
    /// match the paths listings produce.
    pub fn storage_root(&self) -> PathBuf {
        let root = self
            .storage_root
            .clone()
            .unwrap_or_else(default_storage_root);
        absolutize(&root)
    }

    pub fn scan_context(&self) -> CommandResult<ScanContext> {
        let root = self.storage_root();
        let ignore = IgnoreEngine::new(
            &root,
            IgnoreOptions {
                patterns: self.ignore_patterns.clone(),
                ..IgnoreOptions::default()
            },
        )?;

        let gate = PermissionGate::probing(root.clone());
        let mut rules = ExcludeRules::new(root).with_ignore(ignore);
        // Added on top of the system defaults a `/` root starts with.
        for path in &self.excludes {
            rules.user_excludes.add_root(path.clone());
        }

        Ok(ScanContext::new(gate, rules))
    }

    pub fn document_index(&self) -> DocumentIndex<FileStore> {
        let store = match &self.state_dir {
            Some(dir) => FileStore::new(dir.clone()),
            None => FileStore::open_default(),
        };
        DocumentIndex::new(store)
    }
}

/// Output flags shared by listing commands.
#[derive(Debug, Args, Clone)]
pub struct OutputOptions {
    /// Output results as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,

    /// When to use colors: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Suppress the summary line
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl OutputOptions {
    pub fn printer_config(&self, limit: usize) -> PrinterConfig {
        PrinterConfig {
            format: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Human
            },
            color: ColorChoice::parse(&self.color),
            limit,
            show_summary: !self.quiet,
        }
    }
}

/// Path for a location given on the command line. `file://` URIs become
/// paths; anything else is taken as a path verbatim.
pub fn location_to_path(location: &str) -> PathBuf {
    match location.strip_prefix("file://") {
        Some(rest) => PathBuf::from(rest),
        None => PathBuf::from(location),
    }
}

/// Whether `location` names content only the platform can resolve.
pub fn is_content_uri(location: &str) -> bool {
    location.starts_with("content://")
}

pub(crate) fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Stream `entries` through `printer`, under parent-directory headings when
/// `grouped`.
pub(crate) fn print_entries(
    printer: &mut dyn RowPrinter,
    ctx: &PrintContext,
    entries: &[DirectoryEntry],
    grouped: bool,
) -> io::Result<()> {
    printer.begin(ctx)?;

    if grouped {
        let mut rank = 0;
        for (parent, group) in group_by_parent(entries) {
            for entry in &group {
                rank += 1;
                printer.print_row(&entry_row(rank, entry, Some(&parent)), ctx)?;
            }
        }
    } else {
        for (i, entry) in entries.iter().enumerate() {
            printer.print_row(&entry_row(i + 1, entry, None), ctx)?;
        }
    }

    printer.finish(ctx)
}

fn entry_row<'a>(rank: usize, entry: &'a DirectoryEntry, group: Option<&'a str>) -> Row<'a> {
    Row {
        rank,
        location: &entry.location,
        name: &entry.display_name,
        is_folder: entry.is_folder,
        timestamp: entry.last_modified,
        group,
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

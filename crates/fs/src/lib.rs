mod browser;
mod collate;
mod context;
mod error;
mod excludes;
mod lister;
mod permission;
mod record;
mod search;

pub use browser::{FolderListing, browse, group_by_parent};
pub use collate::{compare_names, is_document_name};
pub use context::ScanContext;
pub use error::FsError;
pub use excludes::{ExcludeRules, IgnoreEngine, IgnoreOptions, UserExcludes, absolutize};
pub use lister::list_dir;
pub use permission::{
    Access, AccessTier, Elevation, PermissionGate, PermissionSubsystem, ProbeSubsystem,
};
pub use record::{DirectoryEntry, EntryKind, RawEntry};
pub use search::{
    CancelToken, SearchLimits, SearchOutcome, latest_documents, search, search_with,
};

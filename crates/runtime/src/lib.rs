pub mod config;
pub mod library;
pub mod logging;
pub mod store;

pub use config::{
    DEFAULT_CATALOG_LIMIT, DEFAULT_MAX_DIRS, DEFAULT_SYSTEM_SKIP_PREFIXES, DOCUMENT_EXTENSION,
    RESERVED_ROOT_NAMES, default_storage_root, max_dirs_from_env, settings_intent, state_dir,
};
pub use library::{DocumentIndex, IndexedDocument, ViewerSource, display_name_from_location};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

pub use logging::init;

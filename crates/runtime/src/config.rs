use std::path::PathBuf;

pub const PROGRAM_NAME: &str = "folio";
pub const PROGRAM_LOG_LEVEL: &str = "FOLIO_LOG_LEVEL";

/// Overrides the number of directories a single search may visit.
pub const MAX_DIRS_ENV: &str = "FOLIO_MAX_DIRS";
/// Overrides the storage root of interest (the directory browsing starts at).
pub const STORAGE_ROOT_ENV: &str = "FOLIO_STORAGE_ROOT";
/// Overrides where the recents/favorites store lives.
pub const STATE_DIR_ENV: &str = "FOLIO_STATE_DIR";

/// Package id used to build the settings intent for the broad-access grant.
pub const APP_PACKAGE: &str = "com.folio.reader";

/// Directories a single search visits before giving up.
pub const DEFAULT_MAX_DIRS: usize = 200;

/// Documents listed by the catalog when no limit is given.
pub const DEFAULT_CATALOG_LIMIT: usize = 100;

/// Recents list capacity.
pub const MAX_RECENTS: usize = 20;

pub const RECENTS_KEY: &str = "@pdf_recents";
pub const FAVORITES_KEY: &str = "@pdf_favorites";

/// Extension (without dot, lowercase) of the documents we surface.
pub const DOCUMENT_EXTENSION: &str = "pdf";

/// Folder names hidden when listing the storage root itself.
/// Compared exactly; these are OS-owned and never hold user documents.
pub const RESERVED_ROOT_NAMES: &[&str] = &["Android", "LOST.DIR", "lost+found"];

/// System-ish directories to skip when the storage root is `/`.
pub const DEFAULT_SYSTEM_SKIP_PREFIXES: &[&str] = &[
    "/proc",
    "/sys",
    "/dev",
    "/run",
    "/var/run",
    "/var/tmp",
    "/private/tmp",
];

pub fn xdg_or_home(xdg_var: &str, home_suffix: &str) -> PathBuf {
    if let Some(dir) = std::env::var_os(xdg_var) {
        PathBuf::from(dir)
    } else {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(home_suffix)
    }
}

/// Storage root of interest: the shared-storage mount on Android,
/// the user's home everywhere else.
pub fn default_storage_root() -> PathBuf {
    if let Some(dir) = std::env::var_os(STORAGE_ROOT_ENV)
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "android")]
    {
        PathBuf::from("/storage/emulated/0")
    }
    #[cfg(not(target_os = "android"))]
    {
        dirs::home_dir()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}

/// Directory holding the persisted document lists.
pub fn state_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(STATE_DIR_ENV)
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }

    if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME")
        && !xdg_state.is_empty()
    {
        return PathBuf::from(xdg_state).join(PROGRAM_NAME);
    }

    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|p| p.join(PROGRAM_NAME))
        .unwrap_or_else(|| xdg_or_home("XDG_DATA_HOME", ".local/share").join(PROGRAM_NAME))
}

/// Visited-directory budget, honouring `FOLIO_MAX_DIRS` when it parses to a
/// positive number.
pub fn max_dirs_from_env() -> usize {
    std::env::var(MAX_DIRS_ENV)
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_MAX_DIRS)
}

/// Settings intent target for the all-files grant.
pub fn settings_intent() -> String {
    format!("package:{APP_PACKAGE}")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

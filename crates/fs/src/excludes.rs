use folio_runtime::{DEFAULT_SYSTEM_SKIP_PREFIXES, RESERVED_ROOT_NAMES};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::{
    borrow::Cow,
    path::{self, Path, PathBuf},
};

use crate::record::RawEntry;

/// Gitignore-style patterns supplied by the user.
pub struct IgnoreEngine {
    matcher: Gitignore,
}

/// Absolute path prefixes never listed or descended into.
#[derive(Debug, Clone, Default)]
pub struct UserExcludes {
    roots: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct IgnoreOptions {
    /// Inline patterns, one per gitignore line
    pub patterns: Vec<String>,

    /// Paths to additional ignore files
    pub extra_ignore_files: Box<[PathBuf]>,
}

impl Default for IgnoreEngine {
    fn default() -> Self {
        IgnoreEngine {
            matcher: Gitignore::empty(),
        }
    }
}

impl IgnoreEngine {
    /// Build an engine whose patterns are anchored at `root`.
    pub fn new(root: &Path, options: IgnoreOptions) -> Result<Self, ignore::Error> {
        // The builder drops a leading `./`, so a relative root would never
        // prefix the paths the lister hands back.
        let mut builder = GitignoreBuilder::new(absolutize(root));

        for pat in &options.patterns {
            builder.add_line(None, pat)?;
        }

        for path in &*options.extra_ignore_files {
            if let Some(e) = builder.add(path) {
                return Err(e);
            }
        }

        Ok(IgnoreEngine {
            matcher: builder.build()?,
        })
    }

    #[inline]
    #[must_use]
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        if self.matcher.is_empty() {
            return false;
        }

        let path: Cow<'_, Path> = if path.is_relative() {
            Cow::Owned(absolutize(path))
        } else {
            Cow::Borrowed(path)
        };

        // Patterns only apply beneath the root they were built for.
        if !path.starts_with(self.matcher.path()) {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(&path, is_dir)
            .is_ignore()
    }
}

/// `path` joined onto the working directory with `.` components removed.
/// Symlinks are left alone; if the working directory is gone, `path` is
/// returned as given.
pub fn absolutize(path: &Path) -> PathBuf {
    path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

impl UserExcludes {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        let mut ux = UserExcludes::default();
        for root in roots {
            ux.add_root(root);
        }
        ux
    }

    /// Pseudo filesystems that only matter when browsing from `/`.
    pub fn with_system_defaults() -> Self {
        UserExcludes::new(
            DEFAULT_SYSTEM_SKIP_PREFIXES
                .iter()
                .map(PathBuf::from)
                .collect(),
        )
    }

    pub fn add_root(&mut self, root: PathBuf) {
        // Canonicalize here because on certain systems, /var/run
        // actually points to /run.
        let root = root.canonicalize().unwrap_or(root);

        // Already covered by a broader root.
        if self.roots.iter().any(|existing| root.starts_with(existing)) {
            return;
        }

        self.roots.retain(|existing| !existing.starts_with(&root));
        self.roots.push(root);
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    #[inline]
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.roots.iter().any(|root| path.starts_with(root))
    }
}

/// Everything that decides whether a listed entry is shown or descended into.
pub struct ExcludeRules {
    storage_root: PathBuf,
    canonical_root: Option<PathBuf>,
    reserved_names: Vec<String>,
    pub user_excludes: UserExcludes,
    pub ignore: IgnoreEngine,
}

impl ExcludeRules {
    /// Rules for `storage_root` with the stock reserved names and, when the
    /// root is `/`, the system pseudo filesystems.
    pub fn new(storage_root: PathBuf) -> Self {
        let storage_root = absolutize(&storage_root);
        let user_excludes = if storage_root == Path::new("/") {
            UserExcludes::with_system_defaults()
        } else {
            UserExcludes::default()
        };

        ExcludeRules {
            canonical_root: storage_root.canonicalize().ok(),
            storage_root,
            reserved_names: RESERVED_ROOT_NAMES.iter().map(|s| s.to_string()).collect(),
            user_excludes,
            ignore: IgnoreEngine::default(),
        }
    }

    pub fn with_reserved_names(mut self, names: Vec<String>) -> Self {
        self.reserved_names = names;
        self
    }

    pub fn with_user_excludes(mut self, excludes: UserExcludes) -> Self {
        self.user_excludes = excludes;
        self
    }

    pub fn with_ignore(mut self, ignore: IgnoreEngine) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    /// Whether `dir` is the storage root of interest, allowing for a
    /// different spelling of the same directory.
    pub fn is_storage_root(&self, dir: &Path) -> bool {
        if dir == self.storage_root {
            return true;
        }
        match (&self.canonical_root, dir.canonicalize()) {
            (Some(root), Ok(dir)) => dir == *root,
            _ => false,
        }
    }

    #[inline]
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_names.iter().any(|r| r == name)
    }

    /// Whether `entry`, listed from `parent`, must be left out.
    /// `parent_is_root` is [`ExcludeRules::is_storage_root`] of `parent`,
    /// computed once per listing.
    pub fn excludes(&self, entry: &RawEntry, parent_is_root: bool) -> bool {
        entry.is_hidden()
            || (parent_is_root && self.is_reserved(&entry.name))
            || self.user_excludes.is_excluded(&entry.full_path)
            || self.ignore.is_ignored(&entry.full_path, entry.is_dir())
    }
}

#[cfg(test)]
#[path = "excludes_tests.rs"]
mod tests;

use std::{
    cmp::Ordering as CmpOrdering,
    collections::VecDeque,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use folio_runtime::{DEFAULT_CATALOG_LIMIT, DEFAULT_MAX_DIRS, max_dirs_from_env};
use hashbrown::HashSet;
use log::{debug, warn};

use crate::{
    collate::{compare_names, is_document_name, name_contains},
    context::ScanContext,
    error::FsError,
    lister::list_dir,
    record::DirectoryEntry,
};

/// Shared flag a caller flips to stop a running search between directory
/// visits.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Work budget for one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Directories listed before the search stops, root included.
    pub max_dirs: usize,
    /// Deepest directory level descended into; the root is depth 0.
    pub max_depth: Option<usize>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_dirs: DEFAULT_MAX_DIRS,
            max_depth: None,
        }
    }
}

impl SearchLimits {
    /// Defaults with `FOLIO_MAX_DIRS` applied.
    pub fn from_env() -> Self {
        Self {
            max_dirs: max_dirs_from_env(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Matching documents in name order.
    pub results: Vec<DirectoryEntry>,
    pub visited_dirs: usize,
    /// The budget ran out with directories still queued.
    pub truncated: bool,
    /// The token was cancelled; `results` holds what was found until then.
    pub cancelled: bool,
}

/// Documents under `root` whose name contains `query`, ignoring case.
pub fn search(
    ctx: &ScanContext,
    root: &Path,
    query: &str,
    limits: SearchLimits,
) -> Result<Vec<DirectoryEntry>, FsError> {
    search_with(ctx, root, query, limits, &CancelToken::new()).map(|o| o.results)
}

/// Breadth-first search from `root`, listing at most `limits.max_dirs`
/// directories one at a time.
///
/// Shallow matches are found first, so a search that hits the budget still
/// returns the documents closest to `root`. A directory that cannot be
/// listed is skipped; only a `root` that is missing, not a directory, or
/// behind a denied gate fails the call.
pub fn search_with(
    ctx: &ScanContext,
    root: &Path,
    query: &str,
    limits: SearchLimits,
    cancel: &CancelToken,
) -> Result<SearchOutcome, FsError> {
    ctx.ensure_access(root)?;

    let meta = std::fs::metadata(root).map_err(|e| FsError::from_io(root, e))?;
    if !meta.is_dir() {
        return Err(FsError::NotADirectory(root.to_path_buf()));
    }

    let needle = query.to_lowercase();
    let mut outcome = SearchOutcome::default();

    let mut queue: VecDeque<(PathBuf, usize)> = VecDeque::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();
    queue.push_back((root.to_path_buf(), 0));
    seen.insert(root.to_path_buf());

    while outcome.visited_dirs < limits.max_dirs {
        let (dir, depth) = match next_dir(&mut queue, cancel) {
            Next::Visit(dir, depth) => (dir, depth),
            Next::Exhausted => break,
            Next::Cancelled => {
                debug!(
                    "[search] cancelled after {} dirs, {} hits",
                    outcome.visited_dirs,
                    outcome.results.len()
                );
                outcome.cancelled = true;
                break;
            }
        };
        outcome.visited_dirs += 1;

        let entries = match list_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("[search] skipping {}: {e}", dir.display());
                continue;
            }
        };

        let parent_is_root = ctx.rules.is_storage_root(&dir);
        let may_descend = limits.max_depth.is_none_or(|max| depth < max);

        for entry in entries {
            if ctx.rules.excludes(&entry, parent_is_root) {
                continue;
            }

            if entry.is_dir() {
                // Symlinked directories are shown by browse but never
                // followed here, which keeps cycles out of the queue.
                if may_descend && !entry.is_symlink && seen.insert(entry.full_path.clone()) {
                    queue.push_back((entry.full_path, depth + 1));
                }
            } else if is_document_name(&entry.name) && name_contains(&entry.name, &needle) {
                outcome.results.push(DirectoryEntry::from(entry));
            }
        }
    }

    outcome.truncated = !outcome.cancelled && !queue.is_empty();
    if outcome.truncated {
        debug!(
            "[search] budget of {} dirs reached with {} queued",
            limits.max_dirs,
            queue.len()
        );
    }

    outcome
        .results
        .sort_by(|a, b| compare_names(&a.display_name, &b.display_name));

    Ok(outcome)
}

#[derive(Debug, PartialEq, Eq)]
enum Next {
    Visit(PathBuf, usize),
    Exhausted,
    Cancelled,
}

/// Pop the next queued directory. A token flipped once nothing is left to
/// visit does not count as a cancellation.
fn next_dir(queue: &mut VecDeque<(PathBuf, usize)>, cancel: &CancelToken) -> Next {
    if queue.is_empty() {
        return Next::Exhausted;
    }
    if cancel.is_cancelled() {
        return Next::Cancelled;
    }
    match queue.pop_front() {
        Some((dir, depth)) => Next::Visit(dir, depth),
        None => Next::Exhausted,
    }
}

/// Every document under `root`, newest modification first, at most `limit`
/// of them (`None` uses the stock catalog size).
pub fn latest_documents(
    ctx: &ScanContext,
    root: &Path,
    limit: Option<usize>,
    limits: SearchLimits,
    cancel: &CancelToken,
) -> Result<SearchOutcome, FsError> {
    let mut outcome = search_with(ctx, root, "", limits, cancel)?;

    outcome.results.sort_by(newest_first);
    outcome
        .results
        .truncate(limit.unwrap_or(DEFAULT_CATALOG_LIMIT));

    Ok(outcome)
}

fn newest_first(a: &DirectoryEntry, b: &DirectoryEntry) -> CmpOrdering {
    match (a.last_modified, b.last_modified) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => CmpOrdering::Less,
        (None, Some(_)) => CmpOrdering::Greater,
        (None, None) => CmpOrdering::Equal,
    }
    .then_with(|| compare_names(&a.display_name, &b.display_name))
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;

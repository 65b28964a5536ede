use std::{
    path::PathBuf,
    process::ExitCode,
    thread,
    time::{Duration, Instant},
};

use clap::Args;
use crossbeam::channel::{self, RecvTimeoutError};
use folio_fs::{
    CancelToken, FsError, ScanContext, SearchLimits, SearchOutcome, latest_documents, search_with,
};
use folio_runtime::DEFAULT_CATALOG_LIMIT;
use log::{debug, error};

use super::{CommandResult, GlobalOptions, OutputOptions, display, print_entries};
use crate::printer::{PrintContext, make_printer};

/// Traversal limits shared by `search` and `all`.
#[derive(Debug, Args)]
pub struct TraversalOptions {
    /// Directory to start from (defaults to the storage root)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Maximum directories to visit (defaults to FOLIO_MAX_DIRS or 200)
    #[arg(long, value_name = "N")]
    pub max_dirs: Option<usize>,

    /// Maximum depth below the root to descend
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Cancel the traversal after this many milliseconds and print what was found
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,
}

impl TraversalOptions {
    fn limits(&self) -> SearchLimits {
        let mut limits = SearchLimits::from_env();
        if let Some(n) = self.max_dirs.filter(|&n| n > 0) {
            limits.max_dirs = n;
        }
        limits.max_depth = self.max_depth;
        limits
    }
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Case-insensitive text the document name must contain
    pub query: String,

    #[command(flatten)]
    pub traversal: TraversalOptions,

    /// Group results by parent directory
    #[arg(long)]
    pub group: bool,

    /// Maximum number of results to display
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Output formatting options
    #[command(flatten)]
    pub output: OutputOptions,
}

#[derive(Debug, Args)]
pub struct AllArgs {
    #[command(flatten)]
    pub traversal: TraversalOptions,

    /// Maximum number of documents to list
    #[arg(long, short = 'n', default_value_t = DEFAULT_CATALOG_LIMIT)]
    pub limit: usize,

    /// Output formatting options
    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(args: SearchArgs, globals: &GlobalOptions) -> ExitCode {
    report("search", execute_search(args, globals))
}

pub fn run_all(args: AllArgs, globals: &GlobalOptions) -> ExitCode {
    report("all", execute_all(args, globals))
}

fn report(kind: &str, result: CommandResult<ExitCode>) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(e) => {
            error!("[{kind}] {e}");
            eprintln!("[{kind}] {e}");
            match e.downcast_ref::<FsError>() {
                Some(fs) if fs.is_permission() => ExitCode::from(1),
                _ => ExitCode::from(2),
            }
        }
    }
}

fn execute_search(args: SearchArgs, globals: &GlobalOptions) -> CommandResult<ExitCode> {
    let ctx = globals.scan_context()?;
    let root = args
        .traversal
        .root
        .clone()
        .unwrap_or_else(|| ctx.storage_root().to_path_buf());
    let limits = args.traversal.limits();
    let query = args.query.clone();

    let started = Instant::now();
    let outcome = run_cancellable(&ctx, args.traversal.timeout_ms, |ctx, cancel| {
        search_with(ctx, &root, &query, limits, cancel)
    })?;

    let mut printer = make_printer(args.output.printer_config(args.limit.unwrap_or(usize::MAX)));
    let print_ctx = PrintContext {
        kind: "search",
        query: Some(&args.query),
        total: outcome.results.len(),
        visited_dirs: Some(outcome.visited_dirs),
        truncated: outcome.truncated,
        cancelled: outcome.cancelled,
        elapsed: Some(started.elapsed()),
    };
    print_entries(printer.as_mut(), &print_ctx, &outcome.results, args.group)?;

    Ok(ExitCode::SUCCESS)
}

fn execute_all(args: AllArgs, globals: &GlobalOptions) -> CommandResult<ExitCode> {
    let ctx = globals.scan_context()?;
    let root = args
        .traversal
        .root
        .clone()
        .unwrap_or_else(|| ctx.storage_root().to_path_buf());
    let limits = args.traversal.limits();
    let limit = args.limit;

    let started = Instant::now();
    let outcome = run_cancellable(&ctx, args.traversal.timeout_ms, |ctx, cancel| {
        latest_documents(ctx, &root, Some(limit), limits, cancel)
    })?;

    let label = display(&root);
    let mut printer = make_printer(args.output.printer_config(usize::MAX));
    let print_ctx = PrintContext {
        kind: "all",
        query: Some(&label),
        total: outcome.results.len(),
        visited_dirs: Some(outcome.visited_dirs),
        truncated: outcome.truncated,
        cancelled: outcome.cancelled,
        elapsed: Some(started.elapsed()),
    };
    print_entries(printer.as_mut(), &print_ctx, &outcome.results, false)?;

    Ok(ExitCode::SUCCESS)
}

/// Run `work` on a worker thread. When `timeout_ms` elapses first the token
/// is cancelled and the partial outcome is still collected.
fn run_cancellable<F>(
    ctx: &ScanContext,
    timeout_ms: Option<u64>,
    work: F,
) -> Result<SearchOutcome, FsError>
where
    F: FnOnce(&ScanContext, &CancelToken) -> Result<SearchOutcome, FsError> + Send,
{
    let cancel = CancelToken::new();
    let (tx, rx) = channel::bounded(1);

    thread::scope(|s| {
        let worker_cancel = cancel.clone();
        s.spawn(move || {
            let _ = tx.send(work(ctx, &worker_cancel));
        });

        let received = match timeout_ms {
            Some(ms) => match rx.recv_timeout(Duration::from_millis(ms)) {
                Ok(result) => Ok(result),
                Err(RecvTimeoutError::Timeout) => {
                    debug!("[search] timeout of {ms}ms reached, cancelling");
                    cancel.cancel();
                    rx.recv()
                }
                Err(RecvTimeoutError::Disconnected) => rx.recv(),
            },
            None => rx.recv(),
        };

        // The worker either sent a result or panicked; a panic resurfaces
        // when the scope joins.
        received.unwrap_or_else(|_| Ok(SearchOutcome::default()))
    })
}

use std::{path::PathBuf, process::ExitCode, time::Instant};

use clap::Args;
use folio_fs::{DirectoryEntry, FsError, browse};
use log::error;

use super::{CommandResult, GlobalOptions, OutputOptions, display, print_entries};
use crate::printer::{PrintContext, make_printer};

#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Directory to list (defaults to the storage root)
    pub path: Option<PathBuf>,

    /// Output formatting options
    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(args: BrowseArgs, globals: &GlobalOptions) -> ExitCode {
    match execute(args, globals) {
        Ok(code) => code,
        Err(e) => {
            error!("[browse] {e}");
            eprintln!("[browse] {e}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: BrowseArgs, globals: &GlobalOptions) -> CommandResult<ExitCode> {
    let ctx = globals.scan_context()?;
    let path = args.path.unwrap_or_else(|| ctx.storage_root().to_path_buf());
    let query = display(&path);

    let started = Instant::now();
    let (entries, code): (Vec<DirectoryEntry>, ExitCode) = match browse(&ctx, &path) {
        Ok(listing) => (listing.into_entries(), ExitCode::SUCCESS),
        Err(e) => {
            // The user asked for this directory: say why it is empty.
            eprintln!("[browse] {e}");
            if let FsError::PermissionDenied(_) = e {
                eprintln!("[browse] run `folio access --request` to grant storage access");
            }
            (Vec::new(), ExitCode::from(1))
        }
    };

    let mut printer = make_printer(args.output.printer_config(usize::MAX));
    let print_ctx = PrintContext {
        kind: "browse",
        query: Some(&query),
        total: entries.len(),
        elapsed: Some(started.elapsed()),
        ..PrintContext::default()
    };

    print_entries(printer.as_mut(), &print_ctx, &entries, false)?;

    Ok(code)
}

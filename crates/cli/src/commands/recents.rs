use std::process::ExitCode;

use clap::Args;
use folio_runtime::IndexedDocument;

use super::{CommandResult, GlobalOptions, OutputOptions};
use crate::printer::{PrintContext, Row, RowPrinter, make_printer};

#[derive(Debug, Args)]
pub struct RecentsArgs {
    /// Number of entries to display
    #[arg(long, short = 'n', default_value = "20")]
    pub limit: usize,

    /// Forget every recent document
    #[arg(long)]
    pub clear: bool,

    /// Forget one location
    #[arg(long, value_name = "LOCATION")]
    pub remove: Option<String>,

    /// Output formatting options
    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(args: RecentsArgs, globals: &GlobalOptions) -> ExitCode {
    match execute(args, globals) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[recents] {e}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: RecentsArgs, globals: &GlobalOptions) -> CommandResult<ExitCode> {
    let index = globals.document_index();

    if args.clear {
        index.clear_recents();
        println!("Recents cleared");
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(location) = args.remove.as_deref() {
        if index.remove_recent(location) {
            println!("Removed {location}");
            return Ok(ExitCode::SUCCESS);
        }
        println!("{location} is not in recents");
        return Ok(ExitCode::from(1));
    }

    let recents = index.list_recents();
    if recents.is_empty() && !args.output.json {
        println!("No recent documents yet.");
        return Ok(ExitCode::SUCCESS);
    }

    let mut printer = make_printer(args.output.printer_config(args.limit));
    print_documents(printer.as_mut(), "recents", &recents)?;

    Ok(ExitCode::SUCCESS)
}

/// Print index documents with their open time, shared with `favorites`.
pub(crate) fn print_documents(
    printer: &mut dyn RowPrinter,
    kind: &str,
    docs: &[IndexedDocument],
) -> std::io::Result<()> {
    let ctx = PrintContext {
        kind,
        total: docs.len(),
        ..PrintContext::default()
    };

    printer.begin(&ctx)?;
    for (i, doc) in docs.iter().enumerate() {
        let row = Row {
            rank: i + 1,
            location: &doc.location,
            name: &doc.display_name,
            is_folder: false,
            timestamp: doc.last_opened,
            group: None,
        };
        printer.print_row(&row, &ctx)?;
    }
    printer.finish(&ctx)
}

use std::process::ExitCode;

use clap::Args;
use folio_runtime::IndexedDocument;

use super::{CommandResult, GlobalOptions, OutputOptions, recents::print_documents};
use crate::printer::make_printer;

#[derive(Debug, Args)]
pub struct FavoritesArgs {
    /// Add the location to favorites, or remove it when already there
    #[arg(long, value_name = "LOCATION", conflicts_with = "check")]
    pub toggle: Option<String>,

    /// Display name used when toggling a new favorite
    #[arg(long, requires = "toggle")]
    pub name: Option<String>,

    /// Exit 0 when the location is a favorite, 1 otherwise
    #[arg(long, value_name = "LOCATION")]
    pub check: Option<String>,

    /// Output formatting options
    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(args: FavoritesArgs, globals: &GlobalOptions) -> ExitCode {
    match execute(args, globals) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[favorites] {e}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: FavoritesArgs, globals: &GlobalOptions) -> CommandResult<ExitCode> {
    let index = globals.document_index();

    if let Some(location) = args.toggle {
        let now_favorite = index.toggle_favorite(IndexedDocument::new(location.clone(), args.name));
        if now_favorite {
            println!("Added {location} to favorites");
        } else {
            println!("Removed {location} from favorites");
        }
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(location) = args.check.as_deref() {
        let favorite = index.is_favorite(location);
        println!("{favorite}");
        return Ok(if favorite {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        });
    }

    let favorites = index.list_favorites();
    if favorites.is_empty() && !args.output.json {
        println!("No favorites yet.");
        return Ok(ExitCode::SUCCESS);
    }

    let mut printer = make_printer(args.output.printer_config(usize::MAX));
    print_documents(printer.as_mut(), "favorites", &favorites)?;

    Ok(ExitCode::SUCCESS)
}

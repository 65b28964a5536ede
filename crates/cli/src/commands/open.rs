use std::process::ExitCode;

use clap::Args;
use folio_fs::is_document_name;
use folio_runtime::IndexedDocument;
use log::{error, warn};

use super::{CommandResult, GlobalOptions, is_content_uri, location_to_path};

#[derive(Debug, Args)]
pub struct OpenArgs {
    /// Path, file:// URI or content:// URI of the document
    pub location: String,

    /// Display name (defaults to the last segment of the location)
    #[arg(long)]
    pub name: Option<String>,
}

pub fn run(args: OpenArgs, globals: &GlobalOptions) -> ExitCode {
    match execute(args, globals) {
        Ok(code) => code,
        Err(e) => {
            error!("[open] {e}");
            eprintln!("[open] {e}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: OpenArgs, globals: &GlobalOptions) -> CommandResult<ExitCode> {
    let location = args.location.trim().to_owned();

    // Platform content is resolved by the viewer; local files must exist.
    if !is_content_uri(&location) {
        let path = location_to_path(&location);
        if !path.is_file() {
            eprintln!("[open] {} is not a readable file", path.display());
            return Ok(ExitCode::from(1));
        }
        if !is_document_name(&location) {
            warn!("[open] {location} does not look like a PDF document");
        }
    }

    let index = globals.document_index();
    let source = index.open(IndexedDocument::opened_now(location.clone(), args.name));
    let favorite = index.is_favorite(&location);

    let obj = serde_json::json!({
        "source": source,
        "favorite": favorite,
    });
    println!("{obj}");

    Ok(ExitCode::SUCCESS)
}

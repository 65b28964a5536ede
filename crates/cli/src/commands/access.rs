use std::process::ExitCode;

use clap::Args;
use folio_fs::{Access, Elevation};
use log::error;

use super::{GlobalOptions, display};

#[derive(Debug, Args)]
pub struct AccessArgs {
    /// Ask for access when it is currently denied
    #[arg(long)]
    pub request: bool,
}

pub fn run(args: AccessArgs, globals: &GlobalOptions) -> ExitCode {
    let ctx = match globals.scan_context() {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("[access] {e}");
            eprintln!("[access] {e}");
            return ExitCode::from(2);
        }
    };

    let root = display(ctx.storage_root());

    match ctx.gate.check_access() {
        Access::Granted => {
            println!("granted: {root}");
            ExitCode::SUCCESS
        }
        Access::Denied if args.request => {
            match ctx.gate.request_elevation() {
                Elevation::SettingsOpened => {
                    println!("denied: {root} (grant access in settings, then retry)")
                }
                Elevation::Granted => println!("granted: {root}"),
                Elevation::Denied => println!("denied: {root}"),
            }
            // Whatever the request did, only a fresh probe is trusted.
            if ctx.gate.check_access().is_granted() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Access::Denied => {
            println!("denied: {root}");
            ExitCode::from(1)
        }
    }
}

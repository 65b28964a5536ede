use std::process::ExitCode;

use clap::Parser;

mod commands;
mod printer;

use commands::{Command, GlobalOptions};
use folio_runtime::logging;

#[derive(Debug, Parser)]
#[command(
    name = "folio",
    version,
    about = "Find, browse and remember PDF documents",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub globals: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    let globals = &cli.globals;
    match cli.command {
        Command::Access(args) => commands::access::run(args, globals),
        Command::Browse(args) => commands::browse::run(args, globals),
        Command::Search(args) => commands::search::run(args, globals),
        Command::All(args) => commands::search::run_all(args, globals),
        Command::Open(args) => commands::open::run(args, globals),
        Command::Recents(args) => commands::recents::run(args, globals),
        Command::Favorites(args) => commands::favorites::run(args, globals),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_search_with_traversal_flags() {
        let cli = Cli::parse_from([
            "folio",
            "--storage-root",
            "/sdcard",
            "search",
            "report",
            "--max-dirs",
            "50",
            "--timeout-ms",
            "250",
            "--group",
        ]);

        assert_eq!(
            cli.globals.storage_root.as_deref(),
            Some(std::path::Path::new("/sdcard"))
        );
        match cli.command {
            Command::Search(args) => {
                assert_eq!(args.query, "report");
                assert_eq!(args.traversal.max_dirs, Some(50));
                assert_eq!(args.traversal.timeout_ms, Some(250));
                assert!(args.group);
            }
            other => panic!("expected search, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_are_accepted_after_subcommand() {
        let cli = Cli::parse_from(["folio", "recents", "--state-dir", "/tmp/s", "-n", "5"]);
        assert_eq!(
            cli.globals.state_dir.as_deref(),
            Some(std::path::Path::new("/tmp/s"))
        );
        match cli.command {
            Command::Recents(args) => assert_eq!(args.limit, 5),
            other => panic!("expected recents, got {other:?}"),
        }
    }

    #[test]
    fn favorites_toggle_and_check_conflict() {
        let res = Cli::try_parse_from(["folio", "favorites", "--toggle", "a", "--check", "a"]);
        assert!(res.is_err());
    }
}

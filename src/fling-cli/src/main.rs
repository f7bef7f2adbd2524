//! Fling CLI - main entry point.
//!
//! - `cli/` - command-line argument parsing and dispatch
//! - subcommand behaviour lives in the `fling-commands` crate

use std::process::ExitCode;

use fling_cli::cli::{Cli, dispatch_command};

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    fling_cli::init_logging(cli.effective_log_level());

    match dispatch_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("Command failed: {err:?}");
            fling_cli::report_error(&err);
            ExitCode::from(fling_cli::exit_code_for(&err))
        }
    }
}

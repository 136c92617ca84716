//! Application entry point.
//!
//! Parses command-line arguments, merges configuration layers, and delegates
//! execution to [`runner::run`].

use lexis::{cli, runner};
use std::io;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt;

fn main() -> ExitCode {
    let (parsed, matches) = cli::parse_from(std::env::args_os()).unwrap_or_else(|err| err.exit());
    let merged = cli::merge_with_config(&parsed, &matches);
    let verbose = merged.as_ref().map_or(parsed.verbose, |cli| cli.verbose);
    let max_level = if verbose { Level::DEBUG } else { Level::WARN };
    fmt()
        .with_writer(io::stderr)
        .with_max_level(max_level)
        .init();
    let cli = match merged {
        Ok(cli) => cli.with_default_command(),
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    match runner::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let chain = format!("{err:#}");
            tracing::error!(error = %chain, "runner failed");
            ExitCode::FAILURE
        }
    }
}

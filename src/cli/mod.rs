//! Command-line interface for the offline builder
//!
//! Commands:
//! - `browsedb build --input <dump> --output <snapshot>` — build and
//!   publish a snapshot from a flat heading dump; with
//!   `--config <file> --source <name>` the destination and dropped
//!   punctuation come from the service configuration instead
//! - `browsedb inspect --path <snapshot>` — print a snapshot's manifest

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use errors::{CliError, CliResult};

use clap::Parser;

/// Parse arguments and dispatch to the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse();
    commands::dispatch(cli.command)
}

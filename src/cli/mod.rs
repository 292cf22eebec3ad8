//! CLI module for draftdb
//!
//! Provides the command-line interface:
//! - serve: load config and run the HTTP server
//! - render: one-shot attributed rendering of a fetched document file
//! - hash: one-shot version hash of a content file

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{hash_file, render_document, run_command, serve};
pub use errors::{CliError, CliResult};

/// Parse arguments and run the selected command.
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args())
}

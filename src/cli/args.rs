//! CLI argument definitions using clap
//!
//! Commands:
//! - draftdb serve --config <path>
//! - draftdb render --file <doc.json> [--plain]
//! - draftdb hash --file <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// draftdb - a check-in/check-out collaborative document store
#[derive(Parser, Debug)]
#[command(name = "draftdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the draftdb HTTP server
    Serve {
        /// Path to configuration file; defaults apply when absent
        #[arg(long, default_value = "./draftdb.json")]
        config: PathBuf,
    },

    /// Render the attributed view of a fetched document JSON file
    Render {
        /// Path to a document JSON file as returned by fetch
        #[arg(long)]
        file: PathBuf,

        /// Strip attribution markers and print plain text
        #[arg(long)]
        plain: bool,
    },

    /// Print the version hash of a file's content
    Hash {
        /// Path to the content file
        #[arg(long)]
        file: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

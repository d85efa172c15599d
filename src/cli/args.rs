//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// browsedb - a deterministic, atomically-published browse index
#[derive(Parser, Debug)]
#[command(name = "browsedb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build and publish a browse snapshot from a flat heading dump
    Build {
        /// Heading dump file (CRLF lines: base64 key, text, filter tags)
        #[arg(long)]
        input: PathBuf,

        /// Snapshot destination; the new generation lands beside it as
        /// `<output>-updated` with the `<output>-ready` flag raised
        #[arg(long, required_unless_present = "config")]
        output: Option<PathBuf>,

        /// Punctuation to strip from sort keys built for records without a
        /// pre-computed key; overrides the configured set
        #[arg(long)]
        drop_chars: Option<String>,

        /// Service configuration to take the destination and dropped
        /// punctuation from
        #[arg(long, conflicts_with = "output", requires = "source")]
        config: Option<PathBuf>,

        /// Name of the configured browse source to build
        #[arg(long, requires = "config")]
        source: Option<String>,
    },

    /// Print the manifest of an existing snapshot
    Inspect {
        /// Snapshot path
        #[arg(long)]
        path: PathBuf,
    },
}

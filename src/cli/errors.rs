//! CLI error types

use thiserror::Error;

use crate::builder::BuildError;
use crate::config::ConfigError;
use crate::store::StoreError;

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;

/// Failures surfaced to the command line
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("no browse source named {0} in the configuration")]
    UnknownSource(String),

    #[error("either --output or --config with --source is required")]
    MissingDestination,
}

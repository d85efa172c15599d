//! Service configuration
//!
//! JSON configuration naming the browse sources (snapshot path, heading
//! field, per-source dropped punctuation) and the authority field mapping.
//! Relative snapshot paths resolve against a configurable home directory.
//! A bad source configuration is fatal for that source at startup; it
//! never affects queries already being served elsewhere.

mod errors;
mod settings;

pub use errors::{ConfigError, ConfigResult};
pub use settings::{AuthoritySettings, BrowseConfig, SourceConfig};

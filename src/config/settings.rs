//! Configuration shapes and loading

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::errors::{ConfigError, ConfigResult};
use crate::authority::{AuthorityFields, DEFAULT_MAX_REDIRECTS};
use crate::normalize::DEFAULT_DROP_CHARS;

/// One browsable heading list
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Snapshot path for this source's browse index
    pub db_path: PathBuf,
    /// Bibliographic field this source's headings come from
    pub field: String,
    /// Punctuation stripped from sort keys, when not the default set
    #[serde(default)]
    pub drop_chars: Option<String>,
}

impl SourceConfig {
    /// The dropped-punctuation set for this source
    pub fn drop_chars(&self) -> &str {
        self.drop_chars.as_deref().unwrap_or(DEFAULT_DROP_CHARS)
    }
}

/// Authority record field names
#[derive(Debug, Clone, Deserialize)]
pub struct AuthoritySettings {
    pub preferred_field: String,
    pub use_instead_field: String,
    pub see_also_field: String,
    pub note_field: String,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

fn default_max_redirects() -> usize {
    DEFAULT_MAX_REDIRECTS
}

impl From<AuthoritySettings> for AuthorityFields {
    fn from(s: AuthoritySettings) -> Self {
        Self {
            preferred_field: s.preferred_field,
            use_instead_field: s.use_instead_field,
            see_also_field: s.see_also_field,
            note_field: s.note_field,
            max_redirects: s.max_redirects,
        }
    }
}

/// Top-level service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BrowseConfig {
    pub sources: HashMap<String, SourceConfig>,
    #[serde(default)]
    pub authority: Option<AuthoritySettings>,
}

impl BrowseConfig {
    /// Load and validate a configuration file, resolving relative snapshot
    /// paths against `home`.
    pub fn load(path: &Path, home: &Path) -> ConfigResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut config: BrowseConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;

        if config.sources.is_empty() {
            return Err(ConfigError::NoSources {
                path: path.to_path_buf(),
            });
        }

        for source in config.sources.values_mut() {
            if source.db_path.is_relative() {
                source.db_path = home.join(&source.db_path);
            }
        }

        Ok(config)
    }
}

use banksync_core::{Defaults, Rule};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::rules::{RuleEngine, RuleError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Rules(#[from] RuleError),
}

/// On-disk shape of the configuration file.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    defaults: Defaults,
    #[serde(default)]
    rules: Vec<Rule>,
}

/// Validated run configuration. The rule catalog is compiled and read-only.
pub struct Config {
    pub url: Option<String>,
    pub token: Option<String>,
    pub defaults: Defaults,
    pub engine: RuleEngine,
}

impl Config {
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(toml_content)?;
        let engine = RuleEngine::new(file.rules)?;
        debug!(rules = engine.len(), "loaded rule catalog");
        Ok(Self {
            url: file.url.filter(|u| !u.trim().is_empty()),
            token: file.token.filter(|t| !t.is_empty()),
            defaults: file.defaults,
            engine,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }
}

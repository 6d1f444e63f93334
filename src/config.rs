//! Optional user configuration read from a TOML file. A missing file is not an
//! error; the bundled dataset and default share subject are used instead.

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::Deserialize;
use thiserror::Error;

use crate::share::DEFAULT_SHARE_SUBJECT;
use crate::store::{BundledQuotes, DataLoadError, FileQuotes, QuoteStore};

/// Environment variable that points at an explicit config file.
pub const CONFIG_ENV: &str = "QUOTE_SPARK_CONFIG";
/// Folder name used beneath the platform config directory.
const CONFIG_DIR_NAME: &str = "quote-spark";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}'")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {message}")]
    Validation { message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Replacement dataset. When unset the bundled quotes are shown.
    #[serde(default)]
    pub quotes_path: Option<PathBuf>,
    #[serde(default)]
    pub share: ShareConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShareConfig {
    /// Subject line for the share target.
    #[serde(default = "default_subject")]
    pub subject: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            subject: default_subject(),
        }
    }
}

fn default_subject() -> String {
    DEFAULT_SHARE_SUBJECT.to_string()
}

impl Config {
    /// `$QUOTE_SPARK_CONFIG` if set, otherwise
    /// `<config_dir>/quote-spark/config.toml`. Falls back to the current
    /// directory when no config directory can be resolved.
    pub fn config_path() -> PathBuf {
        if let Some(path) = env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }

        let config_dir = BaseDirs::new()
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Read and validate the file at `path`; defaults when it does not exist.
    /// A relative `quotes_path` is resolved against the file's directory.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let mut config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        if let (Some(quotes_path), Some(base)) = (config.quotes_path.as_mut(), path.parent()) {
            if quotes_path.is_relative() {
                *quotes_path = base.join(&*quotes_path);
            }
        }

        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.share.subject.trim().is_empty() {
            return Err(ConfigError::Validation {
                message: "share.subject must not be empty".to_string(),
            });
        }

        if matches!(&self.quotes_path, Some(path) if path.as_os_str().is_empty()) {
            return Err(ConfigError::Validation {
                message: "quotes_path must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Load the dataset this config selects.
    pub fn load_quotes(&self) -> Result<QuoteStore, DataLoadError> {
        match &self.quotes_path {
            Some(path) => QuoteStore::load(&FileQuotes::new(path)),
            None => QuoteStore::load(&BundledQuotes),
        }
    }
}

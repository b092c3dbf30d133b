//! Taskboard configuration.
//!
//! Loaded from `~/.taskboard/config.toml`, or from an explicit path.
//! A missing file means defaults; a file that exists must parse.

use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::{Deserialize, Serialize};

use crate::model::Filter;

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Taskboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Assignee for new items that don't name one.
    /// Overridden by `TASKBOARD_ASSIGNEE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_assignee: Option<String>,

    /// Filter a session starts with.
    pub default_filter: Filter,
}

impl Config {
    /// Load config from `~/.taskboard/config.toml`.
    /// Defaults when the home directory or the file is missing.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from `path`. Defaults when the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The config file path: `~/.taskboard/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".taskboard").join("config.toml"))
    }

    /// The configured default assignee, ignoring blank values.
    pub fn default_assignee(&self) -> Option<&str> {
        self.default_assignee
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

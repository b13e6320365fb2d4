use crate::types::BracketPair;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub report: ReportConfig,
    pub brackets: BracketPair,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Lines shown on each side of a reported line
    pub context_radius: usize,
    /// Lines shown when there is nothing to centre on
    pub tail_lines: usize,
    /// How many leftover openers the unmatched report lists
    pub max_reported_openers: usize,
    /// Leading lines included in the balance trace
    pub trace_head: usize,
    /// Trailing lines included in the balance trace
    pub trace_tail: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            context_radius: 5,
            tail_lines: 20,
            max_reported_openers: 10,
            trace_head: 120,
            trace_tail: 20,
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.brackets.open == self.brackets.close {
            return Err(ConfigError::Invalid(format!(
                "opening and closing bracket are both '{}'",
                self.brackets.open
            )));
        }
        if self.report.tail_lines == 0 {
            return Err(ConfigError::Invalid("tail_lines must be at least 1".to_string()));
        }
        Ok(())
    }
}

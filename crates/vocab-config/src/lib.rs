use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::log::LogConfig;
use self::paths::PathsConfig;

pub mod log;
pub mod paths;

pub use paths::PipelinePaths;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub log: LogConfig,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON config file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from {}", path.display());
        let file = File::open(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Missing required path: pass {0} or set it in the config file")]
    MissingPath(&'static str),
}

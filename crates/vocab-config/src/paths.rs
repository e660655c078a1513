use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// File locations the export reads from and writes to.
/// Any of them may be left out of the config file and supplied on the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Device vocabulary database (`vocab.db`)
    pub source_db: Option<PathBuf>,
    /// JSON dictionary mapping words to definitions
    pub dictionary: Option<PathBuf>,
    /// Destination CSV file
    pub output: Option<PathBuf>,
}

impl PathsConfig {
    /// Fill every path set in `other`, keeping ours otherwise
    pub fn overlay(&mut self, other: PathsConfig) {
        if other.source_db.is_some() {
            self.source_db = other.source_db;
        }
        if other.dictionary.is_some() {
            self.dictionary = other.dictionary;
        }
        if other.output.is_some() {
            self.output = other.output;
        }
    }

    /// Require all three paths
    pub fn resolve(self) -> Result<PipelinePaths, ConfigError> {
        Ok(PipelinePaths {
            source_db: self.source_db.ok_or(ConfigError::MissingPath("--db"))?,
            dictionary: self
                .dictionary
                .ok_or(ConfigError::MissingPath("--dictionary"))?,
            output: self.output.ok_or(ConfigError::MissingPath("--output"))?,
        })
    }
}

/// The three paths a pipeline run needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelinePaths {
    pub source_db: PathBuf,
    pub dictionary: PathBuf,
    pub output: PathBuf,
}

//! Connector configuration values.
//!
//! These are plain `serde` types; reading them from disk or the command line is the caller's
//! job.

use std::path::PathBuf;

use serde::Deserialize;

fn default_entity() -> String {
    "csv".to_string()
}

/// Configuration for one stream: where its files live and which fields are primary keys.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileConfig {
    /// Stream name.
    #[serde(default = "default_entity")]
    pub entity: String,
    /// A single file or a directory of files.
    pub path: PathBuf,
    /// Primary-key field names for downstream consumers. Not checked against headers.
    #[serde(default)]
    pub keys: Vec<String>,
}

impl FileConfig {
    /// Create a config for `path` with the default entity name and no keys.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            entity: default_entity(),
            path: path.into(),
            keys: Vec::new(),
        }
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = entity.into();
        self
    }

    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }
}

/// Connector-level configuration: one [`FileConfig`] per stream.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct TapConfig {
    #[serde(default)]
    pub files: Vec<FileConfig>,
}

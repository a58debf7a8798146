use crate::types::errors::{IngestError, IngestResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for one ingestion run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct IngestConfig {
    /// Lower-cased path endings that mark an entry as a JSON document.
    pub json_extensions: Vec<String>,
    /// Archive reads report progress once per this many skipped entries.
    pub skip_progress_interval: usize,
    /// JSON entries larger than this are skipped.
    pub max_entry_bytes: u64,
    /// Ranking cutoff shared by every section.
    pub top_n: usize,
    /// Ranking cutoff for IP addresses and user agents.
    pub security_top_n: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            json_extensions: vec![".json".into()],
            skip_progress_interval: 25,
            max_entry_bytes: 64 * 1024 * 1024,
            top_n: 10,
            security_top_n: 5,
        }
    }
}

impl IngestConfig {
    /// Whether `path` (any casing) names a document the readers should keep.
    pub fn is_json_path(&self, path: &str) -> bool {
        let lower = path.to_lowercase();
        self.json_extensions
            .iter()
            .any(|ext| lower.ends_with(&ext.to_lowercase()))
    }

    /// Load a config file. Falls back to defaults if the file is missing or corrupt.
    pub fn load(path: &Path) -> Self {
        match Self::load_strict(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "Failed to load ingest config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Load a config file, surfacing read and parse failures.
    pub fn load_strict(path: &Path) -> IngestResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| IngestError::Config(format!("Failed to read {}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| IngestError::Config(format!("Failed to parse {}: {e}", path.display())))?;

        if config.json_extensions.is_empty() {
            return Err(IngestError::Config(
                "json_extensions must not be empty".to_string(),
            ));
        }
        Ok(config)
    }
}

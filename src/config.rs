use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::defaults;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub attribution: AttributionConfig,
    pub evaluation: EvaluationConfig,
}

/// Chunked attribution configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AttributionConfig {
    /// Chunk size in characters.
    pub chunk_chars: usize,
    /// Overlap between consecutive chunks in characters; also the stitch
    /// seam-search hint.
    pub chunk_overlap: usize,
    /// Worker threads for chunk prediction.
    pub workers: usize,
    /// Separator inserted when adjacent segments are merged.
    pub merge_separator: String,
}

/// Evaluation preprocessing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EvaluationConfig {
    pub collapse_whitespace: bool,
    pub trim: bool,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            chunk_chars: defaults::CHUNK_CHARS,
            chunk_overlap: defaults::CHUNK_OVERLAP,
            workers: defaults::PREDICTION_WORKERS,
            merge_separator: defaults::MERGE_SEPARATOR.to_string(),
        }
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            collapse_whitespace: true,
            trim: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if the file is
    /// missing. Invalid TOML is still an error.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Ok(Self::default())
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - QUOTEWEAVE_CHUNK_CHARS → attribution.chunk_chars
    /// - QUOTEWEAVE_CHUNK_OVERLAP → attribution.chunk_overlap
    /// - QUOTEWEAVE_WORKERS → attribution.workers
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(raw) = std::env::var("QUOTEWEAVE_CHUNK_CHARS")
            && let Ok(value) = raw.parse()
        {
            self.attribution.chunk_chars = value;
        }

        if let Ok(raw) = std::env::var("QUOTEWEAVE_CHUNK_OVERLAP")
            && let Ok(value) = raw.parse()
        {
            self.attribution.chunk_overlap = value;
        }

        if let Ok(raw) = std::env::var("QUOTEWEAVE_WORKERS")
            && let Ok(value) = raw.parse()
        {
            self.attribution.workers = value;
        }

        self
    }
}

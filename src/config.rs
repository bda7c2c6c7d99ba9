//! Configuration management for askdoc
//!
//! Loads settings from an optional TOML file with environment overrides.
//! The OpenAI API key is read from the environment only and never written
//! to disk; its absence must not stop the process from starting (only the
//! synthesis step needs it).

use crate::chunking::ChunkingConfig;
use crate::llm::openai::DEFAULT_MODEL;
use crate::retrieval::DEFAULT_TOP_K;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable pointing at the source PDF
pub const PDF_PATH_ENV: &str = "ASKDOC_PDF";
/// Environment variable carrying the completion API credential
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

const DEFAULT_PDF_PATH: &str = "./document.pdf";

/// askdoc configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the source PDF document
    #[serde(default = "default_pdf_path")]
    pub pdf_path: String,
    /// Completion model id
    #[serde(default = "default_model")]
    pub model: String,
    /// Number of chunks forwarded as context per question
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Chunking parameters (validated on deserialization)
    #[serde(default)]
    pub chunking: ChunkingConfig,
}

fn default_pdf_path() -> String {
    DEFAULT_PDF_PATH.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pdf_path: default_pdf_path(),
            model: default_model(),
            top_k: default_top_k(),
            chunking: ChunkingConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a TOML file, or defaults if the file doesn't exist.
    /// The `ASKDOC_PDF` environment variable overrides the document path
    /// either way.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) if p.exists() => {
                let content = std::fs::read_to_string(p)
                    .with_context(|| format!("Failed to read config file: {}", p.display()))?;
                toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config file: {}", p.display()))?
            }
            Some(p) => {
                anyhow::bail!("Config file not found: {}", p.display());
            }
            None => Self::default(),
        };

        if let Ok(pdf_path) = std::env::var(PDF_PATH_ENV) {
            config.pdf_path = pdf_path;
        }

        Ok(config)
    }

    /// Save config to disk (the API key is never part of it)
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// The completion API credential, if configured in the environment
    pub fn api_key() -> Option<String> {
        std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.pdf_path, "./document.pdf");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.top_k, 3);
        assert_eq!(config.chunking.chunk_size(), 500);
        assert_eq!(config.chunking.overlap(), 100);
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            pdf_path: "lecture.pdf".to_string(),
            top_k: 5,
            ..Config::default()
        };
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.pdf_path, "lecture.pdf");
        assert_eq!(loaded.top_k, 5);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "top_k = 7\n").unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.top_k, 7);
        assert_eq!(loaded.model, "gpt-4o-mini");
    }

    #[test]
    fn test_invalid_chunking_rejected_at_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[chunking]\nchunk_size = 100\noverlap = 100\n").unwrap();

        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(Config::load(Some(&path)).is_err());
    }
}

//! Configuration management for storyvoice

mod catalog;

pub use catalog::{Catalog, Language, Voice, LANGUAGES, VOICES};

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for storyvoice
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Speech endpoint configuration
    pub synthesis: SynthesisConfig,
    /// Text chunking configuration
    pub chunking: ChunkingConfig,
    /// Concurrency configuration
    pub scheduler: SchedulerConfig,
    /// Output and staging paths
    pub output: OutputConfig,
    /// Available voices and languages
    pub catalog: Catalog,
}

/// Speech endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Base URL of the API (without trailing slash)
    pub api_base: String,
    /// Speech model name
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Audio format requested from the endpoint
    pub response_format: String,
    /// Transport timeout per request, in seconds
    pub timeout_secs: u64,
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum chunk length in characters
    pub max_chunk_size: usize,
}

/// Concurrency configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Maximum number of synthesis calls in flight
    pub concurrency: usize,
}

/// Output and staging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Final audio file
    pub path: PathBuf,
    /// Directory in which the per-run staging directory is created
    pub temp_dir: PathBuf,
    /// Name prefix of the per-run staging directory
    pub temp_prefix: String,
    /// Extension of the per-chunk files
    pub extension: String,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".into(),
            model: "tts-1-hd".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            response_format: "mp3".into(),
            timeout_secs: 120,
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: crate::DEFAULT_MAX_CHUNK_SIZE,
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            concurrency: crate::DEFAULT_CONCURRENCY,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("podcast_final.mp3"),
            temp_dir: PathBuf::from("."),
            temp_prefix: "podcast_tmp_".into(),
            extension: "mp3".into(),
        }
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration, picking JSON or YAML from the file extension
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::load_json(path)
        } else {
            Self::load(path)
        }
    }

    /// Load configuration from JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Create default configuration and save to file
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Path of the chunk file for `index` inside `dir`
    pub fn chunk_file(&self, dir: &Path, index: usize) -> PathBuf {
        dir.join(format!("chunk_{}.{}", index, self.output.extension))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.chunking.max_chunk_size == 0 {
            return Err(Error::Config("max_chunk_size must be > 0".into()));
        }
        if self.scheduler.concurrency == 0 {
            return Err(Error::Config("concurrency must be > 0".into()));
        }
        if self.scheduler.concurrency > tokio::sync::Semaphore::MAX_PERMITS {
            return Err(Error::Config(format!(
                "concurrency must be at most {}",
                tokio::sync::Semaphore::MAX_PERMITS
            )));
        }
        if self.synthesis.model.trim().is_empty() {
            return Err(Error::Config("synthesis model must not be empty".into()));
        }
        if self.synthesis.api_base.trim().is_empty() {
            return Err(Error::Config("synthesis api_base must not be empty".into()));
        }
        if self.output.extension.trim().is_empty() {
            return Err(Error::Config("output extension must not be empty".into()));
        }
        if !self.output.temp_dir.exists() {
            log::warn!(
                "Staging directory does not exist: {}",
                self.output.temp_dir.display()
            );
        }

        self.catalog.validate()
    }
}

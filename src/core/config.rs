//! Configuration management for the memdex store.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{MemdexError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Tantivy refuses writer heaps below 15 MB per indexing thread
const MIN_WRITER_HEAP_MB: usize = 15;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub list: ListConfig,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding the store
    ///
    /// The index spans several files in this directory; back up the
    /// directory as a whole.
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,

    /// Index writer memory budget in MB
    #[serde(default = "default_writer_heap_mb")]
    pub writer_heap_mb: usize,

    /// Maximum item id length in bytes
    #[serde(default = "default_max_id_length")]
    pub max_id_length: usize,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Default number of results to return
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Maximum results per query
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,

    /// Maximum query string length
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,
}

/// Listing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListConfig {
    /// Default page size
    #[serde(default = "default_list_limit")]
    pub default_limit: usize,

    /// Maximum page size
    #[serde(default = "default_list_max_limit")]
    pub max_limit: usize,
}

// Default value functions
fn default_store_dir() -> PathBuf {
    PathBuf::from("./data/store")
}

fn default_writer_heap_mb() -> usize {
    50
}

fn default_max_id_length() -> usize {
    256
}

fn default_limit() -> usize {
    10
}

fn default_max_limit() -> usize {
    100
}

fn default_max_query_length() -> usize {
    500
}

fn default_list_limit() -> usize {
    50
}

fn default_list_max_limit() -> usize {
    1000
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            writer_heap_mb: default_writer_heap_mb(),
            max_id_length: default_max_id_length(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            max_query_length: default_max_query_length(),
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            default_limit: default_list_limit(),
            max_limit: default_list_max_limit(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| MemdexError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// This method uses XDG Base Directory specification for file locations.
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. MEMDEX_CONFIG env var
    /// 2. XDG config file (~/.config/memdex/config.toml)
    /// 3. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("MEMDEX_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else {
                Self::default()
            }
        };

        // Place the store under the XDG data directory unless set explicitly
        if env::var("MEMDEX_DATA_DIR").is_err() && config.storage.store_dir == default_store_dir()
        {
            config.storage.store_dir = xdg.store_dir();
        }

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Storage configuration
        if let Ok(data_dir) = env::var("MEMDEX_DATA_DIR") {
            self.storage.store_dir = PathBuf::from(data_dir).join("store");
        }
        if let Ok(heap) = env::var("MEMDEX_WRITER_HEAP_MB") {
            if let Ok(mb) = heap.parse() {
                self.storage.writer_heap_mb = mb;
            }
        }
        if let Ok(max_id) = env::var("MEMDEX_MAX_ID_LENGTH") {
            if let Ok(len) = max_id.parse() {
                self.storage.max_id_length = len;
            }
        }

        // Search configuration
        if let Ok(default_limit) = env::var("MEMDEX_DEFAULT_LIMIT") {
            if let Ok(limit) = default_limit.parse() {
                self.search.default_limit = limit;
            }
        }
        if let Ok(max_limit) = env::var("MEMDEX_MAX_LIMIT") {
            if let Ok(limit) = max_limit.parse() {
                self.search.max_limit = limit;
            }
        }
        if let Ok(max_query_len) = env::var("MEMDEX_MAX_QUERY_LENGTH") {
            if let Ok(len) = max_query_len.parse() {
                self.search.max_query_length = len;
            }
        }

        // List configuration
        if let Ok(default_limit) = env::var("MEMDEX_LIST_DEFAULT_LIMIT") {
            if let Ok(limit) = default_limit.parse() {
                self.list.default_limit = limit;
            }
        }
        if let Ok(max_limit) = env::var("MEMDEX_LIST_MAX_LIMIT") {
            if let Ok(limit) = max_limit.parse() {
                self.list.max_limit = limit;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.storage.writer_heap_mb < MIN_WRITER_HEAP_MB {
            return Err(MemdexError::ConfigError(format!(
                "Writer heap must be at least {MIN_WRITER_HEAP_MB} MB"
            )));
        }

        if self.storage.max_id_length == 0 {
            return Err(MemdexError::ConfigError(
                "Max id length must be non-zero".to_string(),
            ));
        }

        if self.search.default_limit == 0 {
            return Err(MemdexError::ConfigError(
                "Default search limit must be non-zero".to_string(),
            ));
        }

        if self.search.default_limit > self.search.max_limit {
            return Err(MemdexError::ConfigError(
                "Default search limit cannot exceed max search limit".to_string(),
            ));
        }

        if self.search.max_query_length == 0 {
            return Err(MemdexError::ConfigError(
                "Max query length must be non-zero".to_string(),
            ));
        }

        if self.list.default_limit == 0 {
            return Err(MemdexError::ConfigError(
                "Default list limit must be non-zero".to_string(),
            ));
        }

        if self.list.default_limit > self.list.max_limit {
            return Err(MemdexError::ConfigError(
                "Default list limit cannot exceed max list limit".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Store dir: {:?}", self.storage.store_dir);
        tracing::info!("  Writer heap: {} MB", self.storage.writer_heap_mb);
        tracing::info!("  Max id length: {}", self.storage.max_id_length);
        tracing::info!("  Default search limit: {}", self.search.default_limit);
        tracing::info!("  Max search limit: {}", self.search.max_limit);
        tracing::info!("  Max query length: {}", self.search.max_query_length);
        tracing::info!("  Default list limit: {}", self.list.default_limit);
        tracing::info!("  Max list limit: {}", self.list.max_limit);
    }
}

//! XDG Base Directory Support
//!
//! Implements XDG Base Directory specification for proper file organization
//! on Linux/Unix systems.

use std::env;
use std::fs;
use std::path::PathBuf;

/// XDG directory structure for memdex
///
/// Explicit `MEMDEX_*` variables win over `XDG_*` variables, which win
/// over the XDG defaults under the home directory.
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub state_dir: PathBuf,
    pub cache_dir: PathBuf,
}

impl XdgDirs {
    /// Create new XDG directory structure with proper resolution order
    pub fn new() -> Self {
        Self {
            config_dir: resolve("MEMDEX_CONFIG_DIR", "XDG_CONFIG_HOME", &[".config"]),
            data_dir: resolve("MEMDEX_DATA_DIR", "XDG_DATA_HOME", &[".local", "share"]),
            state_dir: resolve("MEMDEX_STATE_DIR", "XDG_STATE_HOME", &[".local", "state"]),
            cache_dir: resolve("MEMDEX_CACHE_DIR", "XDG_CACHE_HOME", &[".cache"]),
        }
    }

    /// Get config file path
    pub fn config_file(&self) -> PathBuf {
        // Check MEMDEX_CONFIG_FILE first (explicit override)
        if let Ok(file) = env::var("MEMDEX_CONFIG_FILE") {
            return PathBuf::from(file);
        }

        self.config_dir.join("config.toml")
    }

    /// Get store directory path
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("store")
    }

    /// Get logs directory path
    pub fn logs_dir(&self) -> PathBuf {
        self.state_dir.join("logs")
    }

    /// Create all XDG directories if they don't exist
    ///
    /// The store directory itself is created by the store on open.
    pub fn ensure_dirs_exist(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.config_dir)?;
        fs::create_dir_all(&self.data_dir)?;
        fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }

    /// Log the resolved XDG paths
    pub fn log_paths(&self) {
        tracing::info!("XDG directories resolved:");
        tracing::info!("  Config: {:?}", self.config_dir);
        tracing::info!("  Data: {:?}", self.data_dir);
        tracing::info!("  State: {:?}", self.state_dir);
        tracing::info!("  Cache: {:?}", self.cache_dir);
        tracing::info!("  Config file: {:?}", self.config_file());
        tracing::info!("  Store: {:?}", self.store_dir());
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve one XDG directory: explicit override, XDG variable, home default
fn resolve(override_var: &str, xdg_var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(dir) = env::var(override_var) {
        return PathBuf::from(dir);
    }

    if let Ok(xdg) = env::var(xdg_var) {
        return PathBuf::from(xdg).join("memdex");
    }

    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    for part in home_default {
        path.push(part);
    }
    path.join("memdex")
}

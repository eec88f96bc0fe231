//! Configuration loading and data folder resolution

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Data folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. `BARKBOARD_DATA` environment variable
/// 3. TOML config file `data_folder` key
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_data_folder(cli_arg: Option<&str>) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(PathBuf::from(path));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var("BARKBOARD_DATA") {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = locate_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(folder) = config.get("data_folder").and_then(|v| v.as_str()) {
                    return Ok(PathBuf::from(folder));
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    Ok(default_data_folder())
}

/// Get default configuration file path for the platform
fn locate_config_file() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/barkboard/config.toml first, then /etc/barkboard/config.toml
        if let Some(path) = dirs::config_dir().map(|d| d.join("barkboard").join("config.toml")) {
            if path.exists() {
                return Ok(path);
            }
        }
        let system_config = PathBuf::from("/etc/barkboard/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
        return Err(Error::Config("No config file found".to_string()));
    }

    let path = dirs::config_dir()
        .map(|d| d.join("barkboard").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
    if path.exists() {
        Ok(path)
    } else {
        Err(Error::Config(format!("Config file not found: {:?}", path)))
    }
}

/// Get OS-dependent default data folder path
fn default_data_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/barkboard
        dirs::data_local_dir()
            .map(|d| d.join("barkboard"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/barkboard"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/barkboard
        dirs::data_dir()
            .map(|d| d.join("barkboard"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/barkboard"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\barkboard
        dirs::data_local_dir()
            .map(|d| d.join("barkboard"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\barkboard"))
    } else {
        PathBuf::from("./barkboard_data")
    }
}

// ========================================
// Service settings
// ========================================

/// Upstream feed endpoints and client behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamSettings {
    /// Base URL of the hosted record feed
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Retry attempts per fetch before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

/// Snapshot staleness windows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Dog batch staleness window in seconds (6 hours)
    #[serde(default = "default_dogs_stale")]
    pub dogs_stale_secs: u64,
    /// Review surface staleness window in seconds (12 hours)
    #[serde(default = "default_review_stale")]
    pub review_stale_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            dogs_stale_secs: default_dogs_stale(),
            review_stale_secs: default_review_stale(),
        }
    }
}

/// Service settings loaded from `settings.toml` in the data folder
///
/// A missing file yields the compiled defaults; a present but malformed
/// file is a configuration error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub upstream: UpstreamSettings,
    #[serde(default)]
    pub cache: CacheSettings,
}

impl Settings {
    /// Load settings from the data folder, falling back to defaults when
    /// no file exists
    pub fn load(data_folder: &Path) -> Result<Self> {
        let path = data_folder.join("settings.toml");
        if !path.exists() {
            return Ok(Settings::default());
        }
        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid settings file {:?}: {}", path, e)))
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5800".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_dogs_stale() -> u64 {
    6 * 60 * 60
}

fn default_review_stale() -> u64 {
    12 * 60 * 60
}

// ========================================
// Tests
// ========================================

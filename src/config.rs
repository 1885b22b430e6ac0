use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{DEFAULT_SERVER_URL, EXTENSION_DIR_NAME};

/// Launcher configuration, read from `config.yaml`
///
/// Every field has a default so the launcher runs without any config file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    /// Directory the `arx-crx` folder is created in on first launch
    #[serde(default)]
    pub default_install_dir: Option<PathBuf>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_refresh_interval_secs() -> u64 {
    10 * 60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            refresh_interval_secs: default_refresh_interval_secs(),
            default_install_dir: None,
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Parse a YAML config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        // An empty file deserializes to unit, not to a mapping
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Base directory for the first download: `<Downloads>/candidate_cvs`
    pub fn install_base_dir(&self) -> PathBuf {
        if let Some(dir) = &self.default_install_dir {
            return crate::logic::path::expand_home(dir);
        }

        let downloads = dirs::download_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
            .unwrap_or_else(std::env::temp_dir);
        downloads.join("candidate_cvs")
    }

    /// Full path of the extension directory used when nothing is stored yet
    pub fn default_extension_path(&self) -> PathBuf {
        self.install_base_dir().join(EXTENSION_DIR_NAME)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Locate the config file
///
/// An explicit `--config` path must exist. Otherwise the platform config
/// directory is tried, then `./config.yaml`. `Ok(None)` means "use defaults".
pub fn find_config_path(cli_path: Option<&str>) -> Result<Option<PathBuf>> {
    if let Some(path) = cli_path {
        let p = PathBuf::from(path);
        if p.exists() {
            return Ok(Some(p));
        }
        anyhow::bail!("Config file not found at specified path: {}", path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("arx-launcher").join("config.yaml");
        if config_path.exists() {
            return Ok(Some(config_path));
        }
    }

    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(Some(local_config));
    }

    Ok(None)
}

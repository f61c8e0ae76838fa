//! Configuration management for StockNet

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Default API base URL used until `stocknet config set-url` is run
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the StockNet API (endpoints are resolved relative to it)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Location of the local storage file holding the session token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            storage_path: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Directory holding config and storage files (`~/.stocknet`)
    pub fn home_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".stocknet"))
    }

    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let dir = Self::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(dir.join("config.yaml"))
    }

    /// Resolve an optional override to a concrete config path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration, falling back to defaults when no file exists yet
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let path = match Self::resolve_path(path) {
            Ok(path) => path,
            Err(_) => {
                log::warn!("No home directory; using default configuration");
                return Ok(Self::default());
            }
        };

        match Self::load_from(&path) {
            Err(crate::error::Error::Config(ConfigError::NotFound)) => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the resolved path
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(&Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        // Set file permissions to 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Reject URLs reqwest could never reach
    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api_url must start with http:// or https://, got '{}'",
                self.api_url
            ))
            .into());
        }
        Ok(())
    }

    /// API base URL with a guaranteed trailing slash
    pub fn base_url(&self) -> String {
        normalize_base_url(&self.api_url)
    }

    /// Token storage file, if one can be located
    pub fn storage_file(&self) -> Option<PathBuf> {
        self.storage_path
            .clone()
            .or_else(|| Self::home_dir().map(|dir| dir.join("storage.json")))
    }

    /// HTTP timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Endpoints are appended directly (`{base}Auth/login`), so the base must end in `/`
pub fn normalize_base_url(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}

//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the API base URL, where the session token is kept, and
//! the last email used to log in.
//!
//! Configuration is stored at `~/.config/shopdesk/config.json`. Environment
//! variables (`SHOPDESK_API_URL`, `SHOPDESK_TOKEN_BACKEND`) take precedence.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::auth::{FileTokenStore, KeyringTokenStore, MemoryTokenStore, TokenStore};

/// Application name used for config/data directory paths
const APP_NAME: &str = "shopdesk";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// API base URL when nothing is configured (local Laravel dev server)
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";

pub const ENV_API_URL: &str = "SHOPDESK_API_URL";
pub const ENV_TOKEN_BACKEND: &str = "SHOPDESK_TOKEN_BACKEND";

/// Where the session token is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenBackend {
    #[default]
    File,
    Keyring,
    /// Not persisted; the session ends with the process
    Memory,
}

impl FromStr for TokenBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(TokenBackend::File),
            "keyring" | "keychain" => Ok(TokenBackend::Keyring),
            "memory" => Ok(TokenBackend::Memory),
            other => Err(anyhow::anyhow!("Unknown token backend: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_url: Option<String>,
    #[serde(default)]
    pub token_backend: TokenBackend,
    pub last_email: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Load, falling back to defaults when the file is missing or broken
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// API base URL: environment, then config file, then the default
    pub fn api_url(&self) -> String {
        std::env::var(ENV_API_URL)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Token backend: environment, then config file
    pub fn token_backend(&self) -> TokenBackend {
        match std::env::var(ENV_TOKEN_BACKEND) {
            Ok(value) => value.parse().unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring {}", ENV_TOKEN_BACKEND);
                self.token_backend
            }),
            Err(_) => self.token_backend,
        }
    }

    /// Build the configured token store
    pub fn token_store(&self) -> Result<Arc<dyn TokenStore>> {
        let store: Arc<dyn TokenStore> = match self.token_backend() {
            TokenBackend::File => Arc::new(FileTokenStore::in_data_dir()?),
            TokenBackend::Keyring => Arc::new(KeyringTokenStore::new()),
            TokenBackend::Memory => Arc::new(MemoryTokenStore::new()),
        };
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_backend_from_str() {
        assert_eq!("file".parse::<TokenBackend>().unwrap(), TokenBackend::File);
        assert_eq!("Keychain".parse::<TokenBackend>().unwrap(), TokenBackend::Keyring);
        assert_eq!(" memory ".parse::<TokenBackend>().unwrap(), TokenBackend::Memory);
        assert!("cookie".parse::<TokenBackend>().is_err());
    }

    #[test]
    fn test_file_backend_uses_data_dir_store() {
        let config = Config::default();
        if dirs::data_dir().is_some() && std::env::var(ENV_TOKEN_BACKEND).is_err() {
            assert!(config.token_store().is_ok());
        }
    }

    #[test]
    fn test_config_json_round_trip_defaults() {
        let config: Config = serde_json::from_str(r#"{"api_url": "https://shop.example/api"}"#).unwrap();
        assert_eq!(config.api_url.as_deref(), Some("https://shop.example/api"));
        assert_eq!(config.token_backend, TokenBackend::File);
        assert_eq!(config.last_email, None);

        let json = serde_json::to_string(&Config {
            token_backend: TokenBackend::Keyring,
            ..Default::default()
        })
        .unwrap();
        assert!(json.contains(r#""token_backend":"keyring""#));
    }
}

//! Configuration Management
//!
//! Handles persistent configuration storage for the client, most
//! importantly where the backend lives. The base address is resolved
//! from the environment first, then the saved config, then a loopback
//! default.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::api::error::{Error, Result};

/// Environment variable overriding the backend base address
pub const BASE_URL_ENV: &str = "LMS_API_URL";

/// Fixed service port the backend is assumed to listen on
pub const DEFAULT_API_PORT: u16 = 5000;

/// Path prefix all API routes live under
pub const API_PREFIX: &str = "/api";

/// Base address used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend base address, including the `/api` prefix
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lms-client").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::Storage(e.to_string()))?;
        }

        let content =
            serde_json::to_string_pretty(self).map_err(|e| Error::Storage(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| Error::Storage(e.to_string()))?;

        Ok(())
    }

    /// Get the effective base address (env > config > loopback default)
    pub fn effective_base_url(&self) -> String {
        if let Ok(from_env) = std::env::var(BASE_URL_ENV) {
            match normalize_base_url(&from_env) {
                Ok(url) => return url,
                Err(_) => {
                    tracing::warn!("Invalid base URL in {}, ignoring", BASE_URL_ENV);
                }
            }
        }

        self.base_url
            .as_deref()
            .and_then(|u| normalize_base_url(u).ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Set base address and save
    pub fn set_base_url(&mut self, base_url: &str) -> Result<()> {
        let normalized = normalize_base_url(base_url)?;
        self.base_url = Some(normalized);
        self.save()
    }
}

/// Validate a base address and strip any trailing slash
pub fn normalize_base_url(base_url: &str) -> Result<String> {
    let parsed = Url::parse(base_url).map_err(|e| Error::BaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::BaseUrl {
            url: base_url.to_string(),
            reason: format!("unsupported scheme {:?}", parsed.scheme()),
        });
    }

    Ok(base_url.trim_end_matches('/').to_string())
}

/// Derive the base address for a backend served from the given host,
/// assuming the fixed service port and API prefix
pub fn base_url_for_host(host: &str) -> String {
    format!("http://{}:{}{}", host, DEFAULT_API_PORT, API_PREFIX)
}

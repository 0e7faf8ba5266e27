//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use itc_connect::{ClientConfig, DEFAULT_HOST, DEFAULT_PRIMARY_LANGUAGE};

use crate::error::{ConfigError, Result};

/// Main configuration for itc
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Portal session configuration
    pub session: SessionConfig,

    /// Defaults for app operations
    pub apps: AppsConfig,
}

impl Config {
    /// Settings for the portal client
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            host: self.session.host.clone(),
            cache_dir: self.session.cache_dir.clone(),
            timeout: self.session.timeout_secs.map(Duration::from_secs),
            default_primary_language: self.apps.primary_language.clone(),
        }
    }
}

/// Portal session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Apple ID used to log in
    pub username: Option<String>,

    /// Portal host
    pub host: String,

    /// Directory for the login URL cache file
    pub cache_dir: Option<PathBuf>,

    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            username: None,
            host: DEFAULT_HOST.to_string(),
            cache_dir: None,
            timeout_secs: None,
        }
    }
}

impl SessionConfig {
    /// Username from an explicit override, falling back to the config file
    pub fn username_or(&self, explicit: Option<&str>) -> Result<String> {
        explicit
            .or(self.username.as_deref())
            .filter(|u| !u.trim().is_empty())
            .map(String::from)
            .ok_or_else(|| ConfigError::MissingField("session.username".to_string()).into())
    }
}

/// Defaults for app operations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppsConfig {
    /// Primary language for new apps, as an iTunes Connect name or locale code
    pub primary_language: String,
}

impl Default for AppsConfig {
    fn default() -> Self {
        Self {
            primary_language: DEFAULT_PRIMARY_LANGUAGE.to_string(),
        }
    }
}

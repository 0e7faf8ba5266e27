//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_session(config)?;
    validate_apps(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_session(config: &Config) -> Result<()> {
    let host = &config.session.host;
    let valid_host = url::Url::parse(host)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
        .unwrap_or(false);

    if !valid_host {
        return Err(ConfigError::InvalidValue {
            field: "session.host".to_string(),
            message: format!("must be an absolute http(s) URL, got '{}'", host),
        }
        .into());
    }

    if config.session.timeout_secs == Some(0) {
        return Err(ConfigError::InvalidValue {
            field: "session.timeout_secs".to_string(),
            message: "must be greater than zero".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_apps(config: &Config) -> Result<()> {
    if config.apps.primary_language.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "apps.primary_language".to_string(),
            message: "primary language cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

//! Shared setup for commands that talk to the portal

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use itc_connect::TunesClient;
use itc_core::{load_config_or_default, Config};

use super::Cli;

/// Environment variable holding the account password
pub const PASSWORD_ENV: &str = "ITC_PASSWORD";

/// Load the configuration for the current directory
pub fn load_config() -> anyhow::Result<Config> {
    let cwd = std::env::current_dir()?;
    let (config, path) = load_config_or_default(&cwd)?;
    if let Some(path) = path {
        debug!(path = %path.display(), "using config file");
    }
    Ok(config)
}

/// Build a client from config and log in with the configured account
pub async fn connect(cli: &Cli, config: &Config) -> anyhow::Result<TunesClient> {
    let username = config.session.username_or(cli.username.as_deref())?;
    let password = password(&username)?;

    let mut client = TunesClient::new(config.client_config())?;
    client.login(&username, &password).await?;
    Ok(client)
}

/// Run a future to completion on a fresh runtime
pub fn block_on<F: std::future::Future>(future: F) -> anyhow::Result<F::Output> {
    let runtime = tokio::runtime::Runtime::new()?;
    Ok(runtime.block_on(future))
}

fn password(username: &str) -> anyhow::Result<String> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(password);
    }

    let password = dialoguer::Password::new()
        .with_prompt(format!("Password for {}", username))
        .interact()?;
    Ok(password)
}

/// Read a JSON payload from a file, or stdin when the path is `-`
pub fn read_payload(path: &Path) -> anyhow::Result<serde_json::Value> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload from {}", path.display()))?
    };

    serde_json::from_str(&content)
        .with_context(|| format!("Payload in {} is not valid JSON", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_payload_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("version.json");
        std::fs::write(&path, r#"{"details": {"value": []}}"#).unwrap();

        let payload = read_payload(&path).unwrap();
        assert!(payload["details"]["value"].is_array());
    }

    #[test]
    fn test_read_payload_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = read_payload(&path).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn test_read_payload_missing_file() {
        assert!(read_payload(Path::new("/nonexistent/itc/payload.json")).is_err());
    }
}

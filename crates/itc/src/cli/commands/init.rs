//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use dialoguer::Confirm;
use tracing::info;

use itc_core::config::defaults::{DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML};

use crate::cli::{output, Cli, OutputFormat};

/// Write a starter configuration file
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Overwrite an existing file without asking
    #[arg(short, long)]
    pub force: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, "executing init command");
        let config_path = match &self.output {
            Some(path) => path.clone(),
            None => std::env::current_dir()?.join(DEFAULT_CONFIG_TOML),
        };

        if config_path.exists() && !self.force {
            let overwrite = Confirm::new()
                .with_prompt(format!(
                    "Configuration file already exists at {}. Overwrite?",
                    config_path.display()
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                println!("{}", style("Aborted.").yellow());
                return Ok(());
            }
        }

        write_template(&config_path)?;

        if cli.format == OutputFormat::Json {
            output::json(&serde_json::json!({ "path": config_path.display().to_string() }))?;
        } else if !cli.quiet {
            output::success(&format!(
                "Created {}",
                style(config_path.display()).cyan()
            ));
            println!();
            println!("Set {} and run {}", style("session.username").bold(), style("itc login").cyan());
        }

        Ok(())
    }
}

fn write_template(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_written_template_loads() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("itc.toml");

        write_template(&path).unwrap();

        let config = itc_core::load_config(&path).unwrap();
        assert_eq!(config.apps.primary_language, "English_CA");
        assert!(config.session.username.is_none());
    }
}

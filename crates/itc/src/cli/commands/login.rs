//! Login command - verify credentials against the portal

use clap::Args;
use tracing::info;

use crate::cli::session::{block_on, connect, load_config};
use crate::cli::{output, Cli, OutputFormat};

/// Log in once and report the result
#[derive(Debug, Args)]
pub struct LoginCommand;

impl LoginCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing login command");
        let config = load_config()?;

        let client = block_on(connect(cli, &config))??;
        let logged_in = client.session().is_logged_in();

        if cli.format == OutputFormat::Json {
            output::json(&serde_json::json!({
                "logged_in": logged_in,
                "host": config.session.host,
            }))?;
        } else if !cli.quiet {
            output::success(&format!("Logged in to {}", config.session.host));
        }

        Ok(())
    }
}

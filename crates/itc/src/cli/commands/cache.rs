//! Cache command - inspect and clear the login URL cache

use clap::{Args, Subcommand};
use console::style;

use itc_connect::LoginUrlCache;

use crate::cli::session::load_config;
use crate::cli::{output, Cli, OutputFormat};

/// Login URL cache management
#[derive(Debug, Args)]
pub struct CacheCommand {
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Show the cached login URL
    Show,

    /// Remove the cached login URL
    Clear {
        /// Skip confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

impl CacheCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let config = load_config()?;
        let mut cache = LoginUrlCache::new(config.session.cache_dir.clone());

        let Some(path) = cache.path() else {
            if cli.format == OutputFormat::Json {
                output::json(&serde_json::json!({ "enabled": false }))?;
            } else if !cli.quiet {
                output::info("Login URL file cache is disabled (set session.cache_dir to enable)");
            }
            return Ok(());
        };

        let runtime = tokio::runtime::Runtime::new()?;

        match &self.action {
            CacheAction::Show => {
                let url = runtime.block_on(cache.load());

                if cli.format == OutputFormat::Json {
                    output::json(&serde_json::json!({
                        "enabled": true,
                        "path": path.display().to_string(),
                        "login_url": url,
                    }))?;
                } else if !cli.quiet {
                    println!("{}", output::header("Login URL Cache"));
                    println!();
                    println!("  Location:  {}", style(path.display()).cyan());
                    println!("  Login URL: {}", url.as_deref().unwrap_or("(empty)"));
                }
            }
            CacheAction::Clear { yes } => {
                if !*yes {
                    let confirmed = dialoguer::Confirm::new()
                        .with_prompt(format!("Remove cached login URL at {}?", path.display()))
                        .default(false)
                        .interact()?;

                    if !confirmed {
                        println!("{}", style("Aborted.").yellow());
                        return Ok(());
                    }
                }

                let removed = runtime.block_on(cache.clear())?;

                if cli.format == OutputFormat::Json {
                    output::json(&serde_json::json!({ "removed": removed }))?;
                } else if !cli.quiet {
                    if removed {
                        output::success(&format!("Cache cleared at {}", style(path.display()).cyan()));
                    } else {
                        output::success("Cache was already empty");
                    }
                }
            }
        }

        Ok(())
    }
}

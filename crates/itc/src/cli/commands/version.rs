//! Version command - inspect and edit app versions

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use crate::cli::session::{block_on, connect, load_config, read_payload};
use crate::cli::{output, Cli, OutputFormat};

/// App version management
#[derive(Debug, Args)]
pub struct VersionCommand {
    #[command(subcommand)]
    pub subcommand: VersionSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum VersionSubcommand {
    /// Show the editable (or live) version payload
    Show {
        /// App ID
        app_id: String,

        /// Show the version currently on the App Store
        #[arg(long)]
        live: bool,
    },

    /// Create a new version
    Create {
        /// App ID
        app_id: String,

        /// Version number
        version_number: String,
    },

    /// Save a modified version payload
    Update {
        /// App ID
        app_id: String,

        /// Target the live version
        #[arg(long)]
        live: bool,

        /// JSON payload file, or `-` for stdin
        #[arg(long, short = 'd')]
        data: PathBuf,
    },
}

impl VersionCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        block_on(self.execute_async(cli))?
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.subcommand {
            VersionSubcommand::Show { app_id, live } => {
                let config = load_config()?;
                let client = connect(cli, &config).await?;
                let data = client.app_version(app_id, *live).await?;

                if !cli.quiet || cli.format == OutputFormat::Json {
                    output::json(&data)?;
                }
            }
            VersionSubcommand::Create {
                app_id,
                version_number,
            } => {
                let config = load_config()?;
                let client = connect(cli, &config).await?;
                let created = client.create_version(app_id, version_number).await?;

                if cli.format == OutputFormat::Json {
                    output::json(&output::normalized_json(&created))?;
                } else if !cli.quiet {
                    output::section_messages(&created);
                    output::success(&format!(
                        "Created version {} for app {}",
                        style(version_number).green().bold(),
                        app_id
                    ));
                }
            }
            VersionSubcommand::Update { app_id, live, data } => {
                // Read the payload before prompting for a password
                let payload = read_payload(data)?;
                let config = load_config()?;
                let client = connect(cli, &config).await?;
                let saved = client.update_app_version(app_id, *live, payload).await?;

                if cli.format == OutputFormat::Json {
                    output::json(&output::normalized_json(&saved))?;
                } else if !cli.quiet {
                    output::section_messages(&saved);
                    output::success(&format!("Saved version for app {}", app_id));
                }
            }
        }

        Ok(())
    }
}

//! Trains command - inspect and edit build trains

use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde_json::Value;

use crate::cli::session::{block_on, connect, load_config, read_payload};
use crate::cli::{output, Cli, OutputFormat};

/// Build train management
#[derive(Debug, Args)]
pub struct TrainsCommand {
    #[command(subcommand)]
    pub subcommand: TrainsSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum TrainsSubcommand {
    /// List build trains and their builds
    List {
        /// App ID
        app_id: String,
    },

    /// Save a modified build trains payload
    Update {
        /// App ID
        app_id: String,

        /// JSON payload file, or `-` for stdin
        #[arg(long, short = 'd')]
        data: PathBuf,
    },
}

impl TrainsCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        block_on(self.execute_async(cli))?
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.subcommand {
            TrainsSubcommand::List { app_id } => {
                let config = load_config()?;
                let client = connect(cli, &config).await?;
                let trains = client.build_trains(app_id).await?;

                if cli.format == OutputFormat::Json {
                    output::json(&trains)?;
                } else if !cli.quiet {
                    print_trains(&trains);
                }
            }
            TrainsSubcommand::Update { app_id, data } => {
                let payload = read_payload(data)?;
                let config = load_config()?;
                let client = connect(cli, &config).await?;
                let saved = client.update_build_trains(app_id, payload).await?;

                if cli.format == OutputFormat::Json {
                    output::json(&output::normalized_json(&saved))?;
                } else if !cli.quiet {
                    output::section_messages(&saved);
                    output::success(&format!("Saved build trains for app {}", app_id));
                }
            }
        }

        Ok(())
    }
}

fn print_trains(data: &Value) {
    let trains = data
        .get("trains")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    if trains.is_empty() {
        println!("No build trains found");
        return;
    }

    println!("{}", output::header("Build Trains"));
    println!();
    for train in trains {
        let version = train
            .get("versionString")
            .and_then(Value::as_str)
            .unwrap_or("-");
        let builds = train
            .get("builds")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0);
        println!("{}", output::key_value(version, &format!("{} build(s)", builds)));
    }
}

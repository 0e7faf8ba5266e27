//! Apps command - list and create app records

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use itc_connect::NewApplication;

use crate::cli::session::{block_on, connect, load_config};
use crate::cli::{output, Cli, OutputFormat};

/// App record management
#[derive(Debug, Args)]
pub struct AppsCommand {
    #[command(subcommand)]
    pub subcommand: AppsSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum AppsSubcommand {
    /// List every app on the account
    List,

    /// Create a new app record
    Create(CreateArgs),

    /// Show review messages for an app
    ResolutionCenter {
        /// App ID (Apple ID of the app)
        app_id: String,
    },
}

/// Create arguments
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// App name as shown on the App Store
    #[arg(long)]
    pub name: String,

    /// Version number, matching Xcode
    #[arg(id = "app_version", long = "app-version")]
    pub version: String,

    /// Unique SKU, not visible on the App Store
    #[arg(long)]
    pub sku: String,

    /// Bundle identifier
    #[arg(long, env = "ITC_BUNDLE_ID")]
    pub bundle_id: String,

    /// Primary language, as an iTunes Connect name or locale code
    #[arg(long)]
    pub primary_language: Option<String>,

    /// Suffix for wildcard bundle identifiers
    #[arg(long)]
    pub bundle_id_suffix: Option<String>,
}

impl AppsCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        block_on(self.execute_async(cli))?
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<()> {
        let config = load_config()?;
        let client = connect(cli, &config).await?;

        match &self.subcommand {
            AppsSubcommand::List => {
                let apps = client.applications().await?;

                if cli.format == OutputFormat::Json {
                    output::json(&Value::Array(apps))?;
                } else if !cli.quiet {
                    if apps.is_empty() {
                        println!("No apps found");
                    } else {
                        println!("{}", output::header("Apps"));
                        println!();
                        for app in &apps {
                            print_summary(app);
                        }
                    }
                }
            }
            AppsSubcommand::Create(args) => {
                let app = NewApplication {
                    name: args.name.clone(),
                    primary_language: args.primary_language.clone(),
                    version: args.version.clone(),
                    sku: args.sku.clone(),
                    bundle_id: args.bundle_id.clone(),
                    bundle_id_suffix: args.bundle_id_suffix.clone(),
                };

                let created = client.create_application(&app).await?;

                if cli.format == OutputFormat::Json {
                    output::json(&output::normalized_json(&created))?;
                } else if !cli.quiet {
                    output::section_messages(&created);
                    output::success(&format!("Created app {}", style(&args.name).cyan()));
                }
            }
            AppsSubcommand::ResolutionCenter { app_id } => {
                let data = client.resolution_center(app_id).await?;
                if !cli.quiet || cli.format == OutputFormat::Json {
                    output::json(&data)?;
                }
            }
        }

        Ok(())
    }
}

fn print_summary(app: &Value) {
    let text = |key: &str| app.get(key).and_then(Value::as_str).unwrap_or("-").to_string();

    println!("{}", style(text("name")).bold());
    println!("{}", output::key_value("App ID", &text("adamId")));
    println!("{}", output::key_value("Bundle ID", &text("bundleId")));
    println!("{}", output::key_value("SKU", &text("vendorId")));
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(subcommand)]
        apps: AppsSubcommand,
    }

    #[test]
    fn test_parse_create() {
        let harness = Harness::try_parse_from([
            "apps",
            "create",
            "--name",
            "Example",
            "--app-version",
            "1.0",
            "--sku",
            "EX-1",
            "--bundle-id",
            "com.example.app",
            "--primary-language",
            "de-DE",
        ])
        .unwrap();

        let AppsSubcommand::Create(args) = harness.apps else {
            panic!("expected create");
        };
        assert_eq!(args.name, "Example");
        assert_eq!(args.version, "1.0");
        assert_eq!(args.primary_language.as_deref(), Some("de-DE"));
        assert!(args.bundle_id_suffix.is_none());
    }
}

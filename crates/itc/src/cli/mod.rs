//! CLI definition and command handling

pub mod commands;
pub mod output;
mod session;

use clap::{Parser, Subcommand};

use commands::{
    AppsCommand, CacheCommand, CompletionsCommand, InitCommand, LocaleCommand, LoginCommand,
    SubmitCommand, TrainsCommand, VersionCommand,
};

/// itc - command-line client for the iTunes Connect web portal
#[derive(Debug, Parser)]
#[command(name = "itc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<std::path::PathBuf>,

    /// Apple ID used to log in
    #[arg(short, long, global = true, env = "ITC_USERNAME")]
    pub username: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a starter itc.toml
    Init(InitCommand),

    /// Check that the configured account can log in
    Login(LoginCommand),

    /// List and create apps
    Apps(AppsCommand),

    /// Inspect and edit app versions
    Version(VersionCommand),

    /// Inspect and edit build trains
    Trains(TrainsCommand),

    /// Submit the editable version for review
    Submit(SubmitCommand),

    /// Convert between iTunes Connect language names and locale codes
    Locale(LocaleCommand),

    /// Manage the login URL cache
    Cache(CacheCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Login(ref cmd) => cmd.execute(&self),
            Commands::Apps(ref cmd) => cmd.execute(&self),
            Commands::Version(ref cmd) => cmd.execute(&self),
            Commands::Trains(ref cmd) => cmd.execute(&self),
            Commands::Submit(ref cmd) => cmd.execute(&self),
            Commands::Locale(ref cmd) => cmd.execute(&self),
            Commands::Cache(ref cmd) => cmd.execute(&self),
            Commands::Completions(ref cmd) => cmd.execute(&self),
        }
    }
}

//! Shell completions

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use tracing::info;

use crate::cli::{output, Cli, OutputFormat};

/// Generate shell completions
#[derive(Debug, Args)]
pub struct CompletionsCommand {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CompletionsCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(shell = %self.shell, "generating completions");
        let script = render(self.shell);

        let Some(path) = &self.output else {
            std::io::stdout().write_all(&script)?;
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &script)?;

        if cli.format == OutputFormat::Json {
            output::json(&serde_json::json!({
                "shell": self.shell.to_string(),
                "path": path.display().to_string(),
            }))?;
        } else if !cli.quiet {
            output::success(&format!("{} completions written to {}", self.shell, path.display()));
        }

        Ok(())
    }
}

fn render(shell: Shell) -> Vec<u8> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    let mut buffer = Vec::new();
    generate(shell, &mut cmd, name, &mut buffer);
    buffer
}

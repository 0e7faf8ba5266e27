//! Locale command - convert language names and locale codes

use clap::{Args, Subcommand};
use console::style;

use itc_connect::LanguageConverter;

use crate::cli::{output, Cli, OutputFormat};

/// Language name and locale code conversion
#[derive(Debug, Args)]
pub struct LocaleCommand {
    #[command(subcommand)]
    pub subcommand: LocaleSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum LocaleSubcommand {
    /// iTunes Connect name to locale code ("Brazilian Portuguese" -> "pt-BR")
    ToCode {
        /// iTunes Connect language name
        name: String,
    },

    /// Locale code to iTunes Connect name ("de-DE" -> "German")
    ToName {
        /// Locale code
        code: String,
    },

    /// Show the whole table
    List,
}

impl LocaleCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let converter = LanguageConverter::bundled();

        match &self.subcommand {
            LocaleSubcommand::ToCode { name } => {
                let code = converter
                    .to_standard_locale(name)
                    .ok_or_else(|| anyhow::anyhow!("Unknown iTunes Connect language: {}", name))?;
                print_result(cli, name, code)
            }
            LocaleSubcommand::ToName { code } => {
                let name = converter
                    .to_itc_name(code)
                    .ok_or_else(|| anyhow::anyhow!("Unknown locale code: {}", code))?;
                print_result(cli, code, name)
            }
            LocaleSubcommand::List => {
                if cli.format == OutputFormat::Json {
                    println!("{}", serde_json::to_string_pretty(converter.mappings())?);
                } else if !cli.quiet {
                    println!("{}", output::header("Languages"));
                    println!();
                    for row in converter.mappings() {
                        println!("{}", output::key_value(&row.locale, &row.name));
                    }
                }
                Ok(())
            }
        }
    }
}

fn print_result(cli: &Cli, input: &str, result: &str) -> anyhow::Result<()> {
    if cli.format == OutputFormat::Json {
        output::json(&serde_json::json!({ "input": input, "result": result }))?;
    } else if cli.quiet {
        println!("{}", result);
    } else {
        println!("{} -> {}", input, style(result).green().bold());
    }
    Ok(())
}

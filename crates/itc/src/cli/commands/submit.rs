//! Submit command - send the editable version for review

use std::path::PathBuf;

use clap::Args;
use serde_json::Value;

use itc_connect::SubmissionStage;

use crate::cli::session::{block_on, connect, load_config, read_payload};
use crate::cli::{output, Cli, OutputFormat};

/// Review submission
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// App ID
    pub app_id: String,

    /// Submission stage (start, complete)
    #[arg(long, default_value = "start")]
    pub stage: SubmissionStage,

    /// JSON payload file, or `-` for stdin; an empty object when omitted
    #[arg(long, short = 'd')]
    pub data: Option<PathBuf>,
}

impl SubmitCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        block_on(self.execute_async(cli))?
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<()> {
        let payload = match &self.data {
            Some(path) => read_payload(path)?,
            None => Value::Object(Default::default()),
        };

        let config = load_config()?;
        let client = connect(cli, &config).await?;
        let reply = client
            .submit_for_review(&self.app_id, payload, self.stage)
            .await?;

        if cli.format == OutputFormat::Json {
            output::json(&reply)?;
        } else if !cli.quiet {
            output::success(&format!(
                "Submission stage '{}' accepted for app {}",
                self.stage, self.app_id
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        submit: SubmitCommand,
    }

    #[test]
    fn test_stage_parsing() {
        let harness = Harness::try_parse_from(["submit", "42", "--stage", "complete"]).unwrap();
        assert_eq!(harness.submit.stage, SubmissionStage::Complete);
        assert!(harness.submit.data.is_none());

        let harness = Harness::try_parse_from(["submit", "42"]).unwrap();
        assert_eq!(harness.submit.stage, SubmissionStage::Start);

        assert!(Harness::try_parse_from(["submit", "42", "--stage", "later"]).is_err());
    }
}

//! Common types for the portal client

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::TunesError;
use crate::session::DEFAULT_HOST;

/// iTunes Connect name used when no primary language is given
pub const DEFAULT_PRIMARY_LANGUAGE: &str = "English_CA";

/// Client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Portal host, without the application path
    pub host: String,

    /// Directory for the login URL cache file; `None` keeps it in memory only
    pub cache_dir: Option<PathBuf>,

    /// Per-request timeout
    pub timeout: Option<Duration>,

    /// Primary language for new apps when the caller gives none
    pub default_primary_language: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            cache_dir: None,
            timeout: None,
            default_primary_language: DEFAULT_PRIMARY_LANGUAGE.to_string(),
        }
    }
}

/// Values for a new app record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApplication {
    /// Name shown on the App Store, at most 255 characters
    pub name: String,

    /// Primary language, as an iTunes Connect name or a locale code
    pub primary_language: Option<String>,

    /// Version number matching the one used in Xcode
    pub version: String,

    /// Unique ID for the app, not visible on the App Store
    pub sku: String,

    /// Bundle identifier, fixed after the first build is submitted
    pub bundle_id: String,

    /// Suffix for wildcard bundle identifiers
    pub bundle_id_suffix: Option<String>,
}

/// Stage of the review submission flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStage {
    /// Begin a submission and receive the questionnaire
    Start,
    /// Send the answered questionnaire
    Complete,
}

impl SubmissionStage {
    /// Path segment used by the portal
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Complete => "complete",
        }
    }
}

impl std::fmt::Display for SubmissionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionStage {
    type Err = TunesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "complete" => Ok(Self::Complete),
            other => Err(TunesError::Other(format!(
                "Unknown submission stage '{}', expected start or complete",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_stage_parsing() {
        assert_eq!("start".parse::<SubmissionStage>().unwrap(), SubmissionStage::Start);
        assert_eq!("COMPLETE".parse::<SubmissionStage>().unwrap(), SubmissionStage::Complete);
        assert!("finish".parse::<SubmissionStage>().is_err());
        assert_eq!(SubmissionStage::Complete.to_string(), "complete");
    }

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "https://itunesconnect.apple.com");
        assert!(config.cache_dir.is_none());
        assert_eq!(config.default_primary_language, "English_CA");
    }
}

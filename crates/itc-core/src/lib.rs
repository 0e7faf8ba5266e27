//! itc Core - configuration and shared errors
//!
//! Loads the `itc` configuration file and turns it into the settings the
//! portal client needs.

pub mod config;
pub mod error;

pub use config::{find_config, load_config, load_config_or_default, Config};
pub use error::{ConfigError, ItcError, Result};

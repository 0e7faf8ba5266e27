//! Exit codes for the CLI

use itc_connect::TunesError;
use itc_core::{ConfigError, ItcError};

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Login failed
pub const AUTH_ERROR: i32 = 3;

/// Missing parameter or rejected by the portal
pub const VALIDATION_ERROR: i32 = 5;

/// User cancelled
pub const CANCELLED: i32 = 130;

/// Pick the exit code for an error returned by a command
pub fn for_error(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<TunesError>() {
        return for_client_error(err);
    }

    match err.downcast_ref::<ItcError>() {
        Some(ItcError::Config(_)) => CONFIG_ERROR,
        Some(ItcError::Client(err)) => for_client_error(err),
        None if err.downcast_ref::<ConfigError>().is_some() => CONFIG_ERROR,
        None if err.downcast_ref::<dialoguer::Error>().is_some() => CANCELLED,
        None => ERROR,
    }
}

fn for_client_error(err: &TunesError) -> i32 {
    match err {
        TunesError::InvalidCredentials { .. }
        | TunesError::LoginDiscovery(_)
        | TunesError::NotLoggedIn => AUTH_ERROR,
        TunesError::Precondition(_) | TunesError::RemoteValidation(_) => VALIDATION_ERROR,
        _ => ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        let err = anyhow::Error::new(TunesError::InvalidCredentials {
            username: "dev@example.com".to_string(),
            status: 200,
        });
        assert_eq!(for_error(&err), AUTH_ERROR);

        let err = anyhow::Error::new(TunesError::RemoteValidation(vec!["bad".to_string()]));
        assert_eq!(for_error(&err), VALIDATION_ERROR);
    }

    #[test]
    fn test_wrapped_errors() {
        let err = anyhow::Error::new(ItcError::Config(ConfigError::MissingField(
            "session.username".to_string(),
        )));
        assert_eq!(for_error(&err), CONFIG_ERROR);

        let err = anyhow::Error::new(ItcError::Client(TunesError::Precondition(
            "app_id is required".to_string(),
        )));
        assert_eq!(for_error(&err), VALIDATION_ERROR);

        assert_eq!(for_error(&anyhow::anyhow!("boom")), ERROR);
    }
}

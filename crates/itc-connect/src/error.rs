//! Client error types

use thiserror::Error;

/// Errors raised by the iTunes Connect client
#[derive(Debug, Error)]
pub enum TunesError {
    /// The login form action could not be found or fetched
    #[error("Could not fetch the login URL from iTunes Connect, the server might be down: {0}")]
    LoginDiscovery(String),

    /// The login response did not carry the session cookies.
    ///
    /// Fires for wrong credentials and for an unexpected login response alike;
    /// the portal gives no way to tell them apart.
    #[error("Invalid username and password combination for {username} (HTTP {status})")]
    InvalidCredentials { username: String, status: u16 },

    /// A required parameter was missing before any request was sent
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// The portal reported section or field errors in its response
    #[error("{}", .0.join(" "))]
    RemoteValidation(Vec<String>),

    /// A request was attempted without an established session
    #[error("Not logged in to iTunes Connect")]
    NotLoggedIn,

    /// The response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Non-success HTTP status on a portal request
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl TunesError {
    /// Messages carried by a remote validation failure
    pub fn validation_messages(&self) -> Option<&[String]> {
        match self {
            Self::RemoteValidation(messages) => Some(messages),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, TunesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_validation_joins_with_space() {
        let err = TunesError::RemoteValidation(vec![
            "The app name you entered is already being used.".to_string(),
            "SKU is required.".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "The app name you entered is already being used. SKU is required."
        );
        assert_eq!(err.validation_messages().map(|m| m.len()), Some(2));
    }

    #[test]
    fn test_login_discovery_mentions_outage() {
        let err = TunesError::LoginDiscovery("no form action".to_string());
        assert!(err.to_string().contains("server might be down"));
        assert!(err.validation_messages().is_none());
    }
}

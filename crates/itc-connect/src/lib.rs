//! iTunes Connect portal client
//!
//! iTunes Connect is driven through the same cookie-authenticated JSON
//! endpoints its web pages use. This crate logs in, keeps the session, and
//! exposes the app, version, build train and review submission operations.
//!
//! ## Error extraction
//!
//! The portal reports validation problems inside the response body, at any
//! depth. Every mutating call passes its reply through [`normalize`], which
//! fails with [`TunesError::RemoteValidation`] when anything was flagged.
//!
//! ## Usage
//!
//! ```ignore
//! use itc_connect::{ClientConfig, TunesClient};
//!
//! let mut client = TunesClient::new(ClientConfig::default())?;
//! client.login("dev@example.com", &password).await?;
//! let apps = client.applications().await?;
//! ```

pub mod client;
pub mod error;
pub mod locale;
pub mod normalize;
pub mod session;
pub mod transport;
pub mod types;

pub use client::TunesClient;
pub use error::{Result, TunesError};
pub use locale::{LanguageConverter, LanguageMapping, LocaleExt};
pub use normalize::{normalize, parse_response, Normalized};
pub use session::{LoginUrlCache, Session, SessionClient, DEFAULT_HOST};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, RequestBody, Transport};
pub use types::*;

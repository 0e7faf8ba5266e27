//! HTTP transport seam
//!
//! The session client and resource operations only see [`HttpRequest`] and
//! [`HttpResponse`]; the actual wire work happens behind [`Transport`].

use std::time::Duration;

use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::redirect::Policy;
use reqwest::{Client, Method};
use tracing::debug;

use crate::error::Result;

/// Request body variants used by the portal
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body
    None,
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    /// `application/json`
    Json(serde_json::Value),
}

/// A single outgoing request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL without query string
    pub url: String,
    pub query: Vec<(String, String)>,
    /// Value for the `Cookie` header
    pub cookie: Option<String>,
    pub body: RequestBody,
}

impl HttpRequest {
    /// Create a body-less request
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            cookie: None,
            body: RequestBody::None,
        }
    }

    /// Add a query parameter
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Attach a cookie header
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    /// Set a JSON body
    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Set a form-encoded body
    pub fn with_form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(fields);
        self
    }
}

/// A received response
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    /// Every `Set-Cookie` header value, in received order
    pub set_cookie: Vec<String>,
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// All `Set-Cookie` values folded into one header string
    pub fn set_cookie_header(&self) -> Option<String> {
        if self.set_cookie.is_empty() {
            None
        } else {
            Some(self.set_cookie.join(", "))
        }
    }
}

/// Sends requests to the portal
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and wait for its response
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Production transport backed by `reqwest`
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with the default settings
    pub fn new() -> Result<Self> {
        Self::with_timeout(None)
    }

    /// Create a transport with an optional request timeout
    ///
    /// Redirects are never followed: the login response sets its cookies on
    /// a redirect and those must be read from that response.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder()
            .redirect(Policy::none())
            .user_agent(concat!("itc-connect/", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(method = %request.method, url = %request.url, "portal request");

        let mut builder = self.client.request(request.method, &request.url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(cookie) = request.cookie {
            builder = builder.header(COOKIE, cookie);
        }

        builder = match request.body {
            RequestBody::None => builder,
            RequestBody::Form(fields) => builder.form(&fields),
            RequestBody::Json(value) => builder.json(&value),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();

        let set_cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(String::from)
            .collect();

        let body = response.text().await?;
        debug!(status, bytes = body.len(), "portal response");

        Ok(HttpResponse {
            status,
            set_cookie,
            body,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted in-memory transport

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Replays queued responses and records every request it receives
    #[derive(Default)]
    pub struct ScriptedTransport {
        responses: Mutex<VecDeque<HttpResponse>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push(&self, response: HttpResponse) -> &Self {
            self.responses.lock().unwrap().push_back(response);
            self
        }

        pub fn push_json(&self, status: u16, body: serde_json::Value) -> &Self {
            self.push(HttpResponse {
                status,
                set_cookie: Vec::new(),
                body: body.to_string(),
            })
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| crate::error::TunesError::Other("no scripted response".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder_helpers() {
        let request = HttpRequest::new(Method::GET, "https://example.com/ra/apps")
            .with_query("v", "live")
            .with_cookie("myacinfo=a;woinst=b;wosid=c");

        assert_eq!(request.query, vec![("v".to_string(), "live".to_string())]);
        assert_eq!(request.cookie.as_deref(), Some("myacinfo=a;woinst=b;wosid=c"));
        assert_eq!(request.body, RequestBody::None);
    }

    #[test]
    fn test_set_cookie_header_folding() {
        let empty = HttpResponse::default();
        assert!(empty.set_cookie_header().is_none());

        let response = HttpResponse {
            status: 302,
            set_cookie: vec!["woinst=12; path=/".to_string(), "wosid=ab; path=/".to_string()],
            body: String::new(),
        };
        assert_eq!(
            response.set_cookie_header().as_deref(),
            Some("woinst=12; path=/, wosid=ab; path=/")
        );
        assert!(!response.is_success());
    }

    #[test]
    fn test_reqwest_transport_builds() {
        assert!(ReqwestTransport::with_timeout(Some(Duration::from_secs(5))).is_ok());
    }
}

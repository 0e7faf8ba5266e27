//! Login and session handling
//!
//! iTunes Connect has no token API. A session is the set of three cookies
//! handed out by the login form, which has to be located first by scraping
//! the portal's landing page.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, OnceLock};

use regex::Regex;
use reqwest::Method;
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, TunesError};
use crate::transport::{HttpRequest, HttpResponse, Transport};

/// Default portal host
pub const DEFAULT_HOST: &str = "https://itunesconnect.apple.com";

/// Path of the portal web application under the host
pub const APP_PATH: &str = "/WebObjects/iTunesConnect.woa/";

/// File name of the login URL cache inside the cache directory
pub const LOGIN_URL_CACHE_FILE: &str = "itc_login_url.txt";

/// Cookies that make up a session
pub const SESSION_COOKIES: [&str; 3] = ["myacinfo", "woinst", "wosid"];

static LOGIN_ACTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"action="(/WebObjects/iTunesConnect\.woa/wo/[^"]*)""#).expect("Invalid regex")
});

static COOKIE_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    SESSION_COOKIES
        .iter()
        .map(|name| {
            Regex::new(&format!(r"(?:^|[^\w]){}=(\w+)", name)).expect("Invalid regex")
        })
        .collect()
});

/// An authenticated portal session
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    myacinfo: String,
    woinst: String,
    wosid: String,
}

impl Session {
    /// Extract a session from a `Set-Cookie` header.
    ///
    /// Returns `None` unless all three session cookies are present.
    pub fn from_set_cookie(header: &str) -> Option<Self> {
        let mut values = COOKIE_REGEXES
            .iter()
            .map(|re| re.captures(header).map(|c| c[1].to_string()));

        Some(Self {
            myacinfo: values.next()??,
            woinst: values.next()??,
            wosid: values.next()??,
        })
    }

    /// Value for the `Cookie` header of authenticated requests
    pub fn cookie_header(&self) -> String {
        format!(
            "myacinfo={};woinst={};wosid={}",
            self.myacinfo, self.woinst, self.wosid
        )
    }

    pub fn myacinfo(&self) -> &str {
        &self.myacinfo
    }

    pub fn woinst(&self) -> &str {
        &self.woinst
    }

    pub fn wosid(&self) -> &str {
        &self.wosid
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("myacinfo", &"<redacted>")
            .field("woinst", &"<redacted>")
            .field("wosid", &"<redacted>")
            .finish()
    }
}

/// Remembers the discovered login URL.
///
/// Always memoized for the life of the value; persisted to
/// `<cache_dir>/itc_login_url.txt` only when a cache directory is set.
#[derive(Debug, Default)]
pub struct LoginUrlCache {
    cache_dir: Option<PathBuf>,
    memo: OnceLock<String>,
}

impl LoginUrlCache {
    /// Create a cache, optionally backed by a directory
    pub fn new(cache_dir: Option<PathBuf>) -> Self {
        Self {
            cache_dir,
            memo: OnceLock::new(),
        }
    }

    /// Path of the cache file, if file caching is enabled
    pub fn path(&self) -> Option<PathBuf> {
        self.cache_dir.as_deref().map(|d| d.join(LOGIN_URL_CACHE_FILE))
    }

    /// Cached URL from memory, then from disk
    pub async fn load(&self) -> Option<String> {
        if let Some(url) = self.memo.get() {
            return Some(url.clone());
        }

        let path = self.path()?;
        let content = tokio::fs::read_to_string(&path).await.ok()?;
        let url = content.trim();
        if url.is_empty() {
            return None;
        }

        debug!(path = %path.display(), "login URL read from cache file");
        Some(self.memo.get_or_init(|| url.to_string()).clone())
    }

    /// Remember a URL; a failed file write is logged and ignored
    pub async fn store(&self, url: &str) {
        let _ = self.memo.set(url.to_string());

        let Some(path) = self.path() else {
            return;
        };

        if let Err(e) = write_cache_file(&path, url).await {
            warn!(path = %path.display(), error = %e, "failed to write login URL cache");
        }
    }

    /// Forget the URL in memory and on disk. Returns whether a file was removed.
    pub async fn clear(&mut self) -> Result<bool> {
        self.memo.take();

        match self.path() {
            Some(path) if path.exists() => {
                tokio::fs::remove_file(&path).await?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

async fn write_cache_file(path: &Path, url: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, url).await
}

/// Logs in and carries the session cookies on every later request
pub struct SessionClient {
    transport: Arc<dyn Transport>,
    host: String,
    login_cache: LoginUrlCache,
    session: Option<Session>,
}

impl SessionClient {
    /// Create a client for `host` (e.g. [`DEFAULT_HOST`])
    pub fn new(transport: Arc<dyn Transport>, host: &str, login_cache: LoginUrlCache) -> Self {
        Self {
            transport,
            host: host.trim_end_matches('/').to_string(),
            login_cache,
            session: None,
        }
    }

    /// Base URL that resource paths are relative to
    pub fn app_base_url(&self) -> String {
        format!("{}{}", self.host, APP_PATH)
    }

    /// Absolute URL for a resource path such as `ra/apps/manageyourapps/summary`
    pub fn resource_url(&self, path: &str) -> String {
        format!("{}{}", self.app_base_url(), path.trim_start_matches('/'))
    }

    /// The established session, if logged in
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Whether a session is established
    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// Find the login form's action URL.
    ///
    /// The cache is consulted first; the landing page is fetched only on a miss.
    #[instrument(skip(self))]
    pub async fn discover_login_url(&self) -> Result<String> {
        if let Some(url) = self.login_cache.load().await {
            debug!("using cached login URL");
            return Ok(url);
        }

        let request = HttpRequest::new(Method::GET, self.app_base_url());
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| TunesError::LoginDiscovery(e.to_string()))?;

        let action = LOGIN_ACTION_REGEX
            .captures(&response.body)
            .map(|c| c[1].to_string())
            .filter(|a| !a.is_empty())
            .ok_or_else(|| {
                TunesError::LoginDiscovery(format!(
                    "login form not found on landing page (HTTP {})",
                    response.status
                ))
            })?;

        let url = format!("{}{}", self.host, action);
        info!(url = %url, "discovered login URL");
        self.login_cache.store(&url).await;

        Ok(url)
    }

    /// Log in and keep the resulting session.
    ///
    /// Any response without all three session cookies is treated as bad
    /// credentials, whatever its status code.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, username: &str, password: &str) -> Result<&Session> {
        let url = self.discover_login_url().await?;

        let request = HttpRequest::new(Method::POST, url).with_form(vec![
            ("theAccountName".to_string(), username.to_string()),
            ("theAccountPW".to_string(), password.to_string()),
        ]);

        let response = self.transport.send(request).await?;

        let session = response
            .set_cookie_header()
            .and_then(|header| Session::from_set_cookie(&header))
            .ok_or_else(|| {
                warn!(status = response.status, "login response lacked session cookies");
                TunesError::InvalidCredentials {
                    username: username.to_string(),
                    status: response.status,
                }
            })?;

        info!(username, "logged in to iTunes Connect");
        Ok(&*self.session.insert(session))
    }

    /// Send a request with the session cookie attached
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let session = self.session.as_ref().ok_or(TunesError::NotLoggedIn)?;
        self.transport
            .send(request.with_cookie(session.cookie_header()))
            .await
    }
}

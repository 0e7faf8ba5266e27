//! Resource operations on the iTunes Connect portal
//!
//! Every operation builds one request, sends it through the logged-in
//! [`SessionClient`] and hands the `data` member of the reply to the
//! normalizer, whatever the HTTP status. No local validation happens beyond
//! required identifiers.

use std::sync::Arc;

use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info, instrument};

use crate::error::{Result, TunesError};
use crate::locale::LanguageConverter;
use crate::normalize::{normalize, parse_response, Normalized};
use crate::session::{LoginUrlCache, SessionClient};
use crate::transport::{HttpRequest, ReqwestTransport, Transport};
use crate::types::{ClientConfig, NewApplication, SubmissionStage};

/// iTunes Connect portal client
pub struct TunesClient {
    session: SessionClient,
    default_primary_language: String,
}

impl TunesClient {
    /// Create a client using the `reqwest` transport
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::with_timeout(config.timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client on top of any transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let cache = LoginUrlCache::new(config.cache_dir);
        Self {
            session: SessionClient::new(transport, &config.host, cache),
            default_primary_language: config.default_primary_language,
        }
    }

    /// Log in; the session is reused for every later call
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        self.session.login(username, password).await?;
        Ok(())
    }

    /// The underlying session client
    pub fn session(&self) -> &SessionClient {
        &self.session
    }

    /// Send an authenticated request and normalize the `data` member of the reply.
    ///
    /// Error replies are normalized too, since the portal reports rejected
    /// forms with a 4xx status. Only when nothing can be extracted from them
    /// does the status surface as [`TunesError::ApiError`].
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<Normalized> {
        let mut request = HttpRequest::new(method, self.session.resource_url(path));
        for (key, value) in query {
            request = request.with_query(key, value);
        }
        if let Some(body) = body {
            request = request.with_json(body);
        }

        let response = self.session.send(request).await?;

        if !response.is_success() {
            if let Ok(data) = parse_response(&response.body, Some("data")) {
                normalize(data)?;
            }
            return Err(TunesError::ApiError {
                status: response.status,
                message: response.body,
            });
        }

        normalize(parse_response(&response.body, Some("data"))?)
    }

    // -------------------------------------------------------------------------
    // Applications
    // -------------------------------------------------------------------------

    /// Summaries of every app on the account
    #[instrument(skip(self))]
    pub async fn applications(&self) -> Result<Vec<Value>> {
        let reply = self
            .request(Method::GET, "ra/apps/manageyourapps/summary", &[], None)
            .await?;

        match reply.data.get("summaries") {
            Some(Value::Array(summaries)) => {
                debug!(count = summaries.len(), "listed applications");
                Ok(summaries.clone())
            }
            _ => Err(TunesError::UnexpectedResponse(
                "application summary has no summaries list".to_string(),
            )),
        }
    }

    /// Create an app record.
    ///
    /// The portal's creation form is fetched first and the caller's values
    /// are written into it before it is posted back.
    #[instrument(skip(self, app), fields(name = %app.name, bundle_id = %app.bundle_id))]
    pub async fn create_application(&self, app: &NewApplication) -> Result<Normalized> {
        let query = [("appType", "ios")];
        let mut template = self
            .request(Method::GET, "ra/apps/create/", &query, None)
            .await?
            .into_data();

        let primary_language = self.resolve_primary_language(app.primary_language.as_deref());

        set_value(&mut template, "/versionString", json!(app.version))?;
        set_value(&mut template, "/newApp/name", json!(app.name))?;
        set_value(&mut template, "/newApp/bundleId", json!(app.bundle_id))?;
        set_value(&mut template, "/newApp/primaryLanguage", json!(primary_language))?;
        set_value(&mut template, "/newApp/vendorId", json!(app.sku))?;
        set_value(&mut template, "/newApp/bundleIdSuffix", json!(app.bundle_id_suffix))?;

        let created = self
            .request(Method::POST, "ra/apps/create/", &query, Some(template))
            .await?;
        info!("application created");
        Ok(created)
    }

    /// Create a new version of an app
    #[instrument(skip(self))]
    pub async fn create_version(&self, app_id: &str, version: &str) -> Result<Normalized> {
        require_app_id(app_id)?;

        let path = format!("ra/apps/version/create/{}", app_id);
        self.request(Method::POST, &path, &[], Some(json!({ "version": version })))
            .await
    }

    /// Review messages for an app
    #[instrument(skip(self))]
    pub async fn resolution_center(&self, app_id: &str) -> Result<Value> {
        require_app_id(app_id)?;

        let path = format!("ra/apps/{}/resolutionCenter", app_id);
        let reply = self
            .request(Method::GET, &path, &[("v", "latest")], None)
            .await?;
        Ok(reply.into_data())
    }

    // -------------------------------------------------------------------------
    // App versions
    // -------------------------------------------------------------------------

    /// The editable version, or the live one when `is_live` is set
    #[instrument(skip(self))]
    pub async fn app_version(&self, app_id: &str, is_live: bool) -> Result<Value> {
        require_app_id(app_id)?;

        let path = format!("ra/apps/version/{}", app_id);
        let reply = self
            .request(Method::GET, &path, live_query(is_live), None)
            .await?;
        Ok(reply.into_data())
    }

    /// Save a modified version payload
    #[instrument(skip(self, data))]
    pub async fn update_app_version(
        &self,
        app_id: &str,
        is_live: bool,
        data: Value,
    ) -> Result<Normalized> {
        require_app_id(app_id)?;

        let path = format!("ra/apps/version/save/{}", app_id);
        self.request(Method::POST, &path, live_query(is_live), Some(data))
            .await
    }

    // -------------------------------------------------------------------------
    // Build trains
    // -------------------------------------------------------------------------

    /// Build trains of an app
    #[instrument(skip(self))]
    pub async fn build_trains(&self, app_id: &str) -> Result<Value> {
        require_app_id(app_id)?;

        let path = format!("ra/apps/{}/trains/", app_id);
        let reply = self.request(Method::GET, &path, &[], None).await?;
        Ok(reply.into_data())
    }

    /// Save a modified build trains payload
    #[instrument(skip(self, data))]
    pub async fn update_build_trains(&self, app_id: &str, data: Value) -> Result<Normalized> {
        require_app_id(app_id)?;

        let path = format!("ra/apps/{}/trains/", app_id);
        self.request(Method::POST, &path, &[], Some(data)).await
    }

    // -------------------------------------------------------------------------
    // Review submission
    // -------------------------------------------------------------------------

    /// Send one stage of the review submission for the editable version
    #[instrument(skip(self, data))]
    pub async fn submit_for_review(
        &self,
        app_id: &str,
        data: Value,
        stage: SubmissionStage,
    ) -> Result<Value> {
        require_app_id(app_id)?;

        let path = format!("ra/apps/{}/version/submit/{}", app_id, stage);
        let reply = self.request(Method::POST, &path, &[], Some(data)).await?;
        Ok(reply.into_data())
    }

    fn resolve_primary_language(&self, requested: Option<&str>) -> String {
        let language = requested.unwrap_or(&self.default_primary_language);
        LanguageConverter::bundled()
            .to_itc_name(language)
            .unwrap_or(language)
            .to_string()
    }
}

fn require_app_id(app_id: &str) -> Result<()> {
    if app_id.trim().is_empty() {
        return Err(TunesError::Precondition("app_id is required".to_string()));
    }
    Ok(())
}

fn live_query(is_live: bool) -> &'static [(&'static str, &'static str)] {
    if is_live {
        &[("v", "live")]
    } else {
        &[]
    }
}

/// Set `value` on the form field at `pointer`, e.g. `/newApp/name` -> `newApp.name.value`
fn set_value(template: &mut Value, pointer: &str, value: Value) -> Result<()> {
    let field = template
        .pointer_mut(pointer)
        .and_then(Value::as_object_mut)
        .ok_or_else(|| {
            TunesError::UnexpectedResponse(format!(
                "creation form has no field {}",
                pointer.trim_start_matches('/').replace('/', ".")
            ))
        })?;

    field.insert("value".to_string(), value);
    Ok(())
}

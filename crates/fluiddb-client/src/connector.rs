//! The connector: one HTTP round trip per call.
//!
//! [`Connector::call`] turns a method, a resource path, an optional body
//! and query arguments into a request against the configured base URL,
//! and normalizes whatever comes back into a [`Response`] envelope.
//! HTTP error statuses are returned, not raised; only a request that
//! produced no response at all becomes an [`Error::Transport`].

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap};

use fluiddb_core::util::query::append_query;
use fluiddb_core::{
    ERROR_CLASS_HEADER, Error, Method, QueryArgs, REQUEST_ID_HEADER, Response, Result,
};

use crate::config::ClientConfig;

/// Fixed `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("fluiddb-rs/", env!("CARGO_PKG_VERSION"));

const JSON_CONTENT_TYPE: &str = "application/json";
const TEXT_CONTENT_TYPE: &str = "text/plain";

/// Executes requests against one FluidDB instance.
///
/// The configuration is plain mutable state: changing credentials needs
/// `&mut self`, so it cannot happen while resource wrappers borrow the
/// connector.
#[derive(Debug, Clone)]
pub struct Connector {
    http: reqwest::Client,
    config: ClientConfig,
}

impl Connector {
    /// Create a connector for the given configuration.
    ///
    /// Fails with [`Error::Config`] when the base URL does not parse.
    pub fn new(config: ClientConfig) -> Result<Self> {
        validate_base_url(&config.base_url)?;

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::transport_with_source("failed to build HTTP client", e))?;

        Ok(Self { http, config })
    }

    /// The active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Point the connector at another FluidDB instance.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) -> Result<()> {
        let base_url = base_url.into();
        validate_base_url(&base_url)?;
        self.config.base_url = base_url;
        Ok(())
    }

    /// Current username (empty when anonymous).
    pub fn username(&self) -> &str {
        &self.config.username
    }

    /// Current password (empty when anonymous).
    pub fn password(&self) -> &str {
        &self.config.password
    }

    /// Use basic auth with these credentials from now on.
    pub fn set_credentials(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.config.username = username.into();
        self.config.password = password.into();
    }

    /// Go back to anonymous access.
    pub fn clear_credentials(&mut self) {
        self.config.username.clear();
        self.config.password.clear();
    }

    /// Whether `format=json` is injected into every call.
    pub fn always_use_json(&self) -> bool {
        self.config.always_use_json
    }

    /// Toggle `format=json` injection.
    pub fn set_always_use_json(&mut self, always_use_json: bool) {
        self.config.always_use_json = always_use_json;
    }

    /// Issue one request and return its envelope.
    ///
    /// A non-empty body is sent as `application/json`.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&str>,
        args: &QueryArgs,
    ) -> Result<Response> {
        self.execute(method, path, body, JSON_CONTENT_TYPE, args).await
    }

    /// Like [`call`](Self::call), sending the body with an explicit media
    /// type (for example the tag-value type).
    pub async fn call_with_content_type(
        &self,
        method: Method,
        path: &str,
        body: &str,
        content_type: &str,
        args: &QueryArgs,
    ) -> Result<Response> {
        self.execute(method, path, Some(body), content_type, args).await
    }

    /// The full URL a call would use, query string included.
    pub fn url_for(&self, path: &str, args: &QueryArgs) -> String {
        let mut args = args.clone();
        if self.config.always_use_json {
            args.entry("format".to_string())
                .or_insert_with(|| "json".to_string());
        }
        append_query(&join_url(&self.config.base_url, path), &args)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&str>,
        content_type: &str,
        args: &QueryArgs,
    ) -> Result<Response> {
        let url = self.url_for(path, args);
        log::debug!("{method} {url}");

        let mut request = self
            .http
            .request(to_http_method(method), &url)
            .header(ACCEPT, "*/*");

        if let Some(authorization) = self.authorization() {
            request = request.header(AUTHORIZATION, authorization);
        }

        request = match body.filter(|b| !b.is_empty()) {
            Some(body) => request
                .header(CONTENT_TYPE, content_type)
                .body(body.to_string()),
            None => request.header(CONTENT_TYPE, TEXT_CONTENT_TYPE),
        };

        let response = request
            .send()
            .await
            .map_err(|e| Error::transport_with_source(format!("{method} {url} failed"), e))?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let headers = response.headers().clone();
        log::debug!("{method} {url} -> {status}");

        // Headers arrived, so a failed body read still leaves a usable envelope.
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                log::warn!("{method} {url}: could not read response body: {e}");
                return Ok(partial_response(status.as_u16(), &reason, &headers, &url));
            }
        };

        Ok(envelope(status.as_u16(), &reason, &headers, text))
    }

    fn authorization(&self) -> Option<String> {
        if !self.config.has_credentials() {
            return None;
        }
        let pair = format!("{}:{}", self.config.username, self.config.password);
        Some(format!("Basic {}", STANDARD.encode(pair)))
    }
}

fn validate_base_url(base_url: &str) -> Result<()> {
    url::Url::parse(base_url)
        .map(|_| ())
        .map_err(|e| Error::config(format!("invalid base URL '{base_url}': {e}")))
}

/// Join base URL and path with exactly one `/` between them.
fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn to_http_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Put => reqwest::Method::PUT,
        Method::Post => reqwest::Method::POST,
        Method::Delete => reqwest::Method::DELETE,
        Method::Head => reqwest::Method::HEAD,
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn envelope(status: u16, reason: &str, headers: &HeaderMap, body: String) -> Response {
    let content_type = header_value(headers, CONTENT_TYPE.as_str()).unwrap_or_default();
    let mut response = Response::new(status, reason, content_type, body);
    if let Some(class) = header_value(headers, ERROR_CLASS_HEADER) {
        response = response.with_error_class(class);
    }
    if let Some(id) = header_value(headers, REQUEST_ID_HEADER) {
        response = response.with_request_id(id);
    }
    response
}

/// Envelope for a response whose body could not be read: the requested
/// URL stands in for the body.
fn partial_response(status: u16, reason: &str, headers: &HeaderMap, url: &str) -> Response {
    envelope(status, reason, headers, url.to_string())
}

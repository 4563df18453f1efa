//! HTTP transport seam.
//!
//! The client builds an [`HttpRequest`] and hands it to a [`Transport`]. The
//! default implementation wraps a blocking reqwest client; tests substitute a
//! recording mock.

use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::Method;
use thiserror::Error;

use pa_core::config::ClientConfig;
use pa_core::constants;
use pa_core::error::{FailureKind, PaError, PaResult};

use crate::credentials::ApiKey;

/// A fully built request.
#[derive(Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL without the query string.
    pub url: String,
    /// Query pairs, in order.
    pub query: Vec<(String, String)>,
    /// JSON body for POST requests.
    pub body: Option<serde_json::Value>,
    /// Header name and key authenticating the request.
    pub credential: Option<(String, ApiKey)>,
}

impl HttpRequest {
    /// Value of a query parameter, if present.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("query", &redact_query(&self.query))
            .field("body", &self.body)
            // ApiKey's Debug prints only the masked form
            .field("credential", &self.credential)
            .finish()
    }
}

fn redact_query(query: &[(String, String)]) -> Vec<(&str, &str)> {
    query
        .iter()
        .map(|(name, value)| {
            let shown = if constants::is_secret_param(name) {
                constants::REDACTED
            } else {
                value.as_str()
            };
            (name.as_str(), shown)
        })
        .collect()
}

/// Raw response as received.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A request that never produced an HTTP response.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    pub fn kind(&self) -> FailureKind {
        match self {
            TransportError::Timeout(_) => FailureKind::Timeout,
            TransportError::Connect(_) => FailureKind::Connect,
            TransportError::Other(_) => FailureKind::Transport,
        }
    }
}

/// Sends one request and returns one response. No retries.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking reqwest transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: Client,
}

impl ReqwestTransport {
    /// Build the underlying client from configuration.
    ///
    /// Timeouts pass straight through to reqwest; the transport adds no
    /// behavior of its own on top of them.
    pub fn new(config: &ClientConfig) -> PaResult<Self> {
        let mut default_headers = HeaderMap::new();
        for (key, value) in &config.custom_headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| PaError::Config(format!("invalid header name {key:?}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| PaError::Config(format!("invalid value for header {key:?}: {e}")))?;
            default_headers.insert(name, value);
        }
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| PaError::Config(format!("invalid user agent: {e}")))?;
        default_headers.insert(USER_AGENT, user_agent);

        let mut builder = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .pool_idle_timeout(Duration::from_secs(90))
            .default_headers(default_headers);

        if config.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let inner = builder
            .build()
            .map_err(|e| PaError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { inner })
    }

    /// Classify a reqwest error into a transport error.
    fn classify_error(e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout(e.to_string())
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else {
            TransportError::Other(e.to_string())
        }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.inner.request(request.method.clone(), &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some((ref header, ref key)) = request.credential {
            builder = builder.header(header.as_str(), key.expose());
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().map_err(Self::classify_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(Self::classify_error)?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

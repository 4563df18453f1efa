//! HTTP client for the PurpleAir REST API.
//!
//! Every public operation goes through [`ApiClient::execute`]: encode the
//! arguments, pick the credential, issue exactly one request, and normalize
//! the response into an [`ApiResult`] or an [`ApiFailure`].

use std::sync::Arc;

use tracing::{debug, warn};

use pa_core::config::ClientConfig;
use pa_core::error::{ApiFailure, FailureKind, PaError, PaResult};

use crate::credentials::{ApiKey, Credentials};
use crate::operation::{Operation, Placement};
use crate::params::{self, EncodedParams, RequestParams};
use crate::response::{ApiResult, ErrorBody};
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

/// Client for the PurpleAir API.
///
/// Holds only immutable state, so it can be cloned freely and shared across
/// threads as far as the transport allows.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    credentials: Credentials,
    config: ClientConfig,
    /// Base URL for the API (e.g. "https://api.purpleair.com/v1").
    api_root: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_root", &self.api_root)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client using the blocking reqwest transport.
    pub fn new(config: &ClientConfig, credentials: Credentials) -> PaResult<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(config, credentials, Arc::new(transport)))
    }

    /// Create a client over a caller-supplied transport.
    pub fn with_transport(
        config: &ClientConfig,
        credentials: Credentials,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            transport,
            credentials,
            config: config.clone(),
            api_root: config.api_root(),
        }
    }

    /// Get the current API root URL.
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Run one operation end to end.
    ///
    /// `key_override` authenticates the request instead of the configured
    /// credential; it is only used for key validation.
    pub fn execute(
        &self,
        operation: Operation,
        params: RequestParams,
        key_override: Option<&ApiKey>,
    ) -> PaResult<ApiResult> {
        let mut encoded = params::encode(operation, &params)?;

        let key = match (key_override, operation.key_kind()) {
            (Some(key), _) => key,
            (None, Some(kind)) => self.credentials.require(kind, operation.name())?,
            (None, None) => {
                return Err(PaError::MissingParameter {
                    operation: operation.name(),
                    parameter: "key".into(),
                })
            }
        };
        let header = match operation.key_kind() {
            Some(kind) => self.config.key_header(kind).to_string(),
            None => self.config.read_key_header.clone(),
        };

        let redacted = encoded.redacted();
        let path = render_path(operation, &mut encoded);
        let method = operation.method();

        let (query, body) = match operation.placement() {
            Placement::Query => (encoded.to_query(), None),
            Placement::Body => (Vec::new(), Some(encoded.to_json())),
        };

        let request = HttpRequest {
            method: method.clone(),
            url: format!("{}{}", self.api_root, path),
            query,
            body,
            credential: Some((header, key.clone())),
        };

        debug!(
            operation = operation.name(),
            %method,
            %path,
            params = ?redacted,
            "sending request"
        );

        let failure = |kind: FailureKind, status: Option<u16>, body: ErrorBody| ApiFailure {
            operation: operation.name().to_string(),
            method: method.to_string(),
            path: path.clone(),
            status,
            kind,
            code: body.code,
            description: body.description,
            params: redacted.clone(),
        };

        let response = match self.transport.send(&request) {
            Ok(response) => response,
            Err(e) => {
                let f = failure(
                    e.kind(),
                    None,
                    ErrorBody {
                        code: None,
                        description: Some(e.to_string()),
                    },
                );
                warn!("{f}");
                return Err(PaError::Api(f));
            }
        };

        debug!(operation = operation.name(), status = response.status, "response");

        if !response.is_success() {
            let f = failure(
                FailureKind::Http,
                Some(response.status),
                ErrorBody::parse(&response.body),
            );
            warn!("{f}");
            return Err(PaError::Api(f));
        }

        match decode_body(&response) {
            Ok(body) => Ok(ApiResult::new(response.status, body)),
            Err(e) => {
                let f = failure(
                    FailureKind::Decode,
                    Some(response.status),
                    ErrorBody {
                        code: None,
                        description: Some(format!("invalid JSON body: {e}")),
                    },
                );
                warn!("{f}");
                Err(PaError::Api(f))
            }
        }
    }

    /// Shorthand for operations authenticated by the configured credential.
    pub(crate) fn call(&self, operation: Operation, params: RequestParams) -> PaResult<ApiResult> {
        self.execute(operation, params, None)
    }
}

/// Substitute path parameters into the operation's template, removing them
/// from the remaining parameters.
fn render_path(operation: Operation, encoded: &mut EncodedParams) -> String {
    let mut path = operation.path_template().to_string();
    for (name, value) in encoded.take_path_params(&operation.path_params()) {
        path = path.replace(&format!("{{{name}}}"), &value);
    }
    path
}

/// Decode a 2xx body. Empty bodies decode to `Null`.
fn decode_body(response: &HttpResponse) -> Result<serde_json::Value, serde_json::Error> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_slice(&response.body)
}

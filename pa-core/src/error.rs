//! Error types for the PurpleAir client.
//!
//! Failures fall into two categories. Local validation errors
//! (`MissingParameter`, `ConflictingParameter`, `UnrecognizedParameter`,
//! `InvalidParameter`, `CredentialMissing`, `NoCredentials`) are raised before
//! any network I/O and indicate a caller bug. `Api` wraps an [`ApiFailure`]:
//! a non-success HTTP response or a transport fault, with enough context for
//! the caller to decide whether to try again.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience type alias for Results using PaError.
pub type PaResult<T> = Result<T, PaError>;

/// Which credential an operation is gated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyKind {
    /// Read key: read-only endpoints.
    Read,
    /// Write key: group and member mutations.
    Write,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Read => f.write_str("read key"),
            KeyKind::Write => f.write_str("write key"),
        }
    }
}

/// Unified error type for every client operation.
#[derive(Error, Debug)]
pub enum PaError {
    // -- Local validation --
    /// A required argument was absent.
    #[error("{operation}: missing required parameter `{parameter}`")]
    MissingParameter {
        operation: &'static str,
        parameter: String,
    },

    /// Two mutually exclusive arguments were both supplied.
    #[error("{operation}: parameters `{first}` and `{second}` cannot be combined")]
    ConflictingParameter {
        operation: &'static str,
        first: String,
        second: String,
    },

    /// An argument the operation does not accept.
    #[error("{operation}: unrecognized parameter `{parameter}`")]
    UnrecognizedParameter {
        operation: &'static str,
        parameter: String,
    },

    /// An argument was present but its value is out of range.
    #[error("invalid parameter `{parameter}`: {reason}")]
    InvalidParameter { parameter: String, reason: String },

    /// The operation needs a key that was never configured.
    #[error("{operation}: no {key} configured")]
    CredentialMissing {
        operation: &'static str,
        key: KeyKind,
    },

    /// The client was constructed without any key at all.
    #[error("at least one API key (read or write) is required")]
    NoCredentials,

    // -- Remote --
    /// Non-success HTTP response or transport fault.
    #[error(transparent)]
    Api(#[from] ApiFailure),

    // -- Ambient --
    /// Failed to load or parse configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PaError {
    /// Whether this error was raised locally before any request was issued.
    ///
    /// Validation errors are caller bugs; retrying the same call cannot help.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PaError::MissingParameter { .. }
                | PaError::ConflictingParameter { .. }
                | PaError::UnrecognizedParameter { .. }
                | PaError::InvalidParameter { .. }
                | PaError::CredentialMissing { .. }
                | PaError::NoCredentials
        )
    }

    /// The wrapped API failure, if this is one.
    pub fn as_api_failure(&self) -> Option<&ApiFailure> {
        match self {
            PaError::Api(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for PaError {
    fn from(e: toml::de::Error) -> Self {
        PaError::Config(e.to_string())
    }
}

/// How an API call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The server answered with a non-2xx status.
    Http,
    /// The request timed out.
    Timeout,
    /// The connection could not be established.
    Connect,
    /// Any other transport-level fault.
    Transport,
    /// A 2xx response whose body was not valid JSON.
    Decode,
}

/// A failed API call with its diagnostic context.
///
/// `params` never contains credential values; those are replaced with a
/// placeholder before the failure is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiFailure {
    /// Client operation that issued the request (e.g. `get_sensor_data`).
    pub operation: String,
    /// HTTP method.
    pub method: String,
    /// Request path relative to the API root.
    pub path: String,
    /// HTTP status, absent for transport faults.
    pub status: Option<u16>,
    pub kind: FailureKind,
    /// Upstream error code (e.g. `ApiKeyInvalidError`).
    pub code: Option<String>,
    /// Upstream error description, or the transport error text.
    pub description: Option<String>,
    /// Request parameters with credentials redacted.
    pub params: Vec<(String, String)>,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} failed", self.operation, self.method, self.path)?;
        match self.status {
            Some(status) => write!(f, " (status {status})")?,
            None => write!(f, " ({:?})", self.kind)?,
        }
        if let Some(ref code) = self.code {
            write!(f, ": {code}")?;
        }
        if let Some(ref description) = self.description {
            write!(f, ": {description}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiFailure {}

impl ApiFailure {
    /// Whether the server rejected the request as malformed or unauthorized (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(self.status, Some(s) if (400..500).contains(&s))
    }

    /// Whether the server failed to handle the request (5xx).
    pub fn is_server_error(&self) -> bool {
        matches!(self.status, Some(s) if s >= 500)
    }

    /// Whether the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(
            self.kind,
            FailureKind::Timeout | FailureKind::Connect | FailureKind::Transport
        )
    }
}

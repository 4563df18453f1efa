//! API key types.
//!
//! Keys are opaque strings. They are only ever printed in masked form so a
//! stray `{:?}` in a log line cannot leak one.

use std::fmt;

use pa_core::error::{KeyKind, PaError, PaResult};

/// Number of leading characters shown when a key is printed.
const VISIBLE_PREFIX: usize = 4;

/// An opaque API key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key. Returns `None` for empty or whitespace-only input.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The raw key, for placing in a request header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Masked form: the first few characters followed by an ellipsis.
    pub fn masked(&self) -> String {
        let count = self.0.chars().count();
        if count <= VISIBLE_PREFIX {
            return "****".to_string();
        }
        let prefix: String = self.0.chars().take(VISIBLE_PREFIX).collect();
        format!("{prefix}…")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self.masked())
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

/// The read/write key pair a client is constructed with.
#[derive(Debug, Clone)]
pub struct Credentials {
    read_key: Option<ApiKey>,
    write_key: Option<ApiKey>,
}

impl Credentials {
    /// Build a credential pair. At least one key must be non-empty.
    pub fn new(read_key: Option<&str>, write_key: Option<&str>) -> PaResult<Self> {
        let read_key = read_key.and_then(ApiKey::new);
        let write_key = write_key.and_then(ApiKey::new);
        if read_key.is_none() && write_key.is_none() {
            return Err(PaError::NoCredentials);
        }
        Ok(Self {
            read_key,
            write_key,
        })
    }

    /// Credentials for read-only endpoints.
    pub fn read_only(read_key: &str) -> PaResult<Self> {
        Self::new(Some(read_key), None)
    }

    /// Credentials for both read and write endpoints.
    pub fn read_write(read_key: &str, write_key: &str) -> PaResult<Self> {
        Self::new(Some(read_key), Some(write_key))
    }

    pub fn read_key(&self) -> Option<&ApiKey> {
        self.read_key.as_ref()
    }

    pub fn write_key(&self) -> Option<&ApiKey> {
        self.write_key.as_ref()
    }

    /// The key for the given kind, or `CredentialMissing` naming the operation.
    pub fn require(&self, kind: KeyKind, operation: &'static str) -> PaResult<&ApiKey> {
        let key = match kind {
            KeyKind::Read => self.read_key.as_ref(),
            KeyKind::Write => self.write_key.as_ref(),
        };
        key.ok_or(PaError::CredentialMissing {
            operation,
            key: kind,
        })
    }
}

//! Library-wide constants.

/// Library version.
pub const LIB_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://api.purpleair.com";

/// REST API version prefix.
pub const API_VERSION: &str = "v1";

/// Header carrying the API key on every authenticated request.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default connect timeout in milliseconds.
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 15_000;

/// Separator used when a list-valued parameter is sent on the wire.
pub const LIST_DELIMITER: &str = ",";

/// Placeholder substituted for credential values in diagnostics.
pub const REDACTED: &str = "[redacted]";

/// Parameter names whose values are credentials and must never be echoed.
pub const SECRET_PARAMS: &[&str] = &["read_key", "read_keys"];

/// Whether a parameter name carries a credential value.
pub fn is_secret_param(name: &str) -> bool {
    SECRET_PARAMS.contains(&name)
}

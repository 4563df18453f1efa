//! Client configuration.
//!
//! Configuration is an explicit value handed to the client constructor; the
//! library never reads global state or the environment. It can be persisted
//! as TOML when the caller wants to keep it on disk.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{KeyKind, PaError, PaResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API connection settings.
    #[serde(default)]
    pub api: ClientConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API host (e.g., "https://api.purpleair.com").
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API version path segment.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,

    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,

    /// Header carrying the read key.
    #[serde(default = "default_key_header")]
    pub read_key_header: String,

    /// Header carrying the write key.
    #[serde(default = "default_key_header")]
    pub write_key_header: String,

    /// User-Agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Extra HTTP headers as key-value pairs.
    #[serde(default)]
    pub custom_headers: HashMap<String, String>,

    /// Whether to accept invalid TLS certificates (test proxies only).
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, only console logging is set up.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output.
    #[serde(default)]
    pub json_output: bool,
}

// -- Defaults --

fn default_base_url() -> String {
    constants::DEFAULT_BASE_URL.into()
}

fn default_api_version() -> String {
    constants::API_VERSION.into()
}

fn default_timeout() -> u64 {
    constants::DEFAULT_TIMEOUT_MS
}

fn default_connect_timeout() -> u64 {
    constants::DEFAULT_CONNECT_TIMEOUT_MS
}

fn default_key_header() -> String {
    constants::API_KEY_HEADER.into()
}

fn default_user_agent() -> String {
    format!("purpleair-rs/{}", constants::LIB_VERSION)
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_version: default_api_version(),
            timeout_ms: default_timeout(),
            connect_timeout_ms: default_connect_timeout(),
            read_key_header: default_key_header(),
            write_key_header: default_key_header(),
            user_agent: default_user_agent(),
            custom_headers: HashMap::new(),
            accept_invalid_certs: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl Config {
    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> PaResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> PaResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| PaError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

impl ClientConfig {
    /// Configuration pointing at a different host, e.g. a local mock server.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Root URL all operation paths are appended to (e.g. "https://api.purpleair.com/v1").
    pub fn api_root(&self) -> String {
        let base = Self::sanitize_base_url(&self.base_url);
        let version = self.api_version.trim_matches('/');
        if version.is_empty() {
            base
        } else {
            format!("{base}/{version}")
        }
    }

    /// Header name carrying the given key kind.
    pub fn key_header(&self, kind: KeyKind) -> &str {
        match kind {
            KeyKind::Read => &self.read_key_header,
            KeyKind::Write => &self.write_key_header,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Sanitize and normalize an API host address.
    ///
    /// Strips surrounding quotes and whitespace, adds `https://` when no
    /// scheme is given, and drops trailing slashes.
    pub fn sanitize_base_url(address: &str) -> String {
        let trimmed = address.trim().trim_matches('"').trim();
        if trimmed.is_empty() {
            return constants::DEFAULT_BASE_URL.to_string();
        }

        let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };

        with_scheme.trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://api.purpleair.com");
        assert_eq!(config.api.timeout_ms, 30_000);
        assert_eq!(config.api.read_key_header, "X-API-Key");
        assert_eq!(config.api.write_key_header, "X-API-Key");
        assert_eq!(config.logging.level, "info");
        assert!(config.api.user_agent.starts_with("purpleair-rs/"));
    }

    #[test]
    fn test_api_root() {
        let config = ClientConfig::default();
        assert_eq!(config.api_root(), "https://api.purpleair.com/v1");

        let config = ClientConfig::with_base_url("http://127.0.0.1:8080/");
        assert_eq!(config.api_root(), "http://127.0.0.1:8080/v1");
    }

    #[test]
    fn test_sanitize_base_url() {
        assert_eq!(
            ClientConfig::sanitize_base_url("api.purpleair.com"),
            "https://api.purpleair.com"
        );
        assert_eq!(
            ClientConfig::sanitize_base_url("http://localhost:1234/"),
            "http://localhost:1234"
        );
        assert_eq!(
            ClientConfig::sanitize_base_url("  \"https://example.com/\"  "),
            "https://example.com"
        );
        assert_eq!(
            ClientConfig::sanitize_base_url(""),
            "https://api.purpleair.com"
        );
    }

    #[test]
    fn test_key_header_per_kind() {
        let mut config = ClientConfig::default();
        config.write_key_header = "X-Write-Key".into();
        assert_eq!(config.key_header(KeyKind::Read), "X-API-Key");
        assert_eq!(config.key_header(KeyKind::Write), "X-Write-Key");
    }

    #[test]
    fn test_roundtrip_toml() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.api.timeout_ms, config.api.timeout_ms);
        assert_eq!(deserialized.api.base_url, config.api.base_url);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[api]\ntimeout_ms = 5000\n").unwrap();
        assert_eq!(config.api.timeout_ms, 5000);
        assert_eq!(config.api.api_version, "v1");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("purpleair.toml");

        let mut config = Config::default();
        config.api.base_url = "http://localhost:9999".into();
        config
            .api
            .custom_headers
            .insert("X-Trace".into(), "on".into());
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.api.base_url, "http://localhost:9999");
        assert_eq!(loaded.api.custom_headers.get("X-Trace").map(String::as_str), Some("on"));
    }

    #[test]
    fn test_load_invalid_toml_is_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();
        let err = Config::load_from_file(&path).unwrap_err();
        assert!(matches!(err, PaError::Config(_)));
    }
}

//! Response normalization.
//!
//! Successful bodies are kept as generic JSON: the upstream schema is owned
//! elsewhere and changes without notice. Error bodies are picked apart just
//! enough to surface a code and description.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A successful API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResult {
    /// HTTP status (always 2xx).
    pub status: u16,
    /// Decoded body; `Null` for empty bodies such as `204 No Content`.
    pub body: Value,
}

impl ApiResult {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Top-level field of the body.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_null()
    }

    pub fn into_value(self) -> Value {
        self.body
    }

    /// Rows of a tabular response as field-name → value mappings.
    ///
    /// Multi-sensor reads return `{"fields": [...], "data": [[...], ...]}`.
    /// Returns `None` when the body does not have that shape. Rows shorter
    /// than the field list yield only the fields they cover.
    pub fn records(&self) -> Option<Vec<Map<String, Value>>> {
        let fields = self.get("fields")?.as_array()?;
        let rows = self.get("data")?.as_array()?;

        let names: Vec<&str> = fields.iter().filter_map(Value::as_str).collect();
        if names.len() != fields.len() {
            return None;
        }

        let records = rows
            .iter()
            .filter_map(Value::as_array)
            .map(|row| {
                names
                    .iter()
                    .zip(row.iter())
                    .map(|(name, value)| (name.to_string(), value.clone()))
                    .collect()
            })
            .collect();
        Some(records)
    }
}

/// Error body returned with a non-2xx status.
///
/// Accepts both `{"code": ..., "description": ...}` and the
/// `{"error": ..., "description": ...}` shape the API actually sends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, alias = "error", deserialize_with = "lenient_text")]
    pub code: Option<String>,
    #[serde(default, alias = "message", deserialize_with = "lenient_text")]
    pub description: Option<String>,
}

/// Accept any JSON scalar as text; numeric codes become their decimal form.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

impl ErrorBody {
    /// Parse an error body, tolerating anything that is not the expected JSON.
    ///
    /// Non-JSON text becomes the description so that proxies returning HTML
    /// or plain text still produce a readable failure.
    pub fn parse(body: &[u8]) -> Self {
        if body.is_empty() {
            return Self::default();
        }
        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(parsed) => parsed,
            Err(_) => {
                let text = String::from_utf8_lossy(body).trim().to_string();
                Self {
                    code: None,
                    description: (!text.is_empty()).then_some(text),
                }
            }
        }
    }
}

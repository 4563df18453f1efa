//! Key validation endpoint.

use pa_core::error::{PaError, PaResult};

use crate::client::ApiClient;
use crate::credentials::ApiKey;
use crate::operation::Operation;
use crate::params::RequestParams;
use crate::response::ApiResult;

impl ApiClient {
    /// Validate `key` and report its type.
    ///
    /// The key under test authenticates the request itself, so this works
    /// regardless of which keys the client was built with. An invalid key
    /// comes back as an `ApiFailure` with status 403.
    pub fn check_api_key(&self, key: &str) -> PaResult<ApiResult> {
        let key = ApiKey::new(key).ok_or(PaError::MissingParameter {
            operation: Operation::CheckApiKey.name(),
            parameter: "key".into(),
        })?;
        self.execute(Operation::CheckApiKey, RequestParams::new(), Some(&key))
    }

    /// The `api_key_type` field (`READ`, `WRITE`, ...) of a successful check.
    pub fn api_key_type(&self, key: &str) -> PaResult<Option<String>> {
        let result = self.check_api_key(key)?;
        Ok(result
            .get("api_key_type")
            .and_then(|v| v.as_str())
            .map(str::to_string))
    }
}

//! Response bodies that are not map data.

use serde::{Deserialize, Serialize};

/// Literal body sent with every failed map request.
///
/// Existing clients match on this exact text, so the error detail is logged
/// rather than returned.
pub const MAP_ERROR_BODY: &str = "err\n";

/// JSON body returned for paths the router does not know (`/`, `/a/b`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"not_found"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

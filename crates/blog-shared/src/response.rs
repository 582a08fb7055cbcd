//! Standardized API response envelopes.

use serde::{Deserialize, Serialize};

/// Successful API response wrapper.
///
/// `data` and `count` are omitted from the JSON when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            count: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            count: None,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// List response carrying the item count alongside the items.
    pub fn list(message: impl Into<String>, items: Vec<T>) -> Self {
        Self {
            message: message.into(),
            count: Some(items.len()),
            data: Some(items),
        }
    }
}

/// Error body shared by every failing response: `{error, message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short summary of what failed.
    pub error: String,
    /// Human-readable reason.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }

    pub fn invalid_body(detail: impl Into<String>) -> Self {
        Self::new("Invalid request body", detail)
    }

    pub fn route_not_found() -> Self {
        Self::new("Not Found", "The requested endpoint does not exist")
    }
}

//! Error helpers shared by MCP servers
//!
//! Protocol-level failures use [`McpError`]. Tool-level failures are reported
//! in-band as an [`ErrorEnvelope`] so that every tool call yields one JSON object.

use rmcp::ErrorData as McpError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Type alias for MCP tool results
pub type McpResult<T> = Result<T, McpError>;

/// In-band error payload: `{"error": <message>, "type": <kind>}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Human-readable message
    pub error: String,
    /// Error family, e.g. `ADBError` or `UnknownError`
    #[serde(rename = "type")]
    pub kind: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            kind: kind.into(),
        }
    }

    /// Convert into a JSON object without going through the serializer
    pub fn into_value(self) -> Value {
        serde_json::json!({ "error": self.error, "type": self.kind })
    }
}

/// Create an internal error with a message
pub fn internal_error(message: impl Into<String>) -> McpError {
    McpError::internal_error(message.into(), None)
}

//! Error taxonomy for tool calls
//!
//! A [`ToolError`] always renders to the same JSON envelope:
//! `{"error": <message>, "type": <kind>}`.

use mcp_common::ErrorEnvelope;
use thiserror::Error;

use crate::adb::AdbError;

#[derive(Error, Debug)]
pub enum ToolError {
    /// Any failure reported by the adb backend
    #[error(transparent)]
    Adb(#[from] AdbError),

    /// Missing or malformed tool arguments
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Name not in the registry, or disabled by configuration
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Anything else; always logged server-side
    #[error("{0}")]
    Unknown(String),
}

impl ToolError {
    /// Value of the envelope's `type` field
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::Adb(_) => "ADBError",
            ToolError::InvalidParams(_) => "InvalidParams",
            ToolError::UnknownTool(_) => "UnknownTool",
            ToolError::Unknown(_) => "UnknownError",
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope::new(self.to_string(), self.kind())
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::Unknown(format!("serialization error: {err}"))
    }
}

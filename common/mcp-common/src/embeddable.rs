//! In-process tool execution
//!
//! [`EmbeddableMcp`] lets a host call a server's tools by name without an MCP
//! transport in between. Console frontends and tests use it to drive the same
//! tool code the stdio server exposes.
//!
//! ```rust,ignore
//! use mcp_common::EmbeddableMcp;
//!
//! let devices = server.call_tool_json("list_devices", serde_json::json!({})).await?;
//! println!("{} device(s)", devices["count"]);
//! ```

use async_trait::async_trait;
use rmcp::model::{CallToolResult, RawContent, Tool};
use serde_json::Value;

/// Error type for embeddable MCP operations
#[derive(Debug, thiserror::Error)]
pub enum EmbeddableError {
    /// Tool was not found in the server, or is disabled
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// Invalid parameters passed to the tool
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Tool produced no usable payload
    #[error("tool execution failed: {0}")]
    ExecutionError(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    /// MCP protocol error
    #[error("mcp error: {0}")]
    McpError(String),
}

impl From<rmcp::ErrorData> for EmbeddableError {
    fn from(err: rmcp::ErrorData) -> Self {
        EmbeddableError::McpError(err.message.to_string())
    }
}

/// Result type for embeddable MCP operations
pub type EmbeddableResult<T> = Result<T, EmbeddableError>;

/// An MCP server whose tools can be called in-process
///
/// Implementations must be `Send + Sync`; concurrent calls are allowed.
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Short server name, as used in MCP configuration files
    fn server_name(&self) -> &str;

    /// Tools currently callable, with their input schemas
    fn list_tools(&self) -> Vec<Tool>;

    /// Execute a tool by name with a JSON object of arguments
    ///
    /// Tool-level failures that the server reports in-band come back as
    /// `Ok` with `is_error` set; only unknown tools and rejected parameters are
    /// `Err`.
    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult>;

    /// Execute a tool and parse its first text content as JSON
    async fn call_tool_json(&self, name: &str, params: Value) -> EmbeddableResult<Value> {
        let result = self.call_tool(name, params).await?;
        let text = first_text(&result).ok_or_else(|| {
            EmbeddableError::ExecutionError(format!("{name} returned no text content"))
        })?;
        Ok(serde_json::from_str(text)?)
    }

    fn server_description(&self) -> Option<&str> {
        None
    }
}

/// First text item of a tool result, if any
pub fn first_text(result: &CallToolResult) -> Option<&str> {
    result.content.iter().find_map(|c| match &c.raw {
        RawContent::Text(t) => Some(t.text.as_str()),
        _ => None,
    })
}

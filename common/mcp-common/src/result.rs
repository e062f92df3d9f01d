//! Result helpers for MCP tool responses
//!
//! Tool payloads are pretty-printed JSON in a single text content item, for
//! successes and in-band errors alike.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;

use crate::error::{internal_error, McpResult};

fn pretty<T: Serialize>(data: &T) -> McpResult<String> {
    serde_json::to_string_pretty(data).map_err(|e| internal_error(e.to_string()))
}

/// Create a successful JSON response from any serializable data
///
/// # Errors
///
/// Returns an internal `McpError` if serialization fails.
pub fn json_success<T: Serialize>(data: &T) -> McpResult<CallToolResult> {
    Ok(CallToolResult::success(vec![Content::text(pretty(data)?)]))
}

/// Create a JSON response flagged as a tool error (`is_error: true`)
///
/// Used for in-band error envelopes: the client still receives a parseable
/// JSON object, and MCP-aware clients also see the error flag.
pub fn json_error<T: Serialize>(data: &T) -> McpResult<CallToolResult> {
    Ok(CallToolResult::error(vec![Content::text(pretty(data)?)]))
}

//! MCP Common - Shared utilities for MCP servers
//!
//! - **Initialization**: [`init_tracing`] and [`serve_stdio`]
//! - **Results**: [`json_success`] / [`json_error`] build `CallToolResult`s
//!   carrying a pretty-printed JSON payload
//! - **Errors**: [`ErrorEnvelope`] for in-band tool errors, [`McpResult`] and
//!   [`internal_error`] for protocol-level ones
//! - **Embeddable**: [`EmbeddableMcp`] trait for in-process execution

pub mod embeddable;
pub mod error;
pub mod init;
pub mod result;

pub use embeddable::{first_text, EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use error::{internal_error, ErrorEnvelope, McpResult};
pub use init::{init_tracing, level_directive, serve_stdio};
pub use result::{json_error, json_success};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

// Re-export async_trait for implementing EmbeddableMcp
pub use async_trait::async_trait;

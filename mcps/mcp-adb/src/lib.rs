//! ADB MCP Library
//!
//! MCP-compatible tools for Android devices via the `adb` CLI.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use mcp_adb::{AdbClient, AdbMcpServer, Dispatcher};
//!
//! let dispatcher = Dispatcher::new(AdbClient::mock());
//! let reply = dispatcher.dispatch("list_devices", serde_json::json!({})).await;
//! assert_eq!(reply["count"], 2);
//!
//! // or serve it over MCP
//! let server = AdbMcpServer::new(dispatcher);
//! ```
//!
//! # Requirements
//! - `adb` installed (Android platform-tools), unless running in mock mode

pub mod adb;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod frontend;
pub mod handlers;
pub mod params;
pub mod server;
pub mod tools;

pub use adb::{AdbClient, AdbError, AdbSettings};
pub use config::Config;
pub use dispatch::Dispatcher;
pub use error::ToolError;
pub use frontend::{Frontend, RunMode};
pub use server::AdbMcpServer;
pub use tools::ToolName;

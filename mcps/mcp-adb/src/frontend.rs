//! Startup frontends
//!
//! The binary picks one frontend from the command line and hands it the
//! server: [`StdioFrontend`] speaks MCP over stdio, [`DemoFrontend`] drives the
//! tools in-process and prints a short report.

use async_trait::async_trait;
use mcp_common::EmbeddableMcp;
use serde_json::{json, Value};

use crate::server::AdbMcpServer;

/// How the server is exposed once constructed
#[async_trait]
pub trait Frontend: Send {
    async fn run(self: Box<Self>, server: AdbMcpServer) -> anyhow::Result<()>;
}

/// Frontend selected at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Stdio,
    Demo,
}

impl RunMode {
    pub fn frontend(self) -> Box<dyn Frontend> {
        match self {
            RunMode::Stdio => Box::new(StdioFrontend),
            RunMode::Demo => Box::new(DemoFrontend),
        }
    }
}

/// Serve MCP over stdin/stdout
pub struct StdioFrontend;

#[async_trait]
impl Frontend for StdioFrontend {
    async fn run(self: Box<Self>, server: AdbMcpServer) -> anyhow::Result<()> {
        tracing::info!("Starting MCP ADB server via stdio");
        mcp_common::serve_stdio(server).await
    }
}

/// List devices and sample the first device's properties, then exit
pub struct DemoFrontend;

/// Properties shown per device in the demo report
const SAMPLE_PROPERTIES: usize = 3;

impl DemoFrontend {
    /// Build the demo report. Tool failures are reported in the text, never
    /// returned as errors.
    pub async fn report<S: EmbeddableMcp + ?Sized>(server: &S) -> String {
        let mut lines = vec![
            "MCP ADB Server - Demo Mode".to_string(),
            "=".repeat(40),
        ];

        match Self::sample(server, &mut lines).await {
            Ok(()) => {}
            Err(message) => lines.push(message),
        }

        lines.push(String::new());
        lines.push("Demo completed. In production, this would run as MCP server.".to_string());
        lines.join("\n")
    }

    async fn sample<S: EmbeddableMcp + ?Sized>(
        server: &S,
        lines: &mut Vec<String>,
    ) -> Result<(), String> {
        let listing = call(server, "list_devices", json!({})).await?;
        let devices = listing["devices"].as_array().cloned().unwrap_or_default();

        lines.push(format!("Found {} devices:", devices.len()));
        for device in &devices {
            lines.push(format!("  - {device}"));
        }

        let Some(device_id) = devices.first().and_then(|d| d["id"].as_str()) else {
            return Ok(());
        };

        let info = call(server, "get_device_info", json!({ "device_id": device_id })).await?;
        lines.push(String::new());
        lines.push(format!(
            "Device info sample (first {SAMPLE_PROPERTIES} properties):"
        ));
        if let Some(props) = info["device_info"].as_object() {
            for (key, value) in props.iter().take(SAMPLE_PROPERTIES) {
                lines.push(format!("  {}: {}", key, value.as_str().unwrap_or_default()));
            }
        }

        Ok(())
    }
}

/// Call a tool, turning both error paths into a printable line
async fn call<S: EmbeddableMcp + ?Sized>(
    server: &S,
    name: &str,
    params: Value,
) -> Result<Value, String> {
    let value = server
        .call_tool_json(name, params)
        .await
        .map_err(|e| format!("Error: {e}"))?;

    if let Some(kind) = value.get("type").and_then(Value::as_str) {
        let message = value["error"].as_str().unwrap_or_default();
        return Err(match kind {
            "ADBError" => format!("ADB Error: {message}"),
            _ => format!("Error: {message}"),
        });
    }
    Ok(value)
}

#[async_trait]
impl Frontend for DemoFrontend {
    async fn run(self: Box<Self>, server: AdbMcpServer) -> anyhow::Result<()> {
        tracing::info!("Starting MCP ADB server in demo mode");
        println!("{}", Self::report(&server).await);
        Ok(())
    }
}

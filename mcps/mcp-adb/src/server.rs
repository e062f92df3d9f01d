//! MCP Server implementation for Android Debug Bridge operations

use mcp_common::{
    async_trait, json_error, json_success, EmbeddableError, EmbeddableMcp, EmbeddableResult,
    McpResult,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router,
};
use serde_json::Value;

use crate::adb::AdbClient;
use crate::dispatch::Dispatcher;
use crate::error::ToolError;
use crate::handlers;
use crate::params::*;
use crate::tools::ToolName;

const INSTRUCTIONS: &str = "ADB MCP server for Android devices. \
     Lists attached devices, reads system properties, runs shell commands, \
     installs/uninstalls apps and copies files to and from a device. \
     Every tool returns a JSON object; failures carry \"error\" and \"type\" fields.";

/// The ADB MCP Server
#[derive(Clone)]
pub struct AdbMcpServer {
    dispatcher: Dispatcher,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Tool Router - each tool runs its handler through the dispatcher
// ============================================================================

#[tool_router]
impl AdbMcpServer {
    /// Create a server exposing the dispatcher's enabled tools
    pub fn new(dispatcher: Dispatcher) -> Self {
        let mut tool_router = Self::tool_router();
        for tool in ToolName::ALL {
            if !dispatcher.is_enabled(tool) {
                tool_router.remove_route(tool.as_str());
            }
        }

        Self {
            dispatcher,
            tool_router,
        }
    }

    /// Server backed by canned adb output, with every tool enabled
    pub fn mock() -> Self {
        Self::new(Dispatcher::new(AdbClient::mock()))
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    fn client(&self) -> AdbClient {
        self.dispatcher.client().clone()
    }

    #[tool(description = "List all connected Android devices")]
    async fn list_devices(&self) -> McpResult<CallToolResult> {
        let call = handlers::list_devices(self.client(), ListDevicesParams::default());
        respond(self.dispatcher.run(ToolName::ListDevices, call).await)
    }

    #[tool(description = "Get detailed information (system properties) about a specific device")]
    async fn get_device_info(
        &self,
        Parameters(params): Parameters<GetDeviceInfoParams>,
    ) -> McpResult<CallToolResult> {
        let call = handlers::get_device_info(self.client(), params);
        respond(self.dispatcher.run(ToolName::GetDeviceInfo, call).await)
    }

    #[tool(description = "Execute a shell command on an Android device")]
    async fn shell_command(
        &self,
        Parameters(params): Parameters<ShellCommandParams>,
    ) -> McpResult<CallToolResult> {
        let call = handlers::shell_command(self.client(), params);
        respond(self.dispatcher.run(ToolName::ShellCommand, call).await)
    }

    #[tool(description = "Install an APK file on an Android device")]
    async fn install_app(
        &self,
        Parameters(params): Parameters<InstallAppParams>,
    ) -> McpResult<CallToolResult> {
        let call = handlers::install_app(self.client(), params);
        respond(self.dispatcher.run(ToolName::InstallApp, call).await)
    }

    #[tool(description = "Uninstall an app by package name")]
    async fn uninstall_app(
        &self,
        Parameters(params): Parameters<UninstallAppParams>,
    ) -> McpResult<CallToolResult> {
        let call = handlers::uninstall_app(self.client(), params);
        respond(self.dispatcher.run(ToolName::UninstallApp, call).await)
    }

    #[tool(description = "Push a file from local system to Android device")]
    async fn push_file(
        &self,
        Parameters(params): Parameters<PushFileParams>,
    ) -> McpResult<CallToolResult> {
        let call = handlers::push_file(self.client(), params);
        respond(self.dispatcher.run(ToolName::PushFile, call).await)
    }

    #[tool(description = "Pull a file from Android device to local system")]
    async fn pull_file(
        &self,
        Parameters(params): Parameters<PullFileParams>,
    ) -> McpResult<CallToolResult> {
        let call = handlers::pull_file(self.client(), params);
        respond(self.dispatcher.run(ToolName::PullFile, call).await)
    }
}

/// Successes and in-band failures both become JSON text content
fn respond(result: Result<Value, ToolError>) -> McpResult<CallToolResult> {
    match result {
        Ok(payload) => json_success(&payload),
        Err(e) => json_error(&e.envelope()),
    }
}

#[tool_handler]
impl rmcp::ServerHandler for AdbMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for AdbMcpServer {
    fn server_name(&self) -> &str {
        "adb"
    }

    fn server_description(&self) -> Option<&str> {
        Some(INSTRUCTIONS)
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        match self.dispatcher.try_dispatch(name, params).await {
            Ok(payload) => Ok(json_success(&payload)?),
            Err(ToolError::UnknownTool(msg)) => Err(EmbeddableError::ToolNotFound(msg)),
            Err(ToolError::InvalidParams(msg)) => Err(EmbeddableError::InvalidParams(msg)),
            Err(e) => Ok(json_error(&e.envelope())?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adb::{AdbError, AdbResult, CommandRunner};
    use serde_json::json;
    use std::sync::Arc;

    struct OfflineRunner;

    #[async_trait]
    impl CommandRunner for OfflineRunner {
        async fn run(&self, _args: &[String]) -> AdbResult<String> {
            Err(AdbError::CommandFailed {
                code: 1,
                stderr: "device offline".to_string(),
            })
        }
    }

    #[test]
    fn test_embeddable_list_tools() {
        let server = AdbMcpServer::mock();
        let mut names: Vec<String> = server
            .list_tools()
            .iter()
            .map(|t| t.name.to_string())
            .collect();
        names.sort();

        let mut expected: Vec<String> =
            ToolName::ALL.iter().map(|t| t.as_str().to_string()).collect();
        expected.sort();

        assert_eq!(names, expected);
        assert_eq!(server.server_name(), "adb");
    }

    #[test]
    fn test_disabled_tools_not_listed() {
        let dispatcher = Dispatcher::with_enabled(AdbClient::mock(), [ToolName::ListDevices]);
        let server = AdbMcpServer::new(dispatcher);
        let tools = server.list_tools();

        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "list_devices");
    }

    #[test]
    fn test_required_fields_in_schema() {
        let server = AdbMcpServer::mock();
        let tools = server.list_tools();
        let push = tools.iter().find(|t| t.name == "push_file").unwrap();

        let required = push.input_schema.get("required").unwrap();
        let required: Vec<&str> = required
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert!(required.contains(&"local_path"));
        assert!(required.contains(&"remote_path"));
        assert!(!required.contains(&"device_id"));
    }

    #[tokio::test]
    async fn test_embeddable_list_devices() {
        let server = AdbMcpServer::mock();
        let value = server
            .call_tool_json("list_devices", json!({}))
            .await
            .unwrap();

        assert_eq!(value["count"], 2);
        assert_eq!(value["devices"][1]["id"], "mock_device_002");
    }

    #[tokio::test]
    async fn test_embeddable_unknown_tool() {
        let server = AdbMcpServer::mock();
        let result = server.call_tool("nonexistent_tool", json!({})).await;
        assert!(matches!(result, Err(EmbeddableError::ToolNotFound(_))));
    }

    #[tokio::test]
    async fn test_embeddable_invalid_params() {
        let server = AdbMcpServer::mock();
        let result = server.call_tool("install_app", json!({})).await;
        assert!(matches!(result, Err(EmbeddableError::InvalidParams(_))));
    }

    #[tokio::test]
    async fn test_embeddable_adb_error_is_in_band() {
        let server = AdbMcpServer::new(Dispatcher::new(AdbClient::new(Arc::new(OfflineRunner))));

        let result = server.call_tool("list_devices", json!({})).await.unwrap();
        assert_eq!(result.is_error, Some(true));

        let value = server
            .call_tool_json("get_device_info", json!({}))
            .await
            .unwrap();
        assert_eq!(value["type"], "ADBError");
        assert!(value["error"].as_str().unwrap().contains("device offline"));
    }

    #[tokio::test]
    async fn test_router_method_matches_dispatch() {
        let server = AdbMcpServer::mock();
        let result = server
            .shell_command(Parameters(ShellCommandParams {
                command: "getprop ro.hardware".to_string(),
                device_id: Some("mock_device_001".to_string()),
            }))
            .await
            .unwrap();

        let text = mcp_common::first_text(&result).unwrap();
        let value: Value = serde_json::from_str(text).unwrap();
        assert_eq!(
            value,
            server
                .dispatcher()
                .dispatch(
                    "shell_command",
                    json!({"command": "getprop ro.hardware", "device_id": "mock_device_001"})
                )
                .await
        );
    }
}

//! Tool dispatch: name + JSON arguments in, JSON object out
//!
//! The dispatcher is stateless apart from its immutable client and enable list.
//! Arguments are validated against the registry before any process is spawned,
//! and each call runs on its own task so a panic in one call is reported as an
//! `UnknownError` instead of taking the server down.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::adb::AdbClient;
use crate::error::ToolError;
use crate::handlers;
use crate::tools::ToolName;

#[derive(Clone, Debug)]
pub struct Dispatcher {
    client: AdbClient,
    enabled: Arc<HashSet<ToolName>>,
}

impl Dispatcher {
    /// Dispatcher with every registered tool enabled
    pub fn new(client: AdbClient) -> Self {
        Self::with_enabled(client, ToolName::ALL)
    }

    pub fn with_enabled(client: AdbClient, enabled: impl IntoIterator<Item = ToolName>) -> Self {
        Self {
            client,
            enabled: Arc::new(enabled.into_iter().collect()),
        }
    }

    pub fn client(&self) -> &AdbClient {
        &self.client
    }

    pub fn is_enabled(&self, tool: ToolName) -> bool {
        self.enabled.contains(&tool)
    }

    /// Enabled tools in registry order
    pub fn enabled_tools(&self) -> Vec<ToolName> {
        ToolName::ALL
            .into_iter()
            .filter(|tool| self.is_enabled(*tool))
            .collect()
    }

    /// Dispatch a call and always produce a JSON object, success or error
    pub async fn dispatch(&self, name: &str, args: Value) -> Value {
        match self.try_dispatch(name, args).await {
            Ok(payload) => payload,
            Err(e) => e.envelope().into_value(),
        }
    }

    /// Dispatch a call by name
    ///
    /// # Errors
    ///
    /// - [`ToolError::UnknownTool`] for names outside the registry or disabled tools
    /// - [`ToolError::InvalidParams`] when required arguments are missing or mistyped
    /// - [`ToolError::Adb`] when a read operation fails in adb
    /// - [`ToolError::Unknown`] for anything else
    pub async fn try_dispatch(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        let tool: ToolName = name
            .parse()
            .map_err(|_| ToolError::UnknownTool(name.to_string()))?;
        self.ensure_enabled(tool)?;
        let args = validate_args(tool, args)?;
        let client = self.client.clone();

        match tool {
            ToolName::ListDevices => {
                self.run(tool, handlers::list_devices(client, parse_params(args)?))
                    .await
            }
            ToolName::GetDeviceInfo => {
                self.run(tool, handlers::get_device_info(client, parse_params(args)?))
                    .await
            }
            ToolName::ShellCommand => {
                self.run(tool, handlers::shell_command(client, parse_params(args)?))
                    .await
            }
            ToolName::InstallApp => {
                self.run(tool, handlers::install_app(client, parse_params(args)?))
                    .await
            }
            ToolName::UninstallApp => {
                self.run(tool, handlers::uninstall_app(client, parse_params(args)?))
                    .await
            }
            ToolName::PushFile => {
                self.run(tool, handlers::push_file(client, parse_params(args)?))
                    .await
            }
            ToolName::PullFile => {
                self.run(tool, handlers::pull_file(client, parse_params(args)?))
                    .await
            }
        }
    }

    /// Run an already-validated handler on its own task and serialize its payload
    pub async fn run<T, F>(&self, tool: ToolName, call: F) -> Result<Value, ToolError>
    where
        T: Serialize + Send + 'static,
        F: Future<Output = Result<T, ToolError>> + Send + 'static,
    {
        self.ensure_enabled(tool)?;
        debug!(tool = %tool, "dispatching tool call");

        let result = match tokio::spawn(call).await {
            Ok(result) => result.and_then(|payload| Ok(serde_json::to_value(payload)?)),
            Err(join_err) => Err(ToolError::Unknown(format!(
                "tool {tool} terminated unexpectedly: {join_err}"
            ))),
        };

        match &result {
            Err(ToolError::Unknown(detail)) => {
                error!(tool = %tool, error = %detail, "unexpected failure handling tool call");
            }
            Err(e) => debug!(tool = %tool, error = %e, "tool call failed"),
            Ok(_) => {}
        }
        result
    }

    fn ensure_enabled(&self, tool: ToolName) -> Result<(), ToolError> {
        if self.is_enabled(tool) {
            Ok(())
        } else {
            Err(ToolError::UnknownTool(format!("{tool} (disabled)")))
        }
    }
}

/// Check argument keys against the registry before anything touches adb.
/// Optional keys may be absent or null but must otherwise be strings.
fn validate_args(tool: ToolName, args: Value) -> Result<Value, ToolError> {
    let map = match args {
        Value::Null => Map::new(),
        Value::Object(map) => map,
        other => {
            return Err(ToolError::InvalidParams(format!(
                "arguments must be a JSON object, got {other}"
            )))
        }
    };

    for key in tool.required_args() {
        match map.get(*key) {
            Some(Value::String(_)) => {}
            Some(_) => {
                return Err(ToolError::InvalidParams(format!(
                    "argument '{key}' must be a string"
                )))
            }
            None => {
                return Err(ToolError::InvalidParams(format!(
                    "missing required argument '{key}'"
                )))
            }
        }
    }

    for key in tool.optional_args() {
        match map.get(*key) {
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(_) => {
                return Err(ToolError::InvalidParams(format!(
                    "argument '{key}' must be a string"
                )))
            }
        }
    }

    Ok(Value::Object(map))
}

fn parse_params<P: DeserializeOwned>(args: Value) -> Result<P, ToolError> {
    serde_json::from_value(args).map_err(|e| ToolError::InvalidParams(e.to_string()))
}

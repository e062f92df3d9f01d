//! Parameter types for ADB MCP tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListDevicesParams {}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetDeviceInfoParams {
    #[schemars(description = "Device ID (optional, uses the only attached device if not specified)")]
    #[serde(default)]
    pub device_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ShellCommandParams {
    #[schemars(description = "Shell command to execute")]
    pub command: String,

    #[schemars(description = "Device ID (optional)")]
    #[serde(default)]
    pub device_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct InstallAppParams {
    #[schemars(description = "Path to the APK file")]
    pub apk_path: String,

    #[schemars(description = "Device ID (optional)")]
    #[serde(default)]
    pub device_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UninstallAppParams {
    #[schemars(description = "Package name to uninstall")]
    pub package_name: String,

    #[schemars(description = "Device ID (optional)")]
    #[serde(default)]
    pub device_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PushFileParams {
    #[schemars(description = "Local file path")]
    pub local_path: String,

    #[schemars(description = "Remote path on device")]
    pub remote_path: String,

    #[schemars(description = "Device ID (optional)")]
    #[serde(default)]
    pub device_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PullFileParams {
    #[schemars(description = "Remote file path on device")]
    pub remote_path: String,

    #[schemars(description = "Local destination path")]
    pub local_path: String,

    #[schemars(description = "Device ID (optional)")]
    #[serde(default)]
    pub device_id: Option<String>,
}

//! ADB tool handler implementations
//!
//! Each handler takes its parameters, calls the device facade and returns the
//! tool-specific payload. Handlers own their client so they can run on a
//! spawned task.

use serde::Serialize;

use crate::adb::{AdbClient, DeviceRecord, Outcome, PropertyMap};
use crate::error::ToolError;
use crate::params::*;

#[derive(Debug, Serialize)]
pub struct DevicesResponse {
    pub devices: Vec<DeviceRecord>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct DeviceInfoResponse {
    pub device_info: PropertyMap,
}

#[derive(Debug, Serialize)]
pub struct ShellResponse {
    pub output: String,
}

pub async fn list_devices(
    client: AdbClient,
    _params: ListDevicesParams,
) -> Result<DevicesResponse, ToolError> {
    let devices = client.list_devices().await?;
    Ok(DevicesResponse {
        count: devices.len(),
        devices,
    })
}

pub async fn get_device_info(
    client: AdbClient,
    params: GetDeviceInfoParams,
) -> Result<DeviceInfoResponse, ToolError> {
    let device_info = client.get_device_info(params.device_id.as_deref()).await?;
    Ok(DeviceInfoResponse { device_info })
}

pub async fn shell_command(
    client: AdbClient,
    params: ShellCommandParams,
) -> Result<ShellResponse, ToolError> {
    let output = client
        .shell_command(&params.command, params.device_id.as_deref())
        .await?;
    Ok(ShellResponse { output })
}

pub async fn install_app(
    client: AdbClient,
    params: InstallAppParams,
) -> Result<Outcome, ToolError> {
    Ok(client
        .install_app(&params.apk_path, params.device_id.as_deref())
        .await)
}

pub async fn uninstall_app(
    client: AdbClient,
    params: UninstallAppParams,
) -> Result<Outcome, ToolError> {
    Ok(client
        .uninstall_app(&params.package_name, params.device_id.as_deref())
        .await)
}

pub async fn push_file(client: AdbClient, params: PushFileParams) -> Result<Outcome, ToolError> {
    Ok(client
        .push_file(
            &params.local_path,
            &params.remote_path,
            params.device_id.as_deref(),
        )
        .await)
}

pub async fn pull_file(client: AdbClient, params: PullFileParams) -> Result<Outcome, ToolError> {
    Ok(client
        .pull_file(
            &params.remote_path,
            &params.local_path,
            params.device_id.as_deref(),
        )
        .await)
}

//! High-level device operations
//!
//! [`AdbClient`] builds adb argument vectors, hands them to a [`CommandRunner`]
//! and parses what comes back. Read operations propagate [`AdbError`];
//! mutations report an [`Outcome`] instead.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::{AdbError, AdbResult};
use super::mock::MockRunner;
use super::parse::{parse_devices, parse_properties, DeviceRecord, PropertyMap};
use super::runner::{CommandRunner, ProcessRunner};

/// Immutable backend settings fixed at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdbSettings {
    /// Executable to launch
    pub path: String,
    /// Replace every invocation with canned output
    pub mock: bool,
    /// Per-invocation time limit, `None` to wait indefinitely
    pub timeout: Option<Duration>,
}

impl Default for AdbSettings {
    fn default() -> Self {
        Self {
            path: "adb".to_string(),
            mock: false,
            timeout: None,
        }
    }
}

/// Result of a state-changing operation (install, uninstall, push, pull)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// True when adb reported no failure
    pub success: bool,
    /// Failure detail, present only when `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Outcome {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn failed(err: &AdbError) -> Self {
        Self {
            success: false,
            error: Some(err.to_string()),
        }
    }
}

/// Device operations facade over a command runner
#[derive(Clone)]
pub struct AdbClient {
    runner: Arc<dyn CommandRunner>,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for AdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdbClient")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl AdbClient {
    /// Create a client over an arbitrary runner, with no time limit
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            timeout: None,
        }
    }

    /// Create a client from startup settings
    pub fn from_settings(settings: &AdbSettings) -> Self {
        let runner: Arc<dyn CommandRunner> = if settings.mock {
            info!("adb mock mode enabled");
            Arc::new(MockRunner)
        } else {
            Arc::new(ProcessRunner::new(settings.path.clone()))
        };

        Self {
            runner,
            timeout: settings.timeout,
        }
    }

    /// Client that never touches a real device
    pub fn mock() -> Self {
        Self::new(Arc::new(MockRunner))
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, args: Vec<String>) -> AdbResult<String> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.runner.run(&args))
                .await
                .map_err(|_| AdbError::Timeout(limit))?,
            None => self.runner.run(&args).await,
        }
    }

    /// List attached devices (`adb devices -l`)
    pub async fn list_devices(&self) -> AdbResult<Vec<DeviceRecord>> {
        let output = self.run(command(None, &["devices", "-l"])).await?;
        Ok(parse_devices(&output))
    }

    /// Dump all system properties of a device (`adb shell getprop`)
    pub async fn get_device_info(&self, device_id: Option<&str>) -> AdbResult<PropertyMap> {
        let output = self.run(command(device_id, &["shell", "getprop"])).await?;
        Ok(parse_properties(&output))
    }

    /// Run `command` through the device shell and return its output unparsed
    pub async fn shell_command(&self, command_line: &str, device_id: Option<&str>) -> AdbResult<String> {
        self.run(command(device_id, &["shell", command_line])).await
    }

    pub async fn install_app(&self, apk_path: &str, device_id: Option<&str>) -> Outcome {
        self.mutate("install", command(device_id, &["install", apk_path]))
            .await
    }

    pub async fn uninstall_app(&self, package_name: &str, device_id: Option<&str>) -> Outcome {
        self.mutate("uninstall", command(device_id, &["uninstall", package_name]))
            .await
    }

    pub async fn push_file(
        &self,
        local_path: &str,
        remote_path: &str,
        device_id: Option<&str>,
    ) -> Outcome {
        self.mutate("push", command(device_id, &["push", local_path, remote_path]))
            .await
    }

    pub async fn pull_file(
        &self,
        remote_path: &str,
        local_path: &str,
        device_id: Option<&str>,
    ) -> Outcome {
        self.mutate("pull", command(device_id, &["pull", remote_path, local_path]))
            .await
    }

    async fn mutate(&self, operation: &str, args: Vec<String>) -> Outcome {
        match self.run(args).await {
            Ok(_) => Outcome::ok(),
            Err(e) => {
                warn!(operation, error = %e, "adb operation failed");
                Outcome::failed(&e)
            }
        }
    }
}

/// Build an argument vector, prefixed with `-s <id>` when a device is named
fn command(device_id: Option<&str>, args: &[&str]) -> Vec<String> {
    let mut full = Vec::with_capacity(args.len() + 2);
    if let Some(id) = device_id.filter(|id| !id.is_empty()) {
        full.push("-s".to_string());
        full.push(id.to_string());
    }
    full.extend(args.iter().map(|a| a.to_string()));
    full
}

//! Async process runner for adb commands
//!
//! [`CommandRunner`] is the seam between the device operations and the outside
//! world. [`ProcessRunner`] spawns the real executable; the mock backend lives in
//! [`super::mock`].

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error, instrument};

use super::error::{AdbError, AdbResult};

/// Executes one adb invocation and returns its trimmed standard output
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run adb with `args`, waiting for it to finish.
    ///
    /// # Errors
    ///
    /// - [`AdbError::ExecutableNotFound`] if the executable cannot be launched
    /// - [`AdbError::CommandFailed`] if it exits with a non-zero status
    /// - [`AdbError::ExecutionError`] for any other IO failure
    async fn run(&self, args: &[String]) -> AdbResult<String>;
}

/// Runs the real adb executable, one child process per call
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    path: String,
}

impl ProcessRunner {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new("adb")
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    #[instrument(skip(self), fields(cmd = %args.join(" ")))]
    async fn run(&self, args: &[String]) -> AdbResult<String> {
        debug!("executing: {} {}", self.path, args.join(" "));

        // kill_on_drop lets a caller-side timeout reap the child
        let output = Command::new(&self.path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    AdbError::ExecutableNotFound {
                        path: self.path.clone(),
                    }
                } else {
                    AdbError::ExecutionError(e)
                }
            })?
            .wait_with_output()
            .await?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!(code, stderr = %stderr, "adb command failed");
            return Err(AdbError::CommandFailed { code, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

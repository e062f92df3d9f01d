//! Error types for adb invocations
//!
//! Every failure the external tool can produce maps onto [`AdbError`]. The
//! dispatch layer reports all of them as one family (`"ADBError"`).

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when running the adb executable
#[derive(Error, Debug)]
pub enum AdbError {
    /// The executable could not be resolved or launched
    #[error("ADB executable not found at: {path}")]
    ExecutableNotFound {
        /// Path the runner tried to launch
        path: String,
    },

    /// adb ran but exited with a non-zero status
    #[error("ADB command failed (exit code {code}): {stderr}")]
    CommandFailed {
        /// Exit code, or -1 when the process was killed by a signal
        code: i32,
        /// Trimmed standard error output
        stderr: String,
    },

    /// Any other launch or IO fault
    #[error("failed to execute ADB command: {0}")]
    ExecutionError(#[from] std::io::Error),

    /// The configured time limit expired before adb exited
    #[error("ADB command timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type alias for adb operations
pub type AdbResult<T> = Result<T, AdbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_keeps_sub_second_limit() {
        let err = AdbError::Timeout(Duration::from_millis(500));
        assert_eq!(err.to_string(), "ADB command timed out after 500ms");

        let err = AdbError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "ADB command timed out after 30s");
    }
}

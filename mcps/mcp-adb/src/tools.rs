//! Registry of the tools this server exposes

use std::fmt;
use std::str::FromStr;

/// Every tool the server knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    ListDevices,
    GetDeviceInfo,
    ShellCommand,
    InstallApp,
    UninstallApp,
    PushFile,
    PullFile,
}

impl ToolName {
    pub const ALL: [ToolName; 7] = [
        ToolName::ListDevices,
        ToolName::GetDeviceInfo,
        ToolName::ShellCommand,
        ToolName::InstallApp,
        ToolName::UninstallApp,
        ToolName::PushFile,
        ToolName::PullFile,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolName::ListDevices => "list_devices",
            ToolName::GetDeviceInfo => "get_device_info",
            ToolName::ShellCommand => "shell_command",
            ToolName::InstallApp => "install_app",
            ToolName::UninstallApp => "uninstall_app",
            ToolName::PushFile => "push_file",
            ToolName::PullFile => "pull_file",
        }
    }

    /// Argument keys that must be present (as strings) before the tool runs
    pub fn required_args(self) -> &'static [&'static str] {
        match self {
            ToolName::ListDevices | ToolName::GetDeviceInfo => &[],
            ToolName::ShellCommand => &["command"],
            ToolName::InstallApp => &["apk_path"],
            ToolName::UninstallApp => &["package_name"],
            ToolName::PushFile => &["local_path", "remote_path"],
            ToolName::PullFile => &["remote_path", "local_path"],
        }
    }

    pub fn optional_args(self) -> &'static [&'static str] {
        match self {
            ToolName::ListDevices => &[],
            _ => &["device_id"],
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a name that is not in the registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown tool: {0}")]
pub struct UnknownToolName(pub String);

impl FromStr for ToolName {
    type Err = UnknownToolName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| UnknownToolName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for tool in ToolName::ALL {
            assert_eq!(tool.as_str().parse::<ToolName>().unwrap(), tool);
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = "reboot".parse::<ToolName>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown tool: reboot");
    }

    #[test]
    fn test_required_args() {
        assert!(ToolName::ListDevices.required_args().is_empty());
        assert_eq!(ToolName::ShellCommand.required_args(), ["command"]);
        assert_eq!(
            ToolName::PullFile.required_args(),
            ["remote_path", "local_path"]
        );
        assert!(ToolName::ListDevices.optional_args().is_empty());
        assert_eq!(ToolName::PushFile.optional_args(), ["device_id"]);
    }
}

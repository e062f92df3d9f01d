//! Configuration loading for mcp-adb
//!
//! Configuration is resolved in this order (later wins):
//! 1. Built-in defaults
//! 2. JSON file: `--config`, else `MCP_ADB_CONFIG`, else
//!    `<config_dir>/mcp-adb/config.json`
//! 3. Environment: `MCP_ADB_PATH`, `MCP_ADB_TIMEOUT`, `MCP_ADB_LOG_LEVEL`
//! 4. Command line flags (applied by the binary)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::adb::AdbSettings;
use crate::tools::ToolName;

pub const ENV_CONFIG_PATH: &str = "MCP_ADB_CONFIG";
pub const ENV_ADB_PATH: &str = "MCP_ADB_PATH";
pub const ENV_TIMEOUT: &str = "MCP_ADB_TIMEOUT";
pub const ENV_LOG_LEVEL: &str = "MCP_ADB_LOG_LEVEL";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub adb: AdbConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    /// File the configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Log level name (`DEBUG`, `INFO`, `WARNING`, `ERROR`, `CRITICAL`)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdbConfig {
    /// adb executable
    #[serde(default = "default_adb_path")]
    pub path: String,
    /// Seconds allowed per adb invocation, 0 = unlimited
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Names of the tools to expose
    #[serde(default = "default_enabled_tools")]
    pub enabled: Vec<String>,
}

fn default_log_level() -> String {
    "INFO".to_string()
}

fn default_adb_path() -> String {
    "adb".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_enabled_tools() -> Vec<String> {
    ToolName::ALL.iter().map(|t| t.as_str().to_string()).collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for AdbConfig {
    fn default() -> Self {
        Self {
            path: default_adb_path(),
            timeout: default_timeout(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled_tools(),
        }
    }
}

impl Config {
    /// Load configuration from file (if any) and apply environment overrides.
    ///
    /// An explicitly requested file must exist. A file found through the
    /// default search is optional. A file that exists but does not parse is an
    /// error either way.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::find_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Read one JSON config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config: Config = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(ENV_CONFIG_PATH) {
            return Some(PathBuf::from(path));
        }

        dirs::config_dir().map(|dir| dir.join("mcp-adb").join("config.json"))
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup; unparsable values are ignored
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(ENV_ADB_PATH).filter(|p| !p.is_empty()) {
            self.adb.path = path;
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT).and_then(|t| t.trim().parse().ok()) {
            self.adb.timeout = timeout;
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|l| !l.is_empty()) {
            self.server.log_level = level.to_uppercase();
        }
    }

    /// Per-invocation time limit; `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.adb.timeout > 0).then(|| Duration::from_secs(self.adb.timeout))
    }

    /// Enabled tools in registry order, with unknown names dropped
    pub fn enabled_tools(&self) -> Vec<ToolName> {
        for name in &self.tools.enabled {
            if name.parse::<ToolName>().is_err() {
                tracing::warn!("ignoring unknown tool in config: {}", name);
            }
        }

        ToolName::ALL
            .into_iter()
            .filter(|tool| self.tools.enabled.iter().any(|n| n == tool.as_str()))
            .collect()
    }

    pub fn adb_settings(&self, mock: bool) -> AdbSettings {
        AdbSettings {
            path: self.adb.path.clone(),
            mock,
            timeout: self.timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.log_level, "INFO");
        assert_eq!(config.adb.path, "adb");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.enabled_tools(), ToolName::ALL);
        assert!(config.source.is_none());
    }

    #[test]
    fn test_from_file_partial() {
        let file = write_config(r#"{"adb": {"path": "/opt/platform-tools/adb"}}"#);
        let config = Config::from_file(file.path()).unwrap();

        assert_eq!(config.adb.path, "/opt/platform-tools/adb");
        assert_eq!(config.adb.timeout, 30);
        assert_eq!(config.server.log_level, "INFO");
        assert_eq!(config.source.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let file = write_config(
            r#"{"adb": {"path": "adb", "timeout": 10, "retry_attempts": 3}, "extra": true}"#,
        );
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.adb.timeout, 10);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let file = write_config("{ not json");
        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(Config::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_ADB_PATH, "/usr/local/bin/adb"),
            (ENV_TIMEOUT, "5"),
            (ENV_LOG_LEVEL, "debug"),
        ]);
        let mut config = Config::default();
        config.apply_overrides_from(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.adb.path, "/usr/local/bin/adb");
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.server.log_level, "DEBUG");
    }

    #[test]
    fn test_invalid_timeout_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides_from(|k| (k == ENV_TIMEOUT).then(|| "soon".to_string()));
        assert_eq!(config.adb.timeout, 30);
    }

    #[test]
    fn test_zero_timeout_disables() {
        let mut config = Config::default();
        config.adb.timeout = 0;
        assert_eq!(config.timeout(), None);
        assert_eq!(config.adb_settings(false).timeout, None);
    }

    #[test]
    fn test_enabled_tools_filtered_in_registry_order() {
        let mut config = Config::default();
        config.tools.enabled = vec![
            "pull_file".to_string(),
            "list_devices".to_string(),
            "screenshot".to_string(),
        ];
        assert_eq!(
            config.enabled_tools(),
            [ToolName::ListDevices, ToolName::PullFile]
        );
    }

    #[test]
    fn test_adb_settings() {
        let config = Config::default();
        let settings = config.adb_settings(true);
        assert!(settings.mock);
        assert_eq!(settings.path, "adb");
    }
}

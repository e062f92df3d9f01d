//! ADB MCP Server
//!
//! Exposes Android Debug Bridge operations (device listing, properties, shell,
//! install/uninstall, push/pull) as MCP tools over stdio.
//!
//! # Usage
//!
//! ```bash
//! mcp-adb                 # serve MCP over stdio
//! mcp-adb --mock          # canned adb output, no device needed
//! mcp-adb --demo --mock   # run the tools once in-process and print a report
//! ```
//!
//! Or configure in `.mcp.json`:
//! ```json
//! { "mcpServers": { "adb": { "command": "mcp-adb" } } }
//! ```

use std::path::PathBuf;

use clap::Parser;

use mcp_adb::{AdbClient, AdbMcpServer, Config, Dispatcher, RunMode};

#[derive(Parser)]
#[command(name = "mcp-adb")]
#[command(about = "MCP server for Android Debug Bridge operations")]
struct Cli {
    /// Replace every adb invocation with canned output
    #[arg(long, env = "MCP_ADB_MOCK")]
    mock: bool,

    /// Run the tools once in-process and print a report instead of serving MCP
    #[arg(long)]
    demo: bool,

    /// Path to a JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// adb executable (overrides config and MCP_ADB_PATH)
    #[arg(long)]
    adb_path: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(path) = cli.adb_path {
        config.adb.path = path;
    }

    mcp_common::init_tracing("mcp_adb", &config.server.log_level)?;

    tracing::info!("Starting mcp_adb MCP Server");
    match &config.source {
        Some(path) => tracing::info!("Loaded config from {}", path.display()),
        None => tracing::info!("No config file found, using defaults"),
    }
    tracing::info!(adb = %config.adb.path, timeout = ?config.timeout(), mock = cli.mock, "adb backend");

    let client = AdbClient::from_settings(&config.adb_settings(cli.mock));
    let server = AdbMcpServer::new(Dispatcher::with_enabled(client, config.enabled_tools()));

    let mode = if cli.demo { RunMode::Demo } else { RunMode::Stdio };
    mode.frontend().run(server).await
}

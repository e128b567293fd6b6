//! CLI command implementations
//!
//! `serve` boots the HTTP server; `check` loads everything `serve` would
//! load and reports what it found without binding a socket.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::matcher::MemoryMatcher;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Filter used when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "vulnreport=info,tower_http=info";

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub http: HttpServerConfig,

    /// JSON file mapping manifest hash to vulnerability report.
    /// Relative paths resolve against the config file's directory.
    #[serde(default)]
    pub reports_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        if let Some(reports) = config.reports_path.take() {
            let resolved = match path.parent() {
                Some(dir) if reports.is_relative() => dir.join(reports),
                _ => reports,
            };
            config.reports_path = Some(resolved);
        }

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("http.host must not be empty"));
        }

        if self.http.request_timeout_secs == 0 {
            return Err(CliError::config_error("http.request_timeout_secs must be > 0"));
        }

        Ok(())
    }

    /// Build the report store this config points at
    pub fn load_matcher(&self) -> CliResult<MemoryMatcher> {
        match &self.reports_path {
            Some(path) => Ok(MemoryMatcher::from_file(path)?),
            None => Ok(MemoryMatcher::new()),
        }
    }
}

/// Parse arguments and run
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, host, port } => serve(&config, host, port),
        Command::Check { config } => check(&config),
    }
}

/// Install the global tracing subscriber. Later calls are no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Start the HTTP server and block until shutdown
pub fn serve(config_path: &Path, host: Option<String>, port: Option<u16>) -> CliResult<()> {
    init_logging();

    let mut config = Config::load(config_path)?;
    if let Some(host) = host {
        config.http.host = host;
    }
    if let Some(port) = port {
        config.http.port = port;
    }

    let matcher = config.load_matcher()?;
    tracing::info!(reports = matcher.len(), "loaded vulnerability reports");

    let server = HttpServer::with_config(config.http, Arc::new(matcher));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Validate configuration and report file
pub fn check(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let matcher = config.load_matcher()?;

    write_response(json!({
        "address": config.http.socket_addr(),
        "reports": matcher.len(),
        "reports_path": config.reports_path.as_ref().map(|p| p.display().to_string()),
    }))
}

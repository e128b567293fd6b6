//! CLI argument definitions using clap
//!
//! Commands:
//! - vulnreport serve --config <path> [--host <host>] [--port <port>]
//! - vulnreport check --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// vulnreport - serve vulnerability reports by manifest hash
#[derive(Parser, Debug)]
#[command(name = "vulnreport")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./vulnreport.json")]
        config: PathBuf,

        /// Override the configured bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate configuration and report file, then exit
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./vulnreport.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_overrides() {
        let cli = Cli::try_parse_from([
            "vulnreport",
            "serve",
            "--config",
            "/etc/vulnreport.json",
            "--port",
            "8080",
        ])
        .unwrap();

        match cli.command {
            Command::Serve { config, host, port } => {
                assert_eq!(config, PathBuf::from("/etc/vulnreport.json"));
                assert_eq!(host, None);
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_check_default_config_path() {
        let cli = Cli::try_parse_from(["vulnreport", "check"]).unwrap();
        match cli.command {
            Command::Check { config } => assert_eq!(config, PathBuf::from("./vulnreport.json")),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}

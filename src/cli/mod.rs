//! CLI module for vulnreport
//!
//! Provides command-line interface for:
//! - serve: Load reports and run the HTTP server
//! - check: Validate configuration and report file

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, init_logging, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_response;

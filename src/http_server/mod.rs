//! # HTTP Server Module
//!
//! Axum server hosting the vulnerability report endpoint.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/v1/vulnerability_report/<manifest hash>` - Vulnerability report lookup

pub mod config;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;

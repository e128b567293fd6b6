//! vulnreport - serve vulnerability reports by manifest hash
//!
//! The HTTP endpoint lives in [`matcher`]; report lookup is abstracted
//! behind [`matcher::MatchService`]. [`http_server`] and [`cli`] wire it
//! into a runnable server.

pub mod cli;
pub mod http_server;
pub mod matcher;

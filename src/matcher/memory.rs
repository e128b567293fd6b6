//! In-memory lookup service
//!
//! Serves reports loaded once at startup from a JSON object keyed by
//! manifest hash. Reads only; nothing is written after construction.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value;

use super::context::MatchContext;
use super::errors::MatchError;
use super::service::{MatchFuture, MatchService};

/// Read-only report store
#[derive(Debug, Clone, Default)]
pub struct MemoryMatcher {
    reports: HashMap<String, Value>,
}

impl MemoryMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a report for `manifest_hash`, replacing any previous one
    pub fn with_report(mut self, manifest_hash: impl Into<String>, report: Value) -> Self {
        self.reports.insert(manifest_hash.into(), report);
        self
    }

    /// Load reports from a JSON object `{ "<manifest>": <report>, ... }`
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, MatchError> {
        let reports: HashMap<String, Value> = serde_json::from_reader(reader)
            .map_err(|e| MatchError::Store(format!("invalid report file: {}", e)))?;
        Ok(Self { reports })
    }

    /// Load reports from a JSON file on disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MatchError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| MatchError::Store(format!("{}: {}", path.display(), e)))?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl MatchService for MemoryMatcher {
    type Report = Value;

    fn match_report<'a>(&'a self, ctx: MatchContext, manifest_hash: &'a str) -> MatchFuture<'a, Value> {
        Box::pin(async move {
            if ctx.is_cancelled() {
                return Err(MatchError::Cancelled);
            }
            self.reports
                .get(manifest_hash)
                .cloned()
                .ok_or_else(|| MatchError::IndexReportNotFound(manifest_hash.to_string()))
        })
    }
}

//! Lookup Service
//!
//! The single capability the vulnerability report endpoint consumes.

use std::future::Future;
use std::pin::Pin;

use serde::Serialize;

use super::context::MatchContext;
use super::errors::MatchResult;

/// Boxed future returned by [`MatchService::match_report`]
pub type MatchFuture<'a, R> = Pin<Box<dyn Future<Output = MatchResult<R>> + Send + 'a>>;

/// Looks up the vulnerability report computed for a manifest.
///
/// Implementations report a missing manifest with
/// [`MatchError::IndexReportNotFound`](super::MatchError::IndexReportNotFound);
/// every other error is treated as a service failure. Long running lookups
/// should stop once `ctx` is cancelled.
pub trait MatchService: Send + Sync {
    /// Report value returned on success. Opaque to the endpoint.
    type Report: Serialize + Send;

    fn match_report<'a>(
        &'a self,
        ctx: MatchContext,
        manifest_hash: &'a str,
    ) -> MatchFuture<'a, Self::Report>;
}

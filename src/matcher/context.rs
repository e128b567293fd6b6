//! Match Context
//!
//! Request-scoped context handed to a lookup service.

use tokio_util::sync::{CancellationToken, DropGuard, WaitForCancellationFuture};
use uuid::Uuid;

/// Context carried into a single lookup
#[derive(Debug, Clone)]
pub struct MatchContext {
    /// Request ID for tracing
    pub request_id: Uuid,

    token: CancellationToken,
}

impl MatchContext {
    /// Create a fresh, uncancelled context
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            token: CancellationToken::new(),
        }
    }

    /// Derive a context that is cancelled together with this one.
    ///
    /// Cancelling the child does not cancel the parent.
    pub fn child(&self) -> Self {
        Self {
            request_id: self.request_id,
            token: self.token.child_token(),
        }
    }

    /// Cancel this context and every child
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the context is cancelled
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }

    /// Guard that cancels the context when dropped
    pub(crate) fn drop_guard(&self) -> DropGuard {
        self.token.clone().drop_guard()
    }
}

impl Default for MatchContext {
    fn default() -> Self {
        Self::new()
    }
}

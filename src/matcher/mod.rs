//! # Matcher Module
//!
//! Serves vulnerability reports by manifest hash over HTTP.
//!
//! The endpoint validates the request, delegates to a [`MatchService`] and
//! maps every failure of that service onto a status code and a
//! `{"code", "message"}` body:
//!
//! | Condition            | Status | Code                 |
//! |----------------------|--------|----------------------|
//! | method other than GET| 405    | `method-not-allowed` |
//! | empty manifest hash  | 400    | `bad-request`        |
//! | unknown manifest     | 404    | `not-found`          |
//! | lookup failure       | 500    | `match-error`        |
//! | encoding failure     | 500    | `encoding-error`     |

pub mod context;
pub mod errors;
pub mod handler;
pub mod memory;
pub mod response;
pub mod service;

pub use context::MatchContext;
pub use errors::{HandlerError, MatchError, MatchResult};
pub use handler::{handle, handle_layer_error, match_handler, matcher_routes, VULNERABILITY_REPORT_API_PATH};
pub use memory::MemoryMatcher;
pub use response::{json_error, ErrorResponse};
pub use service::{MatchFuture, MatchService};

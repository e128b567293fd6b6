//! Vulnerability Report Handler
//!
//! `GET /api/v1/vulnerability_report/<manifest hash>`
//!
//! The request runs straight through: method check, path extraction,
//! lookup, error translation, encoding. Exactly one response is produced.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{BoxError, Router};
use tower::timeout::error::Elapsed;

use super::context::MatchContext;
use super::errors::{HandlerError, MatchError};
use super::response::{encode_json, json_ok};
use super::service::MatchService;

/// HTTP path prefix for vulnerability reports
pub const VULNERABILITY_REPORT_API_PATH: &str = "/api/v1/vulnerability_report/";

const VULNERABILITY_REPORT_BARE_ROUTE: &str = "/api/v1/vulnerability_report";

const VULNERABILITY_REPORT_ROUTE: &str = "/api/v1/vulnerability_report/*manifest_hash";

/// Create the vulnerability report routes backed by `service`.
///
/// Every method is routed to the handler so that a wrong method gets the
/// JSON `method-not-allowed` body instead of the router's default.
pub fn matcher_routes<S>(service: Arc<S>) -> Router
where
    S: MatchService + 'static,
{
    Router::new()
        .route(VULNERABILITY_REPORT_BARE_ROUTE, any(match_handler::<S>))
        .route(VULNERABILITY_REPORT_API_PATH, any(match_handler::<S>))
        .route(VULNERABILITY_REPORT_ROUTE, any(match_handler::<S>))
        .with_state(service)
}

/// Axum entry point for the endpoint
pub async fn match_handler<S>(State(service): State<Arc<S>>, method: Method, uri: Uri) -> Response
where
    S: MatchService + 'static,
{
    match handle(service.as_ref(), &method, uri.path()).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Turn a failure of a layer wrapped around [`matcher_routes`] into the
/// endpoint's JSON error body.
///
/// A request that outlives the server timeout is reported as a lookup
/// failure; the dropped handler has already cancelled its context.
pub async fn handle_layer_error(err: BoxError) -> Response {
    let err = if err.is::<Elapsed>() {
        MatchError::DeadlineExceeded
    } else {
        MatchError::Internal(err.to_string())
    };
    HandlerError::Match(err).into_response()
}

/// Run one request against `service`.
///
/// `path` is the full request path, prefix included and still
/// percent-encoded.
pub async fn handle<S>(service: &S, method: &Method, path: &str) -> Result<Response, HandlerError>
where
    S: MatchService + ?Sized,
{
    if method != Method::GET {
        return Err(HandlerError::MethodNotAllowed);
    }

    let encoded = match path.strip_prefix(VULNERABILITY_REPORT_API_PATH) {
        Some(hash) if !hash.is_empty() => hash,
        _ => return Err(HandlerError::BadRequest),
    };
    let manifest_hash = urlencoding::decode(encoded).map_err(|_| HandlerError::BadRequest)?;
    let manifest_hash = manifest_hash.as_ref();

    // Cancelled when this future completes or is dropped.
    let ctx = MatchContext::new();
    let _guard = ctx.drop_guard();

    let report = service
        .match_report(ctx.clone(), manifest_hash)
        .await
        .map_err(|err| HandlerError::from_match(err, manifest_hash))?;

    let body = encode_json(&report)?;
    Ok(json_ok(body))
}

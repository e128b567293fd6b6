//! # HTTP Server
//!
//! Combines the health and vulnerability report routers into one Axum
//! server with CORS, request timeout and request tracing layers.

use std::sync::Arc;

use axum::error_handling::HandleErrorLayer;
use axum::Router;
use tokio::net::TcpListener;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::matcher::{
    handle_layer_error, matcher_routes, MatchService, VULNERABILITY_REPORT_API_PATH,
};

use super::config::HttpServerConfig;
use super::observability_routes::health_routes;

/// HTTP server for vulnerability reports
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new<S>(service: Arc<S>) -> Self
    where
        S: MatchService + 'static,
    {
        Self::with_config(HttpServerConfig::default(), service)
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config<S>(config: HttpServerConfig, service: Arc<S>) -> Self
    where
        S: MatchService + 'static,
    {
        let router = Self::build_router(&config, service);
        Self { config, router }
    }

    fn build_router<S>(config: &HttpServerConfig, service: Arc<S>) -> Router
    where
        S: MatchService + 'static,
    {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        // Timeouts answer with the endpoint's own JSON error body.
        let reports = matcher_routes(service).layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_layer_error))
                .layer(TimeoutLayer::new(config.request_timeout())),
        );

        Router::new()
            .merge(health_routes())
            .layer(cors)
            // Added after CORS so preflight OPTIONS still reaches the handler
            // and gets method-not-allowed. Merged, not nested: the handler
            // strips the full prefix itself.
            .merge(reports)
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        let addr = listener.local_addr()?;

        tracing::info!(%addr, "vulnerability report server listening");
        tracing::info!(
            "reports available at http://{}{}<manifest hash>",
            addr,
            VULNERABILITY_REPORT_API_PATH
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::MemoryMatcher;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new(Arc::new(MemoryMatcher::new()));
        assert_eq!(server.socket_addr(), "0.0.0.0:6060");
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = HttpServerConfig::with_port(8080);
        let server = HttpServer::with_config(config, Arc::new(MemoryMatcher::new()));
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[tokio::test]
    async fn test_configured_cors_origin_allowed_on_health() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:3000".to_string()],
            ..Default::default()
        };
        let router = HttpServer::with_config(config, Arc::new(MemoryMatcher::new())).router();

        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "http://localhost:3000"
        );
    }

    #[tokio::test]
    async fn test_unlisted_cors_origin_not_echoed() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:3000".to_string()],
            ..Default::default()
        };
        let router = HttpServer::with_config(config, Arc::new(MemoryMatcher::new())).router();

        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://evil.example")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}

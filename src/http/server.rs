//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, CORS)
//! - Bind server to listener
//! - Stop on shutdown trigger or OS signal, draining in-flight requests

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::catalog::{FetchError, UpstreamClient};
use crate::config::ProxyConfig;
use crate::http::handlers;
use crate::http::middleware::{cors_middleware, deadline_middleware, CorsPolicy, Deadline};
use crate::http::request::UuidRequestId;
use crate::lifecycle::{shutdown, signals};
use crate::routing::ResourceTable;

/// Application state injected into handlers.
///
/// Holds only immutable, shareable pieces; requests share no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub client: UpstreamClient,
    pub resources: Arc<ResourceTable>,
}

/// HTTP server for the catalog proxy.
pub struct HttpServer {
    router: Router,
    config: Arc<ProxyConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, FetchError> {
        let client = UpstreamClient::new(&config.upstream)?;
        let resources = Arc::new(ResourceTable::new(config.upstream.resources.iter().cloned()));
        let cors = Arc::new(CorsPolicy::new(config.cors.allowed_origin.as_deref()));

        let state = AppState { client, resources };
        let router = Self::build_router(&config, state, cors);

        Ok(Self {
            router,
            config: Arc::new(config),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState, cors: Arc<CorsPolicy>) -> Router {
        Router::new()
            .route("/api/{resource}", get(handlers::search_catalog))
            .route("/health", get(handlers::health))
            .with_state(state)
            .layer(middleware::from_fn_with_state(cors, cors_middleware))
            .layer(middleware::from_fn_with_state(
                Deadline(Duration::from_secs(config.timeouts.request_secs)),
                deadline_middleware,
            ))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// A handle to the router, for in-process requests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns after `shutdown_rx` fires (or SIGINT/SIGTERM arrives) and
    /// in-flight requests finish.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown::triggered(shutdown_rx) => {},
                    _ = signals::shutdown_signal() => {},
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::http::request::X_REQUEST_ID;
    use crate::http::response::ErrorBody;

    fn server() -> HttpServer {
        let mut config = ProxyConfig::default();
        config.cors.allowed_origin = Some("localhost:5173".to_string());
        // Nothing listens on the discard port.
        config.upstream.base_url = "http://127.0.0.1:9".to_string();
        HttpServer::new(config).unwrap()
    }

    async fn send(router: Router, request: Request<Body>) -> axum::response::Response {
        router.oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = send(
            server().router(),
            Request::get("/health").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_resource() {
        let response = send(
            server().router(),
            Request::get("/api/starships?search=x").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, ErrorBody::new("unknown resource 'starships'"));
    }

    #[tokio::test]
    async fn test_request_id_generated_and_propagated() {
        let response = send(
            server().router(),
            Request::get("/health").body(Body::empty()).unwrap(),
        )
        .await;
        let id = response.headers()[X_REQUEST_ID].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());

        let response = send(
            server().router(),
            Request::get("/health")
                .header(X_REQUEST_ID, "client-supplied")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.headers()[X_REQUEST_ID], "client-supplied");
    }

    #[tokio::test]
    async fn test_cors_applies_to_all_routes() {
        let response = send(
            server().router(),
            Request::get("/health")
                .header(header::ORIGIN, "http://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_upstream_unreachable_is_500() {
        let response = send(
            server().router(),
            Request::get("/api/people").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all deposition routes
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve with graceful shutdown

use std::time::Duration;

use axum::routing::{get, patch, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::FakenodoConfig;
use crate::deposition::DepositionService;
use crate::http::handlers;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: DepositionService,
}

/// HTTP server for the fakenodo API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and service.
    pub fn new(config: &FakenodoConfig, service: DepositionService) -> Self {
        let state = AppState { service };
        let router = Self::build_router(config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &FakenodoConfig, state: AppState) -> Router {
        Router::new()
            .route("/fakenodo", get(handlers::index))
            .route("/fakenodo/", get(handlers::index))
            .route("/fakenodo/test", get(handlers::service_status))
            .route(
                "/fakenodo/deposit/depositions",
                post(handlers::create_deposition).get(handlers::list_depositions),
            )
            .route(
                "/fakenodo/deposit/depositions/{id}",
                get(handlers::get_deposition).delete(handlers::delete_deposition),
            )
            .route(
                "/fakenodo/deposit/depositions/{id}/files",
                post(handlers::upload_file),
            )
            .route(
                "/fakenodo/deposit/depositions/{id}/actions/publish",
                post(handlers::publish_deposition),
            )
            .route(
                "/fakenodo/deposit/depositions/{id}/metadata",
                patch(handlers::update_metadata),
            )
            .route(
                "/fakenodo/deposit/depositions/{id}/versions",
                get(handlers::list_versions),
            )
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server received shutdown signal");
            })
            .await
    }
}

// ABOUTME: HTTP server assembly: merges route groups and applies the middleware stack
// ABOUTME: Runs axum with graceful shutdown and a periodic sweep of expired CSRF tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

//! # Server
//!
//! Layers, outermost first: request id, tracing, body limit, timeout, CORS,
//! security headers, CSRF. Authentication happens inside the handlers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::constants::csrf::CLEANUP_INTERVAL_SECS;
use crate::middleware::csrf::csrf_protection;
use crate::middleware::cors::setup_cors;
use crate::middleware::tracing::make_request_span;
use crate::resources::ServerResources;
use crate::routes::{AuthRoutes, FoodItemRoutes, HealthRoutes, RecipeRoutes};
use crate::security::csrf::CsrfTokenManager;
use crate::security::headers::apply_security_headers;

/// Endpoints served, for the startup log
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("GET", "/health"),
    ("GET", "/ready"),
    ("GET", "/csrf"),
    ("POST", "/signup"),
    ("POST", "/login"),
    ("POST", "/logout"),
    ("POST", "/refresh-token"),
    ("GET", "/verify-token"),
    ("GET", "/api/food-items"),
    ("POST", "/api/food-items"),
    ("GET", "/api/food-items/:id"),
    ("PUT", "/api/food-items/:id"),
    ("DELETE", "/api/food-items/:id"),
    ("GET", "/api/recipes/suggestions"),
];

/// Merge every route group and wrap it in the middleware stack
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let config = resources.config.clone();

    let routes = Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(AuthRoutes::routes(resources.clone()))
        .merge(FoodItemRoutes::routes(resources.clone()))
        .merge(RecipeRoutes::routes(resources.clone()))
        .layer(axum::middleware::from_fn_with_state(
            resources,
            csrf_protection,
        ));

    apply_security_headers(routes, config.security.hsts_enabled)
        .layer(setup_cors(&config.cors))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(|request: &Request<Body>| make_request_span(request)),
                )
                .layer(RequestBodyLimitLayer::new(config.http.body_limit_bytes))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(config.http.request_timeout_secs),
                )),
        )
}

/// Periodically drop expired CSRF tokens
pub fn spawn_csrf_cleanup(csrf_manager: Arc<CsrfTokenManager>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(CLEANUP_INTERVAL_SECS));
        // First tick fires immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            let removed = csrf_manager.cleanup_expired_tokens().await;
            if removed > 0 {
                debug!(removed, "Removed expired CSRF tokens");
            }
        }
    })
}

/// Bind `addr` and serve until Ctrl-C or SIGTERM
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
pub async fn run_server(resources: Arc<ServerResources>, addr: SocketAddr) -> Result<()> {
    let cleanup = spawn_csrf_cleanup(resources.csrf_manager.clone());
    let app = build_router(resources);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Smart Pantry listening on http://{addr}");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed");

    cleanup.abort();
    info!("Server shut down");
    served
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

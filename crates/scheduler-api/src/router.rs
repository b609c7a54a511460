//! Router configuration and server setup.

use std::future::Future;

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, info_span, warn};

use crate::config::ApiConfig;
use crate::handlers;
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Creates the API router with all routes and middleware configured.
pub fn create_router(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let log = state.log.clone();

    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http().make_span_with(move |request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                info_span!(
                    parent: &log,
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id,
                )
            }),
        )
        .layer(PropagateRequestIdLayer::new(request_id))
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::new(state.config.request_timeout))
        .layer(cors_layer(&state.config));

    Router::new()
        // Operational
        .route("/health", get(handlers::health))
        .route("/debug/db", get(handlers::db_status))
        .route(handlers::OPENAPI_PATH, get(handlers::openapi_doc))
        .route("/docs", get(handlers::docs_redirect))
        // Events
        .route("/api/v1/events", post(handlers::create_event))
        .route(
            "/api/v1/events/:id",
            get(handlers::get_event)
                .put(handlers::update_event)
                .delete(handlers::delete_event),
        )
        .route(
            "/api/v1/events/:id/timeslots",
            post(handlers::add_time_slot).get(handlers::list_time_slots),
        )
        .route(
            "/api/v1/events/:id/availability",
            post(handlers::submit_availability),
        )
        .route(
            "/api/v1/events/:id/recommendations",
            get(handlers::get_recommendations),
        )
        // Participants
        .route("/api/v1/participants", post(handlers::create_participant))
        .route("/api/v1/participants/:id", get(handlers::get_participant))
        // Apply middleware
        .layer(middleware)
        .with_state(state)
}

fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.allows_any_origin() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

/// Starts the API server and runs until SIGINT or SIGTERM.
pub async fn serve(state: AppState) -> Result<(), std::io::Error> {
    serve_with_shutdown(state, shutdown_signal()).await
}

/// Starts the API server and drains in-flight requests once `shutdown` completes.
pub async fn serve_with_shutdown<F>(state: AppState, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = state.config.bind_address();
    let log = state.log.clone();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(parent: &log, "API server listening on {}", addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!(parent: &log, "API server stopped");
    Ok(())
}

/// Completes on Ctrl+C, or on SIGTERM where supported.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}

//! Database connectivity check.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use tracing::error;

use crate::handlers::run_blocking;
use crate::state::AppState;
use crate::types::DbStatusResponse;

/// GET /debug/db - Checks that the store answers queries.
pub async fn db_status(State(state): State<AppState>) -> (StatusCode, Json<DbStatusResponse>) {
    let store = Arc::clone(&state.store);
    match run_blocking(move || Ok(store.ping()?)).await {
        Ok(()) => (
            StatusCode::OK,
            Json(DbStatusResponse::ok("database connection is working")),
        ),
        Err(e) => {
            error!(parent: &state.log, error = %e, "database ping failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DbStatusResponse::error(format!("database ping failed: {}", e))),
            )
        }
    }
}

//! Recommendation handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::error;

use scheduler_models::{EventId, TimeSlotRecommendation};

use crate::error::{ApiError, Result};
use crate::handlers::{parse_id, run_blocking};
use crate::state::AppState;

/// GET /api/v1/events/:id/recommendations - Per-slot availability tallies.
pub async fn get_recommendations(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<TimeSlotRecommendation>>> {
    let event_id: EventId = parse_id(&id, EventId::kind())?;
    let aggregator = state.aggregator.clone();
    let log = state.log.clone();
    let recommendations = run_blocking(move || {
        aggregator.recommend(event_id).map_err(|e| {
            error!(parent: &log, %event_id, error = %e, "recommendation failed");
            ApiError::from(e)
        })
    })
    .await?;

    Ok(Json(recommendations))
}

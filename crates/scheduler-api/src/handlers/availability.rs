//! Availability handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use scheduler_models::{Availability, EventId};

use crate::error::{ApiError, Result};
use crate::handlers::{parse_id, run_blocking};
use crate::state::AppState;
use crate::types::SubmitAvailabilityRequest;

/// POST /api/v1/events/:id/availability - Record a participant's answer for a slot.
///
/// Every submission is stored as a new row; earlier answers are kept.
pub async fn submit_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SubmitAvailabilityRequest>,
) -> Result<(StatusCode, Json<Availability>)> {
    let event_id: EventId = parse_id(&id, EventId::kind())?;
    let new_availability = req.into_new_availability()?;

    let store = Arc::clone(&state.store);
    let availability = run_blocking(move || {
        let slot = store.get_time_slot(new_availability.time_slot_id)?;
        if slot.event_id != event_id {
            return Err(ApiError::BadRequest(format!(
                "time slot {} does not belong to event {}",
                slot.id, event_id
            )));
        }
        Ok(store.create_availability(&new_availability)?)
    })
    .await?;
    info!(
        parent: &state.log,
        %event_id,
        participant_id = %availability.participant_id,
        time_slot_id = %availability.time_slot_id,
        is_available = availability.is_available,
        "availability submitted"
    );

    Ok((StatusCode::CREATED, Json(availability)))
}

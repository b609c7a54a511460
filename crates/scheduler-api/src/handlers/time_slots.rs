//! Time slot handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use scheduler_models::{EventId, TimeSlot};

use crate::error::Result;
use crate::handlers::{parse_id, run_blocking};
use crate::state::AppState;
use crate::types::CreateTimeSlotRequest;

/// POST /api/v1/events/:id/timeslots - Add a candidate time slot.
pub async fn add_time_slot(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CreateTimeSlotRequest>,
) -> Result<(StatusCode, Json<TimeSlot>)> {
    let event_id: EventId = parse_id(&id, EventId::kind())?;
    let new_slot = req.into_new_time_slot(event_id)?;

    let store = Arc::clone(&state.store);
    let slot = run_blocking(move || Ok(store.create_time_slot(&new_slot)?)).await?;
    info!(parent: &state.log, %event_id, time_slot_id = %slot.id, "time slot added");

    Ok((StatusCode::CREATED, Json(slot)))
}

/// GET /api/v1/events/:id/timeslots - List an event's time slots.
pub async fn list_time_slots(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<TimeSlot>>> {
    let event_id: EventId = parse_id(&id, EventId::kind())?;
    let store = Arc::clone(&state.store);
    let slots = run_blocking(move || Ok(store.get_time_slots(event_id)?)).await?;

    Ok(Json(slots))
}

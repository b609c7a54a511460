//! Event handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use scheduler_models::{Event, EventId};

use crate::error::Result;
use crate::handlers::{parse_id, run_blocking};
use crate::state::AppState;
use crate::types::EventRequest;

/// POST /api/v1/events - Create a new event.
pub async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<EventRequest>,
) -> Result<(StatusCode, Json<Event>)> {
    let draft = req.into_draft()?;
    let store = Arc::clone(&state.store);
    let event = run_blocking(move || Ok(store.create_event(&draft)?)).await?;
    info!(parent: &state.log, event_id = %event.id, "event created");

    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/v1/events/:id - Get an event with its time slots.
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>> {
    let id: EventId = parse_id(&id, EventId::kind())?;
    let store = Arc::clone(&state.store);
    let event = run_blocking(move || Ok(store.get_event(id)?)).await?;

    Ok(Json(event))
}

/// PUT /api/v1/events/:id - Replace an event's editable fields.
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<EventRequest>,
) -> Result<Json<Event>> {
    let id: EventId = parse_id(&id, EventId::kind())?;
    let draft = req.into_draft()?;
    let store = Arc::clone(&state.store);
    let event = run_blocking(move || Ok(store.update_event(id, &draft)?)).await?;
    info!(parent: &state.log, event_id = %id, "event updated");

    Ok(Json(event))
}

/// DELETE /api/v1/events/:id - Soft-delete an event.
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id: EventId = parse_id(&id, EventId::kind())?;
    let store = Arc::clone(&state.store);
    run_blocking(move || Ok(store.delete_event(id)?)).await?;
    info!(parent: &state.log, event_id = %id, "event deleted");

    Ok(StatusCode::NO_CONTENT)
}

//! Participant handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use scheduler_models::{Participant, ParticipantId};

use crate::error::Result;
use crate::handlers::{parse_id, run_blocking};
use crate::state::AppState;
use crate::types::CreateParticipantRequest;

/// POST /api/v1/participants - Register a participant.
pub async fn create_participant(
    State(state): State<AppState>,
    Json(req): Json<CreateParticipantRequest>,
) -> Result<(StatusCode, Json<Participant>)> {
    let new_participant = req.into_new_participant()?;
    let store = Arc::clone(&state.store);
    let participant =
        run_blocking(move || Ok(store.create_participant(&new_participant)?)).await?;
    info!(parent: &state.log, participant_id = %participant.id, "participant created");

    Ok((StatusCode::CREATED, Json(participant)))
}

/// GET /api/v1/participants/:id - Get a participant by ID.
pub async fn get_participant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Participant>> {
    let id: ParticipantId = parse_id(&id, ParticipantId::kind())?;
    let store = Arc::clone(&state.store);
    let participant = run_blocking(move || Ok(store.get_participant(id)?)).await?;

    Ok(Json(participant))
}

//! Request DTOs for the API.
//!
//! Scalar fields default when absent so that a missing field is reported by
//! validation as a `400` naming the field.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use scheduler_models::{
    EventDraft, EventId, NewAvailability, NewParticipant, NewTimeSlot, ParticipantId, TimeSlotId,
    ValidationError,
};

/// Request body for creating or updating an event.
#[derive(Debug, Clone, Deserialize)]
pub struct EventRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub organizer_id: i64,
    #[serde(default)]
    pub duration: i32,
}

impl EventRequest {
    /// Converts into a validated draft.
    pub fn into_draft(self) -> Result<EventDraft, ValidationError> {
        let draft = EventDraft::new(self.title, self.organizer_id, self.duration)
            .with_description(self.description);
        draft.validate()?;
        Ok(draft)
    }
}

/// Request body for adding a time slot to an event.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTimeSlotRequest {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl CreateTimeSlotRequest {
    /// Converts into a validated slot for `event_id`.
    pub fn into_new_time_slot(self, event_id: EventId) -> Result<NewTimeSlot, ValidationError> {
        let start_time = self
            .start_time
            .ok_or_else(|| ValidationError::required("start_time"))?;
        let end_time = self
            .end_time
            .ok_or_else(|| ValidationError::required("end_time"))?;
        let slot = NewTimeSlot::new(event_id, start_time, end_time);
        slot.validate()?;
        Ok(slot)
    }
}

/// Request body for submitting availability.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAvailabilityRequest {
    #[serde(default)]
    pub participant_id: i64,
    #[serde(default)]
    pub time_slot_id: i64,
    #[serde(default)]
    pub is_available: bool,
}

impl SubmitAvailabilityRequest {
    /// Converts into a validated availability row.
    pub fn into_new_availability(self) -> Result<NewAvailability, ValidationError> {
        let availability = NewAvailability::new(
            ParticipantId::new(self.participant_id),
            TimeSlotId::new(self.time_slot_id),
            self.is_available,
        );
        availability.validate()?;
        Ok(availability)
    }
}

/// Request body for registering a participant.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateParticipantRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl CreateParticipantRequest {
    /// Converts into a validated participant.
    pub fn into_new_participant(self) -> Result<NewParticipant, ValidationError> {
        let participant = NewParticipant::new(self.name.trim(), self.email.trim());
        participant.validate()?;
        Ok(participant)
    }
}

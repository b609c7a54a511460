//! Availability records.
//!
//! One record is one participant's yes/no statement about one slot. The
//! store does not enforce uniqueness on (participant, slot): repeated
//! submissions are kept as separate rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AvailabilityId, ParticipantId, TimeSlotId};
use crate::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub id: AvailabilityId,
    pub participant_id: ParticipantId,
    pub time_slot_id: TimeSlotId,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Data required to record availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAvailability {
    pub participant_id: ParticipantId,
    pub time_slot_id: TimeSlotId,
    pub is_available: bool,
}

impl NewAvailability {
    pub fn new(participant_id: ParticipantId, time_slot_id: TimeSlotId, is_available: bool) -> Self {
        Self {
            participant_id,
            time_slot_id,
            is_available,
        }
    }

    /// Shorthand for an "available" vote.
    pub fn available(participant_id: ParticipantId, time_slot_id: TimeSlotId) -> Self {
        Self::new(participant_id, time_slot_id, true)
    }

    /// Shorthand for an "unavailable" vote.
    pub fn unavailable(participant_id: ParticipantId, time_slot_id: TimeSlotId) -> Self {
        Self::new(participant_id, time_slot_id, false)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.participant_id.get() <= 0 {
            return Err(ValidationError::required("participant_id"));
        }
        if self.time_slot_id.get() <= 0 {
            return Err(ValidationError::required("time_slot_id"));
        }
        Ok(())
    }
}

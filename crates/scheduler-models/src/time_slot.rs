//! Candidate time slots for an event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{EventId, TimeSlotId};
use crate::validation::ValidationError;

/// A proposed start/end interval for an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: TimeSlotId,
    pub event_id: EventId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TimeSlot {
    /// Length of the slot in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

/// Data required to create a time slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTimeSlot {
    pub event_id: EventId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl NewTimeSlot {
    pub fn new(event_id: EventId, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            event_id,
            start_time,
            end_time,
        }
    }

    /// The slot must end strictly after it starts.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.end_time <= self.start_time {
            return Err(ValidationError::new(
                "end_time",
                "must be after start_time",
            ));
        }
        Ok(())
    }
}

//! Event types.
//!
//! An event is a meeting an organizer wants to schedule. It owns a set of
//! candidate time slots that participants vote on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::EventId;
use crate::time_slot::TimeSlot;
use crate::validation::ValidationError;

/// A schedulable meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Store-assigned identifier.
    pub id: EventId,

    /// Short title shown to participants.
    pub title: String,

    /// Free-form description.
    #[serde(default)]
    pub description: String,

    /// Identifier of the organizing user.
    pub organizer_id: i64,

    /// Meeting length in minutes.
    pub duration: i32,

    /// When the event was created.
    pub created_at: DateTime<Utc>,

    /// When the event was last modified.
    pub updated_at: DateTime<Utc>,

    /// Soft-delete marker. Deleted events are invisible to reads.
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,

    /// Candidate slots, populated when the event is fetched individually.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub time_slots: Vec<TimeSlot>,
}

impl Event {
    /// Returns true if the event has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Data required to create or replace an event's editable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub organizer_id: i64,
    pub duration: i32,
}

impl EventDraft {
    /// Creates a draft with an empty description.
    pub fn new(title: impl Into<String>, organizer_id: i64, duration: i32) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            organizer_id,
            duration,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Checks the draft before it reaches the store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::required("title"));
        }
        if self.organizer_id <= 0 {
            return Err(ValidationError::required("organizer_id"));
        }
        if self.duration <= 0 {
            return Err(ValidationError::new(
                "duration",
                "must be a positive number of minutes",
            ));
        }
        Ok(())
    }
}

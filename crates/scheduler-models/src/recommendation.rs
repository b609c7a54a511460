//! Per-slot availability tally.

use serde::{Deserialize, Serialize};

use crate::participant::Participant;
use crate::time_slot::TimeSlot;

/// Aggregated availability for one time slot.
///
/// Participant lists keep the order of the underlying availability rows and
/// may contain the same participant more than once if they voted repeatedly.
/// Empty lists are omitted from the JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlotRecommendation {
    pub time_slot: TimeSlot,
    pub available_count: usize,
    pub unavailable_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub available_users: Vec<Participant>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unavailable_users: Vec<Participant>,
}

impl TimeSlotRecommendation {
    /// Starts an empty tally for a slot.
    pub fn new(time_slot: TimeSlot) -> Self {
        Self {
            time_slot,
            available_count: 0,
            unavailable_count: 0,
            available_users: Vec::new(),
            unavailable_users: Vec::new(),
        }
    }

    /// Records one availability row for `participant`.
    pub fn record(&mut self, participant: Participant, is_available: bool) {
        if is_available {
            self.available_count += 1;
            self.available_users.push(participant);
        } else {
            self.unavailable_count += 1;
            self.unavailable_users.push(participant);
        }
    }

    /// Total number of availability rows counted.
    pub fn total_responses(&self) -> usize {
        self.available_count + self.unavailable_count
    }
}

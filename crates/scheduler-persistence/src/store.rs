//! Storage contract used by the API and the recommendation aggregator.

use std::collections::HashMap;

use scheduler_models::{
    Availability, Event, EventDraft, EventId, NewAvailability, NewParticipant, NewTimeSlot,
    Participant, ParticipantId, TimeSlot, TimeSlotId,
};

use crate::error::Result;

/// Repository interface over the four scheduler entities.
///
/// Soft-deleted rows are invisible to every read. List operations return
/// rows in insertion order and return an empty vector, not an error, when
/// nothing matches.
pub trait SchedulingStore: Send + Sync {
    fn create_event(&self, draft: &EventDraft) -> Result<Event>;

    /// Fetches an event together with its time slots.
    fn get_event(&self, id: EventId) -> Result<Event>;

    /// Replaces the editable fields of an existing event.
    fn update_event(&self, id: EventId, draft: &EventDraft) -> Result<Event>;

    /// Soft-deletes an event.
    fn delete_event(&self, id: EventId) -> Result<()>;

    /// Adds a slot to a live event. A missing or soft-deleted event is
    /// `NotFound`, checked atomically with the insert.
    fn create_time_slot(&self, slot: &NewTimeSlot) -> Result<TimeSlot>;

    fn get_time_slot(&self, id: TimeSlotId) -> Result<TimeSlot>;

    fn get_time_slots(&self, event_id: EventId) -> Result<Vec<TimeSlot>>;

    fn create_availability(&self, availability: &NewAvailability) -> Result<Availability>;

    fn get_availability_for_slot(&self, slot_id: TimeSlotId) -> Result<Vec<Availability>>;

    fn create_participant(&self, participant: &NewParticipant) -> Result<Participant>;

    /// Fails with `NotFound` if the participant is absent or soft-deleted.
    fn get_participant(&self, id: ParticipantId) -> Result<Participant>;

    /// Batch lookup. IDs with no live participant are simply absent from the
    /// returned map.
    fn get_participants(&self, ids: &[ParticipantId]) -> Result<HashMap<ParticipantId, Participant>>;

    /// Round-trips a trivial query to prove the store is reachable.
    fn ping(&self) -> Result<()>;
}

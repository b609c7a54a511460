//! In-memory `SchedulingStore` with failure injection and call counting.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use scheduler_models::{
    Availability, AvailabilityId, Event, EventDraft, EventId, NewAvailability, NewParticipant,
    NewTimeSlot, Participant, ParticipantId, TimeSlot, TimeSlotId,
};
use scheduler_persistence::{PersistenceError, Result, SchedulingStore};

/// Store operations the fake can count or fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    GetTimeSlots,
    GetAvailability,
    GetParticipant,
    GetParticipants,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    events: Vec<Event>,
    slots: Vec<TimeSlot>,
    participants: Vec<Participant>,
    availabilities: Vec<Availability>,
    failing: Option<Op>,
    calls: HashMap<Op, usize>,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn enter(&mut self, op: Op) -> Result<()> {
        *self.calls.entry(op).or_default() += 1;
        if self.failing == Some(op) {
            return Err(PersistenceError::InvalidData(format!("injected failure: {:?}", op)));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeStore {
    inner: Mutex<Inner>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call of `op` fail.
    pub fn fail_on(&self, op: Op) {
        self.inner.lock().unwrap().failing = Some(op);
    }

    /// Number of times `op` has been called.
    pub fn calls(&self, op: Op) -> usize {
        self.inner.lock().unwrap().calls.get(&op).copied().unwrap_or(0)
    }

    /// Physically removes a participant, leaving dangling availability rows.
    pub fn remove_participant(&self, id: ParticipantId) {
        self.inner.lock().unwrap().participants.retain(|p| p.id != id);
    }
}

impl SchedulingStore for FakeStore {
    fn create_event(&self, draft: &EventDraft) -> Result<Event> {
        let mut inner = self.inner.lock().unwrap();
        let now = Utc::now();
        let event = Event {
            id: EventId::new(inner.next_id()),
            title: draft.title.clone(),
            description: draft.description.clone(),
            organizer_id: draft.organizer_id,
            duration: draft.duration,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            time_slots: Vec::new(),
        };
        inner.events.push(event.clone());
        Ok(event)
    }

    fn get_event(&self, id: EventId) -> Result<Event> {
        let inner = self.inner.lock().unwrap();
        let mut event = inner
            .events
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| PersistenceError::not_found(EventId::kind(), id))?;
        event.time_slots = inner
            .slots
            .iter()
            .filter(|s| s.event_id == id)
            .cloned()
            .collect();
        Ok(event)
    }

    fn update_event(&self, id: EventId, draft: &EventDraft) -> Result<Event> {
        {
            let mut inner = self.inner.lock().unwrap();
            let event = inner
                .events
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or_else(|| PersistenceError::not_found(EventId::kind(), id))?;
            event.title = draft.title.clone();
            event.description = draft.description.clone();
            event.organizer_id = draft.organizer_id;
            event.duration = draft.duration;
            event.updated_at = Utc::now();
        }
        self.get_event(id)
    }

    fn delete_event(&self, id: EventId) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.events.len();
        inner.events.retain(|e| e.id != id);
        if inner.events.len() == before {
            return Err(PersistenceError::not_found(EventId::kind(), id));
        }
        Ok(())
    }

    fn create_time_slot(&self, slot: &NewTimeSlot) -> Result<TimeSlot> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.events.iter().any(|e| e.id == slot.event_id) {
            return Err(PersistenceError::not_found(EventId::kind(), slot.event_id));
        }
        let now = Utc::now();
        let created = TimeSlot {
            id: TimeSlotId::new(inner.next_id()),
            event_id: slot.event_id,
            start_time: slot.start_time,
            end_time: slot.end_time,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        inner.slots.push(created.clone());
        Ok(created)
    }

    fn get_time_slot(&self, id: TimeSlotId) -> Result<TimeSlot> {
        let inner = self.inner.lock().unwrap();
        inner
            .slots
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| PersistenceError::not_found(TimeSlotId::kind(), id))
    }

    fn get_time_slots(&self, event_id: EventId) -> Result<Vec<TimeSlot>> {
        let mut inner = self.inner.lock().unwrap();
        inner.enter(Op::GetTimeSlots)?;
        Ok(inner
            .slots
            .iter()
            .filter(|s| s.event_id == event_id)
            .cloned()
            .collect())
    }

    fn create_availability(&self, availability: &NewAvailability) -> Result<Availability> {
        let mut inner = self.inner.lock().unwrap();
        let now = Utc::now();
        let created = Availability {
            id: AvailabilityId::new(inner.next_id()),
            participant_id: availability.participant_id,
            time_slot_id: availability.time_slot_id,
            is_available: availability.is_available,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        inner.availabilities.push(created.clone());
        Ok(created)
    }

    fn get_availability_for_slot(&self, slot_id: TimeSlotId) -> Result<Vec<Availability>> {
        let mut inner = self.inner.lock().unwrap();
        inner.enter(Op::GetAvailability)?;
        Ok(inner
            .availabilities
            .iter()
            .filter(|a| a.time_slot_id == slot_id)
            .cloned()
            .collect())
    }

    fn create_participant(&self, participant: &NewParticipant) -> Result<Participant> {
        let mut inner = self.inner.lock().unwrap();
        if inner.participants.iter().any(|p| p.email == participant.email) {
            return Err(PersistenceError::Conflict(participant.email.clone()));
        }
        let now = Utc::now();
        let created = Participant {
            id: ParticipantId::new(inner.next_id()),
            name: participant.name.clone(),
            email: participant.email.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        inner.participants.push(created.clone());
        Ok(created)
    }

    fn get_participant(&self, id: ParticipantId) -> Result<Participant> {
        let mut inner = self.inner.lock().unwrap();
        inner.enter(Op::GetParticipant)?;
        inner
            .participants
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| PersistenceError::not_found(ParticipantId::kind(), id))
    }

    fn get_participants(&self, ids: &[ParticipantId]) -> Result<HashMap<ParticipantId, Participant>> {
        let mut inner = self.inner.lock().unwrap();
        inner.enter(Op::GetParticipants)?;
        Ok(inner
            .participants
            .iter()
            .filter(|p| ids.contains(&p.id))
            .map(|p| (p.id, p.clone()))
            .collect())
    }

    fn ping(&self) -> Result<()> {
        Ok(())
    }
}

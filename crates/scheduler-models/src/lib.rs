//! Core data models for the meeting scheduler.
//!
//! This crate provides the entity types shared by the store, the
//! recommendation aggregator and the HTTP API: events, their candidate time
//! slots, participants, and per-slot availability.

pub mod availability;
pub mod event;
pub mod ids;
pub mod participant;
pub mod recommendation;
pub mod time_slot;
pub mod validation;

// Re-export main types
pub use availability::{Availability, NewAvailability};
pub use event::{Event, EventDraft};
pub use ids::{AvailabilityId, EventId, ParticipantId, TimeSlotId};
pub use participant::{NewParticipant, Participant};
pub use recommendation::TimeSlotRecommendation;
pub use time_slot::{NewTimeSlot, TimeSlot};
pub use validation::ValidationError;

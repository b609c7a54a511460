//! RecommendationAggregator - per-slot availability tallies for an event.
//!
//! For every time slot of an event, in the order the store returns them,
//! the aggregator partitions the slot's availability rows into "available"
//! and "unavailable" and resolves each row's participant. Recommendations
//! are never re-sorted by score.
//!
//! # Failure model
//!
//! All-or-nothing: any failed slot, availability or participant lookup
//! aborts the run and is returned to the caller. Nothing is retried and no
//! partial result is produced.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use scheduler_models::EventId;
//! use scheduler_persistence::SqliteStore;
//! use scheduler_recommend::{LookupStrategy, RecommendationAggregator};
//!
//! let store = Arc::new(SqliteStore::open("scheduler.db").unwrap());
//! let aggregator = RecommendationAggregator::new(store).with_strategy(LookupStrategy::Batched);
//!
//! for rec in aggregator.recommend(EventId::new(1)).unwrap() {
//!     println!("{} -> {} available", rec.time_slot.start_time, rec.available_count);
//! }
//! ```

use std::sync::Arc;

use scheduler_models::{Availability, EventId, ParticipantId, TimeSlot, TimeSlotRecommendation};
use scheduler_persistence::{PersistenceError, SchedulingStore};
use tracing::{debug, info_span, warn, Span};

use crate::error::Result;

/// How participants referenced by availability rows are resolved.
///
/// Both strategies produce identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupStrategy {
    /// One participant lookup per availability row.
    #[default]
    PerRow,
    /// One batch lookup for every participant referenced by the event.
    Batched,
}

/// Read-only aggregator over a [`SchedulingStore`].
pub struct RecommendationAggregator<S: ?Sized> {
    store: Arc<S>,
    strategy: LookupStrategy,
    span: Span,
}

impl<S: SchedulingStore + ?Sized> RecommendationAggregator<S> {
    /// Creates an aggregator logging under a `recommendations` span.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            strategy: LookupStrategy::default(),
            span: info_span!("recommendations"),
        }
    }

    /// Sets the participant lookup strategy.
    pub fn with_strategy(mut self, strategy: LookupStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the span all aggregation logs are recorded under.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Returns the configured lookup strategy.
    pub fn strategy(&self) -> LookupStrategy {
        self.strategy
    }

    /// Produces one recommendation per time slot of `event_id`.
    ///
    /// Event existence is not checked: an unknown event, like an event with
    /// no slots, yields an empty vector.
    pub fn recommend(&self, event_id: EventId) -> Result<Vec<TimeSlotRecommendation>> {
        let _entered = self.span.enter();
        debug!(%event_id, strategy = ?self.strategy, "aggregating availability");

        let result = match self.strategy {
            LookupStrategy::PerRow => self.recommend_per_row(event_id),
            LookupStrategy::Batched => self.recommend_batched(event_id),
        };

        match &result {
            Ok(recommendations) => {
                debug!(%event_id, slots = recommendations.len(), "aggregation complete");
            }
            Err(err) => warn!(%event_id, error = %err, "aggregation failed"),
        }
        result
    }

    fn recommend_per_row(&self, event_id: EventId) -> Result<Vec<TimeSlotRecommendation>> {
        let slots = self.store.get_time_slots(event_id)?;
        let mut recommendations = Vec::with_capacity(slots.len());

        for slot in slots {
            let rows = self.store.get_availability_for_slot(slot.id)?;
            let mut recommendation = TimeSlotRecommendation::new(slot);
            for row in rows {
                let participant = self.store.get_participant(row.participant_id)?;
                recommendation.record(participant, row.is_available);
            }
            recommendations.push(recommendation);
        }

        Ok(recommendations)
    }

    fn recommend_batched(&self, event_id: EventId) -> Result<Vec<TimeSlotRecommendation>> {
        let slots = self.store.get_time_slots(event_id)?;
        let mut per_slot: Vec<(TimeSlot, Vec<Availability>)> = Vec::with_capacity(slots.len());
        for slot in slots {
            let rows = self.store.get_availability_for_slot(slot.id)?;
            per_slot.push((slot, rows));
        }

        let referenced: Vec<ParticipantId> = per_slot
            .iter()
            .flat_map(|(_, rows)| rows.iter().map(|row| row.participant_id))
            .collect();
        let participants = self.store.get_participants(&referenced)?;

        let mut recommendations = Vec::with_capacity(per_slot.len());
        for (slot, rows) in per_slot {
            let mut recommendation = TimeSlotRecommendation::new(slot);
            for row in rows {
                let participant = participants.get(&row.participant_id).cloned().ok_or_else(|| {
                    PersistenceError::not_found(ParticipantId::kind(), row.participant_id)
                })?;
                recommendation.record(participant, row.is_available);
            }
            recommendations.push(recommendation);
        }

        Ok(recommendations)
    }
}

impl<S: ?Sized> Clone for RecommendationAggregator<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            strategy: self.strategy,
            span: self.span.clone(),
        }
    }
}

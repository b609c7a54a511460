//! Time slot recommendations for the meeting scheduler.
//!
//! This crate provides the [`RecommendationAggregator`], which turns the raw
//! availability rows of an event into one tally per candidate time slot:
//! - counts of available and unavailable responses
//! - the participants behind each side, in submission order
//!
//! The aggregator only reads from the store. Repeated submissions by the
//! same participant for the same slot are each counted.

pub mod aggregator;
pub mod error;

#[cfg(test)]
mod fake_store;

pub use aggregator::{LookupStrategy, RecommendationAggregator};
pub use error::{RecommendError, Result};

//! Error types for recommendation aggregation.

use scheduler_persistence::PersistenceError;
use thiserror::Error;

/// Errors that abort an aggregation run.
///
/// The aggregator does not distinguish storage sub-kinds: the first failure
/// is wrapped and returned as-is.
#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("storage error: {0}")]
    Storage(#[from] PersistenceError),
}

/// Result type alias for aggregation.
pub type Result<T> = std::result::Result<T, RecommendError>;

//! API request handlers.

pub mod availability;
pub mod debug;
pub mod docs;
pub mod events;
pub mod health;
pub mod participants;
pub mod recommendations;
pub mod time_slots;

pub use availability::*;
pub use debug::*;
pub use docs::*;
pub use events::*;
pub use health::*;
pub use participants::*;
pub use recommendations::*;
pub use time_slots::*;

use std::str::FromStr;

use crate::error::{ApiError, Result};

/// Runs synchronous store work on the blocking pool so the request future
/// keeps yielding and the timeout layer can cancel it.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal(format!("blocking task failed: {}", e)))?
}

/// Parses a numeric path id, rejecting anything else with a `400`.
pub(crate) fn parse_id<T: FromStr>(raw: &str, kind: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid {} ID: {}", kind, raw)))
}

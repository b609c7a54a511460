//! REST API for the meeting scheduler.
//!
//! This crate exposes the scheduling store and the recommendation
//! aggregator over HTTP:
//! - Event management (create, get, update, soft delete)
//! - Candidate time slots per event
//! - Participant registration and availability submission
//! - Per-slot recommendations
//! - Health, database check and OpenAPI document
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use scheduler_api::{serve, ApiConfig, AppState};
//! use scheduler_persistence::SqliteStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(SqliteStore::open("scheduler.db")?);
//!     let state = AppState::new(ApiConfig::default(), store, tracing::info_span!("api"));
//!
//!     serve(state).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use router::{create_router, serve, serve_with_shutdown, shutdown_signal};
pub use state::AppState;

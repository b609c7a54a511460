//! Persistence layer for the meeting scheduler.
//!
//! This crate defines the [`SchedulingStore`] contract the rest of the system
//! depends on and provides a SQLite implementation with versioned schema
//! migrations. Rows are soft-deleted; reads never return deleted rows.
//!
//! # Example
//!
//! ```no_run
//! use scheduler_models::{EventDraft, NewParticipant};
//! use scheduler_persistence::{SchedulingStore, SqliteStore};
//!
//! let store = SqliteStore::open("scheduler.db").unwrap();
//!
//! let event = store.create_event(&EventDraft::new("Kickoff", 1, 45)).unwrap();
//! let alice = store
//!     .create_participant(&NewParticipant::new("Alice", "alice@example.com"))
//!     .unwrap();
//!
//! let loaded = store.get_event(event.id).unwrap();
//! ```

pub mod connection;
pub mod error;
pub mod migrations;
pub mod sqlite_store;
pub mod store;

pub use connection::RetryPolicy;
pub use error::{PersistenceError, Result};
pub use sqlite_store::SqliteStore;
pub use store::SchedulingStore;

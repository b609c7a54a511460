//! SQLite-backed [`SchedulingStore`].

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use tracing::debug;

use scheduler_models::{
    Availability, AvailabilityId, Event, EventDraft, EventId, NewAvailability, NewParticipant,
    NewTimeSlot, Participant, ParticipantId, TimeSlot, TimeSlotId,
};

use crate::connection::{open_db, open_db_in_memory, open_db_with_retry, RetryPolicy};
use crate::error::{PersistenceError, Result};
use crate::store::SchedulingStore;

const EVENT_COLUMNS: &str =
    "id, title, description, organizer_id, duration, created_at, updated_at, deleted_at";
const TIME_SLOT_COLUMNS: &str =
    "id, event_id, start_time, end_time, created_at, updated_at, deleted_at";
/// Bound variables per `IN (...)` query; SQLite's lowest compiled-in limit.
const MAX_BATCH_PARAMS: usize = 999;

const PARTICIPANT_COLUMNS: &str = "id, name, email, created_at, updated_at, deleted_at";
const AVAILABILITY_COLUMNS: &str =
    "id, participant_id, time_slot_id, is_available, created_at, updated_at, deleted_at";

/// Scheduler store over a single SQLite connection.
///
/// The connection is guarded by a mutex held for the duration of one call,
/// so multi-call sequences (such as an aggregation) see no snapshot.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Wraps an already bootstrapped connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Opens (or creates) a database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        open_db(path.as_ref()).map(Self::new)
    }

    /// Opens a database file, retrying per `policy`.
    pub fn open_with_retry(path: impl AsRef<Path>, policy: RetryPolicy) -> Result<Self> {
        open_db_with_retry(path.as_ref(), policy).map(Self::new)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        open_db_in_memory().map(Self::new)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| PersistenceError::LockPoisoned(e.to_string()))
    }
}

impl SchedulingStore for SqliteStore {
    fn create_event(&self, draft: &EventDraft) -> Result<Event> {
        let conn = self.conn()?;
        let now = Utc::now();
        conn.execute(
            "INSERT INTO events (title, description, organizer_id, duration, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5);",
            params![
                draft.title,
                draft.description,
                draft.organizer_id,
                draft.duration,
                now
            ],
        )?;
        let id = EventId::new(conn.last_insert_rowid());
        debug!(event_id = %id, "event inserted");

        Ok(Event {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            organizer_id: draft.organizer_id,
            duration: draft.duration,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            time_slots: Vec::new(),
        })
    }

    fn get_event(&self, id: EventId) -> Result<Event> {
        let conn = self.conn()?;
        let mut event = select_event(&conn, id)?;
        event.time_slots = select_time_slots(&conn, id)?;
        Ok(event)
    }

    fn update_event(&self, id: EventId, draft: &EventDraft) -> Result<Event> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE events
             SET title = ?1, description = ?2, organizer_id = ?3, duration = ?4, updated_at = ?5
             WHERE id = ?6 AND deleted_at IS NULL;",
            params![
                draft.title,
                draft.description,
                draft.organizer_id,
                draft.duration,
                Utc::now(),
                id.get()
            ],
        )?;
        if changed == 0 {
            return Err(PersistenceError::not_found(EventId::kind(), id));
        }

        let mut event = select_event(&conn, id)?;
        event.time_slots = select_time_slots(&conn, id)?;
        Ok(event)
    }

    fn delete_event(&self, id: EventId) -> Result<()> {
        let conn = self.conn()?;
        let now = Utc::now();
        let changed = conn.execute(
            "UPDATE events SET deleted_at = ?1, updated_at = ?1
             WHERE id = ?2 AND deleted_at IS NULL;",
            params![now, id.get()],
        )?;
        if changed == 0 {
            return Err(PersistenceError::not_found(EventId::kind(), id));
        }
        debug!(event_id = %id, "event soft-deleted");
        Ok(())
    }

    fn create_time_slot(&self, slot: &NewTimeSlot) -> Result<TimeSlot> {
        let conn = self.conn()?;
        let now = Utc::now();
        let inserted = conn.execute(
            "INSERT INTO time_slots (event_id, start_time, end_time, created_at, updated_at)
             SELECT ?1, ?2, ?3, ?4, ?4
             WHERE EXISTS (SELECT 1 FROM events WHERE id = ?1 AND deleted_at IS NULL);",
            params![slot.event_id.get(), slot.start_time, slot.end_time, now],
        )?;
        if inserted == 0 {
            return Err(PersistenceError::not_found(EventId::kind(), slot.event_id));
        }

        Ok(TimeSlot {
            id: TimeSlotId::new(conn.last_insert_rowid()),
            event_id: slot.event_id,
            start_time: slot.start_time,
            end_time: slot.end_time,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    fn get_time_slot(&self, id: TimeSlotId) -> Result<TimeSlot> {
        let conn = self.conn()?;
        conn.query_row(
            &format!(
                "SELECT {TIME_SLOT_COLUMNS} FROM time_slots WHERE id = ?1 AND deleted_at IS NULL;"
            ),
            params![id.get()],
            parse_time_slot_row,
        )
        .optional()?
        .ok_or_else(|| PersistenceError::not_found(TimeSlotId::kind(), id))
    }

    fn get_time_slots(&self, event_id: EventId) -> Result<Vec<TimeSlot>> {
        let conn = self.conn()?;
        select_time_slots(&conn, event_id)
    }

    fn create_availability(&self, availability: &NewAvailability) -> Result<Availability> {
        let conn = self.conn()?;
        let now = Utc::now();
        conn.execute(
            "INSERT INTO availabilities (participant_id, time_slot_id, is_available, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4);",
            params![
                availability.participant_id.get(),
                availability.time_slot_id.get(),
                availability.is_available,
                now
            ],
        )?;

        Ok(Availability {
            id: AvailabilityId::new(conn.last_insert_rowid()),
            participant_id: availability.participant_id,
            time_slot_id: availability.time_slot_id,
            is_available: availability.is_available,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    fn get_availability_for_slot(&self, slot_id: TimeSlotId) -> Result<Vec<Availability>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {AVAILABILITY_COLUMNS} FROM availabilities
             WHERE time_slot_id = ?1 AND deleted_at IS NULL
             ORDER BY id;"
        ))?;
        let rows = stmt.query_map(params![slot_id.get()], parse_availability_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn create_participant(&self, participant: &NewParticipant) -> Result<Participant> {
        let conn = self.conn()?;
        let now = Utc::now();
        conn.execute(
            "INSERT INTO participants (name, email, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3);",
            params![participant.name, participant.email, now],
        )
        .map_err(|err| match PersistenceError::from(err) {
            PersistenceError::Conflict(_) => PersistenceError::Conflict(format!(
                "participant with email {} already exists",
                participant.email
            )),
            other => other,
        })?;

        Ok(Participant {
            id: ParticipantId::new(conn.last_insert_rowid()),
            name: participant.name.clone(),
            email: participant.email.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    fn get_participant(&self, id: ParticipantId) -> Result<Participant> {
        let conn = self.conn()?;
        conn.query_row(
            &format!(
                "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE id = ?1 AND deleted_at IS NULL;"
            ),
            params![id.get()],
            parse_participant_row,
        )
        .optional()?
        .ok_or_else(|| PersistenceError::not_found(ParticipantId::kind(), id))
    }

    fn get_participants(&self, ids: &[ParticipantId]) -> Result<HashMap<ParticipantId, Participant>> {
        let unique: BTreeSet<i64> = ids.iter().map(ParticipantId::get).collect();
        if unique.is_empty() {
            return Ok(HashMap::new());
        }

        let unique: Vec<i64> = unique.into_iter().collect();
        let conn = self.conn()?;
        let mut found = HashMap::with_capacity(unique.len());
        for chunk in unique.chunks(MAX_BATCH_PARAMS) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let mut stmt = conn.prepare(&format!(
                "SELECT {PARTICIPANT_COLUMNS} FROM participants
                 WHERE deleted_at IS NULL AND id IN ({placeholders});"
            ))?;
            let rows = stmt.query_map(params_from_iter(chunk.iter()), parse_participant_row)?;
            for row in rows {
                let participant = row?;
                found.insert(participant.id, participant);
            }
        }
        Ok(found)
    }

    fn ping(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.query_row("SELECT 1;", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }
}

fn select_event(conn: &Connection, id: EventId) -> Result<Event> {
    conn.query_row(
        &format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1 AND deleted_at IS NULL;"),
        params![id.get()],
        parse_event_row,
    )
    .optional()?
    .ok_or_else(|| PersistenceError::not_found(EventId::kind(), id))
}

fn select_time_slots(conn: &Connection, event_id: EventId) -> Result<Vec<TimeSlot>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TIME_SLOT_COLUMNS} FROM time_slots
         WHERE event_id = ?1 AND deleted_at IS NULL
         ORDER BY id;"
    ))?;
    let rows = stmt.query_map(params![event_id.get()], parse_time_slot_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

fn parse_event_row(row: &Row<'_>) -> rusqlite::Result<Event> {
    Ok(Event {
        id: EventId::new(row.get(0)?),
        title: row.get(1)?,
        description: row.get(2)?,
        organizer_id: row.get(3)?,
        duration: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
        deleted_at: row.get(7)?,
        time_slots: Vec::new(),
    })
}

fn parse_time_slot_row(row: &Row<'_>) -> rusqlite::Result<TimeSlot> {
    Ok(TimeSlot {
        id: TimeSlotId::new(row.get(0)?),
        event_id: EventId::new(row.get(1)?),
        start_time: row.get(2)?,
        end_time: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
        deleted_at: row.get(6)?,
    })
}

fn parse_participant_row(row: &Row<'_>) -> rusqlite::Result<Participant> {
    Ok(Participant {
        id: ParticipantId::new(row.get(0)?),
        name: row.get(1)?,
        email: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
        deleted_at: row.get(5)?,
    })
}

fn parse_availability_row(row: &Row<'_>) -> rusqlite::Result<Availability> {
    Ok(Availability {
        id: AvailabilityId::new(row.get(0)?),
        participant_id: ParticipantId::new(row.get(1)?),
        time_slot_id: TimeSlotId::new(row.get(2)?),
        is_available: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
        deleted_at: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};
    use tempfile::tempdir;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, hour, 0, 0).unwrap()
    }

    fn store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap()
    }

    fn seed_event(store: &SqliteStore) -> Event {
        store
            .create_event(&EventDraft::new("Design review", 1, 60).with_description("Q2 roadmap"))
            .unwrap()
    }

    #[test]
    fn test_create_and_get_event() {
        let store = store();
        let created = seed_event(&store);

        let loaded = store.get_event(created.id).unwrap();
        assert_eq!(loaded.title, "Design review");
        assert_eq!(loaded.description, "Q2 roadmap");
        assert_eq!(loaded.duration, 60);
        assert!(loaded.time_slots.is_empty());
    }

    #[test]
    fn test_get_event_includes_time_slots() {
        let store = store();
        let event = seed_event(&store);
        store
            .create_time_slot(&NewTimeSlot::new(event.id, at(9), at(10)))
            .unwrap();
        store
            .create_time_slot(&NewTimeSlot::new(event.id, at(14), at(15)))
            .unwrap();

        let loaded = store.get_event(event.id).unwrap();
        assert_eq!(loaded.time_slots.len(), 2);
        assert_eq!(loaded.time_slots[0].start_time, at(9));
        assert_eq!(loaded.time_slots[1].start_time, at(14));
    }

    #[test]
    fn test_get_event_not_found() {
        let result = store().get_event(EventId::new(404));
        assert!(matches!(result, Err(PersistenceError::NotFound { kind: "event", .. })));
    }

    #[test]
    fn test_update_event() {
        let store = store();
        let event = seed_event(&store);

        let updated = store
            .update_event(event.id, &EventDraft::new("Renamed", 2, 30))
            .unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.organizer_id, 2);
        assert_eq!(updated.created_at, event.created_at);
        assert!(updated.updated_at >= event.updated_at);
    }

    #[test]
    fn test_update_missing_event() {
        let result = store().update_event(EventId::new(9), &EventDraft::new("x", 1, 1));
        assert!(matches!(result, Err(PersistenceError::NotFound { .. })));
    }

    #[test]
    fn test_delete_event_is_soft() {
        let store = store();
        let event = seed_event(&store);

        store.delete_event(event.id).unwrap();
        assert!(store.get_event(event.id).unwrap_err().is_not_found());
        assert!(store.delete_event(event.id).unwrap_err().is_not_found());

        let conn = store.conn().unwrap();
        let deleted_at: Option<DateTime<Utc>> = conn
            .query_row(
                "SELECT deleted_at FROM events WHERE id = ?1",
                params![event.id.get()],
                |row| row.get(0),
            )
            .unwrap();
        assert!(deleted_at.is_some());
    }

    #[test]
    fn test_get_time_slots_empty() {
        let store = store();
        let event = seed_event(&store);
        assert!(store.get_time_slots(event.id).unwrap().is_empty());
        assert!(store.get_time_slots(EventId::new(77)).unwrap().is_empty());
    }

    #[test]
    fn test_time_slot_requires_existing_event() {
        let err = store()
            .create_time_slot(&NewTimeSlot::new(EventId::new(5), at(9), at(10)))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_time_slot_rejected_for_deleted_event() {
        let store = store();
        let event = seed_event(&store);
        store.delete_event(event.id).unwrap();

        let err = store
            .create_time_slot(&NewTimeSlot::new(event.id, at(9), at(10)))
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(store.get_time_slots(event.id).unwrap().is_empty());
    }

    #[test]
    fn test_get_time_slot() {
        let store = store();
        let event = seed_event(&store);
        let slot = store
            .create_time_slot(&NewTimeSlot::new(event.id, at(9), at(10)))
            .unwrap();

        assert_eq!(store.get_time_slot(slot.id).unwrap().event_id, event.id);
        assert!(store.get_time_slot(TimeSlotId::new(999)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_duplicate_email_conflicts() {
        let store = store();
        store
            .create_participant(&NewParticipant::new("Ann", "ann@example.com"))
            .unwrap();
        let result = store.create_participant(&NewParticipant::new("Ann 2", "ann@example.com"));

        match result {
            Err(PersistenceError::Conflict(msg)) => assert!(msg.contains("ann@example.com")),
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_availability_keeps_duplicates_in_order() {
        let store = store();
        let event = seed_event(&store);
        let slot = store
            .create_time_slot(&NewTimeSlot::new(event.id, at(9), at(10)))
            .unwrap();
        let ann = store
            .create_participant(&NewParticipant::new("Ann", "ann@example.com"))
            .unwrap();

        store
            .create_availability(&NewAvailability::available(ann.id, slot.id))
            .unwrap();
        store
            .create_availability(&NewAvailability::unavailable(ann.id, slot.id))
            .unwrap();

        let rows = store.get_availability_for_slot(slot.id).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_available);
        assert!(!rows[1].is_available);
        assert!(rows[0].id < rows[1].id);
    }

    #[test]
    fn test_availability_requires_existing_participant() {
        let store = store();
        let event = seed_event(&store);
        let slot = store
            .create_time_slot(&NewTimeSlot::new(event.id, at(9), at(10)))
            .unwrap();

        let result =
            store.create_availability(&NewAvailability::available(ParticipantId::new(42), slot.id));
        assert!(matches!(result, Err(PersistenceError::ForeignKey(_))));
    }

    #[test]
    fn test_get_participants_batch() {
        let store = store();
        let ann = store
            .create_participant(&NewParticipant::new("Ann", "ann@example.com"))
            .unwrap();
        let bob = store
            .create_participant(&NewParticipant::new("Bob", "bob@example.com"))
            .unwrap();

        let found = store
            .get_participants(&[ann.id, bob.id, ann.id, ParticipantId::new(99)])
            .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[&bob.id].name, "Bob");
        assert!(!found.contains_key(&ParticipantId::new(99)));

        assert!(store.get_participants(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_get_participants_beyond_variable_limit() {
        let store = store();
        let mut created = Vec::new();
        for i in 0..1200 {
            let p = store
                .create_participant(&NewParticipant::new(
                    format!("P{}", i),
                    format!("p{}@example.com", i),
                ))
                .unwrap();
            created.push(p.id);
        }

        // More ids than SQLite accepts in a single statement.
        let ids: Vec<ParticipantId> = (1..=40_000).map(ParticipantId::new).collect();
        let found = store.get_participants(&ids).unwrap();

        assert_eq!(found.len(), created.len());
        assert!(created.iter().all(|id| found.contains_key(id)));
    }

    #[test]
    fn test_soft_deleted_participant_is_not_found() {
        let store = store();
        let ann = store
            .create_participant(&NewParticipant::new("Ann", "ann@example.com"))
            .unwrap();
        store
            .conn()
            .unwrap()
            .execute(
                "UPDATE participants SET deleted_at = ?1 WHERE id = ?2",
                params![Utc::now(), ann.id.get()],
            )
            .unwrap();

        assert!(store.get_participant(ann.id).unwrap_err().is_not_found());
        assert!(store.get_participants(&[ann.id]).unwrap().is_empty());
    }

    #[test]
    fn test_ping() {
        assert!(store().ping().is_ok());
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scheduler.db");

        let id = {
            let store = SqliteStore::open(&path).unwrap();
            store
                .create_participant(&NewParticipant::new("Ann", "ann@example.com"))
                .unwrap()
                .id
        };

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.get_participant(id).unwrap().email, "ann@example.com");
    }
}

//! Connection bootstrap for SQLite.
//!
//! Returned connections always have `foreign_keys=ON`, a busy timeout, and
//! all migrations applied.

use std::fs;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use rusqlite::Connection;
use tracing::{error, info, warn};

use crate::error::{PersistenceError, Result};
use crate::migrations::apply_migrations;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// How many times to try opening the database, and how long to wait between
/// attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(5))
    }
}

/// Opens a database file, creating parent directories as needed.
pub fn open_db(path: &Path) -> Result<Connection> {
    let started_at = Instant::now();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            fs::create_dir_all(parent).map_err(|source| PersistenceError::DirectoryError {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let mut conn = Connection::open(path)?;
    bootstrap_connection(&mut conn)?;

    info!(
        path = %path.display(),
        duration_ms = started_at.elapsed().as_millis() as u64,
        "database opened"
    );
    Ok(conn)
}

/// Opens a private in-memory database.
pub fn open_db_in_memory() -> Result<Connection> {
    let mut conn = Connection::open_in_memory()?;
    bootstrap_connection(&mut conn)?;
    Ok(conn)
}

/// Opens a database file, retrying per `policy` while it fails.
///
/// Blocks the calling thread between attempts.
pub fn open_db_with_retry(path: &Path, policy: RetryPolicy) -> Result<Connection> {
    let mut attempt = 1;
    loop {
        info!(attempt, max_attempts = policy.max_attempts, "connecting to database");
        match open_db(path) {
            Ok(conn) => return Ok(conn),
            Err(err) if attempt < policy.max_attempts => {
                warn!(
                    error = %err,
                    attempt,
                    retry_delay_ms = policy.delay.as_millis() as u64,
                    "failed to connect to database, retrying"
                );
                thread::sleep(policy.delay);
                attempt += 1;
            }
            Err(err) => {
                error!(error = %err, attempts = attempt, "giving up connecting to database");
                return Err(err);
            }
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)?;
    Ok(())
}

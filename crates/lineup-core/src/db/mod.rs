//! SQLite persistence gateway for programs and executions.
//!
//! [`Database`] is the only writer to the store. Each method either runs a
//! single statement or opens its own transaction, so a failure never leaves
//! partial state behind. Every transaction is `BEGIN IMMEDIATE`: it takes the
//! write lock before its first read, so competing writers wait on the busy
//! timeout instead of failing on a stale WAL snapshot. Slot allocation relies
//! on the same lock to read the featured list and write a slot as one step.

use std::{path::Path, time::Duration};

use log::debug;
use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod execution_queries;
pub mod migrations;
pub mod program_queries;
pub mod slot_queries;

/// How long a connection waits for a competing writer before giving up.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens a connection with the default busy timeout and initializes the
    /// schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_busy_timeout(path, DEFAULT_BUSY_TIMEOUT)
    }

    /// Opens a connection that waits up to `busy_timeout` for the write lock.
    pub fn with_busy_timeout<P: AsRef<Path>>(path: P, busy_timeout: Duration) -> Result<Self> {
        debug!("Opening database at {}", path.as_ref().display());
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(busy_timeout)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

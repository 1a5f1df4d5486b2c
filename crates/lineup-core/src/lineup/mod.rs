//! High-level async API over the persistence gateway.
//!
//! [`Lineup`] is the entry point for every interface. Each method validates
//! its parameters, then runs the blocking SQLite work on tokio's blocking
//! pool with a fresh [`Database`] connection, so no connection or mutable
//! state is shared between calls. Concurrency safety of the featured list
//! comes from the store's write lock, not from anything held here.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Interfaces    │    │     Lineup      │    │    Database     │
//! │  (CLI, tests)   │───▶│ (program_ops,   │───▶│   (via db/)     │
//! │                 │    │  execution_ops, │    │                 │
//! │                 │    │  query_ops,     │    │                 │
//! │                 │    │  slot_ops)      │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use lineup_core::{params::Id, LineupBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let lineup = LineupBuilder::new()
//!     .with_database_path(Some("/tmp/lineup.db"))
//!     .build()
//!     .await?;
//!
//! let allocation = lineup
//!     .allocate_slot(&Id { id: "some-execution".to_string() })
//!     .await?;
//! println!("{allocation}");
//! # Ok(())
//! # }
//! ```

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use tokio::task;

use crate::{
    db::Database,
    error::{Result, ResultExt},
    models::CapacityPolicy,
};

pub mod builder;
pub mod execution_ops;
pub mod program_ops;
pub mod query_ops;
pub mod slot_ops;


pub use builder::LineupBuilder;

/// Main interface for managing programs, executions and featured slots.
#[derive(Debug, Clone)]
pub struct Lineup {
    pub(crate) db_path: PathBuf,
    pub(crate) busy_timeout: Duration,
    pub(crate) policy: CapacityPolicy,
}

impl Lineup {
    pub(crate) fn new(db_path: PathBuf, busy_timeout: Duration, policy: CapacityPolicy) -> Self {
        Self {
            db_path,
            busy_timeout,
            policy,
        }
    }

    /// Path of the SQLite database backing this instance.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Policy used by [`Lineup::allocate_slot`].
    pub fn capacity_policy(&self) -> CapacityPolicy {
        self.policy
    }

    /// Runs `op` against a fresh connection on the blocking pool.
    async fn with_database<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        let busy_timeout = self.busy_timeout;

        task::spawn_blocking(move || {
            let mut db = Database::with_busy_timeout(&db_path, busy_timeout)?;
            op(&mut db)
        })
        .await
        .with_context("Task join error")?
    }
}

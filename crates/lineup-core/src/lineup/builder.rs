//! Builder for creating and configuring Lineup instances.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use log::info;
use tokio::task;

use super::Lineup;
use crate::{
    db::{Database, DEFAULT_BUSY_TIMEOUT},
    error::{LineupError, Result, ResultExt},
    models::CapacityPolicy,
};

/// Builder for creating and configuring Lineup instances.
#[derive(Debug, Clone)]
pub struct LineupBuilder {
    database_path: Option<PathBuf>,
    busy_timeout: Duration,
    policy: CapacityPolicy,
}

impl LineupBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            policy: CapacityPolicy::default(),
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/lineup/lineup.db` or `~/.local/share/lineup/lineup.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets how long an operation waits for a competing writer before it
    /// fails with a transient store error.
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Sets the rule used to decide when the featured list is full.
    pub fn with_capacity_policy(mut self, policy: CapacityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the configured instance, creating the database and its parent
    /// directory when missing.
    ///
    /// # Errors
    ///
    /// Returns `LineupError::FileSystem` if the parent directory cannot be
    /// created, `LineupError::XdgDirectory` if no default path can be
    /// resolved, and a database error if schema initialization fails.
    pub async fn build(self) -> Result<Lineup> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| LineupError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        let busy_timeout = self.busy_timeout;
        task::spawn_blocking(move || {
            let _db = Database::with_busy_timeout(&db_path_clone, busy_timeout)?;
            Ok::<(), LineupError>(())
        })
        .await
        .with_context("Task join error")??;

        info!(
            "Using database {} ({} capacity policy)",
            db_path.display(),
            self.policy
        );
        Ok(Lineup::new(db_path, self.busy_timeout, self.policy))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("lineup")
            .place_data_file("lineup.db")
            .map_err(|e| LineupError::XdgDirectory(e.to_string()))
    }
}

impl Default for LineupBuilder {
    fn default() -> Self {
        Self::new()
    }
}

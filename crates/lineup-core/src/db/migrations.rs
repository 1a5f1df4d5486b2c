//! Database schema initialization and migrations.

use log::{info, warn};

use crate::error::{DatabaseResultExt, Result};

const CREATE_SHOW_ORDER_INDEX_SQL: &str = "CREATE UNIQUE INDEX IF NOT EXISTS idx_program_executions_show_order \
     ON program_executions(show_order) WHERE show_order IS NOT NULL";
const HAS_SHOW_ORDER_INDEX_SQL: &str = "SELECT COUNT(*) FROM sqlite_master \
     WHERE type = 'index' AND name = 'idx_program_executions_show_order'";
// Keeps the earliest execution of every duplicated slot
const CLEAR_DUPLICATE_SLOTS_SQL: &str = "UPDATE program_executions SET show_order = NULL \
     WHERE show_order IS NOT NULL AND rowid NOT IN \
     (SELECT MIN(rowid) FROM program_executions WHERE show_order IS NOT NULL GROUP BY show_order)";

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        // Readers keep working while an allocation holds the write lock
        let _mode: String = self
            .connection
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
            .db_context("Failed to enable WAL journal mode")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        let has_image_column: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('program_executions') WHERE name = 'image'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .db_context("Failed to inspect program_executions columns")?;

        if !has_image_column {
            info!("Adding image column to program_executions");
            self.connection
                .execute("ALTER TABLE program_executions ADD COLUMN image TEXT", [])
                .db_context("Failed to add image column to program_executions")?;
        }

        let has_show_order_index: bool = self
            .connection
            .query_row(HAS_SHOW_ORDER_INDEX_SQL, [], |row| row.get(0))
            .map(|count: i64| count > 0)
            .db_context("Failed to inspect show order index")?;

        if !has_show_order_index {
            // Databases written before the unique index may hold duplicate
            // slots; they must be cleared before the index can be built.
            let cleared = self
                .connection
                .execute(CLEAR_DUPLICATE_SLOTS_SQL, [])
                .db_context("Failed to clear duplicate show slots")?;
            if cleared > 0 {
                warn!("Cleared {cleared} duplicate show slot(s) before adding unique index");
            }
            self.connection
                .execute(CREATE_SHOW_ORDER_INDEX_SQL, [])
                .db_context("Failed to create show order index")?;
        }

        Ok(())
    }
}

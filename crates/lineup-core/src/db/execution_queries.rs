//! Program execution CRUD operations, queries and the atomic batch update.

use jiff::Timestamp;
use log::{debug, info};
use rusqlite::{
    params, params_from_iter, types::Type, Connection, OptionalExtension, TransactionBehavior,
};
use uuid::Uuid;

use super::program_queries::{parse_timestamp, PROGRAM_COLUMNS};
use crate::{
    error::{DatabaseResultExt, LineupError, Result},
    models::{
        ExecutionFilter, ExecutionOrder, ExecutionPatch, ExecutionStatus, ExecutionWithProgram,
        NewExecution, ProgramExecution,
    },
};

// Column list prefixed with the `e` alias so it works in joins too
const EXECUTION_COLUMNS: &str = "e.id, e.program_id, e.title, e.image, e.date, e.status, e.show_order, e.created_at, e.updated_at";
const EXECUTION_COLUMN_COUNT: usize = 9;
const CHECK_PROGRAM_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM programs WHERE id = ?1)";
const SELECT_PROGRAM_SNAPSHOT_SQL: &str = "SELECT title, image FROM programs WHERE id = ?1";
const INSERT_EXECUTION_SQL: &str = "INSERT INTO program_executions (id, program_id, title, image, date, status, show_order, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, NULL, ?7, ?8)";
const UPDATE_EXECUTION_SQL: &str = "UPDATE program_executions SET title = ?1, image = ?2, date = ?3, status = ?4, show_order = ?5, updated_at = ?6 WHERE id = ?7";
const DELETE_EXECUTION_SQL: &str = "DELETE FROM program_executions WHERE id = ?1";

impl super::Database {
    /// Builds a ProgramExecution from a row whose execution columns start at
    /// `base`, in `EXECUTION_COLUMNS` order.
    pub(crate) fn build_execution_from_row(
        row: &rusqlite::Row,
        base: usize,
    ) -> rusqlite::Result<ProgramExecution> {
        let status_str: String = row.get(base + 5)?;
        let status = status_str.parse::<ExecutionStatus>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                base + 5,
                Type::Text,
                format!("Invalid status: {status_str}").into(),
            )
        })?;

        let date = row
            .get::<_, Option<i64>>(base + 4)?
            .map(Timestamp::from_millisecond)
            .transpose()
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(base + 4, Type::Integer, Box::new(e))
            })?;

        Ok(ProgramExecution {
            id: row.get(base)?,
            program_id: row.get(base + 1)?,
            title: row.get(base + 2)?,
            image: row.get(base + 3)?,
            date,
            status,
            show_order: row.get(base + 6)?,
            created_at: parse_timestamp(row, base + 7)?,
            updated_at: parse_timestamp(row, base + 8)?,
        })
    }

    /// Inserts a new, unfeatured execution linked to `program_id`.
    pub fn create_execution(
        &mut self,
        program_id: &str,
        new: &NewExecution,
    ) -> Result<ProgramExecution> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let program_exists: bool = tx
            .query_row(CHECK_PROGRAM_EXISTS_SQL, params![program_id], |row| row.get(0))
            .db_context("Failed to check program existence")?;

        if !program_exists {
            return Err(LineupError::ProgramNotFound {
                id: program_id.to_string(),
            });
        }

        let execution = Self::insert_execution(
            &tx,
            program_id,
            &new.title,
            new.image.as_deref(),
            new.date,
            new.status,
        )?;

        tx.commit().db_context("Failed to commit transaction")?;

        info!(
            "Created execution {} for program {}",
            execution.id, program_id
        );
        Ok(execution)
    }

    /// Creates an upcoming execution that snapshots the program's title and
    /// image. The date is left undecided.
    pub fn derive_execution(&mut self, program_id: &str) -> Result<ProgramExecution> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let (title, image): (String, String) = tx
            .query_row(SELECT_PROGRAM_SNAPSHOT_SQL, params![program_id], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .optional()
            .db_context("Failed to read program snapshot")?
            .ok_or_else(|| LineupError::ProgramNotFound {
                id: program_id.to_string(),
            })?;

        let image = (!image.is_empty()).then_some(image);
        let execution = Self::insert_execution(
            &tx,
            program_id,
            &title,
            image.as_deref(),
            None,
            ExecutionStatus::Upcoming,
        )?;

        tx.commit().db_context("Failed to commit transaction")?;

        info!(
            "Derived execution {} from program {}",
            execution.id, program_id
        );
        Ok(execution)
    }

    fn insert_execution(
        conn: &Connection,
        program_id: &str,
        title: &str,
        image: Option<&str>,
        date: Option<Timestamp>,
        status: ExecutionStatus,
    ) -> Result<ProgramExecution> {
        let id = Uuid::new_v4().to_string();
        let now = Timestamp::now();
        let now_str = now.to_string();

        conn.execute(
            INSERT_EXECUTION_SQL,
            params![
                &id,
                program_id,
                title,
                image,
                date.map(|d| d.as_millisecond()),
                status.as_str(),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert execution")?;

        Ok(ProgramExecution {
            id,
            program_id: program_id.to_string(),
            title: title.to_string(),
            image: image.map(String::from),
            date,
            status,
            show_order: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a single execution by its ID.
    pub fn get_execution(&self, id: &str) -> Result<Option<ProgramExecution>> {
        Self::fetch_execution(&self.connection, id)
    }

    pub(crate) fn fetch_execution(conn: &Connection, id: &str) -> Result<Option<ProgramExecution>> {
        let sql = format!("SELECT {EXECUTION_COLUMNS} FROM program_executions e WHERE e.id = ?1");
        conn.query_row(&sql, params![id], |row| Self::build_execution_from_row(row, 0))
            .optional()
            .db_context("Failed to get execution")
    }

    /// Lists executions matching `filter`.
    pub fn find_executions(&self, filter: &ExecutionFilter) -> Result<Vec<ProgramExecution>> {
        Self::query_executions(&self.connection, filter)
    }

    pub(crate) fn query_executions(
        conn: &Connection,
        filter: &ExecutionFilter,
    ) -> Result<Vec<ProgramExecution>> {
        let (clauses, values) = filter_clauses(filter);
        let query = format!("SELECT {EXECUTION_COLUMNS} FROM program_executions e{clauses}");
        debug!("Execution query: {query}");

        let mut stmt = conn.prepare(&query).db_context("Failed to prepare query")?;

        let executions = stmt
            .query_map(params_from_iter(values.iter()), |row| {
                Self::build_execution_from_row(row, 0)
            })
            .db_context("Failed to query executions")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch executions")?;

        Ok(executions)
    }

    /// Lists executions matching `filter`, each joined with its program.
    pub fn find_executions_with_program(
        &self,
        filter: &ExecutionFilter,
    ) -> Result<Vec<ExecutionWithProgram>> {
        let (clauses, values) = filter_clauses(filter);
        let program_columns = PROGRAM_COLUMNS
            .split(", ")
            .map(|c| format!("p.{c}"))
            .collect::<Vec<_>>()
            .join(", ");
        let query = format!(
            "SELECT {EXECUTION_COLUMNS}, {program_columns} FROM program_executions e \
             JOIN programs p ON p.id = e.program_id{clauses}"
        );
        debug!("Execution join query: {query}");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map(params_from_iter(values.iter()), |row| {
                Ok(ExecutionWithProgram {
                    execution: Self::build_execution_from_row(row, 0)?,
                    program: Self::build_program_from_row(row, EXECUTION_COLUMN_COUNT)?,
                })
            })
            .db_context("Failed to query executions")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch executions")?;

        Ok(rows)
    }

    pub(crate) fn executions_of_program(&self, program_id: &str) -> Result<Vec<ProgramExecution>> {
        self.find_executions(&ExecutionFilter {
            program_id: Some(program_id.to_string()),
            ..Default::default()
        })
    }

    /// Applies a partial update to one execution.
    pub fn update_execution(
        &mut self,
        id: &str,
        patch: &ExecutionPatch,
    ) -> Result<ProgramExecution> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let updated = Self::apply_patch(&tx, id, patch)?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(updated)
    }

    /// Applies every `(id, patch)` pair as one unit. If any id is missing or
    /// any patch violates a constraint, nothing is written.
    pub fn batch_update_executions(
        &mut self,
        updates: &[(String, ExecutionPatch)],
    ) -> Result<Vec<ProgramExecution>> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let updated = Self::apply_batch(&tx, updates)?;

        tx.commit().db_context("Failed to commit transaction")?;

        info!("Updated {} execution(s) in batch", updated.len());
        Ok(updated)
    }

    /// Applies patches in order on an open transaction; the caller commits.
    pub(crate) fn apply_batch(
        conn: &Connection,
        updates: &[(String, ExecutionPatch)],
    ) -> Result<Vec<ProgramExecution>> {
        updates
            .iter()
            .map(|(id, patch)| Self::apply_patch(conn, id, patch))
            .collect()
    }

    /// Reads the current row, merges the patch and writes it back.
    pub(crate) fn apply_patch(
        conn: &Connection,
        id: &str,
        patch: &ExecutionPatch,
    ) -> Result<ProgramExecution> {
        let current = Self::fetch_execution(conn, id)?
            .ok_or_else(|| LineupError::ExecutionNotFound { id: id.to_string() })?;

        if patch.is_empty() {
            return Ok(current);
        }

        let now = Timestamp::now();
        let updated = ProgramExecution {
            title: patch.title.clone().unwrap_or(current.title),
            image: patch.image.clone().unwrap_or(current.image),
            date: patch.date.unwrap_or(current.date),
            status: patch.status.unwrap_or(current.status),
            show_order: patch.show_order.unwrap_or(current.show_order),
            updated_at: now,
            ..current
        };

        conn.execute(
            UPDATE_EXECUTION_SQL,
            params![
                &updated.title,
                updated.image.as_deref(),
                updated.date.map(|d| d.as_millisecond()),
                updated.status.as_str(),
                updated.show_order,
                now.to_string(),
                id
            ],
        )
        .db_context("Failed to update execution")?;

        Ok(updated)
    }

    /// Deletes every listed execution that exists. Fails when none of the ids
    /// exist.
    pub fn delete_executions(&mut self, ids: &[String]) -> Result<usize> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let mut deleted = 0;
        for id in ids {
            deleted += tx
                .execute(DELETE_EXECUTION_SQL, params![id])
                .db_context("Failed to delete execution")?;
        }

        if deleted == 0 {
            return Err(LineupError::ExecutionNotFound { id: ids.join(", ") });
        }

        tx.commit().db_context("Failed to commit transaction")?;

        info!("Deleted {deleted} execution(s)");
        Ok(deleted)
    }
}

/// Renders the WHERE / ORDER BY / LIMIT tail of an execution query against
/// the `e` alias, with its bound values.
fn filter_clauses(filter: &ExecutionFilter) -> (String, Vec<Box<dyn rusqlite::ToSql>>) {
    let mut conditions = Vec::new();
    let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if filter.featured_only {
        conditions.push("e.show_order IS NOT NULL");
    }

    if let Some(status) = filter.status {
        conditions.push("e.status = ?");
        values.push(Box::new(status.as_str()));
    }

    if let Some(after) = filter.date_after {
        // NULL dates never compare greater, so undecided dates drop out
        conditions.push("e.date > ?");
        values.push(Box::new(after.as_millisecond()));
    }

    if let Some(ref program_id) = filter.program_id {
        conditions.push("e.program_id = ?");
        values.push(Box::new(program_id.clone()));
    }

    let mut clauses = String::new();
    if !conditions.is_empty() {
        clauses.push_str(" WHERE ");
        clauses.push_str(&conditions.join(" AND "));
    }

    match filter.order {
        ExecutionOrder::Created => clauses.push_str(" ORDER BY e.rowid"),
        ExecutionOrder::ShowOrder => clauses.push_str(
            " ORDER BY e.show_order IS NULL, e.show_order ASC, e.date IS NULL, e.date ASC, e.rowid",
        ),
    }

    clauses.push_str(" LIMIT ?");
    values.push(Box::new(filter.limit.as_sql()));

    (clauses, values)
}

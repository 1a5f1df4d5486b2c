//! Program CRUD operations and queries.

use jiff::Timestamp;
use log::{debug, info};
use rusqlite::{params, params_from_iter, types::Type, OptionalExtension, TransactionBehavior};

use crate::{
    error::{DatabaseResultExt, LineupError, Result},
    models::{NewProgram, Program, ProgramFilter, ProgramPatch, ProgramType},
};

pub(crate) const PROGRAM_COLUMNS: &str =
    "id, title, content, description, image, program_type, custom_url, created_at, updated_at";
const INSERT_PROGRAM_SQL: &str = "INSERT INTO programs (id, title, content, description, image, program_type, custom_url, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
const UPDATE_PROGRAM_SQL: &str = "UPDATE programs SET title = ?1, content = ?2, description = ?3, image = ?4, program_type = ?5, custom_url = ?6, updated_at = ?7 WHERE id = ?8";
const DELETE_PROGRAM_SQL: &str = "DELETE FROM programs WHERE id = ?1";

impl super::Database {
    /// Builds a Program from a row whose program columns start at `base`,
    /// in [`PROGRAM_COLUMNS`] order.
    pub(crate) fn build_program_from_row(
        row: &rusqlite::Row,
        base: usize,
    ) -> rusqlite::Result<Program> {
        let type_str: String = row.get(base + 5)?;
        let program_type = type_str.parse::<ProgramType>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                base + 5,
                Type::Text,
                format!("Invalid program type: {type_str}").into(),
            )
        })?;

        Ok(Program {
            id: row.get(base)?,
            title: row.get(base + 1)?,
            content: row.get(base + 2)?,
            description: row.get(base + 3)?,
            image: row.get(base + 4)?,
            program_type,
            custom_url: row.get(base + 6)?,
            created_at: parse_timestamp(row, base + 7)?,
            updated_at: parse_timestamp(row, base + 8)?,
            executions: Vec::new(),
        })
    }

    /// Inserts a program under the caller-supplied id. A duplicate id fails
    /// with a constraint violation.
    pub fn create_program(&mut self, new: &NewProgram) -> Result<Program> {
        if new.id.trim().is_empty() {
            return Err(LineupError::invalid_input("id").with_reason("Program id must not be empty"));
        }

        let now = Timestamp::now();
        let now_str = now.to_string();

        self.connection
            .execute(
                INSERT_PROGRAM_SQL,
                params![
                    &new.id,
                    &new.title,
                    &new.content,
                    &new.description,
                    &new.image,
                    new.program_type.as_str(),
                    new.custom_url.as_deref(),
                    &now_str,
                    &now_str
                ],
            )
            .db_context("Failed to insert program")?;

        info!("Created program {}", new.id);

        Ok(Program {
            id: new.id.clone(),
            title: new.title.clone(),
            content: new.content.clone(),
            description: new.description.clone(),
            image: new.image.clone(),
            program_type: new.program_type,
            custom_url: new.custom_url.clone(),
            created_at: now,
            updated_at: now,
            executions: Vec::new(),
        })
    }

    /// Retrieves a program by its ID, with its executions eagerly loaded.
    pub fn get_program(&self, id: &str) -> Result<Option<Program>> {
        let sql = format!("SELECT {PROGRAM_COLUMNS} FROM programs WHERE id = ?1");
        let mut program = self
            .connection
            .query_row(&sql, params![id], |row| Self::build_program_from_row(row, 0))
            .optional()
            .db_context("Failed to query program")?;

        if let Some(ref mut program) = program {
            program.executions = self.executions_of_program(&program.id)?;
        }

        Ok(program)
    }

    /// Lists programs, optionally by type, oldest first.
    pub fn find_programs(&self, filter: &ProgramFilter) -> Result<Vec<Program>> {
        let mut query = format!("SELECT {PROGRAM_COLUMNS} FROM programs");
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(program_type) = filter.program_type {
            query.push_str(" WHERE program_type = ?");
            values.push(Box::new(program_type.as_str()));
        }

        query.push_str(" ORDER BY rowid");

        if let Some(limit) = filter.limit {
            query.push_str(" LIMIT ?");
            values.push(Box::new(limit.as_sql()));
        }

        debug!("Program query: {query}");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let programs = stmt
            .query_map(params_from_iter(values.iter()), |row| {
                Self::build_program_from_row(row, 0)
            })
            .db_context("Failed to query programs")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch programs")?;

        Ok(programs)
    }

    /// Applies a partial update to a program and returns the stored result.
    pub fn update_program(&mut self, id: &str, patch: ProgramPatch) -> Result<Program> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let sql = format!("SELECT {PROGRAM_COLUMNS} FROM programs WHERE id = ?1");
        let current = tx
            .query_row(&sql, params![id], |row| Self::build_program_from_row(row, 0))
            .optional()
            .db_context("Failed to get current program")?
            .ok_or_else(|| LineupError::ProgramNotFound { id: id.to_string() })?;

        if patch.is_empty() {
            return Ok(current);
        }

        let now = Timestamp::now();
        let updated = Program {
            title: patch.title.unwrap_or(current.title),
            content: patch.content.unwrap_or(current.content),
            description: patch.description.unwrap_or(current.description),
            image: patch.image.unwrap_or(current.image),
            program_type: patch.program_type.unwrap_or(current.program_type),
            custom_url: patch.custom_url.unwrap_or(current.custom_url),
            updated_at: now,
            ..current
        };

        tx.execute(
            UPDATE_PROGRAM_SQL,
            params![
                &updated.title,
                &updated.content,
                &updated.description,
                &updated.image,
                updated.program_type.as_str(),
                updated.custom_url.as_deref(),
                now.to_string(),
                id
            ],
        )
        .db_context("Failed to update program")?;

        tx.commit().db_context("Failed to commit transaction")?;

        info!("Updated program {id}");
        Ok(updated)
    }

    /// Deletes every listed program that exists, cascading to their
    /// executions. Fails when none of the ids exist.
    pub fn delete_programs(&mut self, ids: &[String]) -> Result<usize> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let mut deleted = 0;
        for id in ids {
            deleted += tx
                .execute(DELETE_PROGRAM_SQL, params![id])
                .db_context("Failed to delete program")?;
        }

        if deleted == 0 {
            return Err(LineupError::ProgramNotFound { id: ids.join(", ") });
        }

        tx.commit().db_context("Failed to commit transaction")?;

        info!("Deleted {deleted} program(s)");
        Ok(deleted)
    }
}

/// Parses an RFC 3339 timestamp column.
pub(crate) fn parse_timestamp(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

//! Program operations for Lineup.

use super::Lineup;
use crate::{
    display::Programs,
    error::{LineupError, Result},
    models::{Program, ProgramFilter},
    params::{CreateProgram, Id, Ids, ListPrograms, UpdateProgram},
};

impl Lineup {
    /// Creates a program under the id supplied in `params`.
    pub async fn create_program(&self, params: &CreateProgram) -> Result<Program> {
        let new = params.validate()?;
        self.with_database(move |db| db.create_program(&new)).await
    }

    /// Retrieves a program with its executions.
    pub async fn get_program(&self, params: &Id) -> Result<Program> {
        let id = params.id.clone();
        self.with_database(move |db| {
            db.get_program(&id)?
                .ok_or(LineupError::ProgramNotFound { id })
        })
        .await
    }

    /// Lists programs, optionally restricted to one type and truncated.
    pub async fn list_programs(&self, params: &ListPrograms) -> Result<Programs> {
        let filter = params.validate()?;
        let programs = self
            .with_database(move |db| db.find_programs(&filter))
            .await?;
        Ok(Programs(programs))
    }

    /// Lists every program; fails with [`LineupError::NoPrograms`] when there
    /// are none.
    pub async fn list_all_programs(&self) -> Result<Programs> {
        let programs = self
            .with_database(|db| db.find_programs(&ProgramFilter::default()))
            .await?;

        if programs.is_empty() {
            return Err(LineupError::NoPrograms);
        }
        Ok(Programs(programs))
    }

    pub async fn update_program(&self, params: &UpdateProgram) -> Result<Program> {
        let id = params.id.clone();
        let patch = params.validate()?;
        self.with_database(move |db| db.update_program(&id, patch))
            .await
    }

    /// Deletes programs and, through the cascade, their executions.
    pub async fn delete_programs(&self, params: &Ids) -> Result<usize> {
        let ids = params.ids.clone();
        self.with_database(move |db| db.delete_programs(&ids)).await
    }
}

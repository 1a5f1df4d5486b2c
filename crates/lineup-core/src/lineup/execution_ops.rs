//! Execution mutation operations for Lineup.

use log::info;

use super::Lineup;
use crate::{
    display::Executions,
    error::Result,
    models::{ExecutionPatch, ProgramExecution},
    params::{CreateExecution, Id, Ids, TransitionStatus, UpdateExecution},
};

impl Lineup {
    /// Creates an unfeatured execution under `params.program_id`.
    pub async fn create_execution(&self, params: &CreateExecution) -> Result<ProgramExecution> {
        let program_id = params.program_id.clone();
        let new = params.validate()?;
        self.with_database(move |db| db.create_execution(&program_id, &new))
            .await
    }

    /// Creates an upcoming execution copying the title and image of the
    /// program identified by `params.id`.
    pub async fn derive_execution(&self, params: &Id) -> Result<ProgramExecution> {
        let program_id = params.id.clone();
        self.with_database(move |db| db.derive_execution(&program_id))
            .await
    }

    /// Updates the title, image, date and/or status of an execution.
    pub async fn update_execution(&self, params: &UpdateExecution) -> Result<ProgramExecution> {
        let id = params.id.clone();
        let patch = params.validate()?;
        self.with_database(move |db| db.update_execution(&id, &patch))
            .await
    }

    /// Applies several patches atomically; nothing is written if any fails.
    pub async fn batch_update(&self, updates: Vec<(String, ExecutionPatch)>) -> Result<Executions> {
        let updated = self
            .with_database(move |db| db.batch_update_executions(&updates))
            .await?;
        Ok(Executions(updated))
    }

    /// Sets the status of an execution. Any status may follow any other.
    pub async fn transition_status(&self, params: &TransitionStatus) -> Result<ProgramExecution> {
        let id = params.id.clone();
        let status = params.validate()?;
        let execution = self
            .with_database(move |db| db.update_execution(&id, &ExecutionPatch::status(status)))
            .await?;

        info!("Execution {} is now {}", execution.id, execution.status);
        Ok(execution)
    }

    pub async fn delete_executions(&self, params: &Ids) -> Result<usize> {
        let ids = params.ids.clone();
        self.with_database(move |db| db.delete_executions(&ids))
            .await
    }
}

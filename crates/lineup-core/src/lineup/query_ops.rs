//! Read-only execution queries for Lineup.

use jiff::Timestamp;

use super::Lineup;
use crate::{
    display::{Executions, UpcomingList},
    error::{LineupError, Result},
    models::{ExecutionFilter, ProgramExecution},
    params::{Id, ListFeatured, ListUpcoming},
};

impl Lineup {
    /// Every execution in creation order.
    ///
    /// An empty store is reported as [`LineupError::NoExecutions`] rather than
    /// an empty list.
    pub async fn list_all(&self) -> Result<Executions> {
        let executions = self
            .with_database(|db| db.find_executions(&ExecutionFilter::default()))
            .await?;

        if executions.is_empty() {
            return Err(LineupError::NoExecutions);
        }
        Ok(Executions(executions))
    }

    /// The featured list, ascending by show slot.
    pub async fn list_featured(&self, params: &ListFeatured) -> Result<Executions> {
        let filter = ExecutionFilter::featured(params.limit);
        let executions = self
            .with_database(move |db| db.find_executions(&filter))
            .await?;
        Ok(Executions(executions))
    }

    /// Upcoming executions dated after now, featured ones first, each with
    /// its program.
    pub async fn list_upcoming_public(&self, params: &ListUpcoming) -> Result<UpcomingList> {
        let filter = ExecutionFilter::upcoming_after(Timestamp::now(), params.limit);
        let entries = self
            .with_database(move |db| db.find_executions_with_program(&filter))
            .await?;
        Ok(UpcomingList(entries))
    }

    pub async fn get_execution(&self, params: &Id) -> Result<ProgramExecution> {
        let id = params.id.clone();
        self.with_database(move |db| {
            db.get_execution(&id)?
                .ok_or(LineupError::ExecutionNotFound { id })
        })
        .await
    }
}

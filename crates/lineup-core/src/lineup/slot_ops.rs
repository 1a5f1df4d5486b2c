//! Featured-slot operations for Lineup.

use super::Lineup;
use crate::{
    display::Executions,
    error::Result,
    models::{Allocation, ProgramExecution},
    params::{Id, ReorderFeatured, SwapSlots},
};

impl Lineup {
    /// Features an execution using the configured capacity policy.
    ///
    /// # Errors
    ///
    /// `ExecutionNotFound` for an unknown id and `CapacityExceeded` when the
    /// featured list is full. In both cases nothing is written.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lineup_core::{params::Id, LineupBuilder};
    /// # async {
    /// let lineup = LineupBuilder::new().build().await?;
    /// let allocation = lineup.allocate_slot(&Id { id: "e1".to_string() }).await?;
    /// assert!(allocation.slot <= lineup_core::MAX_SHOWN);
    /// # Result::<(), lineup_core::LineupError>::Ok(())
    /// # };
    /// ```
    pub async fn allocate_slot(&self, params: &Id) -> Result<Allocation> {
        let id = params.id.clone();
        let policy = self.policy;
        self.with_database(move |db| db.allocate_slot(&id, policy))
            .await
    }

    /// Removes an execution from the featured list without renumbering the
    /// others.
    pub async fn clear_slot(&self, params: &Id) -> Result<ProgramExecution> {
        let id = params.id.clone();
        self.with_database(move |db| db.clear_slot(&id)).await
    }

    pub async fn swap_slots(&self, params: &SwapSlots) -> Result<Executions> {
        let first = params.first_id.clone();
        let second = params.second_id.clone();
        let swapped = self
            .with_database(move |db| db.swap_slots(&first, &second))
            .await?;
        Ok(Executions(swapped))
    }

    /// Replaces the featured list with `params.ids`, in order.
    pub async fn reorder_featured(&self, params: &ReorderFeatured) -> Result<Executions> {
        let ids = params.ids.clone();
        let featured = self
            .with_database(move |db| db.reorder_featured(&ids))
            .await?;
        Ok(Executions(featured))
    }
}

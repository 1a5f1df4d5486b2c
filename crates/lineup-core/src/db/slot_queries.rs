//! Featured-slot allocation, clearing and reordering.
//!
//! Every operation here reads the featured list and writes slots inside one
//! `BEGIN IMMEDIATE` transaction. SQLite admits a single such transaction at a
//! time, so two allocations can never both observe the same free slot.

use std::collections::HashSet;

use log::{info, warn};
use rusqlite::{Connection, TransactionBehavior};

use crate::{
    error::{DatabaseResultExt, LineupError, Result},
    models::{
        Allocation, CapacityPolicy, ExecutionFilter, ExecutionPatch, Limit, ProgramExecution,
        MAX_SHOWN,
    },
};

const CLEAR_ALL_SLOTS_SQL: &str =
    "UPDATE program_executions SET show_order = NULL WHERE show_order IS NOT NULL";

impl super::Database {
    /// Gives `execution_id` the next featured slot under `policy`.
    ///
    /// An execution that is already featured keeps its slot and nothing is
    /// written. When the featured list is full the call fails with
    /// [`LineupError::CapacityExceeded`] and nothing is written.
    pub fn allocate_slot(
        &mut self,
        execution_id: &str,
        policy: CapacityPolicy,
    ) -> Result<Allocation> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin allocation transaction")?;

        let target = Self::fetch_execution(&tx, execution_id)?.ok_or_else(|| {
            LineupError::ExecutionNotFound {
                id: execution_id.to_string(),
            }
        })?;

        if let Some(slot) = target.show_order {
            return Ok(Allocation {
                execution: target,
                slot,
                newly_allocated: false,
            });
        }

        let occupied = Self::occupied_slots(&tx)?;
        let Some(slot) = policy.next_slot(&occupied) else {
            warn!(
                "Rejected slot for {execution_id}: featured list full ({} policy, occupied {:?})",
                policy, occupied
            );
            return Err(LineupError::CapacityExceeded { max: MAX_SHOWN });
        };

        let mut updated = Self::apply_batch(
            &tx,
            &[(execution_id.to_string(), ExecutionPatch::slot(slot))],
        )?;

        tx.commit().db_context("Failed to commit allocation")?;

        info!("Allocated show slot {slot} to execution {execution_id}");
        Ok(Allocation {
            execution: updated.remove(0),
            slot,
            newly_allocated: true,
        })
    }

    /// Removes `execution_id` from the featured list. Remaining slots are not
    /// renumbered. Succeeds without writing when the execution holds no slot.
    pub fn clear_slot(&mut self, execution_id: &str) -> Result<ProgramExecution> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let current = Self::fetch_execution(&tx, execution_id)?.ok_or_else(|| {
            LineupError::ExecutionNotFound {
                id: execution_id.to_string(),
            }
        })?;

        if !current.is_featured() {
            return Ok(current);
        }

        let cleared = Self::apply_patch(&tx, execution_id, &ExecutionPatch::clear_slot())?;
        tx.commit().db_context("Failed to commit transaction")?;

        info!("Cleared show slot of execution {execution_id}");
        Ok(cleared)
    }

    /// Exchanges the show slots of two executions. At least one of them must
    /// be featured; swapping an execution with itself is a no-op.
    pub fn swap_slots(&mut self, first_id: &str, second_id: &str) -> Result<Vec<ProgramExecution>> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let first = Self::fetch_execution(&tx, first_id)?.ok_or_else(|| {
            LineupError::ExecutionNotFound {
                id: first_id.to_string(),
            }
        })?;

        if first_id == second_id {
            return Ok(vec![first]);
        }

        let second = Self::fetch_execution(&tx, second_id)?.ok_or_else(|| {
            LineupError::ExecutionNotFound {
                id: second_id.to_string(),
            }
        })?;

        if first.show_order.is_none() && second.show_order.is_none() {
            return Err(LineupError::invalid_input("execution_ids")
                .with_reason("At least one of the executions must be shown to swap slots"));
        }

        // Park the first slot on NULL so the unique index never sees a
        // duplicate mid-swap
        let updated = Self::apply_batch(
            &tx,
            &[
                (first_id.to_string(), ExecutionPatch::clear_slot()),
                (
                    second_id.to_string(),
                    ExecutionPatch {
                        show_order: Some(first.show_order),
                        ..Default::default()
                    },
                ),
                (
                    first_id.to_string(),
                    ExecutionPatch {
                        show_order: Some(second.show_order),
                        ..Default::default()
                    },
                ),
            ],
        )?;

        tx.commit().db_context("Failed to commit transaction")?;

        info!("Swapped show slots of {first_id} and {second_id}");
        Ok(vec![updated[2].clone(), updated[1].clone()])
    }

    /// Makes `ids` the whole featured list, in that order: slot `n` goes to
    /// the n-th id and every other execution loses its slot.
    pub fn reorder_featured(&mut self, ids: &[String]) -> Result<Vec<ProgramExecution>> {
        if ids.len() > usize::from(MAX_SHOWN) {
            return Err(LineupError::CapacityExceeded { max: MAX_SHOWN });
        }
        let mut seen = HashSet::new();
        if let Some(dup) = ids.iter().find(|id| !seen.insert(id.as_str())) {
            return Err(LineupError::invalid_input("execution_ids")
                .with_reason(format!("Execution {dup} is listed more than once")));
        }

        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        tx.execute(CLEAR_ALL_SLOTS_SQL, [])
            .db_context("Failed to clear show slots")?;

        let updates: Vec<(String, ExecutionPatch)> = (1..=MAX_SHOWN)
            .zip(ids)
            .map(|(slot, id)| (id.clone(), ExecutionPatch::slot(slot)))
            .collect();
        let updated = Self::apply_batch(&tx, &updates)?;

        tx.commit().db_context("Failed to commit transaction")?;

        info!("Reordered featured list to {:?}", ids);
        Ok(updated)
    }

    /// Occupied slots in ascending order, read from the featured list.
    fn occupied_slots(conn: &Connection) -> Result<Vec<u8>> {
        let featured = Self::query_executions(conn, &ExecutionFilter::featured(Limit::All))?;
        Ok(featured.into_iter().filter_map(|e| e.show_order).collect())
    }
}

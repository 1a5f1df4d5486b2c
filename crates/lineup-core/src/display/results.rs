//! Result wrapper types for displaying operation outcomes.
//!
//! These replace ad-hoc notifications: every mutating operation returns data,
//! and the caller wraps it here to produce a confirmation message.

use std::fmt;

use crate::models::{Allocation, Program, ProgramExecution};

/// Wrapper type for displaying the result of create operations.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Program> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Successfully created program {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<ProgramExecution> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Successfully created upcoming program {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, with an
/// optional list of the changes made.
///
/// ```rust
/// use lineup_core::{display::UpdateResult, models::{ExecutionStatus, ProgramExecution}};
/// use jiff::Timestamp;
///
/// let execution = ProgramExecution {
///     id: "e1".to_string(),
///     program_id: "p1".to_string(),
///     title: "Evening Talk".to_string(),
///     image: None,
///     date: None,
///     status: ExecutionStatus::Done,
///     show_order: None,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
/// let result = UpdateResult::with_changes(execution, vec!["Status: done".to_string()]);
/// assert!(format!("{result}").contains("- Status: done"));
/// ```
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }

    fn fmt_changes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for UpdateResult<Program> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Successfully updated program {}", self.resource.title)?;
        self.fmt_changes(f)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<ProgramExecution> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Success updating upcoming program {}", self.resource.id)?;
        self.fmt_changes(f)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying bulk delete outcomes.
pub struct DeleteResult {
    pub kind: &'static str,
    pub deleted: usize,
}

impl DeleteResult {
    pub fn new(kind: &'static str, deleted: usize) -> Self {
        Self { kind, deleted }
    }
}

impl fmt::Display for DeleteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Successfully deleted {} {}", self.deleted, self.kind)
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.newly_allocated {
            writeln!(
                f,
                "Upcoming program has been added at position {}",
                self.slot
            )?;
        } else {
            writeln!(
                f,
                "Upcoming program is already shown at position {}",
                self.slot
            )?;
        }
        writeln!(f)?;
        write!(f, "{}", self.execution)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::ExecutionStatus;

    fn execution(show_order: Option<u8>) -> ProgramExecution {
        ProgramExecution {
            id: "e1".to_string(),
            program_id: "p1".to_string(),
            title: "Evening Talk".to_string(),
            image: None,
            date: None,
            status: ExecutionStatus::Upcoming,
            show_order,
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1640995200).unwrap(),
        }
    }

    #[test]
    fn test_allocation_display() {
        let fresh = Allocation {
            execution: execution(Some(2)),
            slot: 2,
            newly_allocated: true,
        };
        assert!(format!("{fresh}").contains("has been added at position 2"));

        let existing = Allocation {
            execution: execution(Some(1)),
            slot: 1,
            newly_allocated: false,
        };
        assert!(format!("{existing}").contains("already shown at position 1"));
    }

    #[test]
    fn test_delete_result_display() {
        let result = DeleteResult::new("upcoming programs", 2);
        assert_eq!(format!("{result}"), "Successfully deleted 2 upcoming programs\n");
    }

    #[test]
    fn test_update_result_without_changes() {
        let result = UpdateResult::new(execution(None));
        let output = format!("{result}");
        assert!(output.starts_with("Success updating upcoming program e1"));
        assert!(!output.contains("Changes made:"));
    }
}

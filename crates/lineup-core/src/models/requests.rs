//! Request types for creating and patching records.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{ExecutionStatus, ProgramType};

/// Fields for inserting a new program. The id is supplied by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewProgram {
    pub id: String,
    pub title: String,
    pub content: String,
    pub description: String,
    pub image: String,
    pub program_type: ProgramType,
    pub custom_url: Option<String>,
}

/// Partial update of a program. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProgramPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub program_type: Option<ProgramType>,
    /// `Some(None)` clears the custom URL
    pub custom_url: Option<Option<String>>,
}

impl ProgramPatch {
    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.program_type.is_none()
            && self.custom_url.is_none()
    }
}

/// Fields for inserting a new execution. New executions are never featured.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewExecution {
    pub title: String,
    pub image: Option<String>,
    pub date: Option<Timestamp>,
    pub status: ExecutionStatus,
}

/// Partial update of an execution, also the unit of a batch update.
///
/// Nullable columns use a nested `Option`: `Some(None)` writes NULL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionPatch {
    pub title: Option<String>,
    pub image: Option<Option<String>>,
    pub date: Option<Option<Timestamp>>,
    pub status: Option<ExecutionStatus>,
    pub show_order: Option<Option<u8>>,
}

impl ExecutionPatch {
    /// Patch that only sets the show slot.
    pub fn slot(order: u8) -> Self {
        Self {
            show_order: Some(Some(order)),
            ..Default::default()
        }
    }

    /// Patch that only clears the show slot.
    pub fn clear_slot() -> Self {
        Self {
            show_order: Some(None),
            ..Default::default()
        }
    }

    /// Patch that only changes the status.
    pub fn status(status: ExecutionStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.image.is_none()
            && self.date.is_none()
            && self.status.is_none()
            && self.show_order.is_none()
    }
}

//! Program execution model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{ExecutionStatus, Program};

/// A scheduled instance of a [`Program`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgramExecution {
    /// Unique identifier generated by the store
    pub id: String,

    /// ID of the owning program
    pub program_id: String,

    /// Snapshot of the program title, editable independently
    pub title: String,

    /// Snapshot of the program image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// When the execution takes place; `None` while undecided
    pub date: Option<Timestamp>,

    pub status: ExecutionStatus,

    /// Rank in the public featured list; `None` when not featured
    pub show_order: Option<u8>,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,
}

impl ProgramExecution {
    /// Whether the execution currently holds a featured slot.
    pub fn is_featured(&self) -> bool {
        self.show_order.is_some()
    }
}

/// An execution joined with its owning program, as shown on the public
/// upcoming list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionWithProgram {
    #[serde(flatten)]
    pub execution: ProgramExecution,

    pub program: Program,
}

/// Outcome of a successful slot allocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Allocation {
    pub execution: ProgramExecution,

    /// The slot held by the execution after the call
    pub slot: u8,

    /// False when the execution already held `slot` and nothing was written
    pub newly_allocated: bool,
}

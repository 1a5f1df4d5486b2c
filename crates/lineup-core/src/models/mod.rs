//! Data models for programs and their executions.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping presentation separate from the data
//! structures.
//!
//! # Examples
//!
//! ```rust
//! use lineup_core::models::{ExecutionStatus, ProgramExecution};
//! use jiff::Timestamp;
//!
//! let execution = ProgramExecution {
//!     id: "e1".to_string(),
//!     program_id: "Morning_Study-2024-abc".to_string(),
//!     title: "Morning Study".to_string(),
//!     status: ExecutionStatus::Upcoming,
//!     show_order: Some(1),
//!     // ... other fields
//! #   image: None,
//! #   date: None,
//! #   created_at: Timestamp::now(),
//! #   updated_at: Timestamp::now(),
//! };
//! assert!(execution.is_featured());
//! println!("{}", execution); // Shows "Coming Soon" for the missing date
//! ```

pub mod execution;
pub mod filters;
pub mod policy;
pub mod program;
pub mod requests;
pub mod status;

#[cfg(test)]
mod tests;

pub use execution::{Allocation, ExecutionWithProgram, ProgramExecution};
pub use filters::{ExecutionFilter, ExecutionOrder, Limit, ProgramFilter};
pub use policy::CapacityPolicy;
pub use program::Program;
pub use requests::{ExecutionPatch, NewExecution, NewProgram, ProgramPatch};
pub use status::{ExecutionStatus, ProgramType, MAX_SHOWN};

//! Core library for the Lineup program scheduler.
//!
//! This crate manages programs, their scheduled executions and the featured
//! "upcoming" list: at most [`MAX_SHOWN`] executions hold a distinct show
//! slot in `1..=MAX_SHOWN`, and that bound holds under concurrent allocation.
//!
//! # Layers
//!
//! - **Models** ([`models`]): plain data, requests, filters and the capacity
//!   policy
//! - **Persistence** ([`db`]): the synchronous SQLite gateway; slot changes
//!   run inside `BEGIN IMMEDIATE` transactions
//! - **Facade** ([`lineup`]): the async [`Lineup`] API taking [`params`]
//! - **Display** ([`display`]): markdown formatting of results for the CLI
//!
//! Operations never print or notify. They return data or a [`LineupError`],
//! and the caller decides how to present it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lineup_core::{
//!     params::{CreateProgram, Id, ListUpcoming},
//!     LineupBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let lineup = LineupBuilder::new()
//!     .with_database_path(Some("lineup.db"))
//!     .build()
//!     .await?;
//!
//! let program = lineup
//!     .create_program(&CreateProgram {
//!         id: "Morning_Study-2025-1".to_string(),
//!         title: "Morning Study".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let execution = lineup.derive_execution(&Id { id: program.id }).await?;
//! let allocation = lineup.allocate_slot(&Id { id: execution.id }).await?;
//! println!("{allocation}");
//!
//! println!("{}", lineup.list_upcoming_public(&ListUpcoming::default()).await?);
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod lineup;
pub mod models;
pub mod params;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, Executions, OperationStatus, Programs, UpcomingList, UpdateResult,
};
pub use error::{ErrorKind, LineupError, Result};
pub use lineup::{Lineup, LineupBuilder};
pub use models::{
    Allocation, CapacityPolicy, ExecutionFilter, ExecutionPatch, ExecutionStatus,
    ExecutionWithProgram, Limit, Program, ProgramExecution, ProgramType, MAX_SHOWN,
};

//! Display formatting wrappers and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! the wrappers here add collection and operation-outcome formatting. All
//! output is markdown, rendered by the CLI's terminal renderer.
//!
//! - [`collections`]: `Programs`, `Executions`, `UpcomingList`
//! - [`results`]: `CreateResult`, `UpdateResult`, `DeleteResult`
//! - [`status`]: `OperationStatus`
//! - [`datetime`]: timestamp formatting

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Executions, Programs, UpcomingList};
pub use datetime::{LocalDateTime, ScheduledDate};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;

//! Status and type enumerations for programs and executions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Largest number of executions that may be featured at once.
pub const MAX_SHOWN: u8 = 3;

/// Type-safe enumeration of execution statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    /// Scheduled and not yet held
    #[default]
    Upcoming,

    /// Already held
    Done,

    /// Called off
    Canceled,
}

impl FromStr for ExecutionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upcoming" => Ok(ExecutionStatus::Upcoming),
            "done" => Ok(ExecutionStatus::Done),
            "canceled" | "cancelled" => Ok(ExecutionStatus::Canceled),
            _ => Err(format!("Invalid execution status: {s}")),
        }
    }
}

impl ExecutionStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionStatus::Upcoming => "upcoming",
            ExecutionStatus::Done => "done",
            ExecutionStatus::Canceled => "canceled",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// ```rust
    /// use lineup_core::models::ExecutionStatus;
    ///
    /// assert_eq!(ExecutionStatus::Done.with_icon(), "✓ Done");
    /// assert_eq!(ExecutionStatus::Upcoming.with_icon(), "○ Upcoming");
    /// assert_eq!(ExecutionStatus::Canceled.with_icon(), "✗ Canceled");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            ExecutionStatus::Done => "✓ Done",
            ExecutionStatus::Upcoming => "○ Upcoming",
            ExecutionStatus::Canceled => "✗ Canceled",
        }
    }
}

/// How often a program recurs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProgramType {
    #[default]
    Daily,
    Annually,
}

impl FromStr for ProgramType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(ProgramType::Daily),
            // Older records were written with a single "l"
            "annually" | "annualy" => Ok(ProgramType::Annually),
            _ => Err(format!("Invalid program type: {s}")),
        }
    }
}

impl ProgramType {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramType::Daily => "daily",
            ProgramType::Annually => "annually",
        }
    }
}

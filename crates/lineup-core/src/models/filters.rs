//! Filter types for querying programs and executions.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{ExecutionStatus, ProgramType, MAX_SHOWN};

/// Upper bound on the number of rows a query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Limit {
    /// No truncation
    All,
    /// At most this many rows
    Count(u32),
}

impl Limit {
    /// Value for a SQLite `LIMIT` clause, where a negative number means no
    /// limit.
    pub fn as_sql(&self) -> i64 {
        match self {
            Limit::All => -1,
            Limit::Count(n) => i64::from(*n),
        }
    }
}

impl Default for Limit {
    fn default() -> Self {
        Limit::Count(u32::from(MAX_SHOWN))
    }
}

impl FromStr for Limit {
    type Err = String;

    /// Parses `"all"` or a positive integer.
    ///
    /// ```rust
    /// use lineup_core::models::Limit;
    ///
    /// assert_eq!("all".parse::<Limit>(), Ok(Limit::All));
    /// assert_eq!("5".parse::<Limit>(), Ok(Limit::Count(5)));
    /// assert!("0".parse::<Limit>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Limit::All);
        }
        match s.parse::<u32>() {
            Ok(0) => Err("Limit must be greater than zero".to_string()),
            Ok(n) => Ok(Limit::Count(n)),
            Err(_) => Err(format!("Invalid limit: {s} (expected 'all' or a number)")),
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::All => write!(f, "all"),
            Limit::Count(n) => write!(f, "{n}"),
        }
    }
}

/// Sort order for execution queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionOrder {
    /// Insertion order
    #[default]
    Created,
    /// Ascending show slot; unslotted executions last, then by date
    ShowOrder,
}

/// Filter options for querying executions.
#[derive(Debug, Clone)]
pub struct ExecutionFilter {
    /// Only executions holding a show slot
    pub featured_only: bool,

    pub status: Option<ExecutionStatus>,

    /// Only executions with a date strictly after this instant. Executions
    /// without a date never match.
    pub date_after: Option<Timestamp>,

    pub program_id: Option<String>,

    pub order: ExecutionOrder,

    pub limit: Limit,
}

impl Default for ExecutionFilter {
    fn default() -> Self {
        Self {
            featured_only: false,
            status: None,
            date_after: None,
            program_id: None,
            order: ExecutionOrder::Created,
            limit: Limit::All,
        }
    }
}

impl ExecutionFilter {
    /// The featured list: slotted executions by ascending slot.
    pub fn featured(limit: Limit) -> Self {
        Self {
            featured_only: true,
            order: ExecutionOrder::ShowOrder,
            limit,
            ..Default::default()
        }
    }

    /// Upcoming executions dated after `now`, by ascending slot.
    pub fn upcoming_after(now: Timestamp, limit: Limit) -> Self {
        Self {
            status: Some(ExecutionStatus::Upcoming),
            date_after: Some(now),
            order: ExecutionOrder::ShowOrder,
            limit,
            ..Default::default()
        }
    }
}

/// Filter options for querying programs.
#[derive(Debug, Clone, Default)]
pub struct ProgramFilter {
    /// `None` matches every type
    pub program_type: Option<ProgramType>,

    pub limit: Option<Limit>,
}

//! Parameter structures for Lineup operations
//!
//! These are the interface-neutral inputs of the [`crate::Lineup`] facade.
//! Enumerations and dates arrive as strings, the way a form or a command line
//! delivers them, and are validated here into the typed requests of
//! [`crate::models`]. Interface layers wrap them with their own derives and
//! convert with `.into()`:
//!
//! ```ignore
//! #[derive(Args)]
//! pub struct CreateExecutionArgs {
//!     pub program_id: String,
//!     #[arg(long)]
//!     pub date: Option<String>,
//! }
//!
//! impl From<CreateExecutionArgs> for CreateExecution { ... }
//! ```

use jiff::{civil, tz::TimeZone, Timestamp};
use serde::{Deserialize, Serialize};

use crate::{
    error::{LineupError, Result},
    models::{
        ExecutionPatch, ExecutionStatus, Limit, NewExecution, NewProgram, ProgramFilter,
        ProgramPatch, ProgramType, MAX_SHOWN,
    },
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: String,
}

/// Parameters for bulk deletion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ids {
    pub ids: Vec<String>,
}

/// Parameters for creating a new program.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProgram {
    /// Caller-chosen unique id
    pub id: String,
    pub title: String,
    /// Rich-text body, stored as-is
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub description: String,
    /// Image path or URL
    #[serde(default)]
    pub image: String,
    /// "daily" or "annually"
    #[serde(rename = "type", default)]
    pub program_type: Option<String>,
    pub custom_url: Option<String>,
}

impl CreateProgram {
    /// Validates the parameters into an insert request.
    pub fn validate(&self) -> Result<NewProgram> {
        if self.title.trim().is_empty() {
            return Err(
                LineupError::invalid_input("title").with_reason("Program title must not be empty")
            );
        }

        Ok(NewProgram {
            id: self.id.clone(),
            title: self.title.clone(),
            content: self.content.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            program_type: parse_program_type(self.program_type.as_deref())?.unwrap_or_default(),
            custom_url: self.custom_url.clone(),
        })
    }
}

/// Parameters for patching a program. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProgram {
    pub id: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    #[serde(rename = "type")]
    pub program_type: Option<String>,
    pub custom_url: Option<String>,
    /// Removes the custom URL; wins over `custom_url`
    #[serde(default)]
    pub clear_custom_url: bool,
}

impl UpdateProgram {
    pub fn validate(&self) -> Result<ProgramPatch> {
        let custom_url = if self.clear_custom_url {
            Some(None)
        } else {
            self.custom_url.clone().map(Some)
        };

        Ok(ProgramPatch {
            title: self.title.clone(),
            content: self.content.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            program_type: parse_program_type(self.program_type.as_deref())?,
            custom_url,
        })
    }
}

/// Parameters for listing programs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPrograms {
    /// "all", "daily" or "annually"; absent means all
    #[serde(rename = "type")]
    pub program_type: Option<String>,
    /// Absent means no truncation
    pub limit: Option<Limit>,
}

impl ListPrograms {
    pub fn validate(&self) -> Result<ProgramFilter> {
        let program_type = match self.program_type.as_deref() {
            Some(t) if t.eq_ignore_ascii_case("all") => None,
            other => parse_program_type(other)?,
        };
        Ok(ProgramFilter {
            program_type,
            limit: self.limit,
        })
    }
}

/// Parameters for creating an execution under a program.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateExecution {
    pub program_id: String,
    pub title: String,
    pub image: Option<String>,
    /// RFC 3339 instant or local civil date/time; absent means undecided
    pub date: Option<String>,
    /// Defaults to "upcoming"
    pub status: Option<String>,
}

impl CreateExecution {
    pub fn validate(&self) -> Result<NewExecution> {
        if self.title.trim().is_empty() {
            return Err(LineupError::invalid_input("title")
                .with_reason("Upcoming program title must not be empty"));
        }

        Ok(NewExecution {
            title: self.title.clone(),
            image: self.image.clone(),
            date: self.date.as_deref().map(parse_date).transpose()?,
            status: parse_status(self.status.as_deref())?.unwrap_or_default(),
        })
    }
}

/// Parameters for patching an execution's editable fields.
///
/// The show slot is deliberately absent; it only changes through the slot
/// operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExecution {
    pub id: String,
    pub title: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub clear_image: bool,
    pub date: Option<String>,
    /// Marks the date as undecided again; wins over `date`
    #[serde(default)]
    pub clear_date: bool,
    pub status: Option<String>,
}

impl UpdateExecution {
    pub fn validate(&self) -> Result<ExecutionPatch> {
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(LineupError::invalid_input("title")
                .with_reason("Upcoming program title must not be empty"));
        }

        let image = if self.clear_image {
            Some(None)
        } else {
            self.image.clone().map(Some)
        };

        let date = if self.clear_date {
            Some(None)
        } else {
            self.date.as_deref().map(parse_date).transpose()?.map(Some)
        };

        Ok(ExecutionPatch {
            title: self.title.clone(),
            image,
            date,
            status: parse_status(self.status.as_deref())?,
            show_order: None,
        })
    }

    /// Human-readable list of the fields this update touches.
    pub fn changes(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(ref title) = self.title {
            changes.push(format!("Title: {title}"));
        }
        if self.clear_image {
            changes.push("Image: removed".to_string());
        } else if let Some(ref image) = self.image {
            changes.push(format!("Image: {image}"));
        }
        if self.clear_date {
            changes.push("Date: Coming Soon".to_string());
        } else if let Some(ref date) = self.date {
            changes.push(format!("Date: {date}"));
        }
        if let Some(ref status) = self.status {
            changes.push(format!("Status: {status}"));
        }
        changes
    }
}

/// Parameters for moving an execution to a new status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransitionStatus {
    pub id: String,
    pub status: String,
}

impl TransitionStatus {
    pub fn validate(&self) -> Result<ExecutionStatus> {
        self.status
            .parse()
            .map_err(|e: String| LineupError::invalid_input("status").with_reason(e))
    }
}

/// Parameters for exchanging the show slots of two executions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwapSlots {
    pub first_id: String,
    pub second_id: String,
}

/// Parameters for rewriting the featured list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReorderFeatured {
    /// Execution ids in slot order, at most `MAX_SHOWN`
    pub ids: Vec<String>,
}

/// Parameters for listing the featured executions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFeatured {
    pub limit: Limit,
}

impl Default for ListFeatured {
    fn default() -> Self {
        Self {
            limit: Limit::Count(u32::from(MAX_SHOWN)),
        }
    }
}

/// Parameters for the public upcoming list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListUpcoming {
    /// Defaults to three entries
    #[serde(default)]
    pub limit: Limit,
}

fn parse_program_type(value: Option<&str>) -> Result<Option<ProgramType>> {
    value
        .map(|s| {
            s.parse()
                .map_err(|e: String| LineupError::invalid_input("type").with_reason(e))
        })
        .transpose()
}

fn parse_status(value: Option<&str>) -> Result<Option<ExecutionStatus>> {
    value
        .map(|s| {
            s.parse()
                .map_err(|e: String| LineupError::invalid_input("status").with_reason(e))
        })
        .transpose()
}

/// Parses an execution date.
///
/// Accepts an RFC 3339 instant (`2025-03-01T18:00:00Z`), or a civil
/// date-time / date (`2025-03-01T18:00`, `2025-03-01`) read in the system
/// time zone.
pub fn parse_date(value: &str) -> Result<Timestamp> {
    if let Ok(ts) = value.parse::<Timestamp>() {
        return Ok(ts);
    }

    let invalid = |e: jiff::Error| {
        LineupError::invalid_input("date").with_reason(format!("Invalid date '{value}': {e}"))
    };

    let civil = match value.parse::<civil::DateTime>() {
        Ok(dt) => dt,
        Err(_) => value
            .parse::<civil::Date>()
            .map_err(invalid)?
            .to_datetime(civil::Time::midnight()),
    };

    civil
        .to_zoned(TimeZone::system())
        .map(|zoned| zoned.timestamp())
        .map_err(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_date_rfc3339() {
        let ts = parse_date("2025-03-01T18:00:00Z").unwrap();
        assert_eq!(ts.as_second(), 1_740_852_000);
    }

    #[test]
    fn test_parse_date_civil_forms() {
        assert!(parse_date("2025-03-01T18:00").is_ok());
        assert!(parse_date("2025-03-01").is_ok());
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        let err = parse_date("next tuesday").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_create_execution_defaults_to_upcoming() {
        let params = CreateExecution {
            program_id: "p".to_string(),
            title: "Night Walk".to_string(),
            ..Default::default()
        };
        let new = params.validate().unwrap();
        assert_eq!(new.status, ExecutionStatus::Upcoming);
        assert!(new.date.is_none());
    }

    #[test]
    fn test_create_execution_rejects_blank_title() {
        let params = CreateExecution {
            program_id: "p".to_string(),
            title: "  ".to_string(),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_update_execution_clear_date_wins() {
        let params = UpdateExecution {
            id: "e".to_string(),
            date: Some("2025-03-01T18:00:00Z".to_string()),
            clear_date: true,
            ..Default::default()
        };
        let patch = params.validate().unwrap();
        assert_eq!(patch.date, Some(None));
        assert_eq!(patch.show_order, None);
        assert_eq!(params.changes(), vec!["Date: Coming Soon".to_string()]);
    }

    #[test]
    fn test_update_execution_bad_status() {
        let params = UpdateExecution {
            id: "e".to_string(),
            status: Some("postponed".to_string()),
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert!(matches!(err, LineupError::InvalidInput { ref field, .. } if field == "status"));
    }

    #[test]
    fn test_list_programs_all_type() {
        let params = ListPrograms {
            program_type: Some("ALL".to_string()),
            limit: Some(Limit::Count(3)),
        };
        let filter = params.validate().unwrap();
        assert!(filter.program_type.is_none());

        let params = ListPrograms {
            program_type: Some("annualy".to_string()),
            limit: None,
        };
        assert_eq!(
            params.validate().unwrap().program_type,
            Some(ProgramType::Annually)
        );
    }

    #[test]
    fn test_update_program_clear_custom_url() {
        let params = UpdateProgram {
            id: "p".to_string(),
            custom_url: Some("ignored".to_string()),
            clear_custom_url: true,
            ..Default::default()
        };
        assert_eq!(params.validate().unwrap().custom_url, Some(None));
    }

    #[test]
    fn test_list_defaults() {
        assert_eq!(ListFeatured::default().limit, Limit::Count(3));
        assert_eq!(ListUpcoming::default().limit, Limit::Count(3));
    }
}

//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper prints a fixed message when empty so list commands never
//! produce blank output.

use std::{fmt, ops::Index};

use serde::Serialize;

use crate::models::{ExecutionWithProgram, Program, ProgramExecution};

/// Newtype wrapper for displaying a list of programs in compact form.
///
/// ```rust
/// use lineup_core::{display::Programs, models::{Program, ProgramType}};
/// use jiff::Timestamp;
///
/// let program = Program {
///     id: "Morning_Study-2024-1".to_string(),
///     title: "Morning Study".to_string(),
///     content: "<p>Daily study</p>".to_string(),
///     description: "Daily study".to_string(),
///     image: String::new(),
///     program_type: ProgramType::Daily,
///     custom_url: None,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
///     executions: vec![],
/// };
/// let output = format!("{}", Programs(vec![program]));
/// assert!(output.contains("## Morning Study"));
/// ```
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct Programs(pub Vec<Program>);

impl Programs {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Program> {
        self.0.iter()
    }
}

impl Index<usize> for Programs {
    type Output = Program;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Programs {
    type Item = Program;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Programs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No programs found.");
        }
        for program in &self.0 {
            writeln!(f, "## {}", program.title)?;
            writeln!(f)?;
            writeln!(f, "- ID: {}", program.id)?;
            writeln!(f, "- Type: {}", program.program_type)?;
            if let Some(url) = &program.custom_url {
                writeln!(f, "- Custom URL: {url}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying a list of executions.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct Executions(pub Vec<ProgramExecution>);

impl Executions {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&ProgramExecution> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProgramExecution> {
        self.0.iter()
    }

    /// Show slots in list order, `None` for unslotted entries.
    pub fn show_orders(&self) -> Vec<Option<u8>> {
        self.0.iter().map(|e| e.show_order).collect()
    }

    /// Execution ids in list order.
    pub fn ids(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.id.as_str()).collect()
    }
}

impl Index<usize> for Executions {
    type Output = ProgramExecution;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Executions {
    type Item = ProgramExecution;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Executions {
    type Item = &'a ProgramExecution;
    type IntoIter = std::slice::Iter<'a, ProgramExecution>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Executions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No upcoming programs found.")
        } else {
            for execution in &self.0 {
                write!(f, "{execution}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for the public upcoming list.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct UpcomingList(pub Vec<ExecutionWithProgram>);

impl UpcomingList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExecutionWithProgram> {
        self.0.iter()
    }
}

impl fmt::Display for UpcomingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "Nothing scheduled yet.");
        }
        for entry in &self.0 {
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::ExecutionStatus;

    fn create_test_execution(id: &str, show_order: Option<u8>) -> ProgramExecution {
        ProgramExecution {
            id: id.to_string(),
            program_id: "Quran_Study-2024-x".to_string(),
            title: format!("Execution {id}"),
            image: None,
            date: None,
            status: ExecutionStatus::Upcoming,
            show_order,
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1640995200).unwrap(),
        }
    }

    #[test]
    fn test_executions_display_empty() {
        let output = format!("{}", Executions(vec![]));
        assert_eq!(output, "No upcoming programs found.\n");
    }

    #[test]
    fn test_executions_display_multiple() {
        let executions = Executions(vec![
            create_test_execution("a", Some(1)),
            create_test_execution("b", None),
        ]);
        let output = format!("{executions}");

        assert!(output.contains("### Execution a (○ Upcoming)"));
        assert!(output.contains("- Show order: 1"));
        assert!(output.contains("- Show order: not shown"));
        assert!(output.contains("Coming Soon"));
    }

    #[test]
    fn test_executions_accessors() {
        let executions = Executions(vec![
            create_test_execution("a", Some(2)),
            create_test_execution("b", None),
        ]);
        assert_eq!(executions.len(), 2);
        assert_eq!(executions.ids(), vec!["a", "b"]);
        assert_eq!(executions.show_orders(), vec![Some(2), None]);
        assert_eq!(executions[1].id, "b");
    }

    #[test]
    fn test_programs_display_empty() {
        assert_eq!(format!("{}", Programs(vec![])), "No programs found.\n");
    }

    #[test]
    fn test_upcoming_list_empty() {
        assert_eq!(format!("{}", UpcomingList(vec![])), "Nothing scheduled yet.\n");
    }

    #[test]
    fn test_executions_serialize_as_array() {
        let json = serde_json::to_string(&Executions(vec![create_test_execution("a", Some(1))]))
            .expect("serialize");
        assert!(json.starts_with('['));
        assert!(json.contains("\"show_order\":1"));
    }
}

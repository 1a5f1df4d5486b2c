//! Display implementations for domain models.
//!
//! All models render as markdown so the CLI can pass them straight to the
//! terminal renderer.

use std::fmt;

use super::datetime::{LocalDateTime, ScheduledDate};
use crate::models::{
    CapacityPolicy, ExecutionStatus, ExecutionWithProgram, Program, ProgramExecution, ProgramType,
};

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ProgramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for CapacityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Type: {}", self.program_type)?;
        if let Some(url) = &self.custom_url {
            writeln!(f, "- Custom URL: {url}")?;
        }
        if !self.image.is_empty() {
            writeln!(f, "- Image: {}", self.image)?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }

        if !self.executions.is_empty() {
            writeln!(f, "\n## Executions")?;
            writeln!(f)?;
            for execution in &self.executions {
                write!(f, "{execution}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for ProgramExecution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {} ({})", self.title, self.status.with_icon())?;
        writeln!(f)?;
        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Program: {}", self.program_id)?;
        writeln!(f, "- Date: {}", ScheduledDate(self.date.as_ref()))?;
        match self.show_order {
            Some(order) => writeln!(f, "- Show order: {order}")?,
            None => writeln!(f, "- Show order: not shown")?,
        }
        writeln!(f)
    }
}

impl fmt::Display for ExecutionWithProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let execution = &self.execution;
        writeln!(f, "### {}", execution.title)?;
        writeln!(f)?;
        writeln!(f, "- Date: {}", ScheduledDate(execution.date.as_ref()))?;
        writeln!(f, "- Program: {} ({})", self.program.title, self.program.program_type)?;
        if let Some(url) = &self.program.custom_url {
            writeln!(f, "- Link: {url}")?;
        }
        if !self.program.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.program.description)?;
        }
        writeln!(f)
    }
}

//! Program model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{ProgramExecution, ProgramType};

/// A recurring or annual activity that executions are scheduled from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Program {
    /// Caller-supplied unique identifier
    pub id: String,

    pub title: String,

    /// Rich text serialized as markup
    pub content: String,

    /// Plain-text rendition of the content
    pub description: String,

    /// Image path or URL
    pub image: String,

    #[serde(rename = "type")]
    pub program_type: ProgramType,

    /// Optional slug overriding the default public URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_url: Option<String>,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,

    /// Executions of this program, loaded only by single-program lookups
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub executions: Vec<ProgramExecution>,
}

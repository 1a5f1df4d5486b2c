//! Status and confirmation message types for operation feedback.

use std::fmt;

use crate::error::{ErrorKind, LineupError};

/// A success or failure message for the presentation layer to show.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
        }
    }
}

impl From<&LineupError> for OperationStatus {
    /// Failure message for an error; transient store errors get a retry hint.
    fn from(err: &LineupError) -> Self {
        match err.kind() {
            ErrorKind::TransientStore => {
                Self::failure(format!("{err}. Please try again in a moment."))
            }
            _ => Self::failure(err.to_string()),
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}",
            if self.success { "Success:" } else { "Error:" },
            self.message
        )
    }
}

//! Error types for the lineup library.

use std::fmt;
use std::path::PathBuf;

use rusqlite::ErrorCode;
use thiserror::Error;

/// Comprehensive error type for all lineup operations.
#[derive(Error, Debug)]
pub enum LineupError {
    /// Database query errors that are neither constraint nor contention
    /// failures
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Store-level uniqueness, check or foreign-key failure
    #[error("Constraint violation: {message}")]
    ConstraintViolation {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// The store was busy, locked or unreachable
    #[error("Store temporarily unavailable: {message}")]
    TransientStore {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Program not found for the given ID
    #[error("Program with id ({id}) not found")]
    ProgramNotFound { id: String },
    /// Execution not found for the given ID
    #[error("Upcoming program with id ({id}) not found")]
    ExecutionNotFound { id: String },
    /// The store holds no programs at all
    #[error("Programs do not exist")]
    NoPrograms,
    /// The store holds no executions at all
    #[error("Upcoming programs do not exist")]
    NoExecutions,
    /// Every featured slot is taken
    #[error("Maximum upcoming program ({max} featured)")]
    CapacityExceeded { max: u8 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Coarse classification of a [`LineupError`], used by presentation code to
/// pick a message style without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    CapacityExceeded,
    ConstraintViolation,
    TransientStore,
    InvalidInput,
    Internal,
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source, classifying the SQLite error
    /// code into constraint, transient or generic failures.
    pub fn with_source(self, source: rusqlite::Error) -> LineupError {
        let code = match &source {
            rusqlite::Error::SqliteFailure(err, _) => Some(err.code),
            _ => None,
        };

        match code {
            Some(ErrorCode::ConstraintViolation) => LineupError::ConstraintViolation {
                message: self.message,
                source,
            },
            Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked | ErrorCode::CannotOpen) => {
                LineupError::TransientStore {
                    message: self.message,
                    source,
                }
            }
            _ => LineupError::Database {
                message: self.message,
                source,
            },
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> LineupError {
        LineupError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl LineupError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Returns the coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ProgramNotFound { .. }
            | Self::ExecutionNotFound { .. }
            | Self::NoPrograms
            | Self::NoExecutions => ErrorKind::NotFound,
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            Self::ConstraintViolation { .. } => ErrorKind::ConstraintViolation,
            Self::TransientStore { .. } => ErrorKind::TransientStore,
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::Database { .. }
            | Self::FileSystem { .. }
            | Self::XdgDirectory(_)
            | Self::Configuration { .. } => ErrorKind::Internal,
        }
    }

    /// True for any of the not-found variants.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// Extension trait for Result to provide concise error mapping with
/// anyhow-style context.
pub trait ResultExt<T, E> {
    /// Add context to any error type, converting to LineupError.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| LineupError::Configuration {
            message: format!("{}: {}", context, e),
        })
    }
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| LineupError::database(message).with_source(e))
    }
}

/// Result type alias for lineup operations
pub type Result<T> = std::result::Result<T, LineupError>;

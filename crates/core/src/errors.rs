//! Core error types for the Willpower service.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the service.
///
/// Database-specific errors are wrapped in string form to keep this type
/// database-agnostic.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Field '{field}' must be between {min} and {max} characters")]
    Length {
        field: &'static str,
        min: usize,
        max: usize,
    },

    #[error("'{value}' is not a valid {field}")]
    UnknownVariant { field: &'static str, value: String },

    #[error("Failed to parse date: {0}")]
    DateParse(#[from] ChronoParseError),
}

/// The small taxonomy every error is reported under at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::NotFound(_) | Error::Database(DatabaseError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Error::Conflict(_) | Error::Database(DatabaseError::UniqueViolation(_)) => {
                ErrorKind::Conflict
            }
            Error::Database(_) | Error::Unexpected(_) => ErrorKind::Internal,
        }
    }

    /// True when the storage layer rejected a write because of a unique index.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Error::Database(DatabaseError::UniqueViolation(_)))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateParse(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_fold_into_the_boundary_taxonomy() {
        let not_found = Error::Database(DatabaseError::NotFound("row".into()));
        assert_eq!(not_found.kind(), ErrorKind::NotFound);

        let dup = Error::Database(DatabaseError::UniqueViolation("idx".into()));
        assert_eq!(dup.kind(), ErrorKind::Conflict);
        assert!(dup.is_unique_violation());

        let down = Error::Database(DatabaseError::ConnectionFailed("gone".into()));
        assert_eq!(down.kind(), ErrorKind::Internal);
        assert!(!down.is_unique_violation());
    }

    #[test]
    fn validation_errors_keep_their_kind() {
        let err: Error = ValidationError::UnknownVariant {
            field: "check-in status",
            value: "done".into(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            err.to_string(),
            "Input validation failed: 'done' is not a valid check-in status"
        );
    }
}

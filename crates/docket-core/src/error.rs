//! Error types for the tracker library.

use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of a [`TrackerError`].
///
/// Presentation layers map this to exit codes or protocol errors instead of
/// matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input failed length or emptiness rules.
    Validation,
    /// A project name collides with an existing one.
    DuplicateName,
    /// A project or task ceiling was reached.
    CapacityExceeded,
    /// A status outside the allowed set was supplied.
    InvalidStatus,
    /// A deadline could not be parsed.
    InvalidDeadline,
    /// The referenced project or task does not exist.
    NotFound,
    /// Storage, filesystem or serialization failure.
    Storage,
    /// Invalid configuration.
    Configuration,
}

/// Comprehensive error type for all tracker operations.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Input failed length or emptiness rules
    #[error("Invalid input for field '{field}': {reason}")]
    Validation { field: String, reason: String },
    /// A project with an equal name already exists
    #[error("A project named '{name}' already exists")]
    DuplicateName { name: String },
    /// Project or task ceiling reached
    #[error("Maximum number of {resource} reached ({limit})")]
    CapacityExceeded { resource: &'static str, limit: u64 },
    /// Status outside the configured set
    #[error("Invalid status '{status}'. Status must be one of: {allowed}")]
    InvalidStatus { status: String, allowed: String },
    /// Unparseable deadline
    #[error("Invalid deadline '{input}'. Use YYYY-MM-DD (e.g., 2025-12-01) or an ISO-8601 timestamp")]
    InvalidDeadline { input: String },
    /// Project not found for the given ID
    #[error("Project with ID {id} not found")]
    ProjectNotFound { id: u64 },
    /// Task not found for the given ID
    #[error("Task with ID {id} not found")]
    TaskNotFound { id: u64 },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Backend failures outside SQLite, such as a poisoned lock
    #[error("Storage error: {message}")]
    Storage { message: String },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
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

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> TrackerError {
        TrackerError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct ValidationBuilder {
    field: String,
}

impl ValidationBuilder {
    /// Create a new validation error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> TrackerError {
        TrackerError::Validation {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl TrackerError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn validation(field: impl Into<String>) -> ValidationBuilder {
        ValidationBuilder::new(field)
    }

    /// Creates a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Classifies the error for the presentation layer.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::DuplicateName { .. } => ErrorKind::DuplicateName,
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            Self::InvalidStatus { .. } => ErrorKind::InvalidStatus,
            Self::InvalidDeadline { .. } => ErrorKind::InvalidDeadline,
            Self::ProjectNotFound { .. } | Self::TaskNotFound { .. } => ErrorKind::NotFound,
            Self::Database { .. }
            | Self::FileSystem { .. }
            | Self::Storage { .. }
            | Self::XdgDirectory(_)
            | Self::Serialization { .. } => ErrorKind::Storage,
            Self::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    /// True when the database rejected a write because of a UNIQUE index.
    pub(crate) fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Self::Database {
                source: rusqlite::Error::SqliteFailure(err, _),
                ..
            } if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TrackerError::database(message).with_source(e))
    }
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_variants_share_kind() {
        assert_eq!(
            TrackerError::ProjectNotFound { id: 1 }.kind(),
            ErrorKind::NotFound
        );
        assert_eq!(TrackerError::TaskNotFound { id: 1 }.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_validation_builder() {
        let err = TrackerError::validation("name").with_reason("must not be empty");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'name': must not be empty"
        );
    }

    #[test]
    fn test_capacity_message() {
        let err = TrackerError::CapacityExceeded {
            resource: "projects",
            limit: 5,
        };
        assert_eq!(err.to_string(), "Maximum number of projects reached (5)");
    }
}

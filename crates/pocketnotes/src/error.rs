//! Error types for pocketnotes.
//!
//! This module defines the crate-wide error type along with the
//! [`ValidationError`] classification reported back to the view layer when
//! user input fails a rule.

use std::path::PathBuf;
use thiserror::Error;

/// A user-input rule violation.
///
/// Validation errors are recoverable by re-input and never mutate state. The
/// display text is the message shown next to the offending form field.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The group name is empty or whitespace only.
    #[error("Group name is required")]
    NameRequired,

    /// The trimmed group name is shorter than the minimum length.
    #[error("Group name must be at least {min} characters")]
    NameTooShort {
        /// Minimum number of characters.
        min: usize,
    },

    /// The trimmed group name exceeds the maximum length.
    #[error("Group name must be at most {max} characters")]
    NameTooLong {
        /// Maximum number of characters.
        max: usize,
    },

    /// Another group already uses this name (case-insensitive).
    #[error("Group name already exists")]
    DuplicateName,

    /// The note text is empty or whitespace only.
    #[error("Note cannot be empty")]
    EmptyNote,
}

impl ValidationError {
    /// The form field this error is scoped to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyNote => "note",
            _ => "group_name",
        }
    }
}

/// The main error type for pocketnotes operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Input Errors ===
    /// User input failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No group with the given id exists in the collection.
    #[error("group not found: {id}")]
    GroupNotFound {
        /// The id that was looked up.
        id: i64,
    },

    /// No group has the given name.
    #[error("no group named '{name}'")]
    GroupNameNotFound {
        /// The name that was looked up.
        name: String,
    },

    /// Every id up to `i64::MAX` is already taken.
    #[error("no ids left to issue after {last}")]
    IdsExhausted {
        /// The largest id issued or loaded so far.
        last: i64,
    },

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for pocketnotes operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a group-not-found error.
    #[must_use]
    pub fn group_not_found(id: impl Into<i64>) -> Self {
        Self::GroupNotFound { id: id.into() }
    }

    /// The validation classification, if this is a validation error.
    #[must_use]
    pub fn as_validation(&self) -> Option<ValidationError> {
        match self {
            Self::Validation(v) => Some(*v),
            _ => None,
        }
    }

    /// Check if this error is a user-input validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

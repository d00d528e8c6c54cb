//! Error types for the marketplace library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all marketplace operations.
///
/// The user-facing variants fall into three groups: validation failures
/// ([`MarketError::InvalidInput`]), authorization failures
/// ([`MarketError::AccessDenied`], [`MarketError::NotLoggedIn`]) and
/// referential conflicts ([`MarketError::Conflict`]). Everything else is
/// infrastructure.
#[derive(Error, Debug)]
pub enum MarketError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Entity not found for the given key
    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },
    /// Caller's role or ownership does not permit the action
    #[error("Access denied: {reason}")]
    AccessDenied { reason: String },
    /// No session is active
    #[error("Not logged in")]
    NotLoggedIn,
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Operation blocked by dependent rows, an overlapping booking or a
    /// duplicate key
    #[error("Conflict: {reason}")]
    Conflict { reason: String },
    /// Renter has not joined the reward program
    #[error("{email} is not enrolled in the reward program")]
    NotEnrolled { email: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Malformed session record
    #[error("Session error: {0}")]
    Session(String),
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
    pub fn with_source(self, source: rusqlite::Error) -> MarketError {
        MarketError::Database {
            message: self.message,
            source,
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
    pub fn with_reason(self, reason: impl Into<String>) -> MarketError {
        MarketError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl MarketError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn access_denied(reason: impl Into<String>) -> Self {
        Self::AccessDenied {
            reason: reason.into(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    /// True for failures caused by what the caller asked for, as opposed to
    /// infrastructure failures. Front ends show these messages verbatim.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::AccessDenied { .. }
                | Self::NotLoggedIn
                | Self::InvalidInput { .. }
                | Self::Conflict { .. }
                | Self::NotEnrolled { .. }
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
        self.map_err(|e| MarketError::database(message).with_source(e))
    }
}

/// Result type alias for marketplace operations
pub type Result<T> = std::result::Result<T, MarketError>;

use std::fmt::Display;
use thiserror::Error;

/// Quote fields subject to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Text,
    Author,
    Category,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Text => "text",
            Field::Author => "author",
            Field::Category => "category",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The way a field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationErrorKind {
    #[error("cannot be empty")]
    EmptyField,
    #[error("must be at least {min} characters long, got {actual}")]
    TooShort { min: usize, actual: usize },
    #[error("cannot exceed {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
    #[error("can only contain letters, numbers, spaces, and hyphens")]
    InvalidCharacters,
}

/// Rejected quote input. Never produced after storage has been touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {kind}")]
pub struct ValidationError {
    pub field: Field,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(field: Field, kind: ValidationErrorKind) -> Self {
        Self { field, kind }
    }
}

/// Errors raised by repository implementations.
///
/// Every variant carries a message prefixed with the operation that failed,
/// so callers never see a bare driver error.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Errors surfaced by the quote service.
#[derive(Debug, Clone, Error)]
pub enum QuoteError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Database(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for QuoteError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::NotFound(message) => Self::NotFound(message),
            StorageError::InvalidData(message) => Self::Internal(message),
            other => Self::Database(other.to_string()),
        }
    }
}

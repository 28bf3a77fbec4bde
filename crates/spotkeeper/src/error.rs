//! Error types for spot store operations

use thiserror::Error;

/// Rejected user input. The store is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A spot with this identifier already exists
    #[error("Spot {id} already exists")]
    DuplicateId {
        /// The conflicting identifier
        id: String,
    },

    /// A required field was empty
    #[error("Missing required field: {field}")]
    MissingField {
        /// Form field name
        field: &'static str,
    },

    /// A date field could not be parsed as `YYYY-MM-DD`
    #[error("Invalid date in {field}: {value:?}")]
    InvalidDate {
        /// Form field name
        field: &'static str,
        /// The raw input
        value: String,
    },

    /// The lease would end before it starts
    #[error("End date {end} is before start date {start}")]
    EndBeforeStart {
        /// Lease start
        start: chrono::NaiveDate,
        /// Lease end
        end: chrono::NaiveDate,
    },
}

/// Failure reading or writing the persistence slot.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Underlying I/O failure
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document could not be encoded or decoded
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Any other backend failure
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Main error type for spot store operations
#[derive(Error, Debug)]
pub enum SpotError {
    /// Input rejected before any mutation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No spot with this identifier
    #[error("Spot not found: {id}")]
    NotFound {
        /// The identifier that was looked up
        id: String,
    },

    /// Storage failed; in-memory state was rolled back
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl SpotError {
    /// Build a `NotFound` error for `id`.
    pub fn not_found(id: impl Into<String>) -> Self {
        SpotError::NotFound { id: id.into() }
    }

    /// Whether this error came from input validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, SpotError::Validation(_))
    }
}

/// Result type alias for spot store operations
pub type Result<T> = std::result::Result<T, SpotError>;

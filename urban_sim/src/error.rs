// Error type for the city crate.
//
// Recoverable failures only: bounded lists that are full, allocation
// failure while growing them, bad configuration, and malformed interchange
// data on import. Caller contract violations (a zero divisor, a grid index
// outside the grid) are assertions, not variants here.

use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UrbanError {
    #[error("{list} is full (capacity {capacity})")]
    CapacityExceeded { list: &'static str, capacity: usize },

    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("missing field `{field}` in {context}")]
    MissingField {
        field: &'static str,
        context: String,
    },

    #[error("unexpected {what} in {context}: {found}")]
    Malformed {
        what: &'static str,
        context: String,
        found: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, UrbanError>;

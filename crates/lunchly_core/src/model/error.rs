//! Assignment-time validation failures.

use crate::model::customer::CustomerId;
use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

/// Coarse failure category a caller can map to its own surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value is out of range or malformed.
    InvalidArgument,
    /// A write-once field was asked to change.
    StateConflict,
}

/// Raised synchronously by entity constructors and setters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("must have at least one guest, got {0}")]
    InvalidNumGuests(i64),
    #[error("not a valid start time: `{0}`")]
    InvalidStartAt(String),
    #[error("cannot change customer id from {current} to {attempted}")]
    CustomerIdConflict {
        current: CustomerId,
        attempted: CustomerId,
    },
}

impl ModelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidNumGuests(_) | Self::InvalidStartAt(_) => ErrorKind::InvalidArgument,
            Self::CustomerIdConflict { .. } => ErrorKind::StateConflict,
        }
    }
}

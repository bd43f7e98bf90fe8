// src/paragraph/errors.rs

use thiserror::Error;

/// Result type for paragraph splitting
pub type SegmentResult<T> = Result<T, SegmentError>;

/// Request validation failures. Both are raised before any text is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    #[error("{0}")]
    NullArgument(&'static str),

    #[error("{0}")]
    InvalidArgument(&'static str),
}

impl SegmentError {
    /// Stable label used in logs, metrics and error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            SegmentError::NullArgument(_) => "null_argument",
            SegmentError::InvalidArgument(_) => "invalid_argument",
        }
    }
}

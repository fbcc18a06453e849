//! Errors for cell operations

use thiserror::Error;

/// Errors from cell operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LatestError {
    /// The cell was stopped, or its coordination task is gone
    #[error("Cell stopped")]
    Stopped,
}

/// Result of a cell operation
pub type LatestResult<T> = Result<T, LatestError>;

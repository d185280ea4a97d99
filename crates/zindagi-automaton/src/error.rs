//! Error types for the automaton system.

use thiserror::Error;

/// Result type alias for automaton operations.
pub type AutomatonResult<T> = Result<T, AutomatonError>;

/// Errors that can occur during automaton operations.
///
/// Malformed rule strings and ragged grids are deliberately absent: both are
/// tolerated rather than rejected.
#[derive(Debug, Error)]
pub enum AutomatonError {
    /// An argument did not satisfy the operation's precondition.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A token from a textual initial state could not be read as a marker.
    #[error("invalid cell {token:?} at row {row}, column {column}")]
    InvalidCell {
        token: String,
        row: usize,
        column: usize,
    },

    /// The algorithm tag names no known implementation.
    #[error("unknown algorithm: {name:?}")]
    UnknownAlgorithm { name: String },
}

impl AutomatonError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

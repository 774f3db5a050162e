use thiserror::Error;

use crate::State;

/// Errors returned when a registry or stopwatch call violates its preconditions.
///
/// These describe usage mistakes, not transient failures. A call that returns an error has not
/// modified the registry or stopwatch it was made on.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The caller supplied an identifier that cannot be used to create a stopwatch.
    #[error("invalid stopwatch id '{id}': {problem}")]
    InvalidArgument {
        /// The identifier that was rejected.
        id: String,

        /// A human-readable description of the problem.
        problem: String,
    },

    /// The operation is not permitted in the current state of the stopwatch.
    #[error("cannot {operation} stopwatch '{id}' while it is {state}")]
    InvalidState {
        /// The identifier of the stopwatch the operation was attempted on.
        id: String,

        /// The name of the rejected operation.
        operation: &'static str,

        /// The state the stopwatch was in when the operation was attempted.
        state: State,
    },
}

impl Error {
    pub(crate) fn invalid_argument(id: impl Into<String>, problem: impl Into<String>) -> Self {
        Self::InvalidArgument {
            id: id.into(),
            problem: problem.into(),
        }
    }

    pub(crate) fn invalid_state(id: &str, operation: &'static str, state: State) -> Self {
        Self::InvalidState {
            id: id.to_owned(),
            operation,
            state,
        }
    }
}

/// A specialized `Result` type for stopwatch operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

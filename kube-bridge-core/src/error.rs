//! Failures a bridged call can resolve to
use std::time::Duration;

use thiserror::Error;

/// A bridged call was still unresolved when its deadline passed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("call to {operation} timed out after {elapsed:?}")]
pub struct CallTimeoutError {
    /// Name of the operation that stalled
    pub operation: String,
    /// Time between starting the call and giving up on it
    pub elapsed: Duration,
}

/// The failure side of a [`PendingCall`](crate::PendingCall)
///
/// Errors produced by the operation itself are carried as-is in [`CallError::Operation`].
#[derive(Error, Debug)]
pub enum CallError<E> {
    /// The deadline passed before the operation completed
    #[error(transparent)]
    Timeout(#[from] CallTimeoutError),

    /// The operation failed, either while being invoked or through its callback
    #[error(transparent)]
    Operation(E),

    /// The operation panicked before completing
    #[error("operation {operation} panicked: {message}")]
    Panicked {
        /// Name of the operation that panicked
        operation: String,
        /// The panic payload, when it was a string
        message: String,
    },
}

impl<E> CallError<E> {
    /// Whether this failure came from the deadline rather than the operation
    pub fn is_timeout(&self) -> bool {
        matches!(self, CallError::Timeout(_))
    }

    /// The operation's own error, if that is what failed the call
    pub fn into_operation(self) -> Option<E> {
        match self {
            CallError::Operation(err) => Some(err),
            CallError::Timeout(_) | CallError::Panicked { .. } => None,
        }
    }
}

//! Error types for lease operations.

use std::error::Error;
use std::fmt;

/// Errors from mutating operations on a lease.
///
/// There is a single kind: using a lease after it has been closed. This is
/// a programmer-error signal, not a recoverable runtime condition — callers
/// should acquire a new lease rather than retry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeaseError {
    /// The lease has been closed; all mutating operations on it fail.
    Closed,
}

impl fmt::Display for LeaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "lease is closed"),
        }
    }
}

impl Error for LeaseError {}

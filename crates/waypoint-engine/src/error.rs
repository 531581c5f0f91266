use thiserror::Error;

use crate::editing::BufferId;

/// Errors raised by the version chain, the buffer and tracking point resolution.
///
/// `BufferMismatch` and `PositionOutOfBounds` signal caller bugs or corrupt change
/// data. They are returned rather than panicking, but must never be clamped away.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackingError {
    #[error("Tracking point belongs to buffer {expected} but was resolved against buffer {actual}")]
    BufferMismatch { expected: BufferId, actual: BufferId },

    #[error("Position {position} is outside 0..={length} at version {version}")]
    PositionOutOfBounds {
        position: isize,
        length: usize,
        version: u64,
    },

    #[error("Position {position} is inside a character at version {version}")]
    NotCharBoundary { position: usize, version: u64 },

    #[error("Version {target} is not reachable from version {from}")]
    VersionUnreachable { from: u64, target: u64 },

    #[error("Version {version} already has a successor")]
    VersionAlreadyLinked { version: u64 },

    #[error("Invalid change set: {reason}")]
    InvalidChangeSet { reason: String },

    #[error("Invalid edit: {reason}")]
    InvalidEdit { reason: String },

    #[error("No character at offset {offset} (length {length})")]
    NoCharacter { offset: usize, length: usize },
}

pub type Result<T, E = TrackingError> = std::result::Result<T, E>;

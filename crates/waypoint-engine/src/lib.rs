pub mod editing;
pub mod error;
pub mod tracking;

// Re-export key types for easier usage
pub use editing::{
    BufferId, Change, ChangeSet, Cmd, Edit, Snapshot, SnapshotPoint, TextBuffer, VersionNode,
};
pub use error::TrackingError;
pub use tracking::{
    PointTrackingMode, TrackingFidelity, TrackingPoint, track_backward, track_forward,
};

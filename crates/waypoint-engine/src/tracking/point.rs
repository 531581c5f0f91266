use std::cmp::Ordering;
use std::sync::Arc;

use crate::editing::{BufferId, ChangeSet, Snapshot, SnapshotPoint, VersionNode};
use crate::error::{Result, TrackingError};
use crate::tracking::{PointTrackingMode, TrackingFidelity, track_backward, track_forward};

/// A position captured at one version of a buffer.
///
/// The point itself never changes. Resolving it against another snapshot of
/// the same buffer replays the recorded changes between the two versions:
/// forwards for later snapshots, in reverse for earlier ones.
#[derive(Debug, Clone)]
pub struct TrackingPoint {
    version: Arc<VersionNode>,
    position: usize,
    mode: PointTrackingMode,
    fidelity: TrackingFidelity,
}

impl TrackingPoint {
    pub fn new(
        snapshot: &Snapshot,
        position: usize,
        mode: PointTrackingMode,
        fidelity: TrackingFidelity,
    ) -> Result<Self> {
        if position > snapshot.len() {
            return Err(TrackingError::PositionOutOfBounds {
                position: position as isize,
                length: snapshot.len(),
                version: snapshot.version_number(),
            });
        }
        if !snapshot.is_char_boundary(position) {
            return Err(TrackingError::NotCharBoundary {
                position,
                version: snapshot.version_number(),
            });
        }

        Ok(Self {
            version: Arc::clone(snapshot.version()),
            position,
            mode,
            fidelity,
        })
    }

    pub fn buffer_id(&self) -> BufferId {
        self.version.buffer_id()
    }

    pub fn mode(&self) -> PointTrackingMode {
        self.mode
    }

    pub fn fidelity(&self) -> TrackingFidelity {
        self.fidelity
    }

    /// Version the point was created at
    pub fn version(&self) -> &Arc<VersionNode> {
        &self.version
    }

    /// Position at the version the point was created at
    pub fn start_position(&self) -> usize {
        self.position
    }

    /// Resolve the point against `target`
    pub fn resolve(&self, target: &Snapshot) -> Result<SnapshotPoint> {
        let position = self.position_at_version(target.version())?;
        Ok(SnapshotPoint::new(target.clone(), position))
    }

    pub fn position(&self, target: &Snapshot) -> Result<usize> {
        self.position_at_version(target.version())
    }

    /// The character at the resolved point; fails when it resolves to the end of `target`
    pub fn character_at(&self, target: &Snapshot) -> Result<char> {
        self.resolve(target)?.character()
    }

    /// Map the point onto `target`, which must belong to the same buffer
    pub fn position_at_version(&self, target: &VersionNode) -> Result<usize> {
        if target.buffer_id() != self.buffer_id() {
            log::error!(
                "tracking point of buffer {} resolved against buffer {}",
                self.buffer_id(),
                target.buffer_id()
            );
            return Err(TrackingError::BufferMismatch {
                expected: self.buffer_id(),
                actual: target.buffer_id(),
            });
        }

        let current = self.version.as_ref();
        let mut position = self.position as isize;

        let reached = match current.number().cmp(&target.number()) {
            Ordering::Equal => std::ptr::eq(current, target),
            Ordering::Less => walk_transitions(current, target, |changes| {
                // Highest position first keeps each change's offsets valid
                for change in changes.iter().rev() {
                    position = track_forward(change, position, self.mode);
                }
            }),
            Ordering::Greater => {
                // Only forward transitions are recorded: collect the segment, then undo it newest first
                let mut segment = Vec::new();
                let reached = walk_transitions(target, current, |changes| segment.push(changes));

                for changes in segment.into_iter().rev() {
                    for change in changes.iter().rev() {
                        position = track_backward(change, position, self.mode);
                    }
                }
                reached
            }
        };

        if !reached {
            log::error!(
                "version {} is not on the chain of the tracking point's version {}",
                target.number(),
                current.number()
            );
            return Err(TrackingError::VersionUnreachable {
                from: current.number(),
                target: target.number(),
            });
        }

        if position < 0 || position as usize > target.length() {
            log::error!(
                "tracking point resolved to {position} outside 0..={} at version {}",
                target.length(),
                target.number()
            );
            return Err(TrackingError::PositionOutOfBounds {
                position,
                length: target.length(),
                version: target.number(),
            });
        }

        log::trace!(
            "resolved {} ({:?}) from version {} to {} at version {}",
            self.position,
            self.mode,
            current.number(),
            position,
            target.number()
        );
        Ok(position as usize)
    }
}

/// Visit the change set of every transition from `from` up to `to`.
///
/// Returns whether the walk arrived at `to` itself; a node of another chain
/// with the same number does not count.
fn walk_transitions<'a>(
    from: &'a VersionNode,
    to: &VersionNode,
    mut visit: impl FnMut(&'a ChangeSet),
) -> bool {
    let mut node = from;
    while node.number() < to.number() {
        match (node.changes(), node.next()) {
            (Some(changes), Some(next)) => {
                visit(changes);
                node = next.as_ref();
            }
            _ => return false,
        }
    }
    std::ptr::eq(node, to)
}

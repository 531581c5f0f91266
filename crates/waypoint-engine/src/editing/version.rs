use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::editing::ChangeSet;
use crate::error::{Result, TrackingError};

/// Identity of one text buffer
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct BufferId(pub Uuid);

impl BufferId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BufferId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The recorded step from a version to its successor
#[derive(Debug)]
struct Transition {
    changes: ChangeSet,
    next: Arc<VersionNode>,
}

/// One point in a buffer's linear edit history.
///
/// Nodes form an append-only singly linked chain: each node may be linked to
/// exactly one successor, once. After that the node, its change set and the
/// link never change, so a node can be shared freely between threads.
#[derive(Debug)]
pub struct VersionNode {
    buffer: BufferId,
    number: u64,
    length: usize,
    transition: OnceLock<Transition>,
}

impl VersionNode {
    /// Start a new chain at version 0
    pub fn root(buffer: BufferId, length: usize) -> Arc<Self> {
        Arc::new(Self {
            buffer,
            number: 0,
            length,
            transition: OnceLock::new(),
        })
    }

    pub fn buffer_id(&self) -> BufferId {
        self.buffer
    }

    /// Version number, only meaningful for ordering within one buffer
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Content length at this version
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn next(&self) -> Option<&Arc<VersionNode>> {
        self.transition.get().map(|transition| &transition.next)
    }

    /// Changes leading from this version to its successor
    pub fn changes(&self) -> Option<&ChangeSet> {
        self.transition.get().map(|transition| &transition.changes)
    }

    pub fn is_latest(&self) -> bool {
        self.transition.get().is_none()
    }

    /// Link a successor version reached through `changes`.
    ///
    /// `length` is the content length after the changes; it must agree with the
    /// net delta of the change set.
    pub fn append(&self, changes: ChangeSet, length: usize) -> Result<Arc<VersionNode>> {
        if self.length as isize + changes.total_delta() != length as isize {
            return Err(TrackingError::InvalidChangeSet {
                reason: format!(
                    "length {} with net delta {} cannot produce length {length}",
                    self.length,
                    changes.total_delta()
                ),
            });
        }
        let old_end = changes.as_slice().last().map_or(0, |last| last.old_end());
        if old_end > self.length {
            return Err(TrackingError::InvalidChangeSet {
                reason: format!(
                    "change ends at {old_end} beyond version length {}",
                    self.length
                ),
            });
        }

        let next = Arc::new(VersionNode {
            buffer: self.buffer,
            number: self.number + 1,
            length,
            transition: OnceLock::new(),
        });

        self.transition
            .set(Transition {
                changes,
                next: Arc::clone(&next),
            })
            .map_err(|_| TrackingError::VersionAlreadyLinked {
                version: self.number,
            })?;

        Ok(next)
    }
}

impl Drop for VersionNode {
    fn drop(&mut self) {
        // Unlink iteratively so dropping a long history cannot overflow the stack
        let mut pending = self.transition.take();
        while let Some(transition) = pending {
            pending = match Arc::try_unwrap(transition.next) {
                Ok(mut node) => node.transition.take(),
                Err(_) => None,
            };
        }
    }
}

use serde::{Deserialize, Serialize};
use xi_rope::delta::DeltaElement;
use xi_rope::{Delta, RopeInfo};

use crate::error::{Result, TrackingError};

/// One edit within a version transition.
///
/// Positions are byte offsets: `old_position` into the snapshot before the
/// transition, `new_position` into the snapshot after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Change {
    pub old_position: usize,
    pub new_position: usize,
    pub old_length: usize,
    pub new_length: usize,
}

impl Change {
    pub fn new(old_position: usize, new_position: usize, old_length: usize, new_length: usize) -> Self {
        Self {
            old_position,
            new_position,
            old_length,
            new_length,
        }
    }

    /// Pure insertion of `length` bytes
    pub fn insertion(old_position: usize, new_position: usize, length: usize) -> Self {
        Self::new(old_position, new_position, 0, length)
    }

    /// Pure deletion of `length` bytes
    pub fn deletion(old_position: usize, new_position: usize, length: usize) -> Self {
        Self::new(old_position, new_position, length, 0)
    }

    /// Signed growth of the edited span: `new_length - old_length`
    pub fn delta(&self) -> isize {
        self.new_length as isize - self.old_length as isize
    }

    pub fn old_end(&self) -> usize {
        self.old_position + self.old_length
    }

    pub fn new_end(&self) -> usize {
        self.new_position + self.new_length
    }
}

/// The normalized changes of one transition between adjacent versions.
///
/// Changes are sorted by position and their old spans never overlap. Each
/// `new_position` is the `old_position` shifted by the deltas of every earlier
/// change in the set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate and wrap a list of changes
    pub fn new(changes: Vec<Change>) -> Result<Self> {
        let mut old_floor = 0usize;
        let mut shift = 0isize;

        for (index, change) in changes.iter().enumerate() {
            if change.old_position < old_floor {
                return Err(TrackingError::InvalidChangeSet {
                    reason: format!(
                        "change {index} starts at {} inside or before the previous change (ends at {old_floor})",
                        change.old_position
                    ),
                });
            }

            let expected_new = change.old_position as isize + shift;
            if change.new_position as isize != expected_new {
                return Err(TrackingError::InvalidChangeSet {
                    reason: format!(
                        "change {index} has new position {} but {expected_new} follows from earlier changes",
                        change.new_position
                    ),
                });
            }

            old_floor = change.old_end();
            shift += change.delta();
        }

        Ok(Self { changes })
    }

    /// Derive the change set described by an xi-rope delta.
    ///
    /// A delta is a sequence of `Copy(from, to)` and `Insert(text)` elements;
    /// gaps between copies are deletions. A deletion directly adjacent to an
    /// insertion is reported as a single replacement.
    pub fn from_delta(delta: &Delta<RopeInfo>) -> Self {
        let mut changes = Vec::new();
        let mut pending: Option<Change> = None;
        let mut old_pos = 0;
        let mut new_pos = 0;

        for op in &delta.els {
            match op {
                DeltaElement::Copy(from, to) => {
                    if old_pos < *from {
                        let change = pending.get_or_insert(Change::new(old_pos, new_pos, 0, 0));
                        change.old_length += from - old_pos;
                    }
                    changes.extend(pending.take());

                    new_pos += to - from;
                    old_pos = *to;
                }
                DeltaElement::Insert(text) => {
                    let change = pending.get_or_insert(Change::new(old_pos, new_pos, 0, 0));
                    change.new_length += text.len();
                    new_pos += text.len();
                }
            }
        }

        // Trailing deletion up to the end of the old document
        if old_pos < delta.base_len {
            let change = pending.get_or_insert(Change::new(old_pos, new_pos, 0, 0));
            change.old_length += delta.base_len - old_pos;
        }
        changes.extend(pending.take());

        // An empty insert can leave a zero-width, zero-delta change behind
        changes.retain(|change| change.old_length > 0 || change.new_length > 0);

        Self { changes }
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Change> {
        self.changes.iter()
    }

    pub fn as_slice(&self) -> &[Change] {
        &self.changes
    }

    /// Net length change of the whole transition
    pub fn total_delta(&self) -> isize {
        self.changes.iter().map(Change::delta).sum()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

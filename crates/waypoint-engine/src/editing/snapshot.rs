use std::borrow::Cow;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use xi_rope::Rope;

use crate::editing::{BufferId, VersionNode};
use crate::error::{Result, TrackingError};
use crate::tracking::{PointTrackingMode, TrackingFidelity, TrackingPoint};

/// Immutable view of a buffer's content at one version.
///
/// Cloning is cheap: the rope and the version node are both shared.
#[derive(Clone)]
pub struct Snapshot {
    version: Arc<VersionNode>,
    text: Rope,
}

impl Snapshot {
    pub(crate) fn new(version: Arc<VersionNode>, text: Rope) -> Self {
        debug_assert_eq!(version.length(), text.len());
        Self { version, text }
    }

    pub fn buffer_id(&self) -> BufferId {
        self.version.buffer_id()
    }

    pub fn version(&self) -> &Arc<VersionNode> {
        &self.version
    }

    pub fn version_number(&self) -> u64 {
        self.version.number()
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.len() == 0
    }

    pub fn text(&self) -> String {
        self.text.to_string()
    }

    pub fn rope(&self) -> &Rope {
        &self.text
    }

    /// Slice the content, failing on ranges outside the snapshot or off a character boundary
    pub fn slice(&self, range: Range<usize>) -> Result<Cow<'_, str>> {
        if range.start > range.end
            || range.end > self.len()
            || !self.is_char_boundary(range.start)
            || !self.is_char_boundary(range.end)
        {
            return Err(TrackingError::InvalidEdit {
                reason: format!(
                    "range {}..{} is not a valid slice of {} bytes",
                    range.start,
                    range.end,
                    self.len()
                ),
            });
        }
        Ok(self.text.slice_to_cow(range))
    }

    /// The character starting at byte `offset`
    pub fn char_at(&self, offset: usize) -> Result<char> {
        let no_character = || TrackingError::NoCharacter {
            offset,
            length: self.len(),
        };

        if offset >= self.len() || !self.is_char_boundary(offset) {
            return Err(no_character());
        }
        let end = self
            .text
            .next_codepoint_offset(offset)
            .ok_or_else(no_character)?;
        self.text
            .slice_to_cow(offset..end)
            .chars()
            .next()
            .ok_or_else(no_character)
    }

    /// Whether `offset` falls between two characters; both ends of the content count
    pub fn is_char_boundary(&self, offset: usize) -> bool {
        offset == 0
            || offset == self.len()
            || (offset < self.len() && self.text.is_codepoint_boundary(offset))
    }

    /// Create a tracking point at `position` in this snapshot
    pub fn create_tracking_point(
        &self,
        position: usize,
        mode: PointTrackingMode,
        fidelity: TrackingFidelity,
    ) -> Result<TrackingPoint> {
        TrackingPoint::new(self, position, mode, fidelity)
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("buffer", &self.buffer_id())
            .field("version", &self.version_number())
            .field("len", &self.len())
            .finish()
    }
}

/// A position bound to one snapshot
#[derive(Clone, Debug)]
pub struct SnapshotPoint {
    snapshot: Snapshot,
    position: usize,
}

impl SnapshotPoint {
    pub(crate) fn new(snapshot: Snapshot, position: usize) -> Self {
        Self { snapshot, position }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// The character at this point; fails at the end of the snapshot
    pub fn character(&self) -> Result<char> {
        self.snapshot.char_at(self.position)
    }
}

impl PartialEq for SnapshotPoint {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
            && Arc::ptr_eq(self.snapshot.version(), other.snapshot.version())
    }
}

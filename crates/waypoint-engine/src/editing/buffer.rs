use std::ops::Range;
use std::sync::Arc;

use xi_rope::{Delta, Rope, RopeInfo};

use crate::editing::commands::compile_command;
use crate::editing::{BufferId, ChangeSet, Cmd, Snapshot, VersionNode};
use crate::error::{Result, TrackingError};

/// An editable text buffer that records its history as a version chain.
///
/// The content lives in an xi-rope `Rope`. Every applied command derives the
/// change set from the compiled `Delta`, appends a new version node and
/// publishes a new immutable [`Snapshot`]. Earlier snapshots stay valid and
/// keep the whole chain after them reachable for tracking point resolution.
///
/// ```rust
/// use waypoint_engine::{PointTrackingMode, TextBuffer, TrackingFidelity};
///
/// let mut buffer = TextBuffer::new("ABCDEF");
/// let original = buffer.current_snapshot();
/// let caret = original
///     .create_tracking_point(3, PointTrackingMode::Positive, TrackingFidelity::Forward)
///     .unwrap();
///
/// let edited = buffer.insert(3, "XY").unwrap();
/// assert_eq!(caret.position(&edited).unwrap(), 5);
/// assert_eq!(caret.character_at(&edited).unwrap(), 'D');
/// ```
pub struct TextBuffer {
    id: BufferId,
    current: Snapshot,
}

impl TextBuffer {
    pub fn new(text: &str) -> Self {
        let id = BufferId::new();
        let rope = Rope::from(text);
        let root = VersionNode::root(id, rope.len());

        Self {
            id,
            current: Snapshot::new(root, rope),
        }
    }

    /// Create a buffer from raw bytes, which must be valid UTF-8
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(text))
    }

    pub fn id(&self) -> BufferId {
        self.id
    }

    /// Snapshot of the latest version
    pub fn current_snapshot(&self) -> Snapshot {
        self.current.clone()
    }

    pub fn version_number(&self) -> u64 {
        self.current.version_number()
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn text(&self) -> String {
        self.current.text()
    }

    /// Apply a command, producing the next version
    pub fn apply(&mut self, cmd: Cmd) -> Result<Snapshot> {
        let delta = compile_command(&self.current, &cmd)?;
        self.apply_delta(&delta)
    }

    /// Apply a delta built against the latest version
    pub fn apply_delta(&mut self, delta: &Delta<RopeInfo>) -> Result<Snapshot> {
        if delta.base_len != self.len() {
            return Err(TrackingError::InvalidEdit {
                reason: format!(
                    "delta expects a {} byte base but version {} has {} bytes",
                    delta.base_len,
                    self.version_number(),
                    self.len()
                ),
            });
        }

        let changes = ChangeSet::from_delta(delta);
        let rope = delta.apply(self.current.rope());
        let change_count = changes.len();

        let next = self.current.version().append(changes, rope.len())?;
        log::debug!(
            "buffer {}: version {} -> {} ({} changes, {} -> {} bytes)",
            self.id,
            self.current.version_number(),
            next.number(),
            change_count,
            self.current.len(),
            rope.len()
        );

        self.current = Snapshot::new(Arc::clone(&next), rope);
        Ok(self.current.clone())
    }

    pub fn insert(&mut self, at: usize, text: &str) -> Result<Snapshot> {
        self.apply(Cmd::InsertText {
            at,
            text: text.to_string(),
        })
    }

    pub fn delete(&mut self, range: Range<usize>) -> Result<Snapshot> {
        self.apply(Cmd::DeleteRange { range })
    }

    pub fn replace(&mut self, range: Range<usize>, text: &str) -> Result<Snapshot> {
        self.apply(Cmd::ReplaceRange {
            range,
            text: text.to_string(),
        })
    }
}

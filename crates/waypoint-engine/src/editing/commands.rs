use std::ops::Range;

use xi_rope::delta::Builder;
use xi_rope::{Delta, Rope, RopeInfo};

use crate::editing::Snapshot;
use crate::error::{Result, TrackingError};

/// A single replacement of `range` (in the pre-edit snapshot) by `text`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: Range<usize>,
    pub text: String,
}

impl Edit {
    pub fn new(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }
}

/// Commands that can be applied to a text buffer.
///
/// Every command produces exactly one new version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    InsertText { at: usize, text: String },
    DeleteRange { range: Range<usize> },
    ReplaceRange { range: Range<usize>, text: String },
    /// Several non-overlapping replacements applied as one transition,
    /// ordered by position
    Batch { edits: Vec<Edit> },
}

impl Cmd {
    fn edits(&self) -> Vec<Edit> {
        match self {
            Cmd::InsertText { at, text } => vec![Edit::new(*at..*at, text.clone())],
            Cmd::DeleteRange { range } => vec![Edit::new(range.clone(), String::new())],
            Cmd::ReplaceRange { range, text } => vec![Edit::new(range.clone(), text.clone())],
            Cmd::Batch { edits } => edits.clone(),
        }
    }
}

/// Compile a command into a delta against `snapshot`
pub(crate) fn compile_command(snapshot: &Snapshot, cmd: &Cmd) -> Result<Delta<RopeInfo>> {
    let edits = cmd.edits();
    let mut builder = Builder::new(snapshot.len());
    let mut last_end = 0;

    for edit in &edits {
        validate_edit(snapshot, edit)?;
        if edit.range.start < last_end {
            return Err(TrackingError::InvalidEdit {
                reason: format!(
                    "edit at {}..{} overlaps or precedes an earlier edit ending at {last_end}",
                    edit.range.start, edit.range.end
                ),
            });
        }
        last_end = edit.range.end;

        builder.replace(edit.range.clone(), Rope::from(edit.text.as_str()));
    }

    Ok(builder.build())
}

fn validate_edit(snapshot: &Snapshot, edit: &Edit) -> Result<()> {
    let Range { start, end } = edit.range;
    if start > end || end > snapshot.len() {
        return Err(TrackingError::InvalidEdit {
            reason: format!(
                "range {start}..{end} is outside a buffer of {} bytes",
                snapshot.len()
            ),
        });
    }
    if !snapshot.is_char_boundary(start) || !snapshot.is_char_boundary(end) {
        return Err(TrackingError::InvalidEdit {
            reason: format!("range {start}..{end} splits a character"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::TextBuffer;

    fn compile(text: &str, cmd: Cmd) -> Result<Rope> {
        let snapshot = TextBuffer::new(text).current_snapshot();
        let delta = compile_command(&snapshot, &cmd)?;
        Ok(delta.apply(snapshot.rope()))
    }

    #[test]
    fn test_insert_text() {
        let rope = compile(
            "ABCDEF",
            Cmd::InsertText {
                at: 3,
                text: "XY".to_string(),
            },
        )
        .unwrap();
        assert_eq!(rope.to_string(), "ABCXYDEF");
    }

    #[test]
    fn test_delete_range() {
        let rope = compile("ABCDEF", Cmd::DeleteRange { range: 1..4 }).unwrap();
        assert_eq!(rope.to_string(), "AEF");
    }

    #[test]
    fn test_replace_range() {
        let rope = compile(
            "ABCDEF",
            Cmd::ReplaceRange {
                range: 2..4,
                text: "xyz".to_string(),
            },
        )
        .unwrap();
        assert_eq!(rope.to_string(), "ABxyzEF");
    }

    #[test]
    fn test_batch() {
        let rope = compile(
            "ABCDEF",
            Cmd::Batch {
                edits: vec![Edit::new(0..0, ">"), Edit::new(2..3, ""), Edit::new(6..6, "<")],
            },
        )
        .unwrap();
        assert_eq!(rope.to_string(), ">ABDEF<");
    }

    #[test]
    fn test_batch_rejects_overlap() {
        let result = compile(
            "ABCDEF",
            Cmd::Batch {
                edits: vec![Edit::new(1..4, ""), Edit::new(3..5, "x")],
            },
        );
        assert!(matches!(result, Err(TrackingError::InvalidEdit { .. })));
    }

    #[test]
    fn test_range_past_end_is_rejected() {
        let result = compile("ABC", Cmd::DeleteRange { range: 2..5 });
        assert!(matches!(result, Err(TrackingError::InvalidEdit { .. })));
    }

    #[test]
    fn test_range_splitting_character_is_rejected() {
        let result = compile(
            "a世b",
            Cmd::InsertText {
                at: 2,
                text: "x".to_string(),
            },
        );
        assert!(matches!(result, Err(TrackingError::InvalidEdit { .. })));
    }
}

//! Position arithmetic for a single change.
//!
//! Positions are signed so that corrupt change data surfaces as an
//! out-of-bounds result instead of wrapping.

use crate::editing::Change;
use crate::tracking::PointTrackingMode;

/// Map `position` in the snapshot before `change` to the snapshot after it.
///
/// A position inside deleted text collapses to the start of the edit. An edit
/// starting exactly at the position shifts it only in `Positive` mode.
pub fn track_forward(change: &Change, position: isize, mode: PointTrackingMode) -> isize {
    let start = change.old_position as isize;
    let delta = change.delta();

    if delta < 0 && start <= position && position < start - delta {
        start
    } else if start == position {
        match mode {
            PointTrackingMode::Positive => position + delta,
            PointTrackingMode::Negative => position,
        }
    } else if start < position {
        position + delta
    } else {
        position
    }
}

/// Map `position` in the snapshot after `change` back to the snapshot before it.
///
/// Mirror of [`track_forward`]: a position inside inserted text collapses to
/// the start of the edit, and an edit starting exactly at the position shifts
/// it back only in `Positive` mode.
pub fn track_backward(change: &Change, position: isize, mode: PointTrackingMode) -> isize {
    let start = change.new_position as isize;
    let delta = change.delta();

    if delta > 0 && start <= position && position < start + delta {
        start
    } else if start == position {
        match mode {
            PointTrackingMode::Positive => position - delta,
            PointTrackingMode::Negative => position,
        }
    } else if start < position {
        position - delta
    } else {
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::tracking::PointTrackingMode::{Negative, Positive};

    // ============ Forward rule ============

    #[rstest]
    // Insertion of two bytes at 3
    #[case(Change::insertion(3, 3, 2), 1, Positive, 1)]
    #[case(Change::insertion(3, 3, 2), 3, Positive, 5)]
    #[case(Change::insertion(3, 3, 2), 3, Negative, 3)]
    #[case(Change::insertion(3, 3, 2), 4, Negative, 6)]
    // Deletion of [1, 4)
    #[case(Change::deletion(1, 1, 3), 0, Positive, 0)]
    #[case(Change::deletion(1, 1, 3), 1, Positive, 1)]
    #[case(Change::deletion(1, 1, 3), 1, Negative, 1)]
    #[case(Change::deletion(1, 1, 3), 3, Positive, 1)]
    #[case(Change::deletion(1, 1, 3), 3, Negative, 1)]
    #[case(Change::deletion(1, 1, 3), 4, Positive, 1)]
    #[case(Change::deletion(1, 1, 3), 6, Negative, 3)]
    // Same-length replacement never moves anything
    #[case(Change::new(2, 2, 2, 2), 2, Positive, 2)]
    #[case(Change::new(2, 2, 2, 2), 5, Positive, 5)]
    fn test_track_forward(
        #[case] change: Change,
        #[case] position: isize,
        #[case] mode: PointTrackingMode,
        #[case] expected: isize,
    ) {
        assert_eq!(track_forward(&change, position, mode), expected);
    }

    // ============ Backward rule ============

    #[rstest]
    // Undoing the insertion of two bytes at 3
    #[case(Change::insertion(3, 3, 2), 1, Positive, 1)]
    #[case(Change::insertion(3, 3, 2), 3, Positive, 3)]
    #[case(Change::insertion(3, 3, 2), 4, Negative, 3)]
    #[case(Change::insertion(3, 3, 2), 5, Positive, 3)]
    #[case(Change::insertion(3, 3, 2), 5, Negative, 3)]
    #[case(Change::insertion(3, 3, 2), 7, Negative, 5)]
    // Undoing the deletion of [1, 4)
    #[case(Change::deletion(1, 1, 3), 0, Positive, 0)]
    #[case(Change::deletion(1, 1, 3), 1, Positive, 4)]
    #[case(Change::deletion(1, 1, 3), 1, Negative, 1)]
    #[case(Change::deletion(1, 1, 3), 2, Negative, 5)]
    fn test_track_backward(
        #[case] change: Change,
        #[case] position: isize,
        #[case] mode: PointTrackingMode,
        #[case] expected: isize,
    ) {
        assert_eq!(track_backward(&change, position, mode), expected);
    }

    // ============ Laws on a single change ============

    #[test]
    fn test_edit_before_point_shifts_by_delta() {
        for change in [
            Change::insertion(2, 2, 4),
            Change::deletion(2, 2, 3),
            Change::new(2, 2, 1, 5),
        ] {
            for mode in [Positive, Negative] {
                assert_eq!(track_forward(&change, 10, mode), 10 + change.delta());
            }
        }
    }

    #[test]
    fn test_edit_after_point_leaves_it_alone() {
        for change in [
            Change::insertion(8, 8, 4),
            Change::deletion(8, 8, 3),
            Change::new(8, 8, 1, 5),
        ] {
            for mode in [Positive, Negative] {
                assert_eq!(track_forward(&change, 5, mode), 5);
                assert_eq!(track_backward(&change, 5, mode), 5);
            }
        }
    }

    #[test]
    fn test_insertion_round_trips_for_every_position() {
        let change = Change::insertion(3, 3, 2);
        for position in 0..=6 {
            for mode in [Positive, Negative] {
                let forward = track_forward(&change, position, mode);
                assert_eq!(
                    track_backward(&change, forward, mode),
                    position,
                    "position {position} in {mode:?} mode"
                );
            }
        }
    }
}

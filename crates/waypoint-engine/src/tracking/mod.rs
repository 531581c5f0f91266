//! Tracking points: positions that follow the text around them as a buffer is edited.
//!
//! A [`TrackingPoint`] is created against one snapshot and can be resolved
//! against any other snapshot of the same buffer, earlier or later. The
//! per-change arithmetic lives in [`rules`] so it can be tested without a
//! version chain.

pub mod point;
pub mod rules;

use serde::{Deserialize, Serialize};

pub use point::TrackingPoint;
pub use rules::{track_backward, track_forward};

/// Tie-break for an edit that begins exactly at the tracked position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointTrackingMode {
    /// The point sticks to the text after it and moves past text inserted at it
    #[default]
    Positive,
    /// The point sticks to the text before it and stays put
    Negative,
}

/// Strength of the guarantee a tracking point offers.
///
/// Carried alongside the point for callers; resolution does not branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingFidelity {
    /// Intended to be resolved against later versions only
    #[default]
    Forward,
    /// Resolving back and forth returns to the original position where the
    /// surrounding text survives
    Backward,
    Undefined,
}

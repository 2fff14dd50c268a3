//! Swipe and pinch geometry.
//!
//! Timestamps are [`Duration`]s since an arbitrary host epoch (for example a
//! page's `performance.now()`), so the classification is deterministic in tests.

use super::navigation::NavDirection;
use glam::Vec2;
use std::time::Duration;

/// Minimum horizontal travel for a swipe, in pixels.
pub const SWIPE_MIN_DISTANCE: f32 = 50.0;
/// A swipe must end strictly before this much time has passed since the press.
pub const SWIPE_MAX_DURATION: Duration = Duration::from_millis(300);

/// Where and when a press started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressSample {
    pub pos: Vec2,
    pub at: Duration,
}

/// Classify a completed press as a navigation swipe.
///
/// A swipe is dominantly horizontal (`|Δx| > 2|Δy|`), covers at least
/// [`SWIPE_MIN_DISTANCE`] and is quicker than [`SWIPE_MAX_DURATION`]. A
/// rightward swipe goes to the previous photo, a leftward one to the next.
pub fn classify_swipe(start: PressSample, end_pos: Vec2, end_at: Duration) -> Option<NavDirection> {
    let delta = end_pos - start.pos;
    let elapsed = end_at.saturating_sub(start.at);

    let horizontal = delta.x.abs() > delta.y.abs() * 2.0;
    let quick = elapsed < SWIPE_MAX_DURATION;
    let long_enough = delta.x.abs() >= SWIPE_MIN_DISTANCE;

    if !(horizontal && quick && long_enough) {
        return None;
    }
    if delta.x > 0.0 {
        Some(NavDirection::Previous)
    } else {
        Some(NavDirection::Next)
    }
}

/// Distance between two touch points.
pub fn touch_distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

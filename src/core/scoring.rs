//! Scoring module - line scores, level progression, and fall speed
//!
//! Fixed points per cleared row; level is a pure function of score and the
//! fall interval shrinks linearly with level down to a floor.

use crate::types::{BASE_DROP_MS, DROP_FLOOR_MS, DROP_STEP_MS, LEVEL_SCORE_STEP, LINE_SCORE};

/// Points awarded for clearing `lines` rows in one lock
pub fn line_clear_score(lines: usize) -> u32 {
    lines as u32 * LINE_SCORE
}

/// Level for a score: one level per 500 points, starting at 1
pub fn level_for_score(score: u32) -> u32 {
    score / LEVEL_SCORE_STEP + 1
}

/// Fall interval for a level (milliseconds), floored at 100ms
pub fn drop_interval_ms(level: u32) -> u32 {
    BASE_DROP_MS
        .saturating_sub(level.saturating_mul(DROP_STEP_MS))
        .max(DROP_FLOOR_MS)
}

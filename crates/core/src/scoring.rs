//! Scoring module - line-clear points, hard-drop bonus, leveling and fall cadence
//!
//! Rules:
//! - A lock adds `lines * 100 * level`, using the level in effect before the lock.
//! - A hard drop adds 2 points per row the piece actually descends.
//! - The level rises by exactly one when a lock clears lines and the running
//!   line total reaches `level * 10`, no matter how many lines that lock cleared.

use crate::types::{
    BASE_FALL_MS, FALL_FLOOR_MS, FALL_STEP_MS, HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL,
    LINE_CLEAR_POINTS,
};

/// Points for a lock that cleared `lines` rows at `level`
pub fn line_clear_score(lines: u32, level: u32) -> u32 {
    lines
        .saturating_mul(LINE_CLEAR_POINTS)
        .saturating_mul(level)
}

/// Points for a hard drop that descended `rows` rows
pub fn hard_drop_score(rows: u32) -> u32 {
    rows.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

/// Whether a lock advances the level.
///
/// `total_lines` is the cumulative count after adding `lines_cleared`.
pub fn should_level_up(lines_cleared: u32, total_lines: u32, level: u32) -> bool {
    lines_cleared > 0 && total_lines >= level.saturating_mul(LINES_PER_LEVEL)
}

/// Get fall interval for a level (in milliseconds)
pub fn fall_interval_ms(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(FALL_STEP_MS);
    BASE_FALL_MS.saturating_sub(reduction).max(FALL_FLOOR_MS)
}

//! Scoring module - line-clear points, levels and the drop-speed curve
//!
//! Line clears use an exponential multi-line bonus:
//! `lines * 100 * 2^(lines - 1)`, i.e. 100 / 400 / 1200 / 3200 for 1-4 lines.

use crate::types::{
    INITIAL_SPEED_MS, LINES_PER_LEVEL, LINE_CLEAR_BASE, MIN_SPEED_MS, SPEED_INCREMENT,
};

/// Points for clearing `lines` rows with a single lock
pub fn calculate_line_score(lines: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let multiplier = 1u32.checked_shl(lines - 1).unwrap_or(u32::MAX);
    lines
        .saturating_mul(LINE_CLEAR_BASE)
        .saturating_mul(multiplier)
}

/// Level management
/// Level starts at 1 and increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Get the automatic drop interval for a level (in milliseconds)
///
/// Decays by `SPEED_INCREMENT` per level and never goes below `MIN_SPEED_MS`.
pub fn get_drop_interval_ms(level: u32) -> f64 {
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    let interval = INITIAL_SPEED_MS as f64 * SPEED_INCREMENT.powi(exponent);
    interval.max(MIN_SPEED_MS as f64)
}

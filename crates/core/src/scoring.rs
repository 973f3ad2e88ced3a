//! Scoring module - classic line-clear points
//!
//! Points depend only on how many rows one lock clears. There are no levels,
//! drop bonuses, combos or back-to-back multipliers.

use crate::types::LINE_SCORES;

/// Points for clearing `lines` rows with a single lock
///
/// Clears of more than four rows (possible with taller custom shapes) score
/// the same as four.
pub fn score_for(lines: usize) -> u32 {
    LINE_SCORES[lines.min(LINE_SCORES.len() - 1)]
}

//! CHUNITHM single-chart rating: internal level plus a score bonus.

use crate::chart::InternalLevel;

pub const MAX_SCORE: u32 = 1_010_000;

/// Score bonus in hundredths. Quotients truncate before the 0.01 scale.
pub fn score_bonus(score: u32) -> u32 {
    let score = score.min(MAX_SCORE);
    match score {
        1_009_000.. => 215,
        1_007_500.. => 200 + (score - 1_007_500) / 100,
        1_005_000.. => 150 + (score - 1_005_000) / 500,
        1_000_000.. => 100 + (score - 1_000_000) / 1_000,
        990_000.. => 60 + (score - 990_000) / 2_500,
        975_000.. => (score - 975_000) / 2_500,
        _ => 0,
    }
}

/// Rating in hundredths, saturating for out-of-range levels
pub fn rating_hundredths(level: InternalLevel, score: u32) -> u32 {
    level.hundredths().saturating_add(score_bonus(score))
}

/// Rating of one chart.
pub fn calculate_rating(level: InternalLevel, score: u32) -> f64 {
    rating_hundredths(level, score) as f64 / 100.0
}

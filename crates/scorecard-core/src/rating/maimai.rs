//! maimai DX single-chart rating.
//!
//! `rating = trunc(level * factor(a) * min(a, 100.5%) / 100)`, evaluated in
//! fixed point: level in hundredths, factor in tenths, achievement in
//! percent x 10000. The single truncation at the end matches the community
//! tables exactly.

use crate::chart::InternalLevel;

/// Achievement cap used by the formula (100.5%)
pub const ACHIEVEMENT_CAP: u32 = 1_005_000;

/// Rating factor bands from 40% up, as (minimum achievement, factor x 10)
const RATING_FACTORS: [(u32, u64); 14] = [
    (1_005_000, 224),
    (1_000_000, 216),
    (995_000, 211),
    (990_000, 208),
    (980_000, 203),
    (970_000, 200),
    (940_000, 168),
    (900_000, 152),
    (800_000, 136),
    (750_000, 120),
    (700_000, 112),
    (600_000, 96),
    (500_000, 80),
    (400_000, 64),
];

/// Bands below 40%
const LOW_RATING_FACTORS: [(u32, u64); 3] = [(300_000, 48), (200_000, 32), (100_000, 16)];

/// Rating factor (x 10) for an achievement in percent x 10000.
pub fn rating_factor(achievement: u32) -> u64 {
    RATING_FACTORS
        .iter()
        .chain(LOW_RATING_FACTORS.iter())
        .find(|(min, _)| achievement >= *min)
        .map(|(_, factor)| *factor)
        .unwrap_or(0)
}

/// Rating of one chart.
pub fn calculate_rating(level: InternalLevel, achievement: u32) -> u32 {
    let capped = achievement.min(ACHIEVEMENT_CAP) as u64;
    let product = level.hundredths() as u64 * rating_factor(achievement) * capped;
    // hundredths * tenths * (percent x 10000) / 100%
    (product / 1_000_000_000) as u32
}

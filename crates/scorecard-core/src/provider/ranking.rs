//! Pool partitioning, ordering and rating finalization shared by all adapters.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use crate::chart::Chart;
use crate::config::pools;
use crate::game::Game;
use crate::rating;
use crate::score::{BestScores, Score};
use crate::version::Version;

/// Which pool a provider placed a score in, used only when the chart's own
/// version is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolHint {
    New,
    #[default]
    Old,
}

/// `(new, old)` capacities of the versioned layout
pub fn versioned_capacity(game: Game) -> (usize, usize) {
    match game {
        Game::Maimai => (pools::MAIMAI_NEW, pools::MAIMAI_OLD),
        Game::Chunithm => (pools::CHUNITHM_NEW, pools::CHUNITHM_OLD),
    }
}

/// Best-first ordering: rating descending, then achievement descending.
pub fn best_first(a: &Score, b: &Score) -> Ordering {
    b.rating
        .total_cmp(&a.rating)
        .then_with(|| b.achievement.cmp(&a.achievement))
}

/// Stable-sort best first and keep the top `capacity` entries.
pub fn rank_pool(mut scores: Vec<Score>, capacity: usize) -> Vec<Score> {
    scores.sort_by(best_first);
    scores.truncate(capacity);
    scores
}

/// Keep only the best entry per chart. Relative order of the survivors is
/// preserved.
pub fn dedup_charts(scores: Vec<Score>) -> Vec<Score> {
    let mut ordered = scores;
    ordered.sort_by(best_first);
    let mut seen = HashSet::new();
    ordered.retain(|score| seen.insert(score.chart.key()));
    ordered
}

/// Split merged scores into current-version and older pools.
///
/// A chart belongs to the new pool when its version equals `current`; charts
/// without a known version fall back to the provider's hint.
pub fn partition_by_version(
    scores: Vec<(Score, PoolHint)>,
    current: &Version,
) -> BestScores {
    let (new_capacity, old_capacity) = versioned_capacity(current.game);
    let (new, old): (Vec<_>, Vec<_>) =
        scores.into_iter().partition(|(score, hint)| match &score.chart.version {
            Some(version) => version == current,
            None => *hint == PoolHint::New,
        });

    let strip = |pool: Vec<(Score, PoolHint)>| -> Vec<Score> {
        pool.into_iter().map(|(score, _)| score).collect()
    };
    BestScores::Versioned {
        new: rank_pool(dedup_charts(strip(new)), new_capacity),
        old: rank_pool(dedup_charts(strip(old)), old_capacity),
    }
}

/// The rating to record for a score: the provider's value when given,
/// otherwise computed from the chart level.
pub fn finalize_rating(provided: Option<f64>, chart: &Chart, achievement: u32) -> f64 {
    let computed = rating::calculate(chart.game, chart.level, achievement);
    match provided {
        Some(value) => {
            if !chart.level.is_zero() && (value - computed).abs() > rating::tolerance(chart.game) {
                debug!(
                    "Rating mismatch on {} ({}): provider {}, computed {}",
                    chart.key(),
                    chart.name,
                    value,
                    computed
                );
            }
            value
        }
        None => computed,
    }
}

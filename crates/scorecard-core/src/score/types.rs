use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::chart::Chart;
use crate::game::Game;
use crate::score::{ClearTier, ComboTier, Rank, SyncTier};

/// Convert a maimai achievement percentage (e.g. `100.4321`) to percent x 10000.
///
/// Rounds to the nearest unit to absorb binary noise, clamps to `0..=1_010_000`.
pub fn achievement_from_percent(percent: f64) -> u32 {
    if !percent.is_finite() || percent <= 0.0 {
        return 0;
    }
    ((percent * 10_000.0).round() as u32).min(1_010_000)
}

/// One best-score entry for one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub chart: Arc<Chart>,
    /// maimai: percent x 10000; CHUNITHM: raw score
    pub achievement: u32,
    /// DX score, when the provider reports it
    pub bonus_score: Option<u32>,
    pub combo: ComboTier,
    pub sync: SyncTier,
    pub clear: ClearTier,
    pub rank: Rank,
    pub rating: f64,
    pub achieved_at: Option<DateTime<Utc>>,
}

impl Score {
    /// Achievement as a percentage (maimai) or raw score (CHUNITHM)
    pub fn achievement_display(&self) -> f64 {
        match self.chart.game {
            Game::Maimai => self.achievement as f64 / 10_000.0,
            Game::Chunithm => self.achievement as f64,
        }
    }
}

/// Partitioned best lists handed to the rendering side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layout", rename_all = "camelCase")]
pub enum BestScores {
    /// Charts from the current release vs. everything older
    Versioned { new: Vec<Score>, old: Vec<Score> },
    /// Recently played vs. all-time best
    Recent { recent: Vec<Score>, best: Vec<Score> },
}

impl BestScores {
    /// All scores, first pool then second
    pub fn iter(&self) -> impl Iterator<Item = &Score> {
        let (first, second) = self.pools();
        first.iter().chain(second.iter())
    }

    pub fn pools(&self) -> (&[Score], &[Score]) {
        match self {
            Self::Versioned { new, old } => (new, old),
            Self::Recent { recent, best } => (recent, best),
        }
    }

    pub fn len(&self) -> usize {
        let (first, second) = self.pools();
        first.len() + second.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of ratings across both pools
    pub fn total_rating(&self) -> f64 {
        self.iter().map(|s| s.rating).sum()
    }
}

/// Lightweight player summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub name: String,
    pub rating: f64,
}

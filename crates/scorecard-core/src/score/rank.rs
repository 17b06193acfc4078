use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::game::Game;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    IntoStaticStr,
)]
pub enum Rank {
    #[default]
    D,
    C,
    B,
    #[strum(serialize = "BB")]
    Bb,
    #[strum(serialize = "BBB")]
    Bbb,
    A,
    #[strum(serialize = "AA")]
    Aa,
    #[strum(serialize = "AAA")]
    Aaa,
    S,
    #[strum(serialize = "S+")]
    SPlus,
    #[strum(serialize = "SS")]
    Ss,
    #[strum(serialize = "SS+")]
    SsPlus,
    #[strum(serialize = "SSS")]
    Sss,
    #[strum(serialize = "SSS+")]
    SssPlus,
}

/// maimai thresholds in percent x 10000, best rank first
const MAIMAI_THRESHOLDS: [(u32, Rank); 13] = [
    (1_005_000, Rank::SssPlus),
    (1_000_000, Rank::Sss),
    (995_000, Rank::SsPlus),
    (990_000, Rank::Ss),
    (980_000, Rank::SPlus),
    (970_000, Rank::S),
    (940_000, Rank::Aaa),
    (900_000, Rank::Aa),
    (800_000, Rank::A),
    (750_000, Rank::Bbb),
    (700_000, Rank::Bb),
    (600_000, Rank::B),
    (500_000, Rank::C),
];

/// CHUNITHM thresholds in raw score, best rank first
const CHUNITHM_THRESHOLDS: [(u32, Rank); 13] = [
    (1_009_000, Rank::SssPlus),
    (1_007_500, Rank::Sss),
    (1_005_000, Rank::SsPlus),
    (1_000_000, Rank::Ss),
    (990_000, Rank::SPlus),
    (975_000, Rank::S),
    (950_000, Rank::Aaa),
    (925_000, Rank::Aa),
    (900_000, Rank::A),
    (800_000, Rank::Bbb),
    (700_000, Rank::Bb),
    (600_000, Rank::B),
    (500_000, Rank::C),
];

impl Rank {
    /// Recompute the rank from an achievement value.
    pub fn from_achievement(game: Game, achievement: u32) -> Self {
        let thresholds = match game {
            Game::Maimai => &MAIMAI_THRESHOLDS,
            Game::Chunithm => &CHUNITHM_THRESHOLDS,
        };
        thresholds
            .iter()
            .find(|(min, _)| achievement >= *min)
            .map(|(_, rank)| *rank)
            .unwrap_or(Self::D)
    }

    /// Lowercase rate code used by LXNS and DivingFish ("sssp", "aaa", ...).
    /// Unknown codes are `D`.
    pub fn from_rate_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "sssp" => Self::SssPlus,
            "sss" => Self::Sss,
            "ssp" => Self::SsPlus,
            "ss" => Self::Ss,
            "sp" => Self::SPlus,
            "s" => Self::S,
            "aaa" => Self::Aaa,
            "aa" => Self::Aa,
            "a" => Self::A,
            "bbb" => Self::Bbb,
            "bb" => Self::Bb,
            "b" => Self::B,
            "c" => Self::C,
            _ => Self::D,
        }
    }

    /// Display grade used by KamaiTachi ("SSS+", "AA", ...). Unknown grades are `D`.
    pub fn from_grade_label(label: &str) -> Self {
        match label.trim() {
            "SSS+" => Self::SssPlus,
            "SSS" => Self::Sss,
            "SS+" => Self::SsPlus,
            "SS" => Self::Ss,
            "S+" => Self::SPlus,
            "S" => Self::S,
            "AAA" => Self::Aaa,
            "AA" => Self::Aa,
            "A" => Self::A,
            "BBB" => Self::Bbb,
            "BB" => Self::Bb,
            "B" => Self::B,
            "C" => Self::C,
            _ => Self::D,
        }
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

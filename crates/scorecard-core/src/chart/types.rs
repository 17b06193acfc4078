use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

use crate::chart::{Difficulty, InternalLevel};
use crate::game::Game;
use crate::version::Version;

/// maimai chart family. Each family occupies its own song id range.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum ChartKind {
    #[default]
    #[serde(alias = "sd", alias = "SD")]
    #[strum(to_string = "standard", serialize = "sd")]
    Standard,
    #[serde(rename = "dx", alias = "deluxe", alias = "DX")]
    #[strum(to_string = "dx", serialize = "deluxe")]
    Deluxe,
    #[strum(serialize = "utage")]
    Utage,
}

impl ChartKind {
    pub const DELUXE_OFFSET: u32 = 10_000;
    pub const UTAGE_OFFSET: u32 = 100_000;

    pub fn id_offset(&self) -> u32 {
        match self {
            Self::Standard => 0,
            Self::Deluxe => Self::DELUXE_OFFSET,
            Self::Utage => Self::UTAGE_OFFSET,
        }
    }

    /// Map a provider song id into this family's id range.
    ///
    /// Ids at or above the family's offset are already canonical (possibly in
    /// a higher family) and are returned unchanged, so base ids and pre-offset
    /// ids produce the same key. The offset is only added below it, which
    /// keeps the sum under `UTAGE_OFFSET * 2`.
    pub fn canonical_id(&self, song_id: u32) -> u32 {
        let offset = self.id_offset();
        if song_id >= offset {
            song_id
        } else {
            song_id + offset
        }
    }

    /// Family of an already-offset song id.
    pub fn of_canonical_id(song_id: u32) -> Self {
        if song_id >= Self::UTAGE_OFFSET {
            Self::Utage
        } else if song_id >= Self::DELUXE_OFFSET {
            Self::Deluxe
        } else {
            Self::Standard
        }
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }
}

/// Chart identifier (canonical song id + difficulty)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartKey {
    pub song_id: u32,
    pub difficulty: Difficulty,
}

impl ChartKey {
    pub fn new(song_id: u32, difficulty: Difficulty) -> Self {
        Self {
            song_id,
            difficulty,
        }
    }
}

impl std::fmt::Display for ChartKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.song_id, self.difficulty)
    }
}

/// A resolved chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub game: Game,
    pub song_id: u32,
    pub difficulty: Difficulty,
    pub kind: ChartKind,
    pub name: Arc<str>,
    pub level: InternalLevel,
    /// Highest attainable bonus score (maimai DX score); 0 when not applicable
    pub max_bonus_score: u32,
    /// Release that introduced the chart, when known
    pub version: Option<Version>,
}

impl Chart {
    pub fn key(&self) -> ChartKey {
        ChartKey::new(self.song_id, self.difficulty)
    }

    /// DX score ceiling for a chart with `total_notes` notes
    pub fn dx_score_ceiling(total_notes: u32) -> u32 {
        total_notes * 3
    }
}

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::game::Game;

/// Chart difficulty, shared by both titles.
///
/// Level index 4 is RE:MASTER on maimai and ULTIMA on CHUNITHM, index 5 is
/// UTAGE and WORLD'S END respectively.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, IntoStaticStr,
)]
pub enum Difficulty {
    #[strum(serialize = "BASIC")]
    Basic,
    #[strum(serialize = "ADVANCED")]
    Advanced,
    #[strum(serialize = "EXPERT")]
    Expert,
    #[strum(serialize = "MASTER")]
    Master,
    #[strum(serialize = "Re:MASTER")]
    ReMaster,
    #[strum(serialize = "ULTIMA")]
    Ultima,
    #[strum(serialize = "UTAGE")]
    Utage,
    #[strum(serialize = "WORLD'S END")]
    WorldsEnd,
}

impl Difficulty {
    pub fn from_level_index(game: Game, index: u8) -> Option<Self> {
        match (index, game) {
            (0, _) => Some(Self::Basic),
            (1, _) => Some(Self::Advanced),
            (2, _) => Some(Self::Expert),
            (3, _) => Some(Self::Master),
            (4, Game::Maimai) => Some(Self::ReMaster),
            (4, Game::Chunithm) => Some(Self::Ultima),
            (5, Game::Maimai) => Some(Self::Utage),
            (5, Game::Chunithm) => Some(Self::WorldsEnd),
            _ => None,
        }
    }

    pub fn level_index(&self) -> u8 {
        match self {
            Self::Basic => 0,
            Self::Advanced => 1,
            Self::Expert => 2,
            Self::Master => 3,
            Self::ReMaster | Self::Ultima => 4,
            Self::Utage | Self::WorldsEnd => 5,
        }
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

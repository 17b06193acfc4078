use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

/// Supported game titles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Game {
    #[strum(to_string = "maimai", serialize = "maimaidx")]
    Maimai,
    #[strum(serialize = "chunithm")]
    Chunithm,
}

impl Game {
    pub fn short_name(&self) -> &'static str {
        self.into()
    }

    /// Display title used in logs and CLI output
    pub fn title(&self) -> &'static str {
        match self {
            Self::Maimai => "maimai DX",
            Self::Chunithm => "CHUNITHM",
        }
    }

    /// Upper bound of the achievement value (percent x 10000 or raw score)
    pub fn max_achievement(&self) -> u32 {
        1_010_000
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

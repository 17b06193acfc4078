//! Single-chart rating formulas.

pub mod chunithm;
pub mod maimai;

use crate::chart::InternalLevel;
use crate::game::Game;

/// Rating of one chart for `game`.
///
/// `achievement` is percent x 10000 for maimai and the raw score for CHUNITHM.
pub fn calculate(game: Game, level: InternalLevel, achievement: u32) -> f64 {
    match game {
        Game::Maimai => maimai::calculate_rating(level, achievement) as f64,
        Game::Chunithm => chunithm::calculate_rating(level, achievement),
    }
}

/// Largest difference between a provider rating and the local value that is
/// still treated as agreement.
pub fn tolerance(game: Game) -> f64 {
    match game {
        Game::Maimai => 1.0,
        Game::Chunithm => 0.01,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch() {
        let level = InternalLevel::from_f64(13.2);
        assert_eq!(calculate(Game::Maimai, level, 1_004_000), 286.0);
        assert_eq!(calculate(Game::Chunithm, level, 1_009_000), 15.35);
    }
}

//! Rating command: rate a single chart offline.

use anyhow::{Result, ensure};
use scorecard_core::score::achievement_from_percent;
use scorecard_core::{Game, InternalLevel, Rank, rating};

/// Achievement in the canonical unit: percent x 10000 for maimai, raw
/// score for CHUNITHM.
pub fn canonical_achievement(game: Game, achievement: f64) -> u32 {
    match game {
        Game::Maimai => achievement_from_percent(achievement),
        Game::Chunithm => achievement.clamp(0.0, game.max_achievement() as f64).round() as u32,
    }
}

pub fn run(game: Game, level: f64, achievement: f64) -> Result<()> {
    ensure!(
        level.is_finite() && level >= 0.0,
        "Level must be a non-negative number"
    );
    ensure!(achievement.is_finite(), "Achievement must be a number");

    let level = InternalLevel::from_f64(level);
    let achievement = canonical_achievement(game, achievement);
    let value = rating::calculate(game, level, achievement);
    let rank = Rank::from_achievement(game, achievement);
    match game {
        Game::Maimai => println!("{} {} -> {} ({})", game.title(), level, value, rank),
        Game::Chunithm => println!("{} {} -> {:.2} ({})", game.title(), level, value, rank),
    }
    Ok(())
}

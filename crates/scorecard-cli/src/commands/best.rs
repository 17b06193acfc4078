//! Best command: fetch and print a player's best scores.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result, bail};
use scorecard_core::{BestScores, Game, ProviderKind, Score};

use crate::cli_utils;

pub async fn run(
    config: &Path,
    token: Option<String>,
    provider: ProviderKind,
    game: Game,
    player: &str,
    json: bool,
) -> Result<()> {
    let service = cli_utils::open_service(config, provider, token)?;
    let Some(best) = service.best_scores(game, player).await else {
        bail!(
            "Could not fetch {} bests for {} from {}",
            game.title(),
            player,
            provider
        );
    };

    if json {
        let content =
            serde_json::to_string_pretty(&best).context("Failed to serialize best scores")?;
        println!("{}", content);
    } else {
        print!("{}", format_best(game, player, &best));
    }
    Ok(())
}

fn pool_titles(best: &BestScores) -> (&'static str, &'static str) {
    match best {
        BestScores::Versioned { .. } => ("New", "Old"),
        BestScores::Recent { .. } => ("Recent", "Best"),
    }
}

fn format_rating(game: Game, rating: f64) -> String {
    match game {
        Game::Maimai => format!("{:.0}", rating),
        Game::Chunithm => format!("{:.2}", rating),
    }
}

fn format_achievement(score: &Score) -> String {
    match score.chart.game {
        Game::Maimai => format!("{:.4}%", score.achievement_display()),
        Game::Chunithm => score.achievement.to_string(),
    }
}

fn format_row(index: usize, score: &Score) -> String {
    let lamp = [score.combo.short_name(), score.sync.short_name()]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "{:>3}  {:>7}  {:>10}  {:<4}  {:<7}  {:<11} {:>5}  {}",
        index + 1,
        format_rating(score.chart.game, score.rating),
        format_achievement(score),
        score.rank.short_name(),
        lamp,
        score.chart.difficulty.short_name(),
        score.chart.level.to_string(),
        score.chart.name
    )
}

/// Render both pools as a plain-text table.
pub fn format_best(game: Game, player: &str, best: &BestScores) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} bests for {} (rating {})",
        game.title(),
        player,
        format_rating(game, best.total_rating())
    );

    let (first_title, second_title) = pool_titles(best);
    let (first, second) = best.pools();
    for (title, pool) in [(first_title, first), (second_title, second)] {
        let subtotal: f64 = pool.iter().map(|s| s.rating).sum();
        let _ = writeln!(
            out,
            "\n{} ({} charts, {})",
            title,
            pool.len(),
            format_rating(game, subtotal)
        );
        for (index, score) in pool.iter().enumerate() {
            let _ = writeln!(out, "{}", format_row(index, score));
        }
    }
    out
}

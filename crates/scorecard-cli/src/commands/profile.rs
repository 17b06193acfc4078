//! Profile command: show a player's name and rating.

use std::path::Path;

use anyhow::{Result, bail};
use scorecard_core::{Game, ProviderKind};

use crate::cli_utils;

pub async fn run(
    config: &Path,
    token: Option<String>,
    provider: ProviderKind,
    game: Game,
    player: &str,
) -> Result<()> {
    let service = cli_utils::open_service(config, provider, token)?;
    let Some(profile) = service.profile(game, player).await else {
        bail!("Could not fetch {} profile for {} from {}", game.title(), player, provider);
    };
    println!("{}: {} ({})", game.title(), profile.name, profile.rating);
    Ok(())
}

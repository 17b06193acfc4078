//! CLI argument definitions for scorecard.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use scorecard_core::{Game, ProviderKind};

#[derive(Parser)]
#[command(name = "scorecard")]
#[command(about = "Rhythm game best-score fetcher", version)]
pub struct Args {
    /// Path to config file
    #[arg(short, long, global = true, default_value = "scorecard.toml")]
    pub config: PathBuf,

    /// Provider token (overrides the config file)
    #[arg(long, global = true, env = "SCORECARD_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch a player's best scores
    Best {
        /// Score provider (lxns, divingfish, kamaitachi)
        #[arg(short, long)]
        provider: ProviderKind,
        /// Game title (maimai, chunithm)
        #[arg(short, long)]
        game: Game,
        /// Player identifier at the provider
        #[arg(long)]
        player: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a player's name and rating
    Profile {
        /// Score provider (lxns, divingfish, kamaitachi)
        #[arg(short, long)]
        provider: ProviderKind,
        /// Game title (maimai, chunithm)
        #[arg(short, long)]
        game: Game,
        /// Player identifier at the provider
        #[arg(long)]
        player: String,
    },
    /// Rate a single chart
    Rating {
        /// Game title (maimai, chunithm)
        #[arg(short, long)]
        game: Game,
        /// Internal level (e.g. 13.7)
        #[arg(long)]
        level: f64,
        /// Achievement percent (maimai) or score (CHUNITHM)
        #[arg(long)]
        achievement: f64,
    },
}

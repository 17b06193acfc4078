mod cli;
mod cli_utils;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (warn unless RUST_LOG says otherwise)
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("scorecard=warn,scorecard_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Best {
            provider,
            game,
            player,
            json,
        } => commands::best::run(&args.config, args.token, provider, game, &player, json).await,
        Command::Profile {
            provider,
            game,
            player,
        } => commands::profile::run(&args.config, args.token, provider, game, &player).await,
        Command::Rating {
            game,
            level,
            achievement,
        } => commands::rating::run(game, level, achievement),
    }
}

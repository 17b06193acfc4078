pub mod chart;
pub mod config;
pub mod error;
pub mod game;
pub mod network;
pub mod provider;
pub mod rating;
pub mod score;
pub mod service;
pub mod version;

pub use chart::{
    Chart, ChartDatabase, ChartKey, ChartKind, ChartList, ChartResolver, Difficulty,
    InternalLevel, LocalChart, LocalChartDatabase,
};
pub use config::Config;
pub use error::{Error, Result};
pub use game::Game;
pub use network::{CachedClient, HttpSource, JsonSource, ResponseCache};
pub use provider::{Provider, ProviderKind, RawBests};
pub use score::{BestScores, ClearTier, ComboTier, Profile, Rank, Score, SyncTier};
pub use service::ScoreService;
pub use version::{Region, Version};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::config::ttl;
use crate::error::Result;
use crate::game::Game;
use crate::version::{self, Version};

/// Connection settings for one provider
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Overrides the provider's public endpoint
    pub base_url: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Local chart database (JSON); provider song lists are used when absent
    pub path: Option<PathBuf>,
}

/// Current release per game, by name
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VersionSettings {
    pub maimai: Option<String>,
    pub chunithm: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub song_list_ttl_secs: u64,
    pub divingfish_song_list_ttl_secs: u64,
    pub api_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            song_list_ttl_secs: ttl::SONG_LIST.as_secs(),
            divingfish_song_list_ttl_secs: ttl::DIVINGFISH_SONG_LIST.as_secs(),
            api_ttl_secs: ttl::API_RESPONSE.as_secs(),
        }
    }
}

impl CacheSettings {
    pub fn song_list(&self) -> Duration {
        Duration::from_secs(self.song_list_ttl_secs)
    }

    pub fn divingfish_song_list(&self) -> Duration {
        Duration::from_secs(self.divingfish_song_list_ttl_secs)
    }

    pub fn api(&self) -> Duration {
        Duration::from_secs(self.api_ttl_secs)
    }
}

/// Application configuration, loaded from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub lxns: ProviderSettings,
    pub divingfish: ProviderSettings,
    pub kamaitachi: ProviderSettings,
    pub database: DatabaseSettings,
    pub versions: VersionSettings,
    pub cache: CacheSettings,
}

impl Config {
    /// Load config from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse config from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// The configured current release for `game`; the newest known release
    /// when unset or unrecognized.
    pub fn current_version(&self, game: Game) -> Version {
        let configured = match game {
            Game::Maimai => self.versions.maimai.as_deref(),
            Game::Chunithm => self.versions.chunithm.as_deref(),
        };
        match configured {
            Some(name) => version::find_by_name(game, name).unwrap_or_else(|| {
                let latest = version::latest(game);
                warn!(
                    "Unknown {} version {:?}, using {}",
                    game.title(),
                    name,
                    latest.name
                );
                latest
            }),
            None => version::latest(game),
        }
    }
}

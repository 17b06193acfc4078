//! Score providers.
//!
//! Each provider module parses its own wire payloads and converts them to
//! canonical scores. [`RawBests`] holds whichever payload was fetched and
//! dispatches to the matching conversion.

pub mod divingfish;
pub mod kamaitachi;
pub mod lxns;
pub mod ranking;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

use crate::chart::{ChartList, ChartResolver};
use crate::config::{CacheSettings, Config};
use crate::error::Result;
use crate::game::Game;
use crate::network::{AuthHeader, HttpSource, JsonSource, ResponseCache};
use crate::score::{BestScores, Profile};
use crate::version::Version;

pub use divingfish::{DivingFishClient, DivingFishRecords};
pub use kamaitachi::{KamaiTachiBests, KamaiTachiClient};
pub use lxns::{LxnsBests, LxnsClient};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderKind {
    Lxns,
    #[strum(to_string = "divingfish", serialize = "df")]
    DivingFish,
    #[strum(to_string = "kamaitachi", serialize = "kt")]
    KamaiTachi,
}

impl ProviderKind {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::Lxns => "https://maimai.lxns.net",
            Self::DivingFish => "https://www.diving-fish.com",
            Self::KamaiTachi => "https://kamai.tachi.ac",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A best-score payload as returned by one provider.
#[derive(Debug, Clone)]
pub enum RawBests {
    Lxns(LxnsBests),
    DivingFish(DivingFishRecords),
    KamaiTachi(KamaiTachiBests),
}

impl RawBests {
    pub fn provider(&self) -> ProviderKind {
        match self {
            Self::Lxns(_) => ProviderKind::Lxns,
            Self::DivingFish(_) => ProviderKind::DivingFish,
            Self::KamaiTachi(_) => ProviderKind::KamaiTachi,
        }
    }

    pub fn game(&self) -> Game {
        match self {
            Self::Lxns(raw) => raw.game(),
            Self::DivingFish(raw) => raw.game(),
            Self::KamaiTachi(raw) => raw.game(),
        }
    }

    /// Charts shipped inside the payload itself, if the provider does that.
    pub fn embedded_charts(&self) -> Option<ChartList> {
        match self {
            Self::KamaiTachi(raw) => Some(raw.chart_list()),
            Self::Lxns(_) | Self::DivingFish(_) => None,
        }
    }

    /// Convert to canonical best scores. Entries whose chart cannot be
    /// resolved are dropped.
    pub fn to_canonical(&self, resolver: &ChartResolver, current: &Version) -> BestScores {
        match self {
            Self::Lxns(raw) => raw.to_canonical(resolver, current),
            Self::DivingFish(raw) => raw.to_canonical(resolver, current),
            Self::KamaiTachi(raw) => raw.to_canonical(resolver, current),
        }
    }
}

/// A configured provider client.
pub enum Provider<S> {
    Lxns(LxnsClient<S>),
    DivingFish(DivingFishClient<S>),
    KamaiTachi(KamaiTachiClient<S>),
}

impl<S: JsonSource> Provider<S> {
    pub fn new(kind: ProviderKind, source: S, cache: Arc<ResponseCache>, ttl: CacheSettings) -> Self {
        match kind {
            ProviderKind::Lxns => Self::Lxns(LxnsClient::new(source, cache, ttl)),
            ProviderKind::DivingFish => Self::DivingFish(DivingFishClient::new(source, cache, ttl)),
            ProviderKind::KamaiTachi => Self::KamaiTachi(KamaiTachiClient::new(source, cache, ttl)),
        }
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Lxns(_) => ProviderKind::Lxns,
            Self::DivingFish(_) => ProviderKind::DivingFish,
            Self::KamaiTachi(_) => ProviderKind::KamaiTachi,
        }
    }

    pub async fn bests(&self, game: Game, player: &str) -> Option<RawBests> {
        match self {
            Self::Lxns(client) => client.bests(game, player).await.map(RawBests::Lxns),
            Self::DivingFish(client) => client.records(game, player).await.map(RawBests::DivingFish),
            Self::KamaiTachi(client) => client.bests(game, player).await.map(RawBests::KamaiTachi),
        }
    }

    /// The provider's song list. Kamaitachi has none; its charts come with
    /// the bests payload.
    pub async fn chart_list(&self, game: Game) -> Option<ChartList> {
        match self {
            Self::Lxns(client) => client.chart_list(game).await,
            Self::DivingFish(client) => client.chart_list(game).await,
            Self::KamaiTachi(_) => None,
        }
    }

    pub async fn profile(&self, game: Game, player: &str) -> Option<Profile> {
        match self {
            Self::Lxns(client) => client.profile(game, player).await,
            Self::DivingFish(client) => client.profile(game, player).await,
            Self::KamaiTachi(client) => client.profile(game, player).await,
        }
    }
}

impl Provider<HttpSource> {
    /// HTTP-backed provider using the base URL and token from `config`.
    pub fn from_config(kind: ProviderKind, config: &Config, cache: Arc<ResponseCache>) -> Result<Self> {
        let settings = match kind {
            ProviderKind::Lxns => &config.lxns,
            ProviderKind::DivingFish => &config.divingfish,
            ProviderKind::KamaiTachi => &config.kamaitachi,
        };
        let auth = settings.token.as_deref().map(|token| match kind {
            ProviderKind::Lxns => AuthHeader::authorization(token),
            ProviderKind::DivingFish => AuthHeader::custom("developer-token", token),
            ProviderKind::KamaiTachi => AuthHeader::bearer(token),
        });
        let base_url = settings
            .base_url
            .as_deref()
            .unwrap_or(kind.default_base_url());
        let source = HttpSource::new(kind.name(), base_url, auth)?;
        Ok(Self::new(kind, source, cache, config.cache.clone()))
    }
}

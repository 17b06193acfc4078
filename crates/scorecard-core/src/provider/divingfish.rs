//! Diving-Fish prober adapter.
//!
//! The developer records endpoint returns every maimai record the player has
//! uploaded, so both pools are derived locally. CHUNITHM records come as
//! `b30` / `r10` and keep the recent-style layout.

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::chart::{Chart, ChartKind, ChartList, ChartResolver, Difficulty, InternalLevel};
use crate::config::{CacheSettings, pools};
use crate::error::Result;
use crate::game::Game;
use crate::network::{CachedClient, JsonSource, ResponseCache};
use crate::provider::ranking::{self, PoolHint};
use crate::score::{
    BestScores, ClearTier, ComboTier, Profile, Rank, Score, SyncTier, achievement_from_percent,
};
use crate::version::{self, Version};

const PROVIDER: &str = "Diving-Fish";

fn prober(game: Game) -> &'static str {
    match game {
        Game::Maimai => "maimaidxprober",
        Game::Chunithm => "chunithmprober",
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaimaiRecord {
    pub song_id: u32,
    #[serde(default)]
    pub title: String,
    pub level_index: u8,
    pub achievements: f64,
    #[serde(default)]
    pub fc: String,
    #[serde(default)]
    pub fs: String,
    #[serde(rename = "dxScore", default)]
    pub dx_score: Option<u32>,
    #[serde(default)]
    pub ra: Option<f64>,
    #[serde(default)]
    pub rate: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: ChartKind,
}

impl MaimaiRecord {
    fn to_canonical(&self, resolver: &ChartResolver) -> Option<Score> {
        let Some(chart) = resolver.resolve(self.song_id, self.kind, self.level_index) else {
            debug!(
                "Dropping {} record for unknown chart {} #{} ({})",
                PROVIDER, self.song_id, self.level_index, self.title
            );
            return None;
        };
        let achievement = achievement_from_percent(self.achievements);
        Some(Score {
            rating: ranking::finalize_rating(self.ra, &chart, achievement),
            chart,
            achievement,
            bonus_score: self.dx_score,
            combo: ComboTier::from_maimai_code(&self.fc),
            sync: SyncTier::from_code(&self.fs),
            clear: ClearTier::None,
            rank: self
                .rate
                .as_deref()
                .map(Rank::from_rate_code)
                .unwrap_or_else(|| Rank::from_achievement(Game::Maimai, achievement)),
            achieved_at: None,
        })
    }
}

/// `GET /api/maimaidxprober/dev/player/records` payload
#[derive(Debug, Clone, Deserialize)]
pub struct MaimaiRecords {
    pub username: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub records: Vec<MaimaiRecord>,
}

impl MaimaiRecords {
    pub fn to_canonical(&self, resolver: &ChartResolver, current: &Version) -> BestScores {
        let scores = self
            .records
            .iter()
            .filter_map(|raw| raw.to_canonical(resolver))
            .map(|score| (score, PoolHint::Old))
            .collect();
        ranking::partition_by_version(scores, current)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunithmRecord {
    pub mid: u32,
    #[serde(default)]
    pub title: String,
    pub level_index: u8,
    pub score: u32,
    #[serde(default)]
    pub fc: String,
    #[serde(default)]
    pub ra: Option<f64>,
}

impl ChunithmRecord {
    fn to_canonical(&self, resolver: &ChartResolver) -> Option<Score> {
        let Some(chart) = resolver.resolve(self.mid, ChartKind::Standard, self.level_index) else {
            debug!(
                "Dropping {} record for unknown chart {} #{} ({})",
                PROVIDER, self.mid, self.level_index, self.title
            );
            return None;
        };
        let achievement = self.score.min(Game::Chunithm.max_achievement());
        Some(Score {
            rating: ranking::finalize_rating(self.ra, &chart, achievement),
            chart,
            achievement,
            bonus_score: None,
            combo: ComboTier::from_chunithm_code(&self.fc),
            sync: SyncTier::None,
            clear: ClearTier::None,
            // no grade field in these records
            rank: Rank::from_achievement(Game::Chunithm, achievement),
            achieved_at: None,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChunithmPools {
    pub b30: Vec<ChunithmRecord>,
    pub r10: Vec<ChunithmRecord>,
}

/// `GET /api/chunithmprober/dev/player/records` payload
#[derive(Debug, Clone, Deserialize)]
pub struct ChunithmRecords {
    pub username: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub records: ChunithmPools,
}

impl ChunithmRecords {
    pub fn to_canonical(&self, resolver: &ChartResolver) -> BestScores {
        let convert = |pool: &[ChunithmRecord]| -> Vec<Score> {
            pool.iter()
                .filter_map(|raw| raw.to_canonical(resolver))
                .collect()
        };
        BestScores::Recent {
            recent: ranking::rank_pool(convert(&self.records.r10), pools::CHUNITHM_RECENT),
            best: ranking::rank_pool(convert(&self.records.b30), pools::CHUNITHM_BEST),
        }
    }
}

/// Raw record payload from Diving-Fish
#[derive(Debug, Clone)]
pub enum DivingFishRecords {
    Maimai(MaimaiRecords),
    Chunithm(ChunithmRecords),
}

impl DivingFishRecords {
    pub fn game(&self) -> Game {
        match self {
            Self::Maimai(_) => Game::Maimai,
            Self::Chunithm(_) => Game::Chunithm,
        }
    }

    pub fn to_canonical(&self, resolver: &ChartResolver, current: &Version) -> BestScores {
        match self {
            Self::Maimai(records) => records.to_canonical(resolver, current),
            Self::Chunithm(records) => records.to_canonical(resolver),
        }
    }

    pub fn profile(&self) -> Profile {
        let (username, nickname, rating) = match self {
            Self::Maimai(r) => (&r.username, &r.nickname, r.rating),
            Self::Chunithm(r) => (&r.username, &r.nickname, r.rating),
        };
        let name = nickname
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(username.as_str());
        Profile {
            name: name.to_string(),
            rating,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Music {
    // string for maimai, number for CHUNITHM
    id: Value,
    title: String,
    #[serde(default)]
    ds: Vec<f64>,
    #[serde(default)]
    charts: Vec<MusicChart>,
    basic_info: BasicInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MusicChart {
    notes: Vec<u32>,
}

#[derive(Debug, Deserialize)]
struct BasicInfo {
    #[serde(default)]
    from: String,
}

fn music_id(id: &Value) -> Option<u32> {
    match id {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Build a chart list from a `music_data` document.
///
/// maimai ids are already offset by chart kind.
pub fn chart_list_from_value(game: Game, value: &Value) -> Result<ChartList> {
    let music: Vec<Music> = Vec::deserialize(value)?;
    let mut charts = ChartList::new();
    for song in music {
        let Some(song_id) = music_id(&song.id) else {
            debug!("Skipping {} song with id {}", PROVIDER, song.id);
            continue;
        };
        let kind = match game {
            Game::Maimai => ChartKind::of_canonical_id(song_id),
            Game::Chunithm => ChartKind::Standard,
        };
        let title: Arc<str> = Arc::from(song.title);
        let version = version::find_by_name(game, &song.basic_info.from);
        for (index, level) in song.ds.iter().enumerate() {
            let difficulty = match kind {
                ChartKind::Utage => Some(Difficulty::Utage),
                _ => u8::try_from(index)
                    .ok()
                    .and_then(|i| Difficulty::from_level_index(game, i)),
            };
            let Some(difficulty) = difficulty else {
                continue;
            };
            let max_bonus_score = match game {
                Game::Maimai => song
                    .charts
                    .get(index)
                    .map(|c| Chart::dx_score_ceiling(c.notes.iter().sum()))
                    .unwrap_or(0),
                Game::Chunithm => 0,
            };
            charts.insert(Chart {
                game,
                song_id,
                difficulty,
                kind,
                name: title.clone(),
                level: InternalLevel::from_f64(*level),
                max_bonus_score,
                version,
            });
        }
    }
    Ok(charts)
}

pub struct DivingFishClient<S> {
    http: CachedClient<S>,
    ttl: CacheSettings,
}

impl<S: JsonSource> DivingFishClient<S> {
    pub fn new(source: S, cache: Arc<ResponseCache>, ttl: CacheSettings) -> Self {
        Self {
            http: CachedClient::new(source, cache),
            ttl,
        }
    }

    async fn fetch_records<T: DeserializeOwned>(&self, game: Game, player: &str) -> Option<T> {
        let path = format!("/api/{}/dev/player/records", prober(game));
        let query = [("username".to_string(), player.to_string())];
        self.http.get_as(&path, &query, self.ttl.api()).await
    }

    pub async fn records(&self, game: Game, player: &str) -> Option<DivingFishRecords> {
        match game {
            Game::Maimai => self
                .fetch_records(game, player)
                .await
                .map(DivingFishRecords::Maimai),
            Game::Chunithm => self
                .fetch_records(game, player)
                .await
                .map(DivingFishRecords::Chunithm),
        }
    }

    pub async fn chart_list(&self, game: Game) -> Option<ChartList> {
        let path = format!("/api/{}/music_data", prober(game));
        let value = self
            .http
            .get(&path, &[], self.ttl.divingfish_song_list())
            .await?;
        chart_list_from_value(game, &value)
            .inspect_err(|e| warn!("{} music data is malformed: {}", PROVIDER, e))
            .ok()
    }

    pub async fn profile(&self, game: Game, player: &str) -> Option<Profile> {
        self.records(game, player).await.map(|r| r.profile())
    }
}

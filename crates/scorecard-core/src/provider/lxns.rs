//! LXNS (maimai.lxns.net) adapter.
//!
//! Bests arrive already split into a current-version pool (`dx` for maimai,
//! `new_bests` for CHUNITHM) and an older pool; the split is recomputed
//! against the configured current version and used only as a fallback hint.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::chart::{Chart, ChartKind, ChartList, ChartResolver, Difficulty, InternalLevel};
use crate::config::CacheSettings;
use crate::error::{Error, Result};
use crate::game::Game;
use crate::network::{CachedClient, JsonSource, ResponseCache};
use crate::provider::ranking::{self, PoolHint};
use crate::score::{
    BestScores, ClearTier, ComboTier, Profile, Rank, Score, SyncTier, achievement_from_percent,
};
use crate::version::{self, Version};

const PROVIDER: &str = "LXNS";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    data: Option<T>,
}

impl<T> Envelope<T> {
    fn into_data(self) -> Result<T> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(Error::MalformedResponse {
                provider: PROVIDER.to_string(),
                message: self.message.unwrap_or_else(|| "request unsuccessful".to_string()),
            }),
        }
    }
}

fn parse_upload_time(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaimaiScore {
    pub id: u32,
    #[serde(default)]
    pub song_name: String,
    pub level_index: u8,
    pub achievements: f64,
    #[serde(default)]
    pub fc: Option<String>,
    #[serde(default)]
    pub fs: Option<String>,
    #[serde(default)]
    pub dx_score: Option<u32>,
    #[serde(default)]
    pub dx_rating: Option<f64>,
    #[serde(default)]
    pub rate: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: ChartKind,
    #[serde(default)]
    pub upload_time: Option<String>,
}

/// `GET /api/v0/maimai/player/{id}/bests` payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MaimaiBests {
    pub standard: Vec<MaimaiScore>,
    pub dx: Vec<MaimaiScore>,
}

impl MaimaiScore {
    fn to_canonical(&self, resolver: &ChartResolver) -> Option<Score> {
        let Some(chart) = resolver.resolve(self.id, self.kind, self.level_index) else {
            debug!(
                "Dropping {} score for unknown chart {} {} #{} ({})",
                PROVIDER,
                self.kind.short_name(),
                self.id,
                self.level_index,
                self.song_name
            );
            return None;
        };
        let achievement = achievement_from_percent(self.achievements);
        let rank = match self.rate.as_deref() {
            Some(code) => Rank::from_rate_code(code),
            None => Rank::from_achievement(Game::Maimai, achievement),
        };
        Some(Score {
            rating: ranking::finalize_rating(self.dx_rating, &chart, achievement),
            chart,
            achievement,
            bonus_score: self.dx_score,
            combo: self.fc.as_deref().map(ComboTier::from_maimai_code).unwrap_or_default(),
            sync: self.fs.as_deref().map(SyncTier::from_code).unwrap_or_default(),
            clear: ClearTier::None,
            rank,
            achieved_at: parse_upload_time(self.upload_time.as_deref()),
        })
    }
}

impl MaimaiBests {
    pub fn to_canonical(&self, resolver: &ChartResolver, current: &Version) -> BestScores {
        let hinted = self
            .dx
            .iter()
            .map(|s| (s, PoolHint::New))
            .chain(self.standard.iter().map(|s| (s, PoolHint::Old)));
        let scores = hinted
            .filter_map(|(raw, hint)| raw.to_canonical(resolver).map(|score| (score, hint)))
            .collect();
        ranking::partition_by_version(scores, current)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunithmScore {
    pub id: u32,
    #[serde(default)]
    pub song_name: String,
    pub level_index: u8,
    pub score: u32,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub full_combo: Option<String>,
    #[serde(default)]
    pub clear: Option<String>,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub upload_time: Option<String>,
}

/// `GET /api/v0/chunithm/player/{id}/bests` payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChunithmBests {
    pub bests: Vec<ChunithmScore>,
    pub new_bests: Vec<ChunithmScore>,
}

impl ChunithmScore {
    fn to_canonical(&self, resolver: &ChartResolver) -> Option<Score> {
        let Some(chart) = resolver.resolve(self.id, ChartKind::Standard, self.level_index) else {
            debug!(
                "Dropping {} score for unknown chart {} #{} ({})",
                PROVIDER, self.id, self.level_index, self.song_name
            );
            return None;
        };
        let achievement = self.score.min(Game::Chunithm.max_achievement());
        let rank = match self.rank.as_deref() {
            Some(code) => Rank::from_rate_code(code),
            None => Rank::from_achievement(Game::Chunithm, achievement),
        };
        Some(Score {
            rating: ranking::finalize_rating(self.rating, &chart, achievement),
            chart,
            achievement,
            bonus_score: None,
            combo: self
                .full_combo
                .as_deref()
                .map(ComboTier::from_chunithm_code)
                .unwrap_or_default(),
            sync: SyncTier::None,
            clear: self.clear.as_deref().map(ClearTier::from_code).unwrap_or_default(),
            rank,
            achieved_at: parse_upload_time(self.upload_time.as_deref()),
        })
    }
}

impl ChunithmBests {
    pub fn to_canonical(&self, resolver: &ChartResolver, current: &Version) -> BestScores {
        let hinted = self
            .new_bests
            .iter()
            .map(|s| (s, PoolHint::New))
            .chain(self.bests.iter().map(|s| (s, PoolHint::Old)));
        let scores = hinted
            .filter_map(|(raw, hint)| raw.to_canonical(resolver).map(|score| (score, hint)))
            .collect();
        ranking::partition_by_version(scores, current)
    }
}

#[derive(Debug, Deserialize)]
struct SongList<D> {
    songs: Vec<Song<D>>,
}

#[derive(Debug, Deserialize)]
struct Song<D> {
    id: u32,
    title: String,
    #[serde(default)]
    version: u32,
    difficulties: D,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MaimaiDifficulties {
    standard: Vec<SongDifficulty>,
    dx: Vec<SongDifficulty>,
    utage: Vec<SongDifficulty>,
}

#[derive(Debug, Deserialize)]
struct SongDifficulty {
    difficulty: u8,
    level_value: f64,
    #[serde(default)]
    version: Option<u32>,
    #[serde(default)]
    notes: Option<Value>,
}

impl SongDifficulty {
    fn total_notes(&self) -> Option<u32> {
        self.notes
            .as_ref()?
            .get("total")?
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
    }
}

fn song_chart(
    game: Game,
    song_id: u32,
    title: &Arc<str>,
    song_version: u32,
    kind: ChartKind,
    entry: &SongDifficulty,
) -> Option<Chart> {
    let difficulty = match kind {
        ChartKind::Utage => Difficulty::Utage,
        _ => Difficulty::from_level_index(game, entry.difficulty)?,
    };
    let code = entry.version.unwrap_or(song_version);
    Some(Chart {
        game,
        song_id: kind.canonical_id(song_id),
        difficulty,
        kind,
        name: title.clone(),
        level: InternalLevel::from_f64(entry.level_value),
        max_bonus_score: match game {
            Game::Maimai => entry.total_notes().map(Chart::dx_score_ceiling).unwrap_or(0),
            Game::Chunithm => 0,
        },
        version: version::find_by_code(game, code),
    })
}

fn maimai_chart_list(list: SongList<MaimaiDifficulties>) -> ChartList {
    let mut charts = ChartList::new();
    for song in list.songs {
        let title: Arc<str> = Arc::from(song.title);
        let tables = [
            (ChartKind::Standard, &song.difficulties.standard),
            (ChartKind::Deluxe, &song.difficulties.dx),
            (ChartKind::Utage, &song.difficulties.utage),
        ];
        for (kind, entries) in tables {
            for entry in entries {
                if let Some(chart) =
                    song_chart(Game::Maimai, song.id, &title, song.version, kind, entry)
                {
                    charts.insert(chart);
                }
            }
        }
    }
    charts
}

fn chunithm_chart_list(list: SongList<Vec<SongDifficulty>>) -> ChartList {
    let mut charts = ChartList::new();
    for song in list.songs {
        let title: Arc<str> = Arc::from(song.title);
        for entry in &song.difficulties {
            if let Some(chart) = song_chart(
                Game::Chunithm,
                song.id,
                &title,
                song.version,
                ChartKind::Standard,
                entry,
            ) {
                charts.insert(chart);
            }
        }
    }
    charts
}

/// Build a chart list from a `/song/list` document.
pub fn chart_list_from_value(game: Game, value: &Value) -> Result<ChartList> {
    Ok(match game {
        Game::Maimai => maimai_chart_list(SongList::deserialize(value)?),
        Game::Chunithm => chunithm_chart_list(SongList::deserialize(value)?),
    })
}

#[derive(Debug, Deserialize)]
struct PlayerData {
    name: String,
    #[serde(default)]
    rating: f64,
}

/// Raw best-score payload from LXNS
#[derive(Debug, Clone)]
pub enum LxnsBests {
    Maimai(MaimaiBests),
    Chunithm(ChunithmBests),
}

impl LxnsBests {
    pub fn game(&self) -> Game {
        match self {
            Self::Maimai(_) => Game::Maimai,
            Self::Chunithm(_) => Game::Chunithm,
        }
    }

    pub fn to_canonical(&self, resolver: &ChartResolver, current: &Version) -> BestScores {
        match self {
            Self::Maimai(bests) => bests.to_canonical(resolver, current),
            Self::Chunithm(bests) => bests.to_canonical(resolver, current),
        }
    }
}

pub struct LxnsClient<S> {
    http: CachedClient<S>,
    ttl: CacheSettings,
}

impl<S: JsonSource> LxnsClient<S> {
    pub fn new(source: S, cache: Arc<ResponseCache>, ttl: CacheSettings) -> Self {
        Self {
            http: CachedClient::new(source, cache),
            ttl,
        }
    }

    async fn data<T: DeserializeOwned>(&self, path: &str, query: &[(String, String)]) -> Option<T> {
        let envelope: Envelope<T> = self.http.get_as(path, query, self.ttl.api()).await?;
        envelope
            .into_data()
            .inspect_err(|e| warn!("{} {}: {}", PROVIDER, path, e))
            .ok()
    }

    pub async fn bests(&self, game: Game, player: &str) -> Option<LxnsBests> {
        let path = format!("/api/v0/{}/player/{}/bests", game.short_name(), player);
        match game {
            Game::Maimai => self.data(&path, &[]).await.map(LxnsBests::Maimai),
            Game::Chunithm => self.data(&path, &[]).await.map(LxnsBests::Chunithm),
        }
    }

    pub async fn chart_list(&self, game: Game) -> Option<ChartList> {
        let path = format!("/api/v0/{}/song/list", game.short_name());
        let query = [("notes".to_string(), "true".to_string())];
        let value = self.http.get(&path, &query, self.ttl.song_list()).await?;
        chart_list_from_value(game, &value)
            .inspect_err(|e| warn!("{} song list is malformed: {}", PROVIDER, e))
            .ok()
    }

    pub async fn profile(&self, game: Game, player: &str) -> Option<Profile> {
        let path = format!("/api/v0/{}/player/{}", game.short_name(), player);
        let player: PlayerData = self.data(&path, &[]).await?;
        Some(Profile {
            name: player.name,
            rating: player.rating,
        })
    }
}

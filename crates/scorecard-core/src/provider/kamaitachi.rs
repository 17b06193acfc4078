//! Kamaitachi adapter.
//!
//! Personal bests reference Kamaitachi chart ids; the charts and songs they
//! point to are embedded in the same payload and translated back to in-game
//! ids before resolution.

use std::collections::HashMap;
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
    BestScores, Profile, Rank, Score, SyncTier, achievement_from_percent,
    from_kamaitachi_lamp,
};
use crate::version::{self, Version};

const PROVIDER: &str = "Kamaitachi";

/// Game segment in Kamaitachi URLs
pub fn game_segment(game: Game) -> &'static str {
    match game {
        Game::Maimai => "maimaidx",
        Game::Chunithm => "chunithm",
    }
}

/// Map a Kamaitachi difficulty label ("DX Re:Master", "ULTIMA", ...) to the
/// chart kind and difficulty.
pub fn parse_difficulty(game: Game, label: &str) -> Option<(ChartKind, Difficulty)> {
    match game {
        Game::Maimai => {
            let (kind, name) = match label.strip_prefix("DX ") {
                Some(rest) => (ChartKind::Deluxe, rest),
                None => (ChartKind::Standard, label),
            };
            let difficulty = match name.to_ascii_lowercase().as_str() {
                "basic" => Difficulty::Basic,
                "advanced" => Difficulty::Advanced,
                "expert" => Difficulty::Expert,
                "master" => Difficulty::Master,
                "re:master" => Difficulty::ReMaster,
                "utage" => return Some((ChartKind::Utage, Difficulty::Utage)),
                _ => return None,
            };
            Some((kind, difficulty))
        }
        Game::Chunithm => {
            let difficulty = match label.to_ascii_uppercase().as_str() {
                "BASIC" => Difficulty::Basic,
                "ADVANCED" => Difficulty::Advanced,
                "EXPERT" => Difficulty::Expert,
                "MASTER" => Difficulty::Master,
                "ULTIMA" => Difficulty::Ultima,
                "WORLD'S END" => Difficulty::WorldsEnd,
                _ => return None,
            };
            Some((ChartKind::Standard, difficulty))
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    #[serde(default)]
    description: Option<String>,
    body: Option<T>,
}

impl<T> Envelope<T> {
    fn into_body(self) -> Result<T> {
        match (self.success, self.body) {
            (true, Some(body)) => Ok(body),
            _ => Err(Error::MalformedResponse {
                provider: PROVIDER.to_string(),
                message: self
                    .description
                    .unwrap_or_else(|| "request unsuccessful".to_string()),
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum InGameId {
    Single(u32),
    Multiple(Vec<u32>),
}

impl InGameId {
    fn primary(&self) -> Option<u32> {
        match self {
            Self::Single(id) => Some(*id),
            Self::Multiple(ids) => ids.first().copied(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartData {
    #[serde(rename = "inGameID")]
    pub in_game_id: Option<InGameId>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KtChart {
    #[serde(rename = "chartID")]
    pub chart_id: String,
    #[serde(rename = "songID")]
    pub song_id: u32,
    pub difficulty: String,
    #[serde(default)]
    pub level_num: f64,
    #[serde(default)]
    pub data: ChartData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SongData {
    pub display_version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KtSong {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub data: SongData,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreData {
    #[serde(default)]
    pub percent: Option<f64>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub lamp: String,
    #[serde(default)]
    pub grade: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CalculatedData {
    /// maimai DX rating
    pub rate: Option<f64>,
    /// CHUNITHM rating
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KtPb {
    #[serde(rename = "chartID")]
    pub chart_id: String,
    pub score_data: ScoreData,
    #[serde(default)]
    pub calculated_data: CalculatedData,
    /// Unix milliseconds
    #[serde(default)]
    pub time_achieved: Option<i64>,
}

/// `GET /api/v1/users/{user}/games/{game}/Single/pbs/best` body
#[derive(Deserialize)]
struct PbsBody {
    #[serde(default)]
    pbs: Vec<KtPb>,
    #[serde(default)]
    songs: Vec<KtSong>,
    #[serde(default)]
    charts: Vec<KtChart>,
}

/// Personal bests of one game, with the songs and charts they point to.
#[derive(Debug, Clone)]
pub struct KamaiTachiBests {
    game: Game,
    pub pbs: Vec<KtPb>,
    pub songs: Vec<KtSong>,
    pub charts: Vec<KtChart>,
}

impl KamaiTachiBests {
    fn from_body(game: Game, body: PbsBody) -> Self {
        Self {
            game,
            pbs: body.pbs,
            songs: body.songs,
            charts: body.charts,
        }
    }

    /// Decode a pbs body fetched for `game`.
    pub fn from_value(game: Game, value: &Value) -> Result<Self> {
        Ok(Self::from_body(game, PbsBody::deserialize(value)?))
    }

    pub fn game(&self) -> Game {
        self.game
    }

    fn in_game_key(&self, chart: &KtChart) -> Option<(u32, ChartKind, Difficulty)> {
        let (kind, difficulty) = parse_difficulty(self.game(), &chart.difficulty)?;
        let id = chart.data.in_game_id.as_ref()?.primary()?;
        Some((id, kind, difficulty))
    }

    /// Charts embedded in the payload, keyed like the local database.
    pub fn chart_list(&self) -> ChartList {
        let game = self.game();
        let songs: HashMap<u32, &KtSong> = self.songs.iter().map(|s| (s.id, s)).collect();
        let mut charts = ChartList::new();
        for chart in &self.charts {
            let Some((id, kind, difficulty)) = self.in_game_key(chart) else {
                continue;
            };
            let song = songs.get(&chart.song_id);
            let song_id = match game {
                Game::Maimai => kind.canonical_id(id),
                Game::Chunithm => id,
            };
            charts.insert(Chart {
                game,
                song_id,
                difficulty,
                kind,
                name: Arc::from(song.map(|s| s.title.as_str()).unwrap_or_default()),
                level: InternalLevel::from_f64(chart.level_num),
                max_bonus_score: 0,
                version: song
                    .and_then(|s| s.data.display_version.as_deref())
                    .and_then(|name| version::find_by_name(game, name)),
            });
        }
        charts
    }

    fn pb_to_canonical(
        &self,
        pb: &KtPb,
        charts: &HashMap<&str, &KtChart>,
        resolver: &ChartResolver,
    ) -> Option<Score> {
        let game = self.game();
        let resolved = charts
            .get(pb.chart_id.as_str())
            .and_then(|chart| self.in_game_key(chart))
            .and_then(|(id, kind, difficulty)| {
                resolver.resolve(id, kind, difficulty.level_index())
            });
        let Some(chart) = resolved else {
            debug!("Dropping {} pb for unknown chart {}", PROVIDER, pb.chart_id);
            return None;
        };

        let (achievement, provided) = match game {
            Game::Maimai => (
                achievement_from_percent(pb.score_data.percent.unwrap_or_default()),
                pb.calculated_data.rate,
            ),
            Game::Chunithm => (
                pb.score_data
                    .score
                    .map(|s| s.clamp(0.0, game.max_achievement() as f64) as u32)
                    .unwrap_or_default(),
                pb.calculated_data.rating,
            ),
        };
        let (combo, clear) = from_kamaitachi_lamp(&pb.score_data.lamp);
        let rank = match pb.score_data.grade.as_str() {
            "" => Rank::from_achievement(game, achievement),
            grade => Rank::from_grade_label(grade),
        };
        Some(Score {
            rating: ranking::finalize_rating(provided, &chart, achievement),
            chart,
            achievement,
            bonus_score: None,
            combo,
            sync: SyncTier::None,
            clear,
            rank,
            achieved_at: pb.time_achieved.and_then(DateTime::<Utc>::from_timestamp_millis),
        })
    }

    pub fn to_canonical(&self, resolver: &ChartResolver, current: &Version) -> BestScores {
        let charts: HashMap<&str, &KtChart> = self
            .charts
            .iter()
            .map(|c| (c.chart_id.as_str(), c))
            .collect();
        let scores = self
            .pbs
            .iter()
            .filter_map(|pb| self.pb_to_canonical(pb, &charts, resolver))
            .map(|score| (score, PoolHint::Old))
            .collect();
        ranking::partition_by_version(scores, current)
    }
}

#[derive(Debug, Deserialize)]
struct UserBody {
    username: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GameStatsBody {
    game_stats: GameStats,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GameStats {
    ratings: HashMap<String, Option<f64>>,
}

impl GameStats {
    fn rating(&self, game: Game) -> f64 {
        let key = match game {
            Game::Maimai => "rate",
            Game::Chunithm => "naiveRating",
        };
        self.ratings.get(key).copied().flatten().unwrap_or_default()
    }
}

pub struct KamaiTachiClient<S> {
    http: CachedClient<S>,
    ttl: CacheSettings,
}

impl<S: JsonSource> KamaiTachiClient<S> {
    pub fn new(source: S, cache: Arc<ResponseCache>, ttl: CacheSettings) -> Self {
        Self {
            http: CachedClient::new(source, cache),
            ttl,
        }
    }

    async fn body<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        let envelope: Envelope<T> = self.http.get_as(path, &[], self.ttl.api()).await?;
        envelope
            .into_body()
            .inspect_err(|e| warn!("{} {}: {}", PROVIDER, path, e))
            .ok()
    }

    pub async fn bests(&self, game: Game, user: &str) -> Option<KamaiTachiBests> {
        let path = format!(
            "/api/v1/users/{}/games/{}/Single/pbs/best",
            user,
            game_segment(game)
        );
        self.body::<PbsBody>(&path)
            .await
            .map(|body| KamaiTachiBests::from_body(game, body))
    }

    pub async fn profile(&self, game: Game, user: &str) -> Option<Profile> {
        let user_body: UserBody = self.body(&format!("/api/v1/users/{}", user)).await?;
        let stats: GameStatsBody = self
            .body(&format!(
                "/api/v1/users/{}/games/{}/Single",
                user,
                game_segment(game)
            ))
            .await?;
        Some(Profile {
            name: user_body.username,
            rating: stats.game_stats.rating(game),
        })
    }
}

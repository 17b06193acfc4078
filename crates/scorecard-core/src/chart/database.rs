use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::chart::{Chart, ChartKey, ChartKind, Difficulty, InternalLevel};
use crate::error::{Error, Result};
use crate::game::Game;
use crate::version::{self, EventVersion, ExistenceEvent, Region, Version};

/// Authoritative local chart data, consulted before any provider song list.
pub trait ChartDatabase: Send + Sync {
    fn has_local_database(&self) -> bool;

    fn get_local_chart(&self, game: Game, key: &ChartKey) -> Option<&LocalChart>;
}

/// A chart as recorded in the local database, with its level history.
#[derive(Debug, Clone)]
pub struct LocalChart {
    pub song_id: u32,
    pub difficulty: Difficulty,
    pub name: Arc<str>,
    pub max_bonus_score: u32,
    pub added_in: Option<(u16, u16)>,
    pub events: Vec<ExistenceEvent>,
}

impl LocalChart {
    /// Release that introduced the chart: `added_in`, else the oldest record.
    pub fn owning_version(&self, game: Game) -> Option<Version> {
        let (major, minor) = self.added_in.or_else(|| {
            self.events
                .iter()
                .map(|e| (e.version.major, e.version.minor))
                .min()
        })?;
        version::find_by_ordinal(game, major, minor)
    }

    pub fn to_chart(&self, game: Game) -> Chart {
        Chart {
            game,
            song_id: self.song_id,
            difficulty: self.difficulty,
            kind: ChartKind::of_canonical_id(self.song_id),
            name: self.name.clone(),
            level: version::select_current_level(&self.events),
            max_bonus_score: self.max_bonus_score,
            version: self.owning_version(game),
        }
    }
}

#[derive(Deserialize)]
struct DatabaseFile {
    game: Game,
    charts: Vec<ChartEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartEntry {
    song_id: u32,
    #[serde(default, rename = "type")]
    kind: Option<ChartKind>,
    difficulty: u8,
    name: String,
    #[serde(default)]
    max_bonus_score: u32,
    #[serde(default)]
    added_in: Option<Ordinal>,
    #[serde(default)]
    events: Vec<EventEntry>,
}

#[derive(Deserialize)]
struct Ordinal {
    major: u16,
    minor: u16,
}

#[derive(Deserialize)]
struct EventEntry {
    version: EventOrdinal,
    #[serde(default)]
    region: Region,
    data: EventData,
}

#[derive(Deserialize)]
struct EventOrdinal {
    major: u16,
    minor: u16,
    #[serde(default)]
    release: u16,
}

#[derive(Deserialize)]
struct EventData {
    level: f64,
}

/// JSON-backed chart database for one game.
#[derive(Debug, Clone)]
pub struct LocalChartDatabase {
    game: Game,
    charts: HashMap<ChartKey, LocalChart>,
}

impl LocalChartDatabase {
    /// Load a chart database from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let db = Self::parse(&content)?;
        info!(
            "Loaded {} {} charts from {:?}",
            db.len(),
            db.game,
            path.as_ref()
        );
        Ok(db)
    }

    /// Parse a chart database from JSON content
    pub fn parse(content: &str) -> Result<Self> {
        let file: DatabaseFile = serde_json::from_str(content)?;
        let game = file.game;
        let mut charts = HashMap::with_capacity(file.charts.len());

        for entry in file.charts {
            let difficulty = Difficulty::from_level_index(game, entry.difficulty).ok_or_else(|| {
                Error::ChartDatabase(format!(
                    "song {}: invalid difficulty index {}",
                    entry.song_id, entry.difficulty
                ))
            })?;
            let song_id = match entry.kind {
                Some(kind) => kind.canonical_id(entry.song_id),
                None => entry.song_id,
            };
            let events = entry
                .events
                .into_iter()
                .map(|e| ExistenceEvent {
                    version: EventVersion {
                        major: e.version.major,
                        minor: e.version.minor,
                        release: e.version.release,
                        region: e.region,
                    },
                    level: InternalLevel::from_f64(e.data.level),
                })
                .collect();

            let chart = LocalChart {
                song_id,
                difficulty,
                name: Arc::from(entry.name),
                max_bonus_score: entry.max_bonus_score,
                added_in: entry.added_in.map(|o| (o.major, o.minor)),
                events,
            };
            charts.insert(ChartKey::new(song_id, difficulty), chart);
        }

        Ok(Self { game, charts })
    }

    pub fn game(&self) -> Game {
        self.game
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

impl ChartDatabase for LocalChartDatabase {
    fn has_local_database(&self) -> bool {
        !self.charts.is_empty()
    }

    fn get_local_chart(&self, game: Game, key: &ChartKey) -> Option<&LocalChart> {
        if game != self.game {
            return None;
        }
        self.charts.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "game": "maimai",
        "charts": [
            {
                "songId": 834,
                "type": "dx",
                "difficulty": 3,
                "name": "PANDORA PARADOXXX",
                "maxBonusScore": 2838,
                "events": [
                    {"version": {"major": 20, "minor": 0, "release": 1}, "region": "JPN", "data": {"level": 14.5}},
                    {"version": {"major": 20, "minor": 0, "release": 1}, "region": "CHN", "data": {"level": 14.6}},
                    {"version": {"major": 22, "minor": 0}, "region": "INT", "data": {"level": 14.4}},
                    {"version": {"major": 22, "minor": 0}, "region": "JPN", "data": {"level": 14.7}}
                ]
            },
            {
                "songId": 11451,
                "difficulty": 4,
                "name": "Test Re:Master",
                "addedIn": {"major": 24, "minor": 0}
            }
        ]
    }"#;

    #[test]
    fn test_parse_applies_id_offset() {
        let db = LocalChartDatabase::parse(SAMPLE).unwrap();
        assert_eq!(db.len(), 2);
        let chart = db
            .get_local_chart(Game::Maimai, &ChartKey::new(10834, Difficulty::Master))
            .unwrap();
        assert_eq!(&*chart.name, "PANDORA PARADOXXX");
        assert_eq!(chart.events.len(), 4);
    }

    #[test]
    fn test_to_chart_selects_level() {
        let db = LocalChartDatabase::parse(SAMPLE).unwrap();
        let chart = db
            .get_local_chart(Game::Maimai, &ChartKey::new(10834, Difficulty::Master))
            .unwrap()
            .to_chart(Game::Maimai);
        // 22.0 outranks the 20.0 re-release; JPN outranks INT within 22.0
        assert_eq!(chart.level.hundredths(), 1470);
        assert_eq!(chart.kind, ChartKind::Deluxe);
        assert_eq!(chart.version.unwrap().name, "DX");
    }

    #[test]
    fn test_chart_without_events() {
        let db = LocalChartDatabase::parse(SAMPLE).unwrap();
        let chart = db
            .get_local_chart(Game::Maimai, &ChartKey::new(11451, Difficulty::ReMaster))
            .unwrap()
            .to_chart(Game::Maimai);
        assert!(chart.level.is_zero());
        assert_eq!(chart.version.unwrap().name, "BUDDiES");
    }

    #[test]
    fn test_other_game_is_not_found() {
        let db = LocalChartDatabase::parse(SAMPLE).unwrap();
        assert!(
            db.get_local_chart(Game::Chunithm, &ChartKey::new(10834, Difficulty::Master))
                .is_none()
        );
    }

    #[test]
    fn test_invalid_difficulty_rejected() {
        let content = r#"{"game": "chunithm", "charts": [{"songId": 1, "difficulty": 9, "name": "x"}]}"#;
        let err = LocalChartDatabase::parse(content).unwrap_err();
        assert!(matches!(err, Error::ChartDatabase(_)));
    }
}

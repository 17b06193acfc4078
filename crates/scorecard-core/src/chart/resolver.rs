use std::sync::Arc;

use crate::chart::{Chart, ChartDatabase, ChartKey, ChartKind, ChartList, Difficulty};
use crate::game::Game;

/// Maps provider `(song id, level index)` pairs to canonical charts.
///
/// A configured local database is authoritative; otherwise the provider's
/// song list is used. Both sources are keyed by the offset song id.
#[derive(Clone)]
pub struct ChartResolver {
    game: Game,
    local: Option<Arc<dyn ChartDatabase>>,
    remote: ChartList,
}

impl ChartResolver {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            local: None,
            remote: ChartList::new(),
        }
    }

    pub fn with_local_database(mut self, database: Arc<dyn ChartDatabase>) -> Self {
        self.local = Some(database);
        self
    }

    pub fn with_chart_list(mut self, charts: ChartList) -> Self {
        self.remote = charts;
        self
    }

    pub fn game(&self) -> Game {
        self.game
    }

    /// Whether lookups go to the local database rather than the song list
    pub fn uses_local_database(&self) -> bool {
        self.local
            .as_ref()
            .is_some_and(|db| db.has_local_database())
    }

    /// Resolve a provider song id in the `kind` id space at `level_index`.
    pub fn resolve(&self, song_id: u32, kind: ChartKind, level_index: u8) -> Option<Arc<Chart>> {
        let (song_id, kind) = match self.game {
            Game::Maimai => {
                let song_id = kind.canonical_id(song_id);
                (song_id, ChartKind::of_canonical_id(song_id))
            }
            Game::Chunithm => (song_id, kind),
        };
        // utage songs carry a single chart whatever index the provider reports
        let difficulty = match (self.game, kind) {
            (Game::Maimai, ChartKind::Utage) => Difficulty::Utage,
            _ => Difficulty::from_level_index(self.game, level_index)?,
        };
        self.resolve_key(&ChartKey::new(song_id, difficulty))
    }

    /// Resolve an already-canonical key.
    pub fn resolve_key(&self, key: &ChartKey) -> Option<Arc<Chart>> {
        match &self.local {
            Some(db) if db.has_local_database() => db
                .get_local_chart(self.game, key)
                .map(|local| Arc::new(local.to_chart(self.game))),
            _ => self.remote.get(key),
        }
    }
}

impl std::fmt::Debug for ChartResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartResolver")
            .field("game", &self.game)
            .field("local", &self.uses_local_database())
            .field("remote_charts", &self.remote.len())
            .finish()
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::chart::{ChartDatabase, ChartList, ChartResolver, LocalChartDatabase};
use crate::config::Config;
use crate::error::Result;
use crate::game::Game;
use crate::network::{HttpSource, JsonSource, ResponseCache};
use crate::provider::{Provider, ProviderKind};
use crate::score::{BestScores, Profile};
use crate::version::{self, Version};

/// Fetches a player's data from one provider and turns it into canonical
/// best scores.
///
/// Every call is independent; provider failures yield `None`.
pub struct ScoreService<S> {
    provider: Provider<S>,
    databases: HashMap<Game, Arc<dyn ChartDatabase>>,
    current: HashMap<Game, Version>,
}

impl<S: JsonSource> ScoreService<S> {
    pub fn new(provider: Provider<S>) -> Self {
        Self {
            provider,
            databases: HashMap::new(),
            current: HashMap::new(),
        }
    }

    /// Resolve `game` charts against a local database instead of the
    /// provider's song list.
    pub fn with_database(mut self, game: Game, database: Arc<dyn ChartDatabase>) -> Self {
        self.databases.insert(game, database);
        self
    }

    pub fn with_current_version(mut self, version: Version) -> Self {
        self.current.insert(version.game, version);
        self
    }

    pub fn provider(&self) -> &Provider<S> {
        &self.provider
    }

    /// Release whose charts form the new pool; defaults to the newest known.
    pub fn current_version(&self, game: Game) -> Version {
        self.current
            .get(&game)
            .copied()
            .unwrap_or_else(|| version::latest(game))
    }

    async fn resolver(&self, game: Game, embedded: Option<ChartList>) -> Option<ChartResolver> {
        let resolver = ChartResolver::new(game);
        if let Some(database) = self.databases.get(&game)
            && database.has_local_database()
        {
            return Some(resolver.with_local_database(database.clone()));
        }
        let charts = match embedded {
            Some(charts) => charts,
            None => self.provider.chart_list(game).await?,
        };
        debug!("Resolving {} charts against {} listed charts", game, charts.len());
        Some(resolver.with_chart_list(charts))
    }

    /// Best scores of `player`, partitioned and ranked.
    pub async fn best_scores(&self, game: Game, player: &str) -> Option<BestScores> {
        let raw = self.provider.bests(game, player).await?;
        let resolver = self.resolver(game, raw.embedded_charts()).await?;
        let best = raw.to_canonical(&resolver, &self.current_version(game));
        info!(
            "{} {} bests for {}: {} scores, rating {:.2}",
            self.provider.kind(),
            game.title(),
            player,
            best.len(),
            best.total_rating()
        );
        Some(best)
    }

    pub async fn profile(&self, game: Game, player: &str) -> Option<Profile> {
        self.provider.profile(game, player).await
    }
}

impl ScoreService<HttpSource> {
    /// Service for `kind` configured from `config`: provider credentials,
    /// optional local chart database and current versions.
    pub fn from_config(kind: ProviderKind, config: &Config, cache: Arc<ResponseCache>) -> Result<Self> {
        let mut service = Self::new(Provider::from_config(kind, config, cache)?)
            .with_current_version(config.current_version(Game::Maimai))
            .with_current_version(config.current_version(Game::Chunithm));

        if let Some(path) = &config.database.path {
            let database = LocalChartDatabase::load(path)?;
            if database.is_empty() {
                warn!("Chart database {:?} is empty, using provider song lists", path);
            }
            service = service.with_database(database.game(), Arc::new(database));
        }
        Ok(service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheSettings;
    use crate::network::mock::MockSource;

    fn service(source: MockSource) -> ScoreService<MockSource> {
        let provider = Provider::new(
            ProviderKind::Lxns,
            source,
            Arc::new(ResponseCache::new()),
            CacheSettings::default(),
        );
        ScoreService::new(provider)
    }

    #[test]
    fn test_current_version_defaults_to_latest() {
        let service = service(MockSource::new("lxns"));
        assert_eq!(service.current_version(Game::Maimai), version::latest(Game::Maimai));

        let buddies = version::find_by_name(Game::Maimai, "BUDDiES").unwrap();
        let service = service.with_current_version(buddies);
        assert_eq!(service.current_version(Game::Maimai), buddies);
        assert_eq!(service.current_version(Game::Chunithm), version::latest(Game::Chunithm));
    }

    #[tokio::test]
    async fn test_unreachable_provider_yields_none() {
        let service = service(MockSource::new("lxns"));
        assert!(service.best_scores(Game::Maimai, "123").await.is_none());
        assert!(service.profile(Game::Maimai, "123").await.is_none());
    }
}

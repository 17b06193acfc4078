//! Common CLI utility functions shared across commands.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use scorecard_core::{Config, HttpSource, ProviderKind, ResponseCache, ScoreService};
use tracing::{info, warn};

/// Load the config file, falling back to defaults when it does not exist.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        warn!("Config file {:?} not found, using defaults", path);
        return Ok(Config::default());
    }
    let config =
        Config::load(path).with_context(|| format!("Failed to load config from {:?}", path))?;
    info!("Loaded config from {:?}", path);
    Ok(config)
}

/// Apply a command-line token to the settings of `kind`.
pub fn apply_token(config: &mut Config, kind: ProviderKind, token: Option<String>) {
    let Some(token) = token else {
        return;
    };
    let settings = match kind {
        ProviderKind::Lxns => &mut config.lxns,
        ProviderKind::DivingFish => &mut config.divingfish,
        ProviderKind::KamaiTachi => &mut config.kamaitachi,
    };
    settings.token = Some(token);
}

/// Build a service for `kind` from the config at `path`.
pub fn open_service(
    path: &Path,
    kind: ProviderKind,
    token: Option<String>,
) -> Result<ScoreService<HttpSource>> {
    let mut config = load_config(path)?;
    apply_token(&mut config, kind, token);
    ScoreService::from_config(kind, &config, Arc::new(ResponseCache::new()))
        .with_context(|| format!("Failed to set up {} provider", kind))
}

//! Configuration.
//!
//! This module contains:
//! - `Config` - provider credentials, chart database path, current versions
//!   and cache lifetimes, loaded from TOML
//! - Cache lifetime and pool capacity constants

mod settings;

pub use settings::*;

/// Default cache lifetimes.
///
/// Song lists change with game updates, player data changes with every play.
pub mod ttl {
    use std::time::Duration;

    /// LXNS song list
    pub const SONG_LIST: Duration = Duration::from_secs(60 * 60);

    /// Diving-Fish music data (large, rarely updated)
    pub const DIVINGFISH_SONG_LIST: Duration = Duration::from_secs(24 * 60 * 60);

    /// Player bests and profiles
    pub const API_RESPONSE: Duration = Duration::from_secs(30 * 60);
}

/// Best-score pool capacities.
pub mod pools {
    /// maimai: charts of the current version
    pub const MAIMAI_NEW: usize = 15;

    /// maimai: charts of older versions
    pub const MAIMAI_OLD: usize = 35;

    /// CHUNITHM: charts of the current version
    pub const CHUNITHM_NEW: usize = 20;

    /// CHUNITHM: charts of older versions
    pub const CHUNITHM_OLD: usize = 30;

    /// CHUNITHM recent-style layout: recent plays
    pub const CHUNITHM_RECENT: usize = 10;

    /// CHUNITHM recent-style layout: overall best
    pub const CHUNITHM_BEST: usize = 30;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_constants() {
        assert_eq!(ttl::SONG_LIST.as_secs(), 3600);
        assert_eq!(ttl::DIVINGFISH_SONG_LIST.as_secs(), 86400);
        assert!(ttl::API_RESPONSE < ttl::SONG_LIST);
    }

    #[test]
    fn test_pool_capacities() {
        assert_eq!(pools::MAIMAI_NEW + pools::MAIMAI_OLD, 50);
        assert_eq!(pools::CHUNITHM_NEW + pools::CHUNITHM_OLD, 50);
        assert_eq!(pools::CHUNITHM_RECENT + pools::CHUNITHM_BEST, 40);
    }
}

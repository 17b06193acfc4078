//! Provider adapter tests
//!
//! Each test drives a `ScoreService` against canned provider documents served
//! by `MockSource`, from raw payload to partitioned best scores.

use std::sync::Arc;

use serde_json::{Value, json};

use scorecard_core::config::CacheSettings;
use scorecard_core::network::mock::MockSource;
use scorecard_core::version;
use scorecard_core::{
    BestScores, ComboTier, Game, LocalChartDatabase, Provider, ProviderKind, Rank, ResponseCache,
    ScoreService, SyncTier,
};

fn service(kind: ProviderKind, source: &Arc<MockSource>) -> ScoreService<Arc<MockSource>> {
    let provider = Provider::new(
        kind,
        source.clone(),
        Arc::new(ResponseCache::new()),
        CacheSettings::default(),
    );
    ScoreService::new(provider)
}

fn lxns_ok(data: Value) -> Value {
    json!({"success": true, "code": 200, "data": data})
}

fn versioned(best: BestScores) -> (Vec<scorecard_core::Score>, Vec<scorecard_core::Score>) {
    match best {
        BestScores::Versioned { new, old } => (new, old),
        BestScores::Recent { .. } => panic!("expected versioned layout"),
    }
}

mod lxns_tests {
    use super::*;

    fn song_list() -> Value {
        json!({
            "songs": [{
                "id": 100,
                "title": "Scenario",
                "version": 24000,
                "difficulties": {
                    "standard": [
                        {"type": "standard", "difficulty": 3, "level": "13", "level_value": 13.2, "version": 24000}
                    ],
                    "dx": []
                }
            }]
        })
    }

    #[tokio::test]
    async fn test_end_to_end_maimai_score() {
        let source = Arc::new(
            MockSource::new("lxns")
                .with_document("/api/v0/maimai/song/list", song_list())
                .with_document(
                    "/api/v0/maimai/player/1234/bests",
                    lxns_ok(json!({
                        "standard": [{
                            "id": 100, "song_name": "Scenario", "level": "13", "level_index": 3,
                            "achievements": 100.4, "fc": "fcp", "fs": null, "type": "standard"
                        }],
                        "dx": []
                    })),
                ),
        );
        let current = version::find_by_name(Game::Maimai, "PRiSM").unwrap();
        let service = service(ProviderKind::Lxns, &source).with_current_version(current);

        let (new, old) = versioned(service.best_scores(Game::Maimai, "1234").await.unwrap());
        assert!(new.is_empty());
        assert_eq!(old.len(), 1);

        let score = &old[0];
        assert_eq!(score.chart.song_id, 100);
        assert_eq!(score.achievement, 1_004_000);
        assert_eq!(score.rank, Rank::Sss);
        assert_eq!(score.combo, ComboTier::FullComboPlus);
        assert_eq!(score.sync, SyncTier::None);
        // 13.2 x 21.6 x 100.4 / 100 = 286.26
        assert_eq!(score.rating, 286.0);
    }

    #[tokio::test]
    async fn test_chart_version_overrides_provider_pool() {
        let source = Arc::new(
            MockSource::new("lxns")
                .with_document(
                    "/api/v0/chunithm/song/list",
                    json!({"songs": [
                        {"id": 1, "title": "Current", "version": 23000,
                         "difficulties": [{"difficulty": 3, "level_value": 14.0}]},
                        {"id": 2, "title": "Older", "version": 22000,
                         "difficulties": [{"difficulty": 3, "level_value": 14.5}]}
                    ]}),
                )
                .with_document(
                    "/api/v0/chunithm/player/42/bests",
                    lxns_ok(json!({
                        "bests": [
                            {"id": 1, "level_index": 3, "score": 1009000, "full_combo": "alljustice", "rank": "sssp"},
                            {"id": 2, "level_index": 3, "score": 1000000, "rating": 15.5, "clear": "hard"}
                        ],
                        "new_bests": []
                    })),
                ),
        );
        let current = version::find_by_name(Game::Chunithm, "VERSE").unwrap();
        let service = service(ProviderKind::Lxns, &source).with_current_version(current);

        let (new, old) = versioned(service.best_scores(Game::Chunithm, "42").await.unwrap());
        assert_eq!(new.len(), 1);
        assert_eq!(new[0].chart.song_id, 1);
        assert_eq!(new[0].rating, 16.15);
        assert_eq!(new[0].combo, ComboTier::AllPerfect);
        assert_eq!(old.len(), 1);
        assert_eq!(old[0].rating, 15.5);
    }

    #[tokio::test]
    async fn test_profile() {
        let source = Arc::new(MockSource::new("lxns").with_document(
            "/api/v0/maimai/player/1234",
            lxns_ok(json!({"name": "ＰＬＡＹＥＲ", "rating": 15234, "friend_code": 1234})),
        ));
        let profile = service(ProviderKind::Lxns, &source)
            .profile(Game::Maimai, "1234")
            .await
            .unwrap();
        assert_eq!(profile.name, "ＰＬＡＹＥＲ");
        assert_eq!(profile.rating, 15234.0);
    }

    #[tokio::test]
    async fn test_unsuccessful_envelope_is_none() {
        let source = Arc::new(
            MockSource::new("lxns")
                .with_document("/api/v0/maimai/song/list", song_list())
                .with_document(
                    "/api/v0/maimai/player/1/bests",
                    json!({"success": false, "code": 404, "message": "not found"}),
                ),
        );
        assert!(
            service(ProviderKind::Lxns, &source)
                .best_scores(Game::Maimai, "1")
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_missing_song_list_is_none() {
        let source = Arc::new(MockSource::new("lxns").with_document(
            "/api/v0/maimai/player/1/bests",
            lxns_ok(json!({"standard": [], "dx": []})),
        ));
        assert!(
            service(ProviderKind::Lxns, &source)
                .best_scores(Game::Maimai, "1")
                .await
                .is_none()
        );
    }
}

mod divingfish_tests {
    use super::*;

    const CURRENT: &str = "BUDDiES";
    const OLDER: &str = "FESTiVAL";

    /// 50 songs; songs 1..=20 belong to the current version. Master levels
    /// rise with the song id.
    fn music_data(drop_last_song: bool) -> Value {
        let mut songs: Vec<Value> = (1..=50u32)
            .map(|id| {
                let level = 12.0 + id as f64 * 0.05;
                let from = if id <= 20 { CURRENT } else { OLDER };
                json!({
                    "id": id.to_string(),
                    "title": format!("Song {}", id),
                    "type": "SD",
                    "ds": [3.0, 6.0, 9.0, level],
                    "charts": [{"notes": [1]}, {"notes": [1]}, {"notes": [1]}, {"notes": [300, 20, 10, 5, 5]}],
                    "basic_info": {"from": from}
                })
            })
            .collect();
        if drop_last_song {
            songs.truncate(49);
        }
        Value::Array(songs)
    }

    fn records(ids: impl Iterator<Item = u32>) -> Value {
        let records: Vec<Value> = ids
            .map(|id| {
                json!({
                    "song_id": id, "title": format!("Song {}", id), "level_index": 3,
                    "achievements": 100.0, "fc": "", "fs": "", "rate": "sss", "type": "SD",
                    "dxScore": 900
                })
            })
            .collect();
        json!({"username": "fish", "nickname": "Fish", "rating": 14000, "records": records})
    }

    fn source(drop_last_song: bool) -> Arc<MockSource> {
        Arc::new(
            MockSource::new("divingfish")
                .with_document("/api/maimaidxprober/music_data", music_data(drop_last_song))
                .with_document("/api/maimaidxprober/dev/player/records", records(1..=50)),
        )
    }

    fn current() -> scorecard_core::Version {
        version::find_by_name(Game::Maimai, CURRENT).unwrap()
    }

    #[tokio::test]
    async fn test_partition_capacity() {
        let source = source(false);
        let service = service(ProviderKind::DivingFish, &source).with_current_version(current());

        let (new, old) = versioned(service.best_scores(Game::Maimai, "fish").await.unwrap());

        assert_eq!(new.len(), 15);
        assert!(new.iter().all(|s| s.chart.version == Some(current())));
        let new_ids: Vec<u32> = new.iter().map(|s| s.chart.song_id).collect();
        assert_eq!(new_ids, (6..=20).rev().collect::<Vec<_>>());
        assert!(new.windows(2).all(|w| w[0].rating >= w[1].rating));

        assert_eq!(old.len(), 30);
        assert!(old.iter().all(|s| s.chart.song_id > 20));
        assert_eq!(new[0].chart.max_bonus_score, 1020);
    }

    #[tokio::test]
    async fn test_unresolved_records_are_dropped() {
        let source = source(true);
        let service = service(ProviderKind::DivingFish, &source).with_current_version(current());

        let best = service.best_scores(Game::Maimai, "fish").await.unwrap();
        assert!(best.iter().all(|s| s.chart.song_id != 50));
        let (_, old) = versioned(best);
        assert_eq!(old.len(), 29);
    }

    #[tokio::test]
    async fn test_output_is_deterministic() {
        let first = service(ProviderKind::DivingFish, &source(false))
            .with_current_version(current())
            .best_scores(Game::Maimai, "fish")
            .await
            .unwrap();
        let second = service(ProviderKind::DivingFish, &source(false))
            .with_current_version(current())
            .best_scores(Game::Maimai, "fish")
            .await
            .unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_song_list_is_cached() {
        let source = source(false);
        let service = service(ProviderKind::DivingFish, &source);
        service.best_scores(Game::Maimai, "fish").await.unwrap();
        service.best_scores(Game::Maimai, "fish").await.unwrap();
        // records + music_data, each fetched once
        assert_eq!(source.request_count(), 2);
    }

    #[tokio::test]
    async fn test_profile_prefers_nickname() {
        let profile = service(ProviderKind::DivingFish, &source(false))
            .profile(Game::Maimai, "fish")
            .await
            .unwrap();
        assert_eq!(profile.name, "Fish");
        assert_eq!(profile.rating, 14000.0);
    }
}

mod kamaitachi_tests {
    use super::*;

    fn pbs() -> Value {
        json!({
            "success": true,
            "description": "Retrieved pbs.",
            "body": {
                "pbs": [
                    {
                        "chartID": "a",
                        "scoreData": {"score": 1008000, "lamp": "FULL COMBO", "grade": "SSS"},
                        "calculatedData": {"rating": 16.95},
                        "timeAchieved": null
                    },
                    {
                        "chartID": "b",
                        "scoreData": {"score": 995000, "lamp": "CLEAR", "grade": "S+"},
                        "calculatedData": {}
                    }
                ],
                "songs": [
                    {"id": 10, "title": "Luminous Song", "data": {"displayVersion": "LUMINOUS"}},
                    {"id": 11, "title": "Old Song", "data": {"displayVersion": "AIR"}}
                ],
                "charts": [
                    {"chartID": "a", "songID": 10, "difficulty": "MASTER", "levelNum": 14.7,
                     "data": {"inGameID": 2500}},
                    {"chartID": "b", "songID": 11, "difficulty": "EXPERT", "levelNum": 12.0,
                     "data": {"inGameID": 300}}
                ]
            }
        })
    }

    #[tokio::test]
    async fn test_embedded_charts_resolve_without_song_list() {
        let source = Arc::new(MockSource::new("kamaitachi").with_document(
            "/api/v1/users/player/games/chunithm/Single/pbs/best",
            pbs(),
        ));
        let current = version::find_by_name(Game::Chunithm, "LUMINOUS").unwrap();
        let service = service(ProviderKind::KamaiTachi, &source).with_current_version(current);

        let (new, old) = versioned(service.best_scores(Game::Chunithm, "player").await.unwrap());
        assert_eq!(source.request_count(), 1);

        assert_eq!(new.len(), 1);
        assert_eq!(new[0].rating, 16.95);
        assert_eq!(new[0].rank, Rank::Sss);
        assert_eq!(new[0].combo, ComboTier::FullCombo);

        assert_eq!(old.len(), 1);
        // 12.0 + 0.60 + (995000 - 990000) / 2500 * 0.01
        assert_eq!(old[0].rating, 12.62);
        assert_eq!(old[0].rank, Rank::SPlus);
    }

    #[tokio::test]
    async fn test_profile_combines_user_and_stats() {
        let source = Arc::new(
            MockSource::new("kamaitachi")
                .with_document(
                    "/api/v1/users/player",
                    json!({"success": true, "body": {"username": "player", "id": 1}}),
                )
                .with_document(
                    "/api/v1/users/player/games/maimaidx/Single",
                    json!({"success": true, "body": {"gameStats": {"ratings": {"rate": 15012.0}}}}),
                ),
        );
        let profile = service(ProviderKind::KamaiTachi, &source)
            .profile(Game::Maimai, "player")
            .await
            .unwrap();
        assert_eq!(profile.name, "player");
        assert_eq!(profile.rating, 15012.0);
    }
}

mod local_database_tests {
    use super::*;

    #[tokio::test]
    async fn test_local_database_replaces_song_list() {
        let database = LocalChartDatabase::parse(
            r#"{"game": "maimai", "charts": [
                {"songId": 834, "type": "dx", "difficulty": 3, "name": "Local Chart", "maxBonusScore": 3000,
                 "addedIn": {"major": 20, "minor": 5},
                 "events": [
                    {"version": {"major": 24, "minor": 0, "release": 2}, "region": "JPN", "data": {"level": 14.7}},
                    {"version": {"major": 24, "minor": 0, "release": 2}, "region": "CHN", "data": {"level": 14.8}}
                 ]}
            ]}"#,
        )
        .unwrap();
        let source = Arc::new(MockSource::new("lxns").with_document(
            "/api/v0/maimai/player/1/bests",
            lxns_ok(json!({
                "standard": [],
                "dx": [{"id": 834, "level_index": 3, "achievements": 100.5, "fc": "app", "fs": "fsdp",
                        "type": "dx", "dx_score": 2950}]
            })),
        ));
        let service = service(ProviderKind::Lxns, &source)
            .with_database(Game::Maimai, Arc::new(database))
            .with_current_version(version::find_by_name(Game::Maimai, "PRiSM").unwrap());

        let best = service.best_scores(Game::Maimai, "1").await.unwrap();
        assert_eq!(source.request_count(), 1);

        // chart is from DX PLUS, so the provider's new-pool placement is overridden
        let (new, old) = versioned(best);
        assert!(new.is_empty());
        let score = &old[0];
        assert_eq!(score.chart.song_id, 10834);
        assert_eq!(score.chart.level.hundredths(), 1480);
        assert_eq!(score.chart.max_bonus_score, 3000);
        // 14.8 x 22.4 x 100.5 / 100 = 333.18
        assert_eq!(score.rating, 333.0);
        assert_eq!(score.rank, Rank::SssPlus);
    }
}

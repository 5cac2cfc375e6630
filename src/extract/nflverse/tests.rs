//! HTTP tests against a mocked nflverse release server

use super::*;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

const GAMES_CSV: &str = "game_id,season,week,home_team,away_team\n\
2022_01_BUF_LA,2022,1,LA,BUF\n\
2023_01_DET_KC,2023,1,KC,DET\n\
2023_01_ARI_WAS,2023,1,WAS,ARI\n";

const WEEKLY_CSV: &str = "player_id,player_name,season,week,receptions\n\
00-0033873,P.Mahomes,2023,1,0\n";

fn test_config(cache_dir: Option<PathBuf>, retries: u32) -> Config {
    Config {
        api_timeout_secs: 5,
        api_retries: retries,
        cache_dir,
        ..Config::default()
    }
}

fn source(server: &MockServer, cache_dir: Option<PathBuf>, retries: u32, refresh: bool) -> NflverseSource {
    NflverseSource::with_endpoints(
        &test_config(cache_dir, retries),
        Endpoints::all_under(&server.uri()),
        refresh,
    )
    .unwrap()
}

#[test]
fn test_endpoint_urls() {
    let endpoints = Endpoints::new("https://example.com/download/");
    let season = Some(Season::new(2023));

    assert_eq!(
        endpoints.url(DataType::PlayByPlay, season),
        "https://example.com/download/pbp/play_by_play_2023.csv"
    );
    assert_eq!(
        endpoints.url(DataType::SeasonalStats, season),
        endpoints.url(DataType::WeeklyStats, season)
    );
    assert_eq!(
        endpoints.url(DataType::Players, None),
        "https://example.com/download/players/players.csv"
    );
    assert_eq!(endpoints.url(DataType::Teams, None), TEAMS_URL);
    assert_eq!(endpoints.url(DataType::Schedules, season), SCHEDULES_URL);
}

#[test]
fn test_cache_path_is_flat() {
    let path = cache_path(Path::new("/tmp/cache"), "https://host:8080/pbp/play_by_play_2023.csv");
    assert_eq!(path, Path::new("/tmp/cache/host_8080_pbp_play_by_play_2023.csv"));
}

#[tokio::test]
async fn test_fetch_parses_csv() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/player_stats/player_stats_2023.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(WEEKLY_CSV))
        .mount(&server)
        .await;

    let table = source(&server, None, 1, false)
        .fetch(DataType::WeeklyStats, Some(Season::new(2023)))
        .await
        .unwrap();

    assert_eq!(table.headers, vec!["player_id", "player_name", "season", "week", "receptions"]);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0][1], "P.Mahomes");
}

#[tokio::test]
async fn test_schedules_filtered_to_season() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/schedules/games.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(GAMES_CSV))
        .mount(&server)
        .await;

    let table = source(&server, None, 1, false)
        .fetch(DataType::Schedules, Some(Season::new(2023)))
        .await
        .unwrap();

    assert_eq!(table.len(), 2);
    assert!(table.rows.iter().all(|r| r[1] == "2023"));
}

#[tokio::test]
async fn test_missing_asset_reports_kind_and_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = source(&server, None, 3, false)
        .fetch(DataType::Injuries, Some(Season::new(2023)))
        .await
        .unwrap_err();

    assert_eq!(err.kind, "reqwest::error::Error");
    assert!(err.message.contains("404"), "{}", err.message);
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/players/players.csv"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/players/players.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string("gsis_id,display_name\n00-1,A Player\n"))
        .mount(&server)
        .await;

    let table = source(&server, None, 2, false)
        .fetch(DataType::Players, None)
        .await
        .unwrap();

    assert_eq!(table.rows, vec![vec!["00-1".to_string(), "A Player".to_string()]]);
}

#[tokio::test]
async fn test_download_cache_reuse_and_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/player_stats/player_stats_2023.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(WEEKLY_CSV))
        .expect(2)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cache = Some(dir.path().to_path_buf());
    let season = Some(Season::new(2023));

    // first call downloads, second is served from disk
    source(&server, cache.clone(), 1, false)
        .fetch(DataType::WeeklyStats, season)
        .await
        .unwrap();
    let cached = source(&server, cache.clone(), 1, false)
        .fetch(DataType::WeeklyStats, season)
        .await
        .unwrap();
    assert_eq!(cached.len(), 1);

    // refresh bypasses the cache
    source(&server, cache, 1, true)
        .fetch(DataType::WeeklyStats, season)
        .await
        .unwrap();
}

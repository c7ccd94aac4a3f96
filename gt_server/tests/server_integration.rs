//! Integration tests for the HTTP routes.
//!
//! Tests league, score lookup, win recording and request ID handling.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use game_tracker::{
    FileSystemPlayerStore, GameSession, InMemoryPlayerStore, League, Player, PlayerStore,
    TokioBlindAlerter,
};
use gt_server::api::{AppState, create_router, request_id::REQUEST_ID_HEADER};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt; // For `oneshot` method

/// Helper to create a test server over a seeded in-memory store
fn create_test_server(players: Vec<Player>) -> (axum::Router, Arc<InMemoryPlayerStore>) {
    let store = Arc::new(InMemoryPlayerStore::with_players(players));
    let session = Arc::new(GameSession::new(
        Arc::new(TokioBlindAlerter::current()),
        store.clone(),
    ));

    let app = create_router(AppState {
        session,
        store: store.clone(),
    });

    (app, store)
}

fn john_and_maria() -> Vec<Player> {
    vec![Player::new("John", 20), Player::new("Maria", 30)]
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ============================================================================
// Player Score Tests
// ============================================================================

#[tokio::test]
async fn test_returns_john_score() {
    let (app, _) = create_test_server(john_and_maria());

    let response = app.oneshot(get("/players/John")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "20");
}

#[tokio::test]
async fn test_returns_maria_score() {
    let (app, _) = create_test_server(john_and_maria());

    let response = app.oneshot(get("/players/Maria")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "30");
}

#[tokio::test]
async fn test_missing_player_is_404() {
    let (app, _) = create_test_server(john_and_maria());

    let response = app.oneshot(get("/players/Missing%20Player")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Win Recording Tests
// ============================================================================

#[tokio::test]
async fn test_post_records_win() {
    let (app, store) = create_test_server(john_and_maria());

    let response = app.oneshot(post("/players/John")).await.unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(store.player_score("John"), 21);
}

#[tokio::test]
async fn test_post_then_get_new_player() {
    let (app, _) = create_test_server(Vec::new());

    for _ in 0..3 {
        let response = app.clone().oneshot(post("/players/Pepper")).await.unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    let response = app.oneshot(get("/players/Pepper")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "3");
}

// ============================================================================
// League Tests
// ============================================================================

#[tokio::test]
async fn test_league_returns_json_sorted_by_wins() {
    let (app, _) = create_test_server(vec![
        Player::new("Leo", 32),
        Player::new("John", 40),
        Player::new("Maria", 12),
    ]);

    let response = app.oneshot(get("/league")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );

    let league: League = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(
        league,
        vec![
            Player::new("John", 40),
            Player::new("Leo", 32),
            Player::new("Maria", 12),
        ]
    );
}

#[tokio::test]
async fn test_league_uses_wire_field_names() {
    let (app, _) = create_test_server(vec![Player::new("Leo", 32)]);

    let response = app.oneshot(get("/league")).await.unwrap();

    assert_eq!(body_string(response).await, r#"[{"Name":"Leo","Wins":32}]"#);
}

#[tokio::test]
async fn test_file_store_round_trip_through_http() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.db.json");
    std::fs::write(
        &path,
        r#"[{"Name":"Leo","Wins":32},{"Name":"John","Wins":40},{"Name":"Maria","Wins":12}]"#,
    )
    .unwrap();

    let store: Arc<dyn PlayerStore> = Arc::new(FileSystemPlayerStore::open(&path).unwrap());
    let session = Arc::new(GameSession::new(
        Arc::new(TokioBlindAlerter::current()),
        store.clone(),
    ));
    let app = create_router(AppState { session, store });

    let response = app.clone().oneshot(post("/players/Maria")).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let response = app.oneshot(get("/league")).await.unwrap();
    let league: League = serde_json::from_str(&body_string(response).await).unwrap();

    let on_disk: League = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(league, on_disk);
    assert_eq!(league[2], Player::new("Maria", 13));
}

// ============================================================================
// Misc Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_game_page_is_served() {
    let (app, _) = create_test_server(Vec::new());

    let response = app.oneshot(get("/game")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("new WebSocket"));
}

#[tokio::test]
async fn test_health_check_reports_game_status() {
    let (app, _) = create_test_server(john_and_maria());

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let health: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["game"]["status"], "idle");
    assert_eq!(health["blinds"]["base_interval_secs"], 600);
    assert_eq!(health["blinds"]["levels"], 11);
    assert_eq!(health["players"], 2);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let (app, _) = create_test_server(Vec::new());

    let request = Request::builder()
        .uri("/league")
        .header(REQUEST_ID_HEADER, "league-check-1")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get(REQUEST_ID_HEADER).unwrap(),
        "league-check-1"
    );
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let (app, _) = create_test_server(Vec::new());

    let response = app.oneshot(get("/health")).await.unwrap();

    let request_id = response.headers().get(REQUEST_ID_HEADER).unwrap();
    assert!(!request_id.is_empty());
}

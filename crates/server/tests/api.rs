//! End-to-end tests over the assembled router, backed by a temp SQLite
//! database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use courtside_infra::DbManager;
use courtside_server::{build_router, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt;

struct TestApp {
    router: Router,
    _temp_dir: TempDir,
}

fn setup() -> TestApp {
    let temp_dir = TempDir::new().expect("tempdir created");
    let db =
        Arc::new(DbManager::new(temp_dir.path().join("api.db"), 4).expect("manager created"));
    db.run_migrations().expect("migrations run");
    TestApp { router: build_router(AppState::from_manager(db)), _temp_dir: temp_dir }
}

async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let request = builder.body(body).expect("request built");
    let response = app.router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body read").to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

async fn get(app: &TestApp, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &TestApp, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

fn field_names(body: &Value) -> Vec<String> {
    body["field_errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .map(|e| e["field"].as_str().unwrap_or_default().to_owned())
                .collect()
        })
        .unwrap_or_default()
}

async fn create_team(app: &TestApp, name: &str) -> i64 {
    let (status, body) = post(app, "/api/teams", json!({ "name": name })).await;
    assert_eq!(status, StatusCode::CREATED, "create team: {body}");
    body["id"].as_i64().expect("team id")
}

async fn create_player(app: &TestApp, team_id: i64, last_name: &str) -> i64 {
    let (status, body) = post(
        app,
        "/api/players",
        json!({
            "team_id": team_id,
            "first_name": "Test",
            "last_name": last_name,
            "position": "pg"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create player: {body}");
    body["id"].as_i64().expect("player id")
}

async fn create_finished_game(app: &TestApp, season: &str, home: i64, away: i64) -> i64 {
    let (status, body) = post(
        app,
        "/api/games",
        json!({
            "season": season,
            "date": "2023-11-04T19:30:00Z",
            "home_team_id": home,
            "away_team_id": away,
            "status": "finished"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create game: {body}");
    body["id"].as_i64().expect("game id")
}

async fn upsert_points(app: &TestApp, player_id: i64, game_id: i64, points: i64) {
    let (status, body) = post(
        app,
        "/api/stats",
        json!({
            "player_id": player_id,
            "game_id": game_id,
            "points": points,
            "rebounds": 5,
            "assists": 3,
            "minutes_played": 32.0
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "upsert: {body}");
}

#[tokio::test(flavor = "multi_thread")]
async fn health_and_docs_respond() {
    let app = setup();

    let (status, body) = get(&app, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get(&app, "/readyz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");

    let (status, body) = get(&app, "/api/docs").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["endpoints"].as_array().is_some_and(|e| !e.is_empty()));
}

#[tokio::test(flavor = "multi_thread")]
async fn team_lifecycle_and_error_mapping() {
    let app = setup();

    // Structural failure: 400 with the offending field.
    let (status, body) = post(&app, "/api/teams", json!({ "name": " " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");
    assert_eq!(field_names(&body), vec!["name"]);

    let id = create_team(&app, "Warriors").await;

    // Duplicate name: 409 already_exists.
    let (status, body) = post(&app, "/api/teams", json!({ "name": "Warriors" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "already_exists");

    // Lookup round trip, missing row, malformed id.
    let (status, body) = get(&app, &format!("/api/teams/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Warriors");

    let (status, body) = get(&app, "/api/teams/999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, body) = get(&app, "/api/teams/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["team_id"]);

    // Listing reports the page and the total.
    create_team(&app, "Lakers").await;
    let (status, body) = get(&app, "/api/teams?limit=1&offset=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["total"], 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn player_validation_is_aggregated() {
    let app = setup();

    // Every violated field comes back in one response.
    let (status, body) = post(
        &app,
        "/api/players",
        json!({ "team_id": 0, "first_name": "", "last_name": "Doe", "position": "XX" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["team_id", "first_name", "position"]);

    // Structurally fine but the team does not exist.
    let (status, body) = post(
        &app,
        "/api/players",
        json!({ "team_id": 77, "first_name": "John", "last_name": "Doe", "position": "PG" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["team_id"]);

    let team_id = create_team(&app, "Bulls").await;
    let player_id = create_player(&app, team_id, "Jordan").await;

    let (status, body) = get(&app, &format!("/api/players/{player_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["position"], "PG");

    let (status, body) = get(&app, &format!("/api/teams/{team_id}/players")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn game_with_identical_teams_is_rejected() {
    let app = setup();
    let team_id = create_team(&app, "Solo").await;

    let (status, body) = post(
        &app,
        "/api/games",
        json!({
            "season": "2023-24",
            "date": "2023-11-04T19:30:00Z",
            "home_team_id": team_id,
            "away_team_id": team_id,
            "status": "scheduled"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["teams"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn aggregates_flow_end_to_end() {
    let app = setup();
    let home_id = create_team(&app, "Celtics").await;
    let away_id = create_team(&app, "Nets").await;
    let scorer = create_player(&app, home_id, "Tatum").await;
    let opponent = create_player(&app, away_id, "Bridges").await;

    let game1 = create_finished_game(&app, "2023-24", home_id, away_id).await;
    let game2 = create_finished_game(&app, "2023-24", home_id, away_id).await;

    // The first upsert for game1 is later overridden; only the second
    // call's value may count.
    upsert_points(&app, scorer, game1, 99).await;
    upsert_points(&app, scorer, game1, 25).await;
    upsert_points(&app, scorer, game2, 30).await;
    upsert_points(&app, opponent, game1, 20).await;
    upsert_points(&app, opponent, game2, 35).await;

    let (status, body) = get(&app, &format!("/api/games/{game1}/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));

    let (status, body) =
        get(&app, &format!("/api/players/{scorer}/aggregates?season=2023-24")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["games_played"], 2);
    assert_eq!(body["total_points"], 55);
    assert_eq!(body["avg_points"], 27.5);

    // Career equals the single season here; the alias path works too.
    let (status, alias_body) =
        get(&app, &format!("/api/players/{scorer}/stats/aggregate?career=true")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(alias_body["total_points"], 55);

    let (status, body) = get(&app, &format!("/api/teams/{home_id}/aggregates")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["wins"], 1);
    assert_eq!(body["losses"], 1);
    assert_eq!(body["total_points_scored"], 55);
    assert_eq!(body["total_points_allowed"], 55);

    // season and career are mutually exclusive.
    let (status, body) = get(
        &app,
        &format!("/api/teams/{home_id}/aggregates?season=2023-24&career=true"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["query"]);

    // A malformed season label is rejected before touching storage.
    let (status, body) =
        get(&app, &format!("/api/teams/{home_id}/aggregates?season=2023-2024")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["season"]);
}

//! Integration tests for matchpick-server API endpoints
//!
//! Tests cover:
//! - Health endpoint
//! - Top matches ranking, target dates and empty-store behavior
//! - Daily picks
//! - Demo upload validation and overwrite
//! - UI serving

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::{Days, Duration, Local, SecondsFormat, Utc};
use matchpick_common::store::FallbackStore;
use matchpick_server::{build_router, AppState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: App backed by a store file inside `dir`
fn setup_app(dir: &TempDir) -> (axum::Router, FallbackStore) {
    let store = FallbackStore::new(dir.path().join("data.json"));
    (build_router(AppState::new(store.clone())), store)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body")
        .to_vec()
}

async fn extract_json(body: Body) -> Value {
    serde_json::from_slice(&body_bytes(body).await).expect("Should parse JSON")
}

fn local_date_plus(days: u64) -> String {
    (Local::now().date_naive() + Days::new(days))
        .format("%Y-%m-%d")
        .to_string()
}

fn hours_from_now(hours: i64) -> String {
    (Utc::now() + Duration::hours(hours)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let dir = TempDir::new().unwrap();
    let (app, _) = setup_app(&dir);

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "matchpick-server");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_build_info_endpoint() {
    let dir = TempDir::new().unwrap();
    let (app, _) = setup_app(&dir);

    let response = app.oneshot(get("/build_info")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["module"], "matchpick-server");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(!body["git_hash"].as_str().unwrap().is_empty());
    assert!(body["build_timestamp"].is_string());
    assert!(body["build_profile"].is_string());
}

// =============================================================================
// Top matches
// =============================================================================

#[tokio::test]
async fn test_top_matches_empty_store() {
    let dir = TempDir::new().unwrap();
    let (app, _) = setup_app(&dir);

    let response = app.oneshot(get("/top-matches?day=tomorrow")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["date"], local_date_plus(1));
    assert_eq!(body["top"], json!([]));
}

#[tokio::test]
async fn test_top_matches_corrupt_store_is_empty() {
    let dir = TempDir::new().unwrap();
    let (app, store) = setup_app(&dir);
    std::fs::write(store.path(), "{\"matches\": [ oops").unwrap();

    let response = app.oneshot(get("/top-matches")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["top"], json!([]));
}

#[tokio::test]
async fn test_top_matches_target_dates() {
    let dir = TempDir::new().unwrap();
    let (app, _) = setup_app(&dir);

    let cases = [
        ("/top-matches?day=tomorrow", 1),
        ("/top-matches?day=dayafter", 2),
        ("/top-matches?day=nextweek", 1),
        ("/top-matches", 1),
        ("/top-matches?day=dayafter&day=dayafter", 1),
        ("/top-matches?t=1760000000000&day=dayafter", 2),
    ];

    for (uri, offset) in cases {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["date"], local_date_plus(offset), "{}", uri);
    }
}

#[tokio::test]
async fn test_top_matches_scores_and_orders() {
    let dir = TempDir::new().unwrap();
    let (app, store) = setup_app(&dir);

    store
        .write(&json!({
            "matches": [
                { "league": "Fortuna liga", "home": "Bohemians", "away": "Jablonec",
                  "date": "2020-01-01T18:00:00Z", "place": "Ďolíček", "tv": "", "link": "" },
                { "league": "NHL", "home": "Boston Bruins", "away": "Montreal Canadiens",
                  "date": hours_from_now(10), "place": "TD Garden", "tv": "ESPN",
                  "link": "https://example.org/match/1" },
                { "league": "Serie A", "home": "Inter", "away": "Milan",
                  "date": hours_from_now(100), "place": "San Siro", "tv": "DAZN", "link": "" }
            ]
        }))
        .await
        .unwrap();

    let response = app.oneshot(get("/top-matches?day=tomorrow")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let top = body["top"].as_array().unwrap();
    assert_eq!(top.len(), 3);

    assert_eq!(top[0]["home"], "Boston Bruins");
    assert_eq!(top[0]["score"], 115);
    assert_eq!(top[0]["place"], "TD Garden");
    assert_eq!(top[0]["link"], "https://example.org/match/1");

    assert_eq!(top[1]["home"], "Inter");
    assert_eq!(top[1]["score"], 65);

    assert_eq!(top[2]["home"], "Bohemians");
    assert_eq!(top[2]["score"], 20);
}

#[tokio::test]
async fn test_top_matches_limited_to_ten() {
    let dir = TempDir::new().unwrap();
    let (app, store) = setup_app(&dir);

    let matches: Vec<Value> = (0..15)
        .map(|i| json!({ "league": "LaLiga", "home": format!("Club {}", i), "away": "Rival" }))
        .collect();
    store.write(&json!({ "matches": matches })).await.unwrap();

    let response = app.oneshot(get("/top-matches?day=dayafter")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    let top = body["top"].as_array().unwrap();

    assert_eq!(top.len(), 10);
    // Equal scores keep file order
    assert_eq!(top[0]["home"], "Club 0");
    assert_eq!(top[9]["home"], "Club 9");
}

// =============================================================================
// Daily picks
// =============================================================================

#[tokio::test]
async fn test_daily_picks_returns_three() {
    let dir = TempDir::new().unwrap();
    let (app, store) = setup_app(&dir);

    let matches: Vec<Value> = (0..6)
        .map(|i| json!({ "league": "TELH", "home": format!("HC {}", i), "away": "Kometa" }))
        .collect();
    store.write(&json!({ "matches": matches })).await.unwrap();

    let response = app
        .clone()
        .oneshot(get("/daily-picks?day=dayafter"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let first = extract_json(response.into_body()).await;
    assert_eq!(first["date"], local_date_plus(2));
    assert_eq!(first["picks"].as_array().unwrap().len(), 3);
    assert!(first["seed"].as_u64().unwrap() >= 2);

    // Same day, same order
    let response = app.oneshot(get("/daily-picks?day=dayafter")).await.unwrap();
    let second = extract_json(response.into_body()).await;
    assert_eq!(first["picks"], second["picks"]);
}

// =============================================================================
// Demo upload
// =============================================================================

#[tokio::test]
async fn test_upload_demo_requires_matches() {
    let dir = TempDir::new().unwrap();
    let (app, store) = setup_app(&dir);

    for body in [json!({}), json!({ "matches": null }), json!({ "matches": false }), json!([1, 2])] {
        let response = app
            .clone()
            .oneshot(post_json("/upload-demo", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let text = body_bytes(response.into_body()).await;
        assert_eq!(String::from_utf8(text).unwrap(), "Need matches array");
    }

    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_upload_demo_accepts_empty_array() {
    let dir = TempDir::new().unwrap();
    let (app, store) = setup_app(&dir);

    let response = app
        .oneshot(post_json("/upload-demo", &json!({ "matches": [] })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json(response.into_body()).await, json!({ "ok": true }));

    assert!(store.read().await.is_empty());
    let text = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(text, "{\n  \"matches\": []\n}");
}

#[tokio::test]
async fn test_upload_demo_then_rank() {
    let dir = TempDir::new().unwrap();
    let (app, _) = setup_app(&dir);

    let doc = json!({
        "matches": [
            { "league": "Premier League", "home": "Manchester United", "away": "Chelsea",
              "date": hours_from_now(30), "place": "Old Trafford", "tv": "Sky",
              "link": "https://example.org/match/2" }
        ]
    });
    let response = app
        .clone()
        .oneshot(post_json("/upload-demo", &doc))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/top-matches")).await.unwrap();
    let body = extract_json(response.into_body()).await;

    // 70 (Premier League) + 15 (tv) + 12 (manchester united) + 8 (within 48h)
    assert_eq!(body["top"][0]["score"], 105);
    assert_eq!(body["top"][0]["home"], "Manchester United");
}

#[tokio::test]
async fn test_upload_demo_with_odd_record_still_ranks() {
    let dir = TempDir::new().unwrap();
    let (app, _) = setup_app(&dir);

    let doc = json!({
        "matches": [
            { "league": "NHL", "home": "Boston Bruins", "away": "Rangers",
              "date": hours_from_now(10), "tv": "ESPN" },
            { "league": "TELH", "home": "HC Sparta Praha", "away": "HC Kometa Brno",
              "date": 1_792_519_200_000_i64, "tv": 1 }
        ]
    });
    let response = app
        .clone()
        .oneshot(post_json("/upload-demo", &doc))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/top-matches")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    let top = body["top"].as_array().unwrap();

    assert_eq!(top.len(), 2);
    assert_eq!(top[0]["score"], 115);
    assert_eq!(top[1]["home"], "HC Sparta Praha");
    assert_eq!(top[1]["date"], "2026-10-20T18:00:00.000Z");
}

#[tokio::test]
async fn test_upload_demo_write_failure_is_500() {
    let dir = TempDir::new().unwrap();
    // Store path is a directory, so the write fails
    let app = build_router(AppState::new(FallbackStore::new(dir.path())));

    let response = app
        .oneshot(post_json("/upload-demo", &json!({ "matches": [] })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].is_string());
}

// =============================================================================
// UI
// =============================================================================

#[tokio::test]
async fn test_ui_is_served() {
    let dir = TempDir::new().unwrap();
    let (app, _) = setup_app(&dir);

    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8(body_bytes(response.into_body()).await).unwrap();
    assert!(html.contains("/static/app.js"));
    assert!(html.contains("id=\"build\""));

    let response = app.oneshot(get("/static/app.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/javascript"
    );
    let js = String::from_utf8(body_bytes(response.into_body()).await).unwrap();
    assert!(js.contains("/build_info"));
}

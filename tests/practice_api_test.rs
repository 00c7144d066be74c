//! Tests for the practice surface around the pipeline: attempt logging
//! with the adaptive difficulty step, profiles, topic enumeration, and
//! the diagnostics endpoint.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use ascent_backend::config::{AppConfig, GeneratorConfig};
use ascent_backend::routes::build_router;
use ascent_backend::state::AppState;

fn app() -> Router {
    app_with(None)
}

fn app_with(app_cfg: Option<AppConfig>) -> Router {
    let config = GeneratorConfig {
        api_key: None,
        base_url: "http://unused.invalid".to_string(),
        model: "gpt-4o-mini".to_string(),
        temperature: 0.3,
        require_ai: false,
    };
    build_router(Arc::new(AppState::with_config(config, app_cfg)))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.expect("response");
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

fn post_json(uri: &str, user: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

fn get(uri: &str, user: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    builder.body(Body::empty()).expect("request")
}

#[tokio::test]
async fn health_is_ok() {
    let app = app();
    let (status, body) = send(&app, get("/api/v1/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn diag_reports_missing_key_and_mode() {
    let app = app();
    let (status, body) = send(&app, get("/api/v1/diag", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["keyPresent"], false);
    assert_eq!(body["requireAi"], false);
    assert!(body["note"].as_str().expect("note").contains("OPENAI_API_KEY"));
}

#[tokio::test]
async fn attempt_scores_locally_and_steps_difficulty_up() {
    let app = app();
    let body = json!({
        "subject": "Chemistry",
        "topic": "Redox",
        "difficulty": 3,
        "selectedIndex": 2,
        "correctIndex": 2,
        "timeSeconds": 30
    });
    let (status, out) = send(&app, post_json("/api/v1/attempt", None, &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(out["ok"], true);
    assert_eq!(out["correct"], true);
    assert_eq!(out["nextDifficulty"], 4);
}

#[tokio::test]
async fn attempt_steps_difficulty_down_on_wrong_answer() {
    let app = app();
    let body = json!({
        "subject": "Physics",
        "difficulty": 3,
        "selectedIndex": 0,
        "correctIndex": 2
    });
    let (status, out) = send(&app, post_json("/api/v1/attempt", None, &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(out["correct"], false);
    assert_eq!(out["nextDifficulty"], 2);
}

#[tokio::test]
async fn attempt_difficulty_clamps_at_both_ends() {
    let app = app();

    let top = json!({ "subject": "English", "difficulty": 5, "selectedIndex": 1, "correctIndex": 1 });
    let (_, out) = send(&app, post_json("/api/v1/attempt", None, &top)).await;
    assert_eq!(out["nextDifficulty"], 5);

    let bottom = json!({ "subject": "English", "difficulty": 1, "selectedIndex": 0, "correctIndex": 1 });
    let (_, out) = send(&app, post_json("/api/v1/attempt", None, &bottom)).await;
    assert_eq!(out["nextDifficulty"], 1);
}

#[tokio::test]
async fn attempt_rejects_out_of_range_indexes() {
    let app = app();
    let body = json!({ "subject": "English", "difficulty": 2, "selectedIndex": 7, "correctIndex": 1 });
    let (status, out) = send(&app, post_json("/api/v1/attempt", None, &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(out["error"], "index_out_of_range");
}

#[tokio::test]
async fn attempts_are_listed_per_user() {
    let app = app();
    let body = json!({
        "subject": "Biology",
        "difficulty": 2,
        "selectedIndex": 1,
        "correctIndex": 1,
        "timeSeconds": 12
    });
    let (status, _) = send(&app, post_json("/api/v1/attempt", Some("u-1"), &body)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, mine) = send(&app, get("/api/v1/attempts", Some("u-1"))).await;
    let attempts = mine["attempts"].as_array().expect("attempts");
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0]["subject"], "Biology");
    assert_eq!(attempts[0]["correct"], true);
    assert_eq!(attempts[0]["timeSeconds"], 12);

    let (_, theirs) = send(&app, get("/api/v1/attempts", Some("u-2"))).await;
    assert!(theirs["attempts"].as_array().expect("attempts").is_empty());
}

#[tokio::test]
async fn profile_requires_an_identity() {
    let app = app();
    let (status, body) = send(&app, get("/api/v1/profile", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "not_authenticated");

    let payload = json!({ "subjects": ["Chemistry"] });
    let (status, _) = send(&app, post_json("/api/v1/profile", None, &payload)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_roundtrips_per_user() {
    let app = app();
    let payload = json!({
        "yearLevel": 12,
        "minutesPerDay": 45,
        "subjects": ["Chemistry", "Physics"]
    });
    let (status, saved) = send(&app, post_json("/api/v1/profile", Some("u-9"), &payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["ok"], true);

    let (status, body) = send(&app, get("/api/v1/profile", Some("u-9"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["yearLevel"], 12);
    assert_eq!(body["profile"]["subjects"], json!(["Chemistry", "Physics"]));

    // A fresh user sees an empty default profile, not someone else's.
    let (status, body) = send(&app, get("/api/v1/profile", Some("u-10"))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["profile"]["subjects"].as_array().expect("subjects").is_empty());
}

#[tokio::test]
async fn topics_enumerates_subject_sets_with_generic_fallback() {
    let app = app();
    let (status, body) = send(&app, get("/api/v1/topics?subject=Chemistry", None)).await;
    assert_eq!(status, StatusCode::OK);
    let topics = body["topics"].as_array().expect("topics");
    assert!(topics.iter().any(|t| t == "Stoichiometry"));

    let (_, body) = send(&app, get("/api/v1/topics?subject=Alchemy", None)).await;
    assert_eq!(body["topics"], json!(["Core"]));
}

#[tokio::test]
async fn subjects_lists_the_known_set() {
    let app = app();
    let (status, body) = send(&app, get("/api/v1/subjects", None)).await;
    assert_eq!(status, StatusCode::OK);
    let subjects = body["subjects"].as_array().expect("subjects");
    for expected in ["English", "Chemistry", "Physics", "Psychology"] {
        assert!(subjects.iter().any(|s| s == expected), "missing {expected}");
    }
}

#[tokio::test]
async fn config_entries_extend_the_bank_and_topics() {
    let toml_src = r#"
        [[questions]]
        subject = "Chemistry"
        topic = "Electrochemistry"
        difficulty = 3
        question = "At which electrode does oxidation occur?"
        options = ["Anode", "Cathode", "Salt bridge", "Electrolyte"]
        correct_index = 0
        explanation = "Oxidation always occurs at the anode."
    "#;
    let app_cfg: AppConfig = toml::from_str(toml_src).expect("config");
    let app = app_with(Some(app_cfg));

    let (_, body) = send(&app, get("/api/v1/topics?subject=Chemistry", None)).await;
    let topics = body["topics"].as_array().expect("topics");
    assert!(topics.iter().any(|t| t == "Electrochemistry"));
}

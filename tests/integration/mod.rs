//! Integration tests for the display manager.
//!
//! Each test binds a real listener on an ephemeral localhost port and talks
//! to it over HTTP.
//!
//! Run with: cargo test --test integration

use std::net::SocketAddr;
use std::sync::Arc;

use display_manager::api::{create_router, AppState};
use display_manager::config::Config;
use display_manager::modes::{ModeDefinition, ModeRegistry, ModeState};
use display_manager::views::HandlebarsViews;
use metrics_exporter_prometheus::PrometheusBuilder;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Serve `state` on 127.0.0.1 and return the base URL.
async fn spawn_server(state: AppState) -> String {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });

    format!("http://{}", addr)
}

fn default_state() -> AppState {
    AppState::from_config(&Config::default()).unwrap()
}

async fn get_json(client: &reqwest::Client, url: &str) -> (u16, Value) {
    let response = client.get(url).send().await.unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

async fn post_mode(client: &reqwest::Client, base: &str, body: &str) -> (u16, Value) {
    let response = client
        .post(format!("{}/api/mode", base))
        .header("content-type", "application/json")
        .body(body.to_string())
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_startup_state_is_infohub() {
    let base = spawn_server(default_state()).await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, &format!("{}/api/state", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "mode": "infohub", "url": "http://localhost:5000" }));
}

#[tokio::test]
async fn test_switch_to_security_and_back() {
    let base = spawn_server(default_state()).await;
    let client = reqwest::Client::new();

    let (status, body) = post_mode(&client, &base, r#"{"mode":"security"}"#).await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({ "status": "success", "new_mode": "security", "url": "http://localhost:8080" })
    );

    let (_, state) = get_json(&client, &format!("{}/api/state", base)).await;
    assert_eq!(state["mode"], "security");

    let (status, _) = post_mode(&client, &base, r#"{"mode":"infohub"}"#).await;
    assert_eq!(status, 200);
    let (_, state) = get_json(&client, &format!("{}/api/state", base)).await;
    assert_eq!(state, json!({ "mode": "infohub", "url": "http://localhost:5000" }));
}

#[tokio::test]
async fn test_bogus_mode_keeps_prior_mode() {
    let base = spawn_server(default_state()).await;
    let client = reqwest::Client::new();

    post_mode(&client, &base, r#"{"mode":"security"}"#).await;
    let (status, body) = post_mode(&client, &base, r#"{"mode":"bogus"}"#).await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({ "error": "Invalid mode: bogus" }));

    let (_, state) = get_json(&client, &format!("{}/api/state", base)).await;
    assert_eq!(state["mode"], "security");
}

#[tokio::test]
async fn test_empty_body_without_content_type() {
    let base = spawn_server(default_state()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/mode", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "No mode specified" }));
}

#[tokio::test]
async fn test_reasserting_current_mode_is_idempotent() {
    let base = spawn_server(default_state()).await;
    let client = reqwest::Client::new();

    let (_, before) = get_json(&client, &format!("{}/api/state", base)).await;
    let (status, body) = post_mode(&client, &base, r#"{"mode":"infohub"}"#).await;
    assert_eq!(status, 200);
    assert_eq!(body["new_mode"], "infohub");

    let (_, after) = get_json(&client, &format!("{}/api/state", base)).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_modes_listing_matches_static_table() {
    let base = spawn_server(default_state()).await;
    let client = reqwest::Client::new();

    post_mode(&client, &base, r#"{"mode":"security"}"#).await;
    let (status, body) = get_json(&client, &format!("{}/api/modes", base)).await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "infohub": { "name": "InfoHub", "url": "http://localhost:5000" },
            "security": { "name": "Surveillance Mode", "url": "http://localhost:8080" }
        })
    );
}

#[tokio::test]
async fn test_concurrent_clients_end_on_a_valid_mode() {
    let base = spawn_server(default_state()).await;
    let client = reqwest::Client::new();

    let mut tasks = Vec::new();
    for i in 0..16 {
        let client = client.clone();
        let base = base.clone();
        tasks.push(tokio::spawn(async move {
            let mode = if i % 2 == 0 { "infohub" } else { "security" };
            let body = format!(r#"{{"mode":"{}"}}"#, mode);
            post_mode(&client, &base, &body).await.0
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), 200);
    }

    let (_, state) = get_json(&client, &format!("{}/api/state", base)).await;
    let expected_url = match state["mode"].as_str().unwrap() {
        "infohub" => "http://localhost:5000",
        "security" => "http://localhost:8080",
        other => panic!("unexpected mode {}", other),
    };
    assert_eq!(state["url"], expected_url);
}

#[tokio::test]
async fn test_custom_registry_is_served() {
    let registry = ModeRegistry::new(vec![
        ModeDefinition::new("clock", "Clock", "http://localhost:7000"),
        ModeDefinition::new("weather", "Weather", "http://localhost:7001"),
    ])
    .unwrap();
    let modes = ModeState::new(Arc::new(registry), "weather").unwrap();
    let state = AppState::new(Arc::new(modes), Arc::new(HandlebarsViews::new().unwrap()));

    let base = spawn_server(state).await;
    let client = reqwest::Client::new();

    let (_, state) = get_json(&client, &format!("{}/api/state", base)).await;
    assert_eq!(state, json!({ "mode": "weather", "url": "http://localhost:7001" }));

    let html = client
        .get(format!("{}/control", base))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains(r#"data-mode="clock""#));
    assert!(!html.contains("InfoHub"));
}

#[tokio::test]
async fn test_pages_are_html() {
    let base = spawn_server(default_state()).await;
    let client = reqwest::Client::new();

    for path in ["/", "/control", "/status"] {
        let response = client.get(format!("{}{}", base, path)).send().await.unwrap();
        assert_eq!(response.status().as_u16(), 200, "{}", path);
        let content_type = response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/html"), "{}: {}", path, content_type);
    }
}

#[tokio::test]
async fn test_metrics_endpoint_with_handle() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let state = default_state().with_metrics(recorder.handle());

    let base = spawn_server(state).await;
    let client = reqwest::Client::new();

    let response = client.get(format!("{}/metrics", base)).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
}

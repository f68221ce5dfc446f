//! Route-level tests against the assembled router, no network.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::util::ServiceExt;

use pricing::{AppSettings, MemoryStore, SecretString};
use server_core::{build_app, AppState};

fn test_state(settings: AppSettings) -> AppState {
    AppState::new(settings, Arc::new(MemoryStore::new()), "memory")
}

fn configured_settings() -> AppSettings {
    AppSettings {
        serpapi_key: SecretString::new("serp-1234567890"),
        llm_api_key: SecretString::new("sk-ant-abcdefgh"),
        ..Default::default()
    }
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_reports_store_backend() {
    let app = build_app(test_state(AppSettings::default()));

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn test_get_settings_masks_credentials() {
    let app = build_app(test_state(configured_settings()));

    let response = app
        .oneshot(Request::get("/api/settings").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["serpapi_key"], "serp...7890");
    assert_eq!(body["llm_api_key"], "sk-a...efgh");
    assert_eq!(body["llm_provider"], "claude");
}

#[tokio::test]
async fn test_update_settings_blank_key_is_left_unchanged() {
    let state = test_state(configured_settings());
    let app = build_app(state.clone());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/settings",
            serde_json::json!({
                "serpapi_key": "",
                "llm_api_key": "sk-new-key-00001",
                "llm_provider": "gpt",
                "default_currency": "USD",
                "default_region": "us",
                "use_ai_filtering": false
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["serpapi_key"], "serp...7890");
    assert_eq!(body["llm_api_key"], "sk-n...0001");

    let settings = state.settings.read().await.clone();
    assert_eq!(settings.serpapi_key.expose(), "serp-1234567890");
    assert_eq!(settings.llm_api_key.expose(), "sk-new-key-00001");
}

#[tokio::test]
async fn test_price_rejects_missing_fields() {
    let app = build_app(test_state(configured_settings()));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/price",
            serde_json::json!({"query": "   "}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Missing required fields: query and type");
}

#[tokio::test]
async fn test_price_rejects_unconfigured_credentials() {
    let app = build_app(test_state(AppSettings::default()));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/price",
            serde_json::json!({"query": "MacBook Pro 14 M3", "type": "macbook"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "API keys not configured. Please visit Settings page."
    );
}

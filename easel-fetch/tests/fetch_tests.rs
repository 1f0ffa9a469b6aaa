//! Integration tests for the polling fetcher.
//!
//! Each test spins up a throwaway axum server on an ephemeral port and
//! points a plugin's polling URL at it.

use axum::Json;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use chrono::Utc;
use easel_core::EaselError;
use easel_core::config::FetchConfig;
use easel_core::plugin::{Plugin, PollingVerb, RefreshStrategy};
use easel_fetch::{Fetcher, RefreshOutcome};
use easel_store::PluginStore;
use serde_json::json;

// ── Helpers ───────────────────────────────────────────────────

async fn serve(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn polling_plugin(id: &str, url: String) -> Plugin {
    Plugin {
        polling_url: Some(url),
        staleness_minutes: Some(15),
        ..Plugin::new(id)
    }
}

fn setup(plugin: Plugin) -> (PluginStore, Fetcher, Plugin) {
    let store = PluginStore::new();
    store.insert(plugin.clone());
    let fetcher = Fetcher::new(&FetchConfig::default()).unwrap();
    (store, fetcher, plugin)
}

// ── Success path ──────────────────────────────────────────────

#[tokio::test]
async fn successful_fetch_commits_payload_and_timestamp() {
    let app = axum::Router::new().route(
        "/data",
        get(|| async { Json(json!({"temperature": 25, "humidity": 60})) }),
    );
    let base = serve(app).await;
    let (store, fetcher, plugin) = setup(polling_plugin("p1", format!("{base}/data")));

    let before = Utc::now();
    let outcome = fetcher.refresh(&store, &plugin).await.unwrap();
    assert_eq!(outcome, RefreshOutcome::Updated);

    let stored = store.get("p1").unwrap();
    assert_eq!(
        stored.data_payload,
        Some(json!({"temperature": 25, "humidity": 60}))
    );
    let updated_at = stored.data_payload_updated_at.unwrap();
    assert!(updated_at >= before && updated_at <= Utc::now());
}

#[tokio::test]
async fn post_verb_sends_raw_body() {
    let app = axum::Router::new().route(
        "/ingest",
        post(|body: String| async move { Json(json!({"img": body, "title": "posted"})) }),
    );
    let base = serve(app).await;
    let (store, fetcher, plugin) = setup(Plugin {
        polling_verb: PollingVerb::Post,
        polling_body: Some(r#"{"city":"Berlin"}"#.to_string()),
        ..polling_plugin("p1", format!("{base}/ingest"))
    });

    fetcher.refresh(&store, &plugin).await.unwrap();
    let payload = store.get("p1").unwrap().data_payload.unwrap();
    assert_eq!(payload["img"], r#"{"city":"Berlin"}"#);
}

#[tokio::test]
async fn plugin_headers_overlay_the_baseline() {
    let app = axum::Router::new().route(
        "/echo",
        get(|headers: HeaderMap| async move {
            let pick = |name: &str| {
                headers
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("")
                    .to_string()
            };
            Json(json!({"img": pick("x-api-key"), "title": pick("accept")}))
        }),
    );
    let base = serve(app).await;
    let (store, fetcher, plugin) = setup(Plugin {
        polling_header: Some("X-Api-Key: secret123\nAccept: application/vnd.example+json".to_string()),
        ..polling_plugin("p1", format!("{base}/echo"))
    });

    fetcher.refresh(&store, &plugin).await.unwrap();
    let payload = store.get("p1").unwrap().data_payload.unwrap();
    assert_eq!(payload["img"], "secret123");
    assert_eq!(payload["title"], "application/vnd.example+json");
}

// ── Skips ─────────────────────────────────────────────────────

#[tokio::test]
async fn webhook_strategy_is_a_noop() {
    let (store, fetcher, plugin) = setup(Plugin {
        refresh_strategy: RefreshStrategy::Webhook,
        polling_url: Some("http://127.0.0.1:1/never".to_string()),
        ..Plugin::new("p1")
    });
    let outcome = fetcher.refresh(&store, &plugin).await.unwrap();
    assert_eq!(outcome, RefreshOutcome::Skipped);
}

#[tokio::test]
async fn missing_url_is_a_noop() {
    let (store, fetcher, plugin) = setup(Plugin::new("p1"));
    let outcome = fetcher.refresh(&store, &plugin).await.unwrap();
    assert_eq!(outcome, RefreshOutcome::Skipped);
    assert!(store.get("p1").unwrap().data_payload.is_none());
}

// ── HTTP status failures ──────────────────────────────────────

#[tokio::test]
async fn server_error_fails_and_leaves_cache_untouched() {
    let app = axum::Router::new().route(
        "/data",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = serve(app).await;
    let (store, fetcher, plugin) = setup(polling_plugin("p1", format!("{base}/data")));

    let committed_at = Utc::now();
    store
        .commit_payload("p1", json!({"v": "previous"}), committed_at)
        .unwrap();

    let err = fetcher.refresh(&store, &plugin).await.unwrap_err();
    assert!(matches!(err, EaselError::HttpStatus(500)));

    let stored = store.get("p1").unwrap();
    assert_eq!(stored.data_payload, Some(json!({"v": "previous"})));
    assert_eq!(stored.data_payload_updated_at, Some(committed_at));
}

#[tokio::test]
async fn not_found_reports_its_status_code() {
    let app =
        axum::Router::new().route("/data", get(|| async { (StatusCode::NOT_FOUND, "gone") }));
    let base = serve(app).await;
    let (store, fetcher, plugin) = setup(polling_plugin("p1", format!("{base}/data")));

    let err = fetcher.refresh(&store, &plugin).await.unwrap_err();
    assert!(matches!(err, EaselError::HttpStatus(404)));
    assert!(store.get("p1").unwrap().data_payload.is_none());
}

#[tokio::test]
async fn connection_refused_is_a_transport_failure() {
    let (store, fetcher, plugin) = setup(polling_plugin("p1", "http://127.0.0.1:1/".to_string()));
    let err = fetcher.refresh(&store, &plugin).await.unwrap_err();
    assert!(matches!(err, EaselError::Transport(_)));
}

// ── Body decoding & validation ────────────────────────────────

#[tokio::test]
async fn invalid_json_body_fails() {
    let app = axum::Router::new().route("/data", get(|| async { "invalid json" }));
    let base = serve(app).await;
    let (store, fetcher, plugin) = setup(polling_plugin("p1", format!("{base}/data")));

    let err = fetcher.refresh(&store, &plugin).await.unwrap_err();
    assert!(matches!(err, EaselError::InvalidJson));
    assert!(store.get("p1").unwrap().data_payload.is_none());
}

#[tokio::test]
async fn literal_null_body_is_empty_not_invalid() {
    let app = axum::Router::new().route("/data", get(|| async { "null" }));
    let base = serve(app).await;
    let (store, fetcher, plugin) = setup(polling_plugin("p1", format!("{base}/data")));

    let err = fetcher.refresh(&store, &plugin).await.unwrap_err();
    assert!(matches!(err, EaselError::EmptyResponse));
}

#[tokio::test]
async fn proxy_envelope_failure_propagates() {
    let app = axum::Router::new().route(
        "/data",
        get(|| async { Json(json!({"status": {"http_code": 404}, "contents": "Not Found"})) }),
    );
    let base = serve(app).await;
    let (store, fetcher, plugin) = setup(polling_plugin("p1", format!("{base}/data")));

    let err = fetcher.refresh(&store, &plugin).await.unwrap_err();
    assert!(matches!(err, EaselError::ProxyHttp(404)));
    assert!(store.get("p1").unwrap().data_payload.is_none());
}

#[tokio::test]
async fn proxy_envelope_placeholder_payload_propagates() {
    let app = axum::Router::new().route(
        "/data",
        get(|| async {
            Json(json!({
                "status": {"http_code": 200},
                "contents": r#"{"error":"Comic not found"}"#
            }))
        }),
    );
    let base = serve(app).await;
    let (store, fetcher, plugin) = setup(polling_plugin("p1", format!("{base}/data")));

    let err = fetcher.refresh(&store, &plugin).await.unwrap_err();
    assert!(matches!(err, EaselError::MissingExpectedFields { .. }));
}

#[tokio::test]
async fn upstream_error_body_with_200_status_fails() {
    let app = axum::Router::new().route(
        "/data",
        get(|| async { Json(json!({"error": "service degraded"})) }),
    );
    let base = serve(app).await;
    let (store, fetcher, plugin) = setup(polling_plugin("p1", format!("{base}/data")));

    let err = fetcher.refresh(&store, &plugin).await.unwrap_err();
    match err {
        EaselError::UpstreamErrorField(msg) => assert_eq!(msg, "service degraded"),
        other => panic!("expected UpstreamErrorField, got {other:?}"),
    }
}

//! Poller tests against a local stand-in for the notify endpoint.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::Query;
use axum::routing::get;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use hilo_core::Variant;
use hilo_server::{Poller, ServerConfig, ServerError};
use hilo_session::VariantCoordinator;

async fn notify(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    if params.get("platform_id").map(String::as_str) != Some("g8") {
        return Json(json!({"status": "ERR", "data": []}));
    }
    match params.get("gid").map(String::as_str) {
        Some("vgmn_101") => Json(json!({
            "status": "OK",
            "data": [
                {"cmd": 2006, "sid": 71, "d1": 3, "d2": 4, "d3": 5},
                {"cmd": 1008, "sid": 9}
            ]
        })),
        Some("vgmn_100") => Json(json!({
            "status": "OK",
            "data": [
                {"cmd": 1008, "sid": 8800},
                {"cmd": 1003, "d1": 1, "d2": 1, "d3": 1}
            ]
        })),
        _ => Json(json!({"status": "ERR"})),
    }
}

/// Serve `router` on an ephemeral port and return its base URL.
async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/notify")
}

fn config(url: &str) -> ServerConfig {
    ServerConfig::default()
        .with_upstream_url(url)
        .with_request_timeout(Duration::from_secs(2))
}

#[tokio::test]
async fn md5_poll_applies_result() {
    let url = spawn_upstream(Router::new().route("/notify", get(notify))).await;
    let coordinator = Arc::new(VariantCoordinator::default());
    let mut poller = Poller::new(Variant::Md5, Arc::clone(&coordinator), &config(&url)).unwrap();

    assert_eq!(poller.poll_once().await.unwrap(), 1);
    let snapshot = coordinator.snapshot(Variant::Md5);
    assert_eq!(snapshot.current_session, 71);
    assert_eq!(snapshot.dice_sum, 12);

    // Same notification again: deduplicated.
    assert_eq!(poller.poll_once().await.unwrap(), 0);
    assert_eq!(coordinator.history_len(Variant::Md5), 1);
    assert_eq!(coordinator.history_len(Variant::Classic), 0);
}

#[tokio::test]
async fn classic_poll_pairs_frames() {
    let url = spawn_upstream(Router::new().route("/notify", get(notify))).await;
    let coordinator = Arc::new(VariantCoordinator::default());
    let mut poller =
        Poller::new(Variant::Classic, Arc::clone(&coordinator), &config(&url)).unwrap();

    assert_eq!(poller.poll_once().await.unwrap(), 1);
    assert_eq!(coordinator.last_session(Variant::Classic), Some(8800));
    assert_eq!(coordinator.snapshot(Variant::Classic).dice_sum, 3);
}

#[tokio::test]
async fn non_ok_status_is_an_error() {
    let router = Router::new().route(
        "/notify",
        get(|| async { Json(json!({"status": "MAINTENANCE", "data": []})) }),
    );
    let url = spawn_upstream(router).await;
    let coordinator = Arc::new(VariantCoordinator::default());
    let mut poller = Poller::new(Variant::Md5, Arc::clone(&coordinator), &config(&url)).unwrap();

    match poller.poll_once().await {
        Err(ServerError::UpstreamStatus(status)) => assert_eq!(status, "MAINTENANCE"),
        other => panic!("expected UpstreamStatus, got {other:?}"),
    }
    assert_eq!(coordinator.history_len(Variant::Md5), 0);
}

#[tokio::test]
async fn http_error_status_is_an_error() {
    let url = spawn_upstream(Router::new()).await;
    let coordinator = Arc::new(VariantCoordinator::default());
    let mut poller = Poller::new(Variant::Md5, coordinator, &config(&url)).unwrap();

    assert!(matches!(
        poller.poll_once().await,
        Err(ServerError::Http(_))
    ));
}

#[tokio::test]
async fn undecodable_body_is_an_error() {
    let router = Router::new().route("/notify", get(|| async { "not json" }));
    let url = spawn_upstream(router).await;
    let coordinator = Arc::new(VariantCoordinator::default());
    let mut poller = Poller::new(Variant::Md5, coordinator, &config(&url)).unwrap();

    assert!(matches!(
        poller.poll_once().await,
        Err(ServerError::Http(_))
    ));
}

//! Gate regression tests.
//!
//! Drives the full router the way the daemon mounts it: seeded blob
//! store, real schedule documents, decisions taken at the actual wall
//! clock. Covers both routes, both variants, and each failure path.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;
use tower::ServiceExt;

use rollgate_api::{GateState, build_router};
use rollgate_core::bucket;
use rollgate_store::BlobStore;

fn seeded_store(schedule_json: &str) -> BlobStore {
    let store = BlobStore::open_in_memory();
    store.put("rollout.json", schedule_json.as_bytes().to_vec());
    store.put(
        "stable.json",
        json!({"version": "2.0.0"}).to_string().into_bytes(),
    );
    store.put(
        "stable.previous.json",
        json!({"version": "1.9.0"}).to_string().into_bytes(),
    );
    store.put(
        "stable.json.sig",
        json!({"sig": "current"}).to_string().into_bytes(),
    );
    store.put(
        "stable.previous.json.sig",
        json!({"sig": "previous"}).to_string().into_bytes(),
    );
    store
}

fn gate(store: BlobStore) -> Router {
    build_router(GateState {
        store,
        client_ip_header: "x-real-ip".to_string(),
    })
}

/// Release a day out: percentage is 0 for everyone.
fn future_release() -> String {
    let release = Utc::now() + Duration::hours(24);
    json!({
        "releaseDate": release.to_rfc3339(),
        "rolloutHours": {"24": "100%"}
    })
    .to_string()
}

/// 999h into a 1000h ramp to 100%: ~99.9%, above every bucket.
fn nearly_complete_release() -> String {
    let release = Utc::now() - Duration::hours(999);
    json!({
        "releaseDate": release.to_rfc3339(),
        "rolloutHours": {"1000": "100%"}
    })
    .to_string()
}

/// 12h into a 24h ramp to 100%: ~50%, splitting the bucket space.
fn half_open_release() -> String {
    let release = Utc::now() - Duration::hours(12);
    json!({
        "releaseDate": release.to_rfc3339(),
        "rolloutHours": {"24": "100%"}
    })
    .to_string()
}

async fn get_json(
    router: Router,
    path: &str,
    client_ip: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().uri(path);
    if let Some(ip) = client_ip {
        builder = builder.header("x-real-ip", ip);
    }
    let resp = router
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| json!(String::from_utf8_lossy(&bytes).to_string()));
    (status, value)
}

#[tokio::test]
async fn pre_release_serves_previous_everywhere() {
    let router = gate(seeded_store(&future_release()));

    let (status, body) = get_json(router.clone(), "/stable.json", Some("1.2.3.4")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"version": "1.9.0"}));

    let (status, body) = get_json(router, "/stable.json.sig", Some("1.2.3.4")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"sig": "previous"}));
}

#[tokio::test]
async fn open_rollout_serves_current_everywhere() {
    let router = gate(seeded_store(&nearly_complete_release()));

    // Highest possible bucket is 99 < 99.9.
    let (status, body) = get_json(router.clone(), "/stable.json", Some("1.2.3.4")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"version": "2.0.0"}));

    let (status, body) = get_json(router, "/stable.json.sig", Some("1.2.3.4")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"sig": "current"}));
}

#[tokio::test]
async fn half_open_rollout_splits_on_bucket() {
    let router = gate(seeded_store(&half_open_release()));

    // Identities chosen on either side of the ~50% threshold.
    let low = "0"; // bucket 48
    let high = "1.2.3.4"; // bucket 80
    assert!(bucket(low) < 50);
    assert!(bucket(high) >= 51);

    let (status, body) = get_json(router.clone(), "/stable.json", Some(low)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"version": "2.0.0"}));

    let (status, body) = get_json(router, "/stable.json", Some(high)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"version": "1.9.0"}));
}

#[tokio::test]
async fn same_client_gets_same_answer_repeatedly() {
    let router = gate(seeded_store(&half_open_release()));

    let (_, first) = get_json(router.clone(), "/stable.json", Some("10.20.30.40")).await;
    for _ in 0..5 {
        let (_, body) = get_json(router.clone(), "/stable.json", Some("10.20.30.40")).await;
        assert_eq!(body, first);
    }
}

#[tokio::test]
async fn missing_header_is_bucket_zero_and_eligible() {
    // Even a barely-open rollout admits bucket 0.
    let release = Utc::now() - Duration::hours(12);
    let schedule = json!({
        "releaseDate": release.to_rfc3339(),
        "rolloutHours": {"24": "1%"}
    })
    .to_string();
    let router = gate(seeded_store(&schedule));

    let (status, body) = get_json(router, "/stable.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"version": "2.0.0"}));
}

#[tokio::test]
async fn expired_schedule_closes_the_rollout() {
    let release = Utc::now() - Duration::hours(5000);
    let schedule = json!({
        "releaseDate": release.to_rfc3339(),
        "rolloutHours": {"24": "100%"}
    })
    .to_string();
    let router = gate(seeded_store(&schedule));

    let (status, body) = get_json(router, "/stable.json", Some("1.2.3.4")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"version": "1.9.0"}));
}

#[tokio::test]
async fn unknown_path_fails_without_store_access() {
    // Empty store: if the fallback touched the store the error would
    // differ. It must fail on routing alone.
    let router = gate(BlobStore::open_in_memory());

    let (status, body) = get_json(router, "/unknown.json", Some("1.2.3.4")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!("invalid requested file"));
}

#[tokio::test]
async fn missing_schedule_is_500() {
    let store = BlobStore::open_in_memory();
    store.put("stable.json", b"{}".to_vec());
    let router = gate(store);

    let (status, body) = get_json(router, "/stable.json", Some("1.2.3.4")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        body.as_str()
            .is_some_and(|s| s.contains("schedule unavailable"))
    );
}

#[tokio::test]
async fn malformed_schedule_is_500() {
    let store = seeded_store(&future_release());
    store.put("rollout.json", b"{\"rolloutHours\": {}}".to_vec());
    let router = gate(store);

    let (status, body) = get_json(router, "/stable.json", Some("1.2.3.4")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.as_str().is_some_and(|s| s.contains("schedule invalid")));
}

#[tokio::test]
async fn missing_selected_artifact_is_500() {
    let store = BlobStore::open_in_memory();
    store.put("rollout.json", future_release().into_bytes());
    let router = gate(store);

    let (status, body) = get_json(router, "/stable.json", Some("1.2.3.4")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        body.as_str()
            .is_some_and(|s| s.contains("artifact unavailable"))
    );
}

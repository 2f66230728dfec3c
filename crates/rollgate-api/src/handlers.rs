//! Gate request handlers.
//!
//! Every request recomputes its rollout decision from scratch: fetch
//! the schedule, evaluate it at the current instant, bucket the
//! caller, then serve the artifact variant the decision selects. No
//! state survives between requests.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use tracing::{debug, warn};

use rollgate_core::{GateError, RolloutDecision, RolloutSchedule, Variant, bucket, keys};

use crate::GateState;

/// GET /stable.json
pub async fn stable_manifest(State(state): State<GateState>, headers: HeaderMap) -> Response {
    serve_artifact(&state, &headers, keys::manifest_key)
        .await
        .unwrap_or_else(error_response)
}

/// GET /stable.json.sig
pub async fn stable_signature(State(state): State<GateState>, headers: HeaderMap) -> Response {
    serve_artifact(&state, &headers, keys::signature_key)
        .await
        .unwrap_or_else(error_response)
}

/// Fallback for every unrecognized path. Fails before any blob-store
/// lookup happens.
pub async fn invalid_route() -> Response {
    error_response(GateError::InvalidRoute)
}

async fn serve_artifact(
    state: &GateState,
    headers: &HeaderMap,
    key_for: fn(Variant) -> &'static str,
) -> Result<Response, GateError> {
    let identity = client_identity(headers, &state.client_ip_header);
    let decision = decide(state, &identity).await?;
    let key = key_for(decision.variant());

    debug!(
        bucket = decision.bucket,
        percentage = decision.percentage,
        serve_current = decision.serve_current,
        key,
        "rollout decision"
    );

    let bytes = state
        .store
        .get(key)
        .await
        .map_err(|e| GateError::ArtifactUnavailable(e.to_string()))?
        .ok_or_else(|| GateError::ArtifactUnavailable(format!("{key} not found")))?;

    let body: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| GateError::ArtifactInvalid(format!("{key}: {e}")))?;

    Ok(Json(body).into_response())
}

/// Fetch and evaluate the schedule, then combine with the caller's bucket.
async fn decide(state: &GateState, identity: &str) -> Result<RolloutDecision, GateError> {
    let raw = state
        .store
        .get(keys::SCHEDULE_KEY)
        .await
        .map_err(|e| GateError::ScheduleUnavailable(e.to_string()))?
        .ok_or_else(|| {
            GateError::ScheduleUnavailable(format!("{} not found", keys::SCHEDULE_KEY))
        })?;

    let schedule = RolloutSchedule::from_bytes(&raw)?;
    let percentage = schedule.evaluate(Utc::now());
    Ok(RolloutDecision::new(bucket(identity), percentage))
}

/// The trusted header's value, verbatim. Missing or non-UTF-8 values
/// read as the empty identity (bucket 0).
fn client_identity(headers: &HeaderMap, header_name: &str) -> String {
    headers
        .get(header_name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Uniform failure surface: one status code, plain-text message. A
/// routing mistake and a backend data problem read the same on the
/// wire.
fn error_response(err: GateError) -> Response {
    warn!(error = %err, "request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [("content-type", "text/plain; charset=utf-8")],
        err.to_string(),
    )
        .into_response()
}

//! rollgate-api — HTTP surface of the rollout gate.
//!
//! Exactly two recognized routes; everything else lands on the
//! fallback and fails without touching the blob store.
//!
//! # Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/stable.json` | Version manifest of the selected variant |
//! | GET | `/stable.json.sig` | Detached signature of the selected variant |

pub mod handlers;

use axum::Router;
use axum::routing::get;

use rollgate_store::BlobStore;

/// Shared state for the gate handlers.
#[derive(Clone)]
pub struct GateState {
    pub store: BlobStore,
    /// Request header trusted (verbatim, no proxy-chain parsing) to
    /// carry the caller's network address.
    pub client_ip_header: String,
}

/// Build the gate router.
pub fn build_router(state: GateState) -> Router {
    Router::new()
        .route("/stable.json", get(handlers::stable_manifest))
        .route("/stable.json.sig", get(handlers::stable_signature))
        .fallback(handlers::invalid_route)
        .with_state(state)
}

//! rollgate-store — artifact blob store for the rollout gate.
//!
//! A read-only key/value lookup over the gate's documents (the rollout
//! schedule, version manifests, and detached signatures). Two backends
//! behind one `Clone + Send + Sync` handle: a flat directory of
//! artifact files for deployments, and an in-memory map for testing.

pub mod error;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::BlobStore;

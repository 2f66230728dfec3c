//! rollgate-core — the rollout decision engine.
//!
//! Pure per-request computation for the rollout gate: a schedule
//! evaluator (rollout document + wall clock → active percentage), a
//! client bucketer (identity string → stable bucket in `[0, 100)`),
//! and the decision combinator that picks the artifact variant to
//! serve. No I/O lives here.
//!
//! # Components
//!
//! - **`schedule`** — Schedule document parsing, validation, and time-phased evaluation
//! - **`bucket`** — Deterministic client bucketing
//! - **`decision`** — Bucket-vs-percentage combinator and variant selection
//! - **`keys`** — Well-known blob-store key names
//! - **`config`** — rollgate.toml parsing
//! - **`error`** — Gate error taxonomy

pub mod bucket;
pub mod config;
pub mod decision;
pub mod error;
pub mod keys;
pub mod schedule;

pub use bucket::bucket;
pub use config::GateConfig;
pub use decision::{RolloutDecision, Variant};
pub use error::{GateError, GateResult};
pub use schedule::{RolloutSchedule, RolloutStep};

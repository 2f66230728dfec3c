//! Error taxonomy for the rollout gate.

use thiserror::Error;

/// Result type alias for gate operations.
pub type GateResult<T> = Result<T, GateError>;

/// Everything that can abort a gate request.
///
/// All variants are handled uniformly at the HTTP boundary: no retries,
/// no partial recovery, a single 500 plain-text response.
#[derive(Debug, Error)]
pub enum GateError {
    /// The requested path is not one of the recognized artifact paths.
    #[error("invalid requested file")]
    InvalidRoute,

    /// The rollout schedule document is missing or failed to fetch.
    #[error("rollout schedule unavailable: {0}")]
    ScheduleUnavailable(String),

    /// The schedule document is structurally malformed.
    #[error("rollout schedule invalid: {0}")]
    ScheduleInvalid(String),

    /// The selected version artifact is missing or failed to fetch.
    #[error("version artifact unavailable: {0}")]
    ArtifactUnavailable(String),

    /// The stored artifact body is not valid JSON.
    #[error("version artifact invalid: {0}")]
    ArtifactInvalid(String),
}

//! Rollout schedule — wire parsing, validation, and time-phased
//! evaluation.
//!
//! The schedule document is operator-managed and fetched fresh from
//! the blob store on every request. Its `rolloutHours` object maps
//! hour offsets (rendered as string keys) to percentage strings with
//! an optional trailing `%`:
//!
//! ```json
//! {
//!   "releaseDate": "2024-01-01T00:00:00Z",
//!   "rolloutHours": { "24": "50%", "48": "100%" }
//! }
//! ```
//!
//! JSON object key order carries no meaning, so validation sorts the
//! steps by hour offset before they are ever evaluated.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{GateError, GateResult};

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Raw schedule document as stored in the blob store.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchedule {
    release_date: String,
    rollout_hours: HashMap<String, String>,
}

/// A single checkpoint on the rollout ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RolloutStep {
    /// Hours after the release date at which this step ends.
    pub hour_offset: f64,
    /// Percentage reached at the end boundary of this step.
    pub target_percentage: f64,
}

/// A validated rollout schedule: a release date plus a piecewise-linear
/// ramp of steps, sorted ascending by hour offset.
#[derive(Debug, Clone)]
pub struct RolloutSchedule {
    pub release_date: DateTime<Utc>,
    pub steps: Vec<RolloutStep>,
}

impl RolloutSchedule {
    /// Parse and validate a schedule document.
    ///
    /// Rejects unparseable JSON, a bad release date, an empty step map,
    /// non-numeric or negative offsets, non-numeric or out-of-range
    /// percentages, and offsets that are not strictly increasing once
    /// sorted.
    pub fn from_bytes(bytes: &[u8]) -> GateResult<Self> {
        let raw: RawSchedule = serde_json::from_slice(bytes)
            .map_err(|e| GateError::ScheduleInvalid(format!("malformed document: {e}")))?;

        let release_date = DateTime::parse_from_rfc3339(&raw.release_date)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                GateError::ScheduleInvalid(format!(
                    "bad releaseDate {:?}: {e}",
                    raw.release_date
                ))
            })?;

        if raw.rollout_hours.is_empty() {
            return Err(GateError::ScheduleInvalid("empty rolloutHours".into()));
        }

        let mut steps = Vec::with_capacity(raw.rollout_hours.len());
        for (offset, percentage) in &raw.rollout_hours {
            steps.push(RolloutStep {
                hour_offset: parse_offset(offset)?,
                target_percentage: parse_percentage(percentage)?,
            });
        }

        // Key declaration order is meaningless; evaluate in offset order.
        steps.sort_by(|a, b| {
            a.hour_offset
                .partial_cmp(&b.hour_offset)
                .expect("offsets validated finite")
        });

        for pair in steps.windows(2) {
            if pair[1].hour_offset <= pair[0].hour_offset {
                return Err(GateError::ScheduleInvalid(format!(
                    "hour offsets must be strictly increasing, got {} then {}",
                    pair[0].hour_offset, pair[1].hour_offset
                )));
            }
        }

        Ok(Self {
            release_date,
            steps,
        })
    }

    /// Compute the rollout percentage active at `now`, in `[0, 100]`.
    ///
    /// Before the release date the rollout is closed (0). Otherwise the
    /// step interval containing `now` ramps linearly from 0 at its
    /// start boundary to its target percentage at its end boundary —
    /// the ramp resets at each step start rather than carrying the
    /// previous step's target forward. When no interval contains `now`
    /// (including any instant at or past the final step's end) the
    /// result is 0: an expired schedule serves the previous variant,
    /// never the whole fleet.
    pub fn evaluate(&self, now: DateTime<Utc>) -> f64 {
        let release_ms = self.release_date.timestamp_millis();
        let now_ms = now.timestamp_millis();

        if now_ms < release_ms {
            return 0.0;
        }

        let mut prev_offset = 0.0;
        for step in &self.steps {
            let start_ms = release_ms + (prev_offset * MS_PER_HOUR) as i64;
            let end_ms = release_ms + (step.hour_offset * MS_PER_HOUR) as i64;

            if now_ms >= start_ms && now_ms < end_ms {
                let fraction = (now_ms - start_ms) as f64 / (end_ms - start_ms) as f64;
                return (fraction * step.target_percentage).clamp(0.0, 100.0);
            }

            prev_offset = step.hour_offset;
        }

        0.0
    }
}

fn parse_offset(raw: &str) -> GateResult<f64> {
    let offset: f64 = raw
        .trim()
        .parse()
        .map_err(|_| GateError::ScheduleInvalid(format!("non-numeric hour offset {raw:?}")))?;
    if !offset.is_finite() || offset < 0.0 {
        return Err(GateError::ScheduleInvalid(format!(
            "hour offset {raw:?} must be a non-negative number"
        )));
    }
    Ok(offset)
}

fn parse_percentage(raw: &str) -> GateResult<f64> {
    let percentage: f64 = raw
        .trim()
        .trim_end_matches('%')
        .parse()
        .map_err(|_| GateError::ScheduleInvalid(format!("non-numeric percentage {raw:?}")))?;
    if !percentage.is_finite() || !(0.0..=100.0).contains(&percentage) {
        return Err(GateError::ScheduleInvalid(format!(
            "percentage {raw:?} must be in [0, 100]"
        )));
    }
    Ok(percentage)
}

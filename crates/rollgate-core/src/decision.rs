//! Decision combinator — bucket vs. active percentage.

use crate::bucket::bucket;

/// Which artifact variant a request should receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// The current stable release.
    Current,
    /// The previous release, served to clients still outside the rollout.
    Previous,
}

/// Per-request rollout decision.
///
/// Ephemeral: computed from the client identity and the schedule at
/// one instant, then discarded with the response. As the percentage
/// climbs, clients cross the threshold from previous to current in
/// bucket order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RolloutDecision {
    pub bucket: u32,
    pub percentage: f64,
    pub serve_current: bool,
}

impl RolloutDecision {
    /// Combine a bucket and the active percentage. The complete rule
    /// is `bucket < percentage` — no hysteresis, no stickiness beyond
    /// the bucketer's own determinism.
    pub fn new(bucket: u32, percentage: f64) -> Self {
        Self {
            bucket,
            percentage,
            serve_current: f64::from(bucket) < percentage,
        }
    }

    /// Decide directly for a client identity string.
    pub fn for_identity(identity: &str, percentage: f64) -> Self {
        Self::new(bucket(identity), percentage)
    }

    pub fn variant(&self) -> Variant {
        if self.serve_current {
            Variant::Current
        } else {
            Variant::Previous
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_threshold() {
        assert!(RolloutDecision::new(24, 25.0).serve_current);
        assert!(!RolloutDecision::new(25, 25.0).serve_current);
        assert!(!RolloutDecision::new(26, 25.0).serve_current);
    }

    #[test]
    fn zero_percentage_serves_previous_to_everyone() {
        for bucket in [0, 1, 50, 99] {
            assert_eq!(
                RolloutDecision::new(bucket, 0.0).variant(),
                Variant::Previous
            );
        }
    }

    #[test]
    fn full_percentage_serves_current_to_everyone() {
        for bucket in [0, 1, 50, 99] {
            assert_eq!(
                RolloutDecision::new(bucket, 100.0).variant(),
                Variant::Current
            );
        }
    }

    #[test]
    fn repeated_decisions_identical() {
        let a = RolloutDecision::for_identity("1.2.3.4", 37.5);
        let b = RolloutDecision::for_identity("1.2.3.4", 37.5);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_identity_always_eligible() {
        let d = RolloutDecision::for_identity("", 0.5);
        assert_eq!(d.bucket, 0);
        assert!(d.serve_current);
    }
}

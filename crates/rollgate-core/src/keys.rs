//! Well-known blob-store keys for the gate's documents.

use crate::decision::Variant;

/// The rollout schedule document.
pub const SCHEDULE_KEY: &str = "rollout.json";

/// Version manifest key for a variant.
pub fn manifest_key(variant: Variant) -> &'static str {
    match variant {
        Variant::Current => "stable.json",
        Variant::Previous => "stable.previous.json",
    }
}

/// Detached signature key for a variant.
pub fn signature_key(variant: Variant) -> &'static str {
    match variant {
        Variant::Current => "stable.json.sig",
        Variant::Previous => "stable.previous.json.sig",
    }
}

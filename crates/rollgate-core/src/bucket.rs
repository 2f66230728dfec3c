//! Client bucketing — deterministic assignment of an identity string
//! to one of 100 buckets.

/// Hash an identity string into a bucket in `[0, 100)`.
///
/// Folds `hash = hash * 31 + byte` over the identity's bytes in
/// wrapping 32-bit signed arithmetic, then reduces the absolute value
/// modulo 100. The fixed width matters: the same identity must land in
/// the same bucket on every platform and in every process, with no
/// seeding. Not cryptographic — rough uniformity and stability are the
/// only requirements.
///
/// The empty identity hashes to bucket 0, so callers with no
/// discernible address are always eligible for the current variant.
pub fn bucket(identity: &str) -> u32 {
    let mut hash: i32 = 0;
    for byte in identity.bytes() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(byte));
    }
    hash.unsigned_abs() % 100
}

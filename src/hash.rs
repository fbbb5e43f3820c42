//! Polynomial string hash used to place course identifiers into buckets.

/// Multiplier of the polynomial accumulation.
pub const HASH_BASE: u32 = 31;

/// Base-31 polynomial over the identifier's bytes in wrapping `u32`
/// arithmetic: `h = h * 31 + byte`.
///
/// Identifiers that share a prefix and differ only in trailing digits
/// (`CSCI200`, `CSCI300`) land far apart, unlike length- or sum-based
/// schemes.
#[inline]
pub fn poly_hash(identifier: &str) -> u32 {
    identifier.bytes().fold(0u32, |h, byte| {
        h.wrapping_mul(HASH_BASE).wrapping_add(u32::from(byte))
    })
}

/// Bucket of `identifier` in a table with `capacity` buckets.
///
/// Always derived from the current capacity; callers never keep an index
/// across a resize.
#[inline]
pub fn bucket_index(identifier: &str, capacity: usize) -> usize {
    debug_assert!(capacity > 0, "bucket_index on a zero-capacity table");
    poly_hash(identifier) as usize % capacity
}

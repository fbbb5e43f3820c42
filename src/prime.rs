//! Prime capacities for the course table.
//!
//! Bucket indices are `hash % capacity`, so capacities are kept prime to
//! avoid common factors between the polynomial hash and the bucket count.

/// Trial division by 2, 3 and then `6k ± 1` up to `⌊√n⌋`.
pub(crate) fn is_prime(n: usize) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    // `i <= n / i` is `i * i <= n` without the overflow.
    let mut i = 5;
    while i <= n / i {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Smallest prime `>= n`.
pub(crate) fn next_prime(n: usize) -> usize {
    if n <= 2 {
        return 2;
    }
    // Round up to odd, then only odd candidates.
    let mut candidate = n | 1;
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}

//! # Prime Sizer
//!
//! Bucket arrays are always sized to a prime so that every double-hashing step
//! in `1..size` is coprime with the array length and a probe sequence visits
//! each slot exactly once before repeating.

/// Result of a primality check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primality {
    Prime,
    NotPrime,
    /// Values below 2 have no primality.
    Undefined,
}

/// Classifies `x` by trial division with odd divisors up to `floor(sqrt(x))`.
#[inline]
pub fn is_prime(x: i64) -> Primality {
    if x < 2 {
        return Primality::Undefined;
    }
    if x < 4 {
        return Primality::Prime;
    }
    if x % 2 == 0 {
        return Primality::NotPrime;
    }
    let mut divisor = 3i64;
    while divisor <= x / divisor {
        if x % divisor == 0 {
            return Primality::NotPrime;
        }
        divisor += 2;
    }
    Primality::Prime
}

/// Returns the smallest prime `>= x`.
///
/// Zero and negative inputs climb until they reach 2.
pub fn next_prime(mut x: i64) -> i64 {
    while is_prime(x) != Primality::Prime {
        x += 1;
    }
    x
}

/// `next_prime` for bucket counts.
#[inline]
pub(crate) fn next_prime_size(x: usize) -> usize {
    next_prime(x as i64) as usize
}

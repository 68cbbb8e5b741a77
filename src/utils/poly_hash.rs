/// Base of the primary hash (start slot).
pub const HT_PRIME_A: u64 = 151;

/// Base of the secondary hash (probe step).
pub const HT_PRIME_B: u64 = 163;

/// Polynomial string hash reduced modulo `modulus`.
///
/// Computes `sum(byte[i] * base^(len - 1 - i)) mod modulus` over the UTF-8 bytes
/// of `s` using Horner's method, reducing after every byte so the wide
/// accumulator never overflows.
///
/// # Arguments
/// * `s` - The string to hash.
/// * `base` - The polynomial base.
/// * `modulus` - The current bucket count; must be non-zero.
///
/// # Returns
/// A value in `0..modulus`.
#[inline]
pub fn poly_hash(s: &str, base: u64, modulus: usize) -> usize {
    let m = modulus as u128;
    let base = base as u128 % m;
    let mut hash = 0u128;
    for &byte in s.as_bytes() {
        hash = (hash * base + byte as u128) % m;
    }
    hash as usize
}

/// The double-hashing probe sequence of one key over one bucket array.
///
/// Attempt `i` yields `(hash_a + i * (hash_b + 1)) mod size`. The sequence
/// ends after `size` attempts; with a prime `size` and a step in `1..size`
/// that covers every slot exactly once.
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    index: usize,
    step: usize,
    size: usize,
    attempt: usize,
}

impl ProbeSequence {
    /// Builds the probe sequence for `key` over `size` slots.
    ///
    /// # Arguments
    /// * `key` - The key being looked up or placed.
    /// * `size` - The bucket count the indices are taken modulo.
    /// * `prime_a` - Base of the start-slot hash.
    /// * `prime_b` - Base of the step hash.
    pub fn new(key: &str, size: usize, prime_a: u64, prime_b: u64) -> Self {
        let hash_a = poly_hash(key, prime_a, size);
        let hash_b = poly_hash(key, prime_b, size);
        // hash_b == size - 1 would make the step a multiple of size
        let step = match (hash_b + 1) % size {
            0 => 1,
            step => step,
        };
        Self {
            index: hash_a,
            step,
            size,
            attempt: 0,
        }
    }

    /// The number of indices handed out so far.
    #[inline]
    pub fn attempts(&self) -> usize {
        self.attempt
    }
}

impl Iterator for ProbeSequence {
    type Item = usize;

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.size - self.attempt;
        (remaining, Some(remaining))
    }

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.attempt >= self.size {
            return None;
        }
        let current = self.index;
        self.index = (self.index + self.step) % self.size;
        self.attempt += 1;
        Some(current)
    }
}

impl ExactSizeIterator for ProbeSequence {}

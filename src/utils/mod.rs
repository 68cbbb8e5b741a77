//! # Utility Modules
//!
//! Leaf helpers the table engine is built on: prime sizing for the bucket
//! array and the polynomial hash that drives double-hashing probes.

/// Primality checks and next-prime search used to size bucket arrays.
pub mod prime;

/// Polynomial string hashing and the double-hashing probe sequence.
///
/// Both hashes are simple accumulators, chosen for reproducibility rather than
/// resistance to crafted collisions.
pub mod poly_hash;

//! # PrimeProbe
//!
//! Resizable open-addressing hash table mapping string keys to string values.
//! Buckets live in a prime-sized array probed by double hashing; deletions leave
//! tombstones so other keys' probe sequences stay intact, and the array grows or
//! shrinks when the load crosses configurable thresholds.
//!
//! ```
//! use primeprobe::HashTable;
//!
//! let mut table = HashTable::new();
//! table.insert("name", "Ryan").unwrap();
//! assert_eq!(table.search("name"), Some("Ryan"));
//! assert!(table.delete("name"));
//! assert_eq!(table.search("name"), None);
//! ```
pub mod config;
pub mod error;
pub mod table;
pub mod types;
pub mod utils;

#[cfg(feature = "node")]
pub mod node;

// Re-export main types
pub use config::TableConfig;
pub use error::{ConfigError, TableError, TableResult};
pub use table::{HashTable, Iter};
pub use types::{CollisionStats, Entry, Slot, SlotStats};

// Re-export for sizing and hashing helpers
pub use utils::poly_hash::{poly_hash, ProbeSequence};
pub use utils::prime::{is_prime, next_prime, Primality};

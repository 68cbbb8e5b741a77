//! Error types for table operations and configuration loading.

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Errors surfaced by `HashTable` mutations.
///
/// Lookup misses are not errors; `search` returns `None` and `delete` returns `false`.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Out of memory: failed to allocate {slots} bucket slots")]
    Allocation { slots: usize },

    #[error("Batch length mismatch: {keys} keys but {values} values")]
    BatchLengthMismatch { keys: usize, values: usize },

    #[error("No free slot found after probing all {size} buckets")]
    Saturated { size: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

//! # Table Configuration
//!
//! Tuning knobs for `HashTable`: the starting (and minimum) base size, the load
//! thresholds that trigger growth and shrinking, and the two hash bases. The
//! defaults reproduce the classic 10 / 70% / 10% / 151 / 163 setup, and a TOML
//! file can override any subset of them.

use crate::error::{ConfigError, ConfigResult};
use crate::utils::poly_hash::{HT_PRIME_A, HT_PRIME_B};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for bucket sizing and double hashing.
///
/// ```toml
/// initial_base_size = 10
/// grow_load_percent = 70
/// shrink_load_percent = 10
/// hash_prime_a = 151
/// hash_prime_b = 163
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Base size of a fresh table. Resize requests below it are ignored.
    pub initial_base_size: usize,

    /// An insert first grows the table when the load is above this percentage.
    pub grow_load_percent: usize,

    /// A delete first shrinks the table when the load is below this percentage.
    pub shrink_load_percent: usize,

    /// Polynomial base of the hash that picks the first slot.
    pub hash_prime_a: u64,

    /// Polynomial base of the hash that picks the probe step.
    pub hash_prime_b: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_base_size: 10,
            grow_load_percent: 70,
            shrink_load_percent: 10,
            hash_prime_a: HT_PRIME_A,
            hash_prime_b: HT_PRIME_B,
        }
    }
}

impl TableConfig {
    /// Loads and validates a `TableConfig` from a TOML file.
    ///
    /// Fields missing from the file keep their default values.
    ///
    /// # Arguments
    /// * `path` - The path to the configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates a `TableConfig` from TOML text.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: TableConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration back to TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Checks that the thresholds and hash bases describe a usable table.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.initial_base_size == 0 {
            return Err(ConfigError::Invalid(
                "initial_base_size must be at least 1".to_string(),
            ));
        }
        if self.grow_load_percent >= 100 {
            return Err(ConfigError::Invalid(format!(
                "grow_load_percent must be below 100, got {}",
                self.grow_load_percent
            )));
        }
        if self.shrink_load_percent >= self.grow_load_percent {
            return Err(ConfigError::Invalid(format!(
                "shrink_load_percent ({}) must be below grow_load_percent ({})",
                self.shrink_load_percent, self.grow_load_percent
            )));
        }
        if self.hash_prime_a < 2 || self.hash_prime_b < 2 {
            return Err(ConfigError::Invalid(
                "hash primes must be at least 2".to_string(),
            ));
        }
        if self.hash_prime_a == self.hash_prime_b {
            return Err(ConfigError::Invalid(
                "hash_prime_a and hash_prime_b must differ".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns a one-line summary of the configuration.
    pub fn stats(&self) -> String {
        format!(
            "TableConfig: base {} grow>{}% shrink<{}% primes {}/{}",
            self.initial_base_size,
            self.grow_load_percent,
            self.shrink_load_percent,
            self.hash_prime_a,
            self.hash_prime_b
        )
    }
}

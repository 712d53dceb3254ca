//! Configuration system for the prediction structures.
//!
//! This module defines all configuration structures used to parameterize the components.
//! It provides:
//! 1. **Defaults:** Baseline table sizes, counter widths, and the default IPV.
//! 2. **Structures:** Predictor and replacement policy configuration.
//!
//! Configuration is deserialized from JSON by the CLI, or use `Config::default()`.
//! Validation happens when a component is constructed, not at parse time.

use serde::Deserialize;

use crate::common::constants::{DEFAULT_ASSOCIATIVITY, DEFAULT_IPV, INST_SHIFT_AMT};

/// Default configuration constants.
///
/// These values define the baseline configuration when not explicitly overridden.
mod defaults {
    /// Default counter table size (2048 entries).
    pub const TABLE_SIZE: usize = 2048;

    /// Default saturating counter width (2-bit counters).
    pub const COUNTER_BITS: u32 = 2;

    /// Default global history width (8 bits).
    ///
    /// Leaves `log2(2048) - 8 = 3` PC bits in the index.
    pub const HISTORY_BITS: u32 = 8;

    /// Default number of hardware threads.
    pub const THREADS: usize = 1;
}

/// Root configuration structure containing all component settings.
///
/// # Examples
///
/// ```
/// use uarch_core::config::Config;
///
/// let json = r#"{
///     "predictor": { "table_size": 256, "history_bits": 4 },
///     "replacement": { "associativity": 16 }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.predictor.table_size, 256);
/// assert_eq!(config.predictor.counter_bits, 2);
/// assert_eq!(config.replacement.ipv.len(), 17);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// GSelect branch predictor configuration
    #[serde(default)]
    pub predictor: GSelectConfig,
    /// LRU-IPV replacement policy configuration
    #[serde(default)]
    pub replacement: IpvConfig,
}

/// GSelect predictor parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GSelectConfig {
    /// Number of saturating counters; must be a power of two.
    #[serde(default = "GSelectConfig::default_table_size")]
    pub table_size: usize,

    /// Width of each saturating counter in bits (1 to 8).
    #[serde(default = "GSelectConfig::default_counter_bits")]
    pub counter_bits: u32,

    /// Width of the global history register; at most `log2(table_size)`.
    #[serde(default = "GSelectConfig::default_history_bits")]
    pub history_bits: u32,

    /// Number of simulated hardware threads, each with its own history register.
    #[serde(default = "GSelectConfig::default_threads")]
    pub threads: usize,

    /// Low PC bits discarded before indexing.
    #[serde(default = "GSelectConfig::default_inst_shift_amt")]
    pub inst_shift_amt: u32,

    /// Initial counter value. Defaults to mid-scale (`max / 2`, weakly not-taken).
    #[serde(default)]
    pub initial_counter: Option<u8>,
}

impl GSelectConfig {
    /// Returns the default table size.
    const fn default_table_size() -> usize {
        defaults::TABLE_SIZE
    }

    /// Returns the default counter width.
    const fn default_counter_bits() -> u32 {
        defaults::COUNTER_BITS
    }

    /// Returns the default history width.
    const fn default_history_bits() -> u32 {
        defaults::HISTORY_BITS
    }

    /// Returns the default thread count.
    const fn default_threads() -> usize {
        defaults::THREADS
    }

    /// Returns the default instruction alignment shift.
    const fn default_inst_shift_amt() -> u32 {
        INST_SHIFT_AMT
    }
}

impl Default for GSelectConfig {
    fn default() -> Self {
        Self {
            table_size: defaults::TABLE_SIZE,
            counter_bits: defaults::COUNTER_BITS,
            history_bits: defaults::HISTORY_BITS,
            threads: defaults::THREADS,
            inst_shift_amt: INST_SHIFT_AMT,
            initial_counter: None,
        }
    }
}

/// LRU-IPV replacement policy parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IpvConfig {
    /// Number of lines sharing one rank vector.
    #[serde(default = "IpvConfig::default_associativity")]
    pub associativity: usize,

    /// Promotion targets per slot followed by the insertion rank.
    #[serde(default = "IpvConfig::default_ipv")]
    pub ipv: Vec<u32>,
}

impl IpvConfig {
    /// Returns the default associativity.
    const fn default_associativity() -> usize {
        DEFAULT_ASSOCIATIVITY
    }

    /// Returns the default insertion/promotion vector.
    fn default_ipv() -> Vec<u32> {
        DEFAULT_IPV.to_vec()
    }
}

impl Default for IpvConfig {
    fn default() -> Self {
        Self {
            associativity: DEFAULT_ASSOCIATIVITY,
            ipv: DEFAULT_IPV.to_vec(),
        }
    }
}

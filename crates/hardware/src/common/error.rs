//! Error definitions.
//!
//! This module defines the recoverable error types of the crate. It provides:
//! 1. **Configuration Errors:** Raised at construction when parameters cannot produce
//!    a consistent table index or rank ordering. These refuse to build a component.
//! 2. **Trace Errors:** Raised when a replay trace cannot be read or parsed.
//!
//! Contract violations by the caller (out-of-range thread ids, an empty victim
//! candidate list) are not represented here; they panic.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid component configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The counter table entry count is not a power of two.
    #[error("invalid predictor table size {0}: must be a power of two")]
    TableSizeNotPowerOfTwo(usize),

    /// The global history is wider than the table index.
    #[error("history width {history_bits} exceeds index width {index_bits}")]
    HistoryTooWide {
        /// Requested global history width.
        history_bits: u32,
        /// `log2` of the table size.
        index_bits: u32,
    },

    /// The saturating counter width is outside `1..=8`.
    #[error("invalid counter width {0}: must be between 1 and 8 bits")]
    CounterBits(u32),

    /// The initial counter value does not fit the counter width.
    #[error("initial counter value {value} exceeds counter maximum {max}")]
    InitialCounter {
        /// Requested initial value.
        value: u8,
        /// Largest value representable with the configured width.
        max: u8,
    },

    /// No hardware threads were configured.
    #[error("thread count must be at least 1")]
    NoThreads,

    /// The instruction alignment shift leaves no usable PC bits.
    #[error("instruction shift {0} must be below 64")]
    InstShift(u32),

    /// Associativity of zero.
    #[error("associativity must be at least 1")]
    ZeroAssociativity,

    /// The IPV does not have one entry per way plus the insertion entry.
    #[error("IPV has {len} entries, expected associativity + 1 = {expected}")]
    IpvLength {
        /// Number of entries supplied.
        len: usize,
        /// Required number of entries.
        expected: usize,
    },

    /// An IPV entry names a rank outside the set.
    #[error("IPV entry {index} has rank {rank}, which is not below associativity {associativity}")]
    IpvRank {
        /// Position of the offending entry.
        index: usize,
        /// Offending rank.
        rank: u32,
        /// Configured associativity.
        associativity: usize,
    },
}

/// Failure to load a replay trace or configuration file.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The file could not be read.
    #[error("could not read '{path}': {source}")]
    Io {
        /// File that failed to open or read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file contents are not valid JSON for the expected structure.
    #[error("could not parse '{path}': {source}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

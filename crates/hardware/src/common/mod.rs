//! Common utilities and types shared by the predictor and the replacement policy.
//!
//! This module provides the building blocks used across the crate:
//! 1. **Constants:** Instruction alignment, default associativity and the default IPV.
//! 2. **Bit helpers:** Mask construction and power-of-two checks used for index derivation.
//! 3. **Error Handling:** Configuration and trace loading errors.

/// Common constants used throughout the crate.
pub mod constants;

/// Error types for configuration and trace handling.
pub mod error;

pub use constants::{DEFAULT_ASSOCIATIVITY, DEFAULT_IPV, INST_SHIFT_AMT};
pub use error::{ConfigError, TraceError};

/// Hardware thread identifier supplied by the host pipeline.
pub type ThreadId = usize;

/// Returns a mask with the low `bits` bits set.
///
/// Saturates to all ones for widths of 64 or more.
#[inline(always)]
pub const fn mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Returns `log2(value)` rounded up; `value` must be non-zero.
#[inline]
pub const fn ceil_log2(value: usize) -> u32 {
    if value <= 1 {
        0
    } else {
        usize::BITS - (value - 1).leading_zeros()
    }
}

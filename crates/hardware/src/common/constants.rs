//! Global Constants.
//!
//! This module defines the fixed parameters shared by the prediction structures. It includes:
//! 1. **Instruction Constants:** Alignment shift applied to branch addresses before indexing.
//! 2. **Replacement Constants:** Default set associativity and the insertion/promotion vector.

/// Number of low PC bits dropped before indexing (4-byte instruction alignment).
pub const INST_SHIFT_AMT: u32 = 2;

/// Number of lines sharing one rank vector.
pub const DEFAULT_ASSOCIATIVITY: usize = 16;

/// Insertion/promotion vector.
///
/// Entry `i` for `i < 16` is the rank a hit on slot `i` is promoted to. Entry 16 is the
/// rank assigned to a freshly filled line.
pub const DEFAULT_IPV: [u32; DEFAULT_ASSOCIATIVITY + 1] =
    [0, 0, 1, 0, 3, 0, 1, 2, 1, 0, 5, 1, 0, 0, 1, 11, 13];

/// Largest supported saturating counter width in bits.
pub const MAX_COUNTER_BITS: u32 = u8::BITS;

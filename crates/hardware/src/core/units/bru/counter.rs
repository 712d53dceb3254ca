//! Saturating Counter.
//!
//! An N-bit counter that clamps at zero and at `2^N - 1` instead of wrapping.
//! The most significant bit is the taken/not-taken prediction.

/// Fixed-width saturating counter (1 to 8 bits).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SatCounter {
    value: u8,
    max: u8,
}

impl SatCounter {
    /// Creates a counter of `bits` width holding `initial`.
    ///
    /// `bits` must be in `1..=8` and `initial` must not exceed `2^bits - 1`;
    /// the predictor validates both before building its table.
    pub const fn new(bits: u32, initial: u8) -> Self {
        let max = Self::max_for(bits);
        debug_assert!(initial <= max);
        Self {
            value: initial,
            max,
        }
    }

    /// Largest value representable in `bits` bits.
    pub const fn max_for(bits: u32) -> u8 {
        if bits >= u8::BITS {
            u8::MAX
        } else {
            (1u8 << bits) - 1
        }
    }

    /// Current counter value.
    pub const fn value(self) -> u8 {
        self.value
    }

    /// Saturation limit.
    pub const fn max(self) -> u8 {
        self.max
    }

    /// Top bit of the counter: set once the value reaches half the range.
    pub const fn is_taken(self) -> bool {
        self.value > self.max >> 1
    }

    /// Moves towards taken, saturating at the maximum.
    pub const fn increment(&mut self) {
        if self.value < self.max {
            self.value += 1;
        }
    }

    /// Moves towards not-taken, saturating at zero.
    pub const fn decrement(&mut self) {
        self.value = self.value.saturating_sub(1);
    }
}

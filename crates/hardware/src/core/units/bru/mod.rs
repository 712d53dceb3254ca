//! Branch prediction unit (BRU) implementations.
//!
//! This module contains the GSelect direction predictor, the saturating counters
//! backing its pattern table, and the history token that carries speculative state
//! from prediction to resolution.

pub use self::branch_predictor::BranchPredictor;
pub use self::counter::SatCounter;
pub use self::gselect::GSelectPredictor;
pub use self::history::BpHistory;

/// Branch predictor trait and common functionality.
pub mod branch_predictor;

/// Fixed-width saturating counters.
pub mod counter;

/// Global history branch predictor with concatenated PC and history index (gselect).
pub mod gselect;

/// Speculative history tokens returned at prediction time.
pub mod history;

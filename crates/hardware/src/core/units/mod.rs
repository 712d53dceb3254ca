//! Functional units.
//!
//! This module contains the branch prediction unit and the cache replacement
//! machinery. The two units share no state.

/// Branch Resolution Unit: GSelect direction predictor and saturating counters.
pub mod bru;

/// Cache set tags and replacement policies.
pub mod cache;

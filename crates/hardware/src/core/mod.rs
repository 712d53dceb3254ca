//! Core prediction structures.
//!
//! This module contains the functional units a host pipeline and cache controller
//! drive: the branch direction predictor and the cache replacement policy.

/// Prediction and replacement units.
pub mod units;

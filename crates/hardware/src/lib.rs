//! Speculative prediction structures for microarchitecture simulators.
//!
//! This crate implements two independent leaf components that a host simulator drives:
//! 1. **Branch prediction:** A GSelect predictor with per-thread speculative global history,
//!    a shared saturating-counter table, and squash/resolve reconciliation.
//! 2. **Cache replacement:** An LRU-IPV policy that keeps a dense, collision-free rank
//!    ordering per set using a fixed insertion/promotion vector.
//! 3. **Simulation:** Configuration, statistics, and trace replay used to exercise both.

/// Common types and constants (error types, masks, IPV defaults).
pub mod common;
/// Component configuration (defaults and deserializable structures).
pub mod config;
/// Predictor and replacement policy units.
pub mod core;
/// Trace loading and replay drivers.
pub mod sim;
/// Prediction and replacement statistics.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// GSelect branch predictor.
pub use crate::core::units::bru::gselect::GSelectPredictor;
/// LRU insertion/promotion vector replacement policy.
pub use crate::core::units::cache::policies::LruIpvPolicy;

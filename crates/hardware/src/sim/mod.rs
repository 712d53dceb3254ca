//! Trace loading and replay.
//!
//! Provides utilities for reading recorded branch and memory access streams and
//! feeding them through the predictor and the replacement policy.

/// Replay drivers for branch and access traces.
pub mod replay;

/// Trace event definitions and JSON loading.
pub mod trace;

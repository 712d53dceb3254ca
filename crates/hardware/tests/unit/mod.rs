//! # Unit Components
//!
//! This module serves as the central hub for the unit tests of each component.

/// Unit tests for configuration defaults and deserialization.
pub mod config;

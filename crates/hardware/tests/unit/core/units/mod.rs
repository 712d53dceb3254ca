//! # Functional Unit Tests

//! # Core Unit Tests
//!
//! Tests for the processor core, organized like the crate itself.

/// Architectural state tests (registers, memory cells, canvas, displays).
pub mod arch;

/// Per-operation execution tests against a bare processor.
pub mod processor;

//! # Simulation Tests

/// Fault collector tests.
pub mod faults;

/// Property tests across frames and recompilations.
pub mod properties;

/// Frame driver tests.
pub mod simulator;

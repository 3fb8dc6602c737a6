//! # Unit Components
//!
//! This module serves as the central hub for the per-component tests. It
//! follows the crate layout: configuration, the instruction set, the
//! processor core and its units, and the frame-driven simulator.


/// Processor core tests.
///
/// This module covers architectural state (registers, memory cells, canvas,
/// displays), the ALU and noise units, and per-operation execution.
pub mod core;


/// Frame driver, fault collection and cross-frame properties.
pub mod sim;

/// Unit tests for statistics counting and reporting.
///
/// This module ensures the [`SimStats`](mlogvm_core::stats::SimStats) counters
/// track the slot mix and diagnostics of a run.
pub mod stats;

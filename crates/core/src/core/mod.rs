//! Core processor implementation.
//!
//! This module contains the processor, its architectural state (registers,
//! memory cells, canvas, displays) and the pure execution units it calls into.

/// Architectural state (registers, memory cells, canvas, displays).
pub mod arch;

/// Processor state container and instruction execution.
pub mod processor;

/// Execution units (ALU, noise).
pub mod units;

pub use self::processor::Processor;

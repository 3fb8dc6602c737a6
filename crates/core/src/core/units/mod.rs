//! Execution units and functional components.
//!
//! This module contains the pure computational units the processor calls
//! into: the ALU behind `op`, and the noise generator behind `op noise`.

/// Arithmetic Logic Unit for `op` instructions.
pub mod alu;

/// Deterministic two-dimensional simplex noise.
pub mod noise;

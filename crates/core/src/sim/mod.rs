//! Frame-driven simulation.
//!
//! Ties the pieces together for a host loop: the compiler interface, the
//! per-frame fault collector and the [`Simulator`] driver itself.

/// Source-to-instruction compiler interface.
pub mod compiler;

/// Per-frame faults, warnings and decoded view.
pub mod faults;

/// Frame-driven execution loop.
pub mod simulator;

pub use self::compiler::{Compiler, PassthroughCompiler};
pub use self::simulator::{FrameSummary, RunState, Simulator};

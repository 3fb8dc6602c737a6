//! Logic processor emulator library.
//!
//! This crate emulates a programmable logic processor running a small
//! assembly-like instruction language. It provides the following:
//! 1. **Core:** Register store, program counter, memory cells, drawing canvas and displays.
//! 2. **ISA:** Instruction decoding, operand classification and translation to operations.
//! 3. **Units:** The arithmetic/logic unit and the deterministic simplex noise source.
//! 4. **Simulation:** Frame-driven execution at a fixed instruction rate with fault collection.
//! 5. **Support:** Configuration and statistics collection.

/// Common types and constants (values, colors, errors).
pub mod common;
/// Emulator configuration (defaults, reload policy, linked blocks, canvas).
pub mod config;
/// Processor core (architectural state, execution, units).
pub mod core;
/// Instruction set (decode, operands, opcodes, translation, disassembly).
pub mod isa;
/// Compiler interface, fault collection and the frame driver.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Runtime value type held by registers and memory cells.
pub use crate::common::value::Value;
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Processor state container; executes one instruction per tick.
pub use crate::core::Processor;
/// Frame driver and compiler interface; construct with `Simulator::new`.
pub use crate::sim::{Compiler, PassthroughCompiler, Simulator};

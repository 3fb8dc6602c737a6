//! Common utilities and types used throughout the logic-processor emulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the emulator. It includes:
//! 1. **Constants:** Numeric tolerances, instruction-rate and canvas defaults, rasterizer limits.
//! 2. **Error Handling:** Instruction faults and compile failures.
//! 3. **Values:** The dynamically-typed register value and its coercion rules.

/// Common constants used throughout the emulator.
pub mod constants;

/// Error types for instruction faults and compile failures.
pub mod error;

/// Register value types (numbers, text, colors, references).
pub mod value;

pub use error::{CompileError, ExecError, SourceLocation};
pub use value::{ArrayRef, Rgba, SurfaceRef, Value};

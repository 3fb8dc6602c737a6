//! Instruction fault and compile failure definitions.
//!
//! This module defines the error types surfaced by the emulator. It provides:
//! 1. **Instruction Faults:** Every way applying a single instruction can fail.
//! 2. **Compile Failures:** The error an external compiler reports for a whole program.
//! 3. **Source Locations:** Optional `(line, column)` positions attached to compile failures.
//!
//! None of these errors ever stops the execution loop; they are recorded by the
//! fault collector and shown to the user next to the offending line.

use std::fmt;

use thiserror::Error;

/// Failure raised while translating or applying one instruction.
///
/// An `ExecError` is isolated to the instruction that raised it: the
/// execution loop records it against the instruction's source line and moves
/// on to the next instruction period.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ExecError {
    /// The instruction has fewer operands than its opcode requires.
    #[error("{mnemonic}: expected {expected} operand(s), found {found}")]
    Arity {
        /// Opcode (and sub-opcode) that was being translated.
        mnemonic: String,
        /// Minimum number of operands required.
        expected: usize,
        /// Number of operands present.
        found: usize,
    },

    /// An operand resolved to a value of the wrong kind.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        /// Kind the instruction needed.
        expected: &'static str,
        /// Kind the operand actually held.
        found: &'static str,
    },

    /// A text value could not be read as a number.
    #[error("cannot convert {0:?} to a number")]
    NotANumber(String),

    /// A memory cell was indexed outside its bounds.
    #[error("index {index} out of bounds for {array} (size {len})")]
    IndexOutOfBounds {
        /// Name of the linked memory cell.
        array: String,
        /// Requested index, as the program supplied it.
        index: f64,
        /// Number of slots in the cell.
        len: usize,
    },

    /// Division, integer division or modulo by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A math function was called outside its domain (`log 0`, `sqrt -1`, `asin 2`).
    #[error("math domain error in {0}")]
    MathDomain(&'static str),

    /// An arithmetic operation overflowed to infinity or produced NaN.
    #[error("{0} produced a non-finite result")]
    NonFinite(&'static str),

    /// A `#rrggbb` color literal could not be parsed.
    #[error("invalid color literal {0:?}")]
    InvalidColor(String),

    /// The `stop` instruction; raised every time it executes.
    #[error("division by zero (stop)")]
    Stop,
}

impl ExecError {
    /// Returns true for faults of the divide-by-zero class, including `stop`.
    pub const fn is_division_by_zero(&self) -> bool {
        matches!(self, Self::DivisionByZero | Self::Stop)
    }
}

/// A `(line, column)` position in the compiler's source text, both 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Rejection of the whole program by the external compiler.
///
/// While the source fails to compile no instruction runs; the failure is
/// reported once per frame.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CompileError {
    /// Human-readable description from the compiler.
    pub message: String,
    /// Where in the source the compiler gave up, when it knows.
    pub location: Option<SourceLocation>,
}

impl CompileError {
    /// Creates a compile error without a location.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    /// Creates a compile error pointing at `line`/`column` (1-based).
    pub fn at(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            location: Some(SourceLocation { line, column }),
        }
    }

    /// Source line the error is reported against; `0` when unknown.
    pub fn line(&self) -> usize {
        self.location.map_or(0, |loc| loc.line)
    }
}

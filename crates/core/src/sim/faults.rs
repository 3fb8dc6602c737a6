//! Fault collector.
//!
//! Collects what went wrong during one frame, for the host to show next to the
//! offending lines. It records:
//! 1. **Faults:** Compile failures and instruction faults, one entry per occurrence.
//! 2. **Warnings:** Unsupported instructions, one entry per source line.
//! 3. **Decoded view:** The last attempt of each slot, rendered to canonical text.
//!
//! Everything here is cleared at the start of every frame.

use std::collections::BTreeMap;
use std::fmt;

use crate::common::error::{CompileError, ExecError};
use crate::isa::translate::{Unsupported, UnsupportedReason};

/// Why a fault was raised.
#[derive(Clone, Debug, PartialEq)]
pub enum FaultCause {
    /// The compiler rejected the whole program.
    Compile(CompileError),
    /// One instruction failed to translate or apply.
    Instruction(ExecError),
}

/// One recorded fault.
#[derive(Clone, Debug, PartialEq)]
pub struct Fault {
    /// Human-readable description.
    pub message: String,
    /// 1-based line the fault is reported against; 0 when unknown.
    pub source_line: usize,
    /// Underlying error.
    pub cause: FaultCause,
}

impl Fault {
    /// Creates a fault from a compile failure.
    pub fn compile(err: CompileError) -> Self {
        let message = match err.location {
            Some(location) => format!("compile error at {location}: {}", err.message),
            None => format!("compile error: {}", err.message),
        };
        Self {
            message,
            source_line: err.line(),
            cause: FaultCause::Compile(err),
        }
    }

    /// Creates a fault from an instruction failure on `source_line`.
    pub fn instruction(err: ExecError, source_line: usize) -> Self {
        Self {
            message: err.to_string(),
            source_line,
            cause: FaultCause::Instruction(err),
        }
    }

    /// Returns true for compile failures.
    pub const fn is_compile(&self) -> bool {
        matches!(self.cause, FaultCause::Compile(_))
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.source_line, self.message)
    }
}

/// An unsupported instruction, reported once per source line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warning {
    /// 1-based source line.
    pub source_line: usize,
    /// Mnemonic as written.
    pub mnemonic: String,
    /// Why it was skipped.
    pub reason: UnsupportedReason,
}

impl Warning {
    /// Creates a warning for `unsupported` on `source_line`.
    pub fn new(unsupported: Unsupported, source_line: usize) -> Self {
        Self {
            source_line,
            mnemonic: unsupported.mnemonic,
            reason: unsupported.reason,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unsupported = Unsupported {
            mnemonic: self.mnemonic.clone(),
            reason: self.reason,
        };
        write!(f, "line {}: {unsupported}", self.source_line)
    }
}

/// Outcome of the last attempt of a slot, for the decoded view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecodedStatus {
    /// The operation was applied.
    Executed,
    /// The instruction was skipped as unsupported.
    Unsupported,
    /// The instruction faulted.
    Faulted,
}

/// One line of the decoded view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedLine {
    /// 1-based source line.
    pub source_line: usize,
    /// Canonical operation text, or the raw instruction when it did not translate.
    pub text: String,
    /// What happened on the last attempt this frame.
    pub status: DecodedStatus,
}

/// Per-frame fault, warning and decoded-view collector.
#[derive(Clone, Debug, Default)]
pub struct FaultLog {
    faults: Vec<Fault>,
    warnings: BTreeMap<usize, Warning>,
    decoded: BTreeMap<usize, DecodedLine>,
}

impl FaultLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&mut self) {
        self.faults.clear();
        self.warnings.clear();
        self.decoded.clear();
    }

    /// Records a fault.
    pub fn fault(&mut self, fault: Fault) {
        self.faults.push(fault);
    }

    /// Records a warning, replacing an earlier one for the same line.
    pub fn warn(&mut self, warning: Warning) {
        let _ = self.warnings.insert(warning.source_line, warning);
    }

    /// Records the latest attempt of a slot in the decoded view.
    pub fn decoded(&mut self, line: DecodedLine) {
        let _ = self.decoded.insert(line.source_line, line);
    }

    /// Faults in the order they were raised.
    pub fn faults(&self) -> &[Fault] {
        &self.faults
    }

    /// Warnings sorted by source line.
    pub fn warnings(&self) -> impl Iterator<Item = &Warning> {
        self.warnings.values()
    }

    /// Number of distinct warned lines.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Decoded view sorted by source line.
    pub fn decoded_lines(&self) -> impl Iterator<Item = &DecodedLine> {
        self.decoded.values()
    }

    /// Returns true when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.faults.is_empty() && self.warnings.is_empty() && self.decoded.is_empty()
    }
}

//! Fault Log Tests.
//!
//! Verifies fault construction and message formatting, per-line warning
//! deduplication, and the decoded view keeping the latest attempt.

use mlogvm_core::common::error::{CompileError, ExecError};
use mlogvm_core::isa::translate::{Unsupported, UnsupportedReason};
use mlogvm_core::sim::faults::{DecodedLine, DecodedStatus, Fault, FaultCause, FaultLog, Warning};
use pretty_assertions::assert_eq;

fn unknown(mnemonic: &str) -> Unsupported {
    Unsupported {
        mnemonic: mnemonic.to_owned(),
        reason: UnsupportedReason::UnknownOpcode,
    }
}

// ─── Faults ──────────────────────────────────────────────────────────────────

#[test]
fn compile_fault_with_location() {
    let fault = Fault::compile(CompileError::at("missing `)`", 4, 12));
    assert!(fault.is_compile());
    assert_eq!(fault.source_line, 4);
    assert_eq!(fault.message, "compile error at 4:12: missing `)`");
    assert_eq!(fault.to_string(), "line 4: compile error at 4:12: missing `)`");
}

#[test]
fn compile_fault_without_location() {
    let fault = Fault::compile(CompileError::new("empty input"));
    assert_eq!(fault.source_line, 0);
    assert_eq!(fault.message, "compile error: empty input");
}

#[test]
fn instruction_fault_keeps_the_cause() {
    let fault = Fault::instruction(ExecError::DivisionByZero, 7);
    assert!(!fault.is_compile());
    assert_eq!(fault.cause, FaultCause::Instruction(ExecError::DivisionByZero));
    assert_eq!(fault.to_string(), "line 7: division by zero");
}

#[test]
fn faults_keep_every_occurrence_in_order() {
    let mut log = FaultLog::new();
    log.fault(Fault::instruction(ExecError::Stop, 2));
    log.fault(Fault::instruction(ExecError::Stop, 2));
    log.fault(Fault::instruction(ExecError::DivisionByZero, 1));
    let lines: Vec<_> = log.faults().iter().map(|f| f.source_line).collect();
    assert_eq!(lines, [2, 2, 1]);
}

// ─── Warnings ────────────────────────────────────────────────────────────────

#[test]
fn warnings_are_deduplicated_per_line() {
    let mut log = FaultLog::new();
    log.warn(Warning::new(unknown("foo"), 3));
    log.warn(Warning::new(unknown("foo"), 3));
    log.warn(Warning::new(unknown("bar"), 1));
    assert_eq!(log.warning_count(), 2);
    let lines: Vec<_> = log.warnings().map(|w| w.source_line).collect();
    assert_eq!(lines, [1, 3]);
}

#[test]
fn warning_display_names_the_line() {
    let warning = Warning::new(
        Unsupported {
            mnemonic: "ucontrol".to_owned(),
            reason: UnsupportedReason::NotEmulated,
        },
        5,
    );
    assert_eq!(warning.to_string(), "line 5: `ucontrol` is not emulated");
}

// ─── Decoded view ────────────────────────────────────────────────────────────

#[test]
fn decoded_view_replaces_earlier_attempts() {
    let mut log = FaultLog::new();
    log.decoded(DecodedLine {
        source_line: 2,
        text: "op div x 1 0".to_owned(),
        status: DecodedStatus::Faulted,
    });
    log.decoded(DecodedLine {
        source_line: 1,
        text: "set y 1".to_owned(),
        status: DecodedStatus::Executed,
    });
    log.decoded(DecodedLine {
        source_line: 2,
        text: "op div x 1 2".to_owned(),
        status: DecodedStatus::Executed,
    });
    let view: Vec<_> = log
        .decoded_lines()
        .map(|line| (line.source_line, line.text.as_str(), line.status))
        .collect();
    assert_eq!(
        view,
        [
            (1, "set y 1", DecodedStatus::Executed),
            (2, "op div x 1 2", DecodedStatus::Executed),
        ]
    );
}

#[test]
fn clear_forgets_everything() {
    let mut log = FaultLog::new();
    assert!(log.is_empty());
    log.fault(Fault::instruction(ExecError::Stop, 1));
    log.warn(Warning::new(unknown("foo"), 2));
    log.decoded(DecodedLine {
        source_line: 1,
        text: "stop".to_owned(),
        status: DecodedStatus::Faulted,
    });
    assert!(!log.is_empty());
    log.clear();
    assert!(log.is_empty());
    assert_eq!(log.warning_count(), 0);
}

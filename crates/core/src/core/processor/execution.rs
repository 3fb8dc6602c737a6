//! Main Execution Step.
//!
//! This module implements one instruction period of the processor. It performs the following:
//! 1. **Wait Handling:** Consumes periods against a pending `wait` without moving the counter.
//! 2. **Translation:** Turns the instruction at the counter into an operation or a warning.
//! 3. **Application:** Applies the operation to registers, memory, canvas and counter.
//! 4. **Fault Isolation:** Catches every instruction fault at the instruction boundary.
//!
//! The counter always stays in `0..len`: it is wrapped before the slot is
//! fetched and again after it advances or jumps.

use std::time::Duration;

use tracing::trace;

use super::{Processor, wrap_target};
use crate::common::error::ExecError;
use crate::common::value::Value;
use crate::core::units::alu::Alu;
use crate::core::units::alu::logic::loosely_equal;
use crate::isa::instruction::Program;
use crate::isa::opcodes::Condition;
use crate::isa::operand::Operand;
use crate::isa::translate::{Operation, Translation, Unsupported, translate};

/// Where execution continues after an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Advance to the following slot.
    Next,
    /// Continue at this slot.
    Jump(usize),
}

/// What happened during one instruction period.
#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// The slot was blank; the period was consumed.
    Blank,
    /// A pending `wait` consumed the period; the counter did not move.
    Waiting,
    /// The operation was applied.
    Executed,
    /// The instruction is outside the emulated set and was skipped.
    Unsupported(Unsupported),
    /// Translating or applying the instruction failed.
    Faulted(ExecError),
}

/// Report of one instruction period.
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    /// Slot the period was spent on.
    pub pc: usize,
    /// 1-based source line of that slot.
    pub source_line: usize,
    /// The translated operation, when translation succeeded.
    pub operation: Option<Operation>,
    /// What happened.
    pub outcome: StepOutcome,
}

impl Processor {
    /// Runs one instruction period against `program`.
    ///
    /// # Arguments
    ///
    /// * `program` - The program currently running.
    /// * `period` - Logical duration of one instruction period.
    ///
    /// # Returns
    ///
    /// `None` for an empty program, otherwise a report of the period. Faults
    /// are part of the report; this function never fails.
    pub fn tick(&mut self, program: &Program, period: Duration) -> Option<StepReport> {
        let len = program.len();
        if len == 0 {
            return None;
        }
        self.pc %= len;
        self.elapsed += period;
        let pc = self.pc;
        let mut report = StepReport {
            pc,
            source_line: pc + 1,
            operation: None,
            outcome: StepOutcome::Blank,
        };

        if self.wait_remaining > 0.0 {
            self.wait_remaining -= period.as_secs_f64();
            report.outcome = StepOutcome::Waiting;
            return Some(report);
        }

        let Some(inst) = program.get(pc) else {
            self.pc = (pc + 1) % len;
            return Some(report);
        };
        report.source_line = inst.source_line;

        let flow = match translate(inst) {
            Ok(Translation::Execute(op)) => {
                let flow = match self.execute(&op, len) {
                    Ok(flow) => {
                        report.outcome = StepOutcome::Executed;
                        flow
                    }
                    Err(err) => {
                        report.outcome = StepOutcome::Faulted(err);
                        Flow::Next
                    }
                };
                report.operation = Some(op);
                flow
            }
            Ok(Translation::Unsupported(unsupported)) => {
                report.outcome = StepOutcome::Unsupported(unsupported);
                Flow::Next
            }
            Err(err) => {
                report.outcome = StepOutcome::Faulted(err);
                Flow::Next
            }
        };

        self.pc = match flow {
            Flow::Next => (pc + 1) % len,
            Flow::Jump(target) => target % len,
        };

        if self.trace {
            match &report.operation {
                Some(op) => trace!(pc, line = report.source_line, op = %op, outcome = ?report.outcome, "step"),
                None => trace!(pc, line = report.source_line, outcome = ?report.outcome, "step"),
            }
        }
        Some(report)
    }

    /// Applies one operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The operation to apply.
    /// * `len` - Length of the running program, for wrapping jump targets.
    ///
    /// # Returns
    ///
    /// Where execution continues.
    ///
    /// # Errors
    ///
    /// Any [`ExecError`]; the processor state is left as it was at the
    /// point of failure.
    pub fn execute(&mut self, op: &Operation, len: usize) -> Result<Flow, ExecError> {
        match op {
            Operation::Read { dest, array, index } => {
                let value = self.read_cell(array, index)?;
                self.assign(dest, value, len)
            }
            Operation::Write {
                value,
                array,
                index,
            } => {
                self.write_cell(value, array, index)?;
                Ok(Flow::Next)
            }
            Operation::Draw(command) => {
                self.draw(command)?;
                Ok(Flow::Next)
            }
            Operation::Print(value) => {
                let value = self.resolve(value);
                self.text.push_str(&value.to_string());
                Ok(Flow::Next)
            }
            Operation::DrawFlush(target) => {
                self.flush_display(target)?;
                Ok(Flow::Next)
            }
            Operation::PrintFlush => Ok(Flow::Next),
            Operation::Set { dest, value } => {
                let value = self.resolve(value);
                self.assign(dest, value, len)
            }
            Operation::Op { kind, dest, a, b } => {
                self.declare(dest);
                let (a, b) = if kind.is_constant() {
                    (0.0, 0.0)
                } else if kind.is_unary() {
                    (self.resolve_number(a)?, 0.0)
                } else {
                    let b = b.as_ref().ok_or_else(|| ExecError::Arity {
                        mnemonic: format!("op {kind}"),
                        expected: 3,
                        found: 2,
                    })?;
                    (self.resolve_number(a)?, self.resolve_number(b)?)
                };
                let result = Alu::execute(*kind, a, b, &mut self.rng)?;
                self.assign(dest, Value::Number(result), len)
            }
            Operation::Wait(seconds) => {
                let seconds = self.resolve_number(seconds)?;
                self.wait_remaining = if seconds > 0.0 { seconds } else { 0.0 };
                Ok(Flow::Next)
            }
            Operation::Stop => Err(ExecError::Stop),
            // The counter becomes 0 and still takes the usual +1 advance.
            Operation::End => Ok(Flow::Jump(wrap_target(1.0, len))),
            Operation::Jump {
                target,
                condition,
                a,
                b,
            } => {
                if self.condition(*condition, a, b)? {
                    let target = self.resolve_number(target)?;
                    Ok(Flow::Jump(wrap_target(target, len)))
                } else {
                    Ok(Flow::Next)
                }
            }
        }
    }

    /// Evaluates a `jump` condition.
    fn condition(&mut self, condition: Condition, a: &Operand, b: &Operand) -> Result<bool, ExecError> {
        Ok(match condition {
            Condition::Always => true,
            Condition::StrictEqual => false,
            Condition::Equal | Condition::NotEqual => {
                let (a, b) = (self.resolve(a), self.resolve(b));
                values_equal(&a, &b) == (condition == Condition::Equal)
            }
            Condition::LessThan
            | Condition::LessThanEq
            | Condition::GreaterThan
            | Condition::GreaterThanEq => {
                let (a, b) = (self.resolve_number(a)?, self.resolve_number(b)?);
                match condition {
                    Condition::LessThan => a < b,
                    Condition::LessThanEq => a <= b,
                    Condition::GreaterThan => a > b,
                    _ => a >= b,
                }
            }
        })
    }
}

/// Loose equality: numeric with tolerance when both sides are numbers,
/// structural otherwise.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.number(), b.number()) {
        (Some(x), Some(y)) => loosely_equal(x, y),
        _ => a == b,
    }
}

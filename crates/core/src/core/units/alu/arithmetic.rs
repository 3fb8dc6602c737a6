//! ALU arithmetic operations.
//!
//! Implements the floating-point arithmetic kinds of `op`. Division-class
//! kinds fault on a zero divisor instead of producing infinities, and the
//! integer-flavoured kinds round toward negative infinity:
//! `idiv` is `floor(a / b)` and `mod` takes the sign of the divisor.

use crate::common::error::ExecError;
use crate::isa::opcodes::OpKind;

/// Executes an arithmetic operation.
///
/// # Arguments
///
/// * `kind` - The operation to perform (must be an arithmetic variant).
/// * `a`    - First operand.
/// * `b`    - Second operand; ignored by unary kinds.
///
/// # Returns
///
/// The result, or a fault for zero divisors and out-of-domain inputs.
/// Returns `0.0` for non-arithmetic kinds.
pub fn execute(kind: OpKind, a: f64, b: f64) -> Result<f64, ExecError> {
    Ok(match kind {
        OpKind::Add => a + b,
        OpKind::Sub => a - b,
        OpKind::Mul => a * b,
        OpKind::Div => a / nonzero(b)?,
        OpKind::Idiv => (a / nonzero(b)?).floor(),
        OpKind::Mod => floored_mod(a, nonzero(b)?),
        OpKind::Pow => {
            let result = a.powf(b);
            if !result.is_finite() {
                return Err(ExecError::NonFinite("pow"));
            }
            result
        }
        OpKind::Max => a.max(b),
        OpKind::Min => a.min(b),
        OpKind::Abs => a.abs(),
        OpKind::Len => (a - b).abs(),
        OpKind::Floor => a.floor(),
        OpKind::Ceil => a.ceil(),
        OpKind::Sqrt => positive_or_zero(a, "sqrt")?.sqrt(),
        OpKind::Log => positive(a, "log")?.ln(),
        OpKind::Log10 => positive(a, "log10")?.log10(),
        _ => 0.0,
    })
}

/// Floored modulo: the result has the sign of `b`.
fn floored_mod(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) { r + b } else { r }
}

fn nonzero(b: f64) -> Result<f64, ExecError> {
    if b == 0.0 { Err(ExecError::DivisionByZero) } else { Ok(b) }
}

fn positive(a: f64, function: &'static str) -> Result<f64, ExecError> {
    if a > 0.0 { Ok(a) } else { Err(ExecError::MathDomain(function)) }
}

fn positive_or_zero(a: f64, function: &'static str) -> Result<f64, ExecError> {
    if a >= 0.0 { Ok(a) } else { Err(ExecError::MathDomain(function)) }
}

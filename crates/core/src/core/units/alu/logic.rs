//! ALU comparison, logical and bitwise operations.
//!
//! Comparisons return `1.0` or `0.0`. `equal`/`notEqual` compare with an
//! absolute tolerance, and `strictEqual` always yields 0.
//!
//! Bitwise kinds truncate both operands to 64-bit signed integers (NaN
//! becomes 0, out-of-range values saturate) and convert the result back.

use crate::common::constants::EQUALITY_EPSILON;
use crate::isa::opcodes::OpKind;

/// Executes a comparison, logical or bitwise operation.
///
/// # Arguments
///
/// * `kind` - The operation to perform (must be a logic variant).
/// * `a`    - First operand.
/// * `b`    - Second operand; ignored by `not`.
///
/// # Returns
///
/// The result as `f64`. Returns `0.0` for non-logic kinds.
pub fn execute(kind: OpKind, a: f64, b: f64) -> f64 {
    match kind {
        OpKind::Equal => flag(loosely_equal(a, b)),
        OpKind::NotEqual => flag(!loosely_equal(a, b)),
        OpKind::Land => flag(a != 0.0 && b != 0.0),
        OpKind::LessThan => flag(a < b),
        OpKind::LessThanEq => flag(a <= b),
        OpKind::GreaterThan => flag(a > b),
        OpKind::GreaterThanEq => flag(a >= b),
        OpKind::Or => (int(a) | int(b)) as f64,
        OpKind::And => (int(a) & int(b)) as f64,
        OpKind::Xor => (int(a) ^ int(b)) as f64,
        OpKind::Not => !int(a) as f64,
        _ => 0.0,
    }
}

/// Returns true when `a` and `b` differ by less than the equality tolerance.
pub fn loosely_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EQUALITY_EPSILON
}

/// Truncates an operand to a 64-bit integer.
pub(crate) fn int(value: f64) -> i64 {
    value as i64
}

const fn flag(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

//! ALU shift operations.
//!
//! Implements `shl` and `shr` on operands truncated to 64-bit signed
//! integers. The shift amount is masked to its low 6 bits, so shifting by 64
//! is a shift by 0 and negative amounts wrap. `shr` is arithmetic: the sign
//! bit is replicated.

use crate::common::constants::SHIFT_MASK;
use crate::core::units::alu::logic::int;
use crate::isa::opcodes::OpKind;

/// Executes a shift operation.
///
/// # Arguments
///
/// * `kind` - The operation to perform (must be `Shl` or `Shr`).
/// * `a`    - Value to shift.
/// * `b`    - Shift amount.
///
/// # Returns
///
/// The shifted value as `f64`. Returns `0.0` for non-shift kinds.
pub fn execute(kind: OpKind, a: f64, b: f64) -> f64 {
    let shamt = (int(b) & SHIFT_MASK) as u32;
    match kind {
        OpKind::Shl => int(a).wrapping_shl(shamt) as f64,
        OpKind::Shr => int(a).wrapping_shr(shamt) as f64,
        _ => 0.0,
    }
}

//! ALU trigonometry.
//!
//! All angles are in degrees: `sin`/`cos`/`tan` take degrees and the inverse
//! functions return degrees. `angle` is the direction of the vector `(a, b)`
//! normalized to `[0, 360)`, and `angleDiff` is the smaller of the two ways
//! round the circle between `a` and `b`.

use crate::common::constants::FULL_TURN_DEGREES;
use crate::common::error::ExecError;
use crate::isa::opcodes::OpKind;

/// Executes a trigonometric operation.
///
/// # Arguments
///
/// * `kind` - The operation to perform (must be a trig variant).
/// * `a`    - First operand.
/// * `b`    - Second operand; used by `angle` and `angleDiff` only.
///
/// # Returns
///
/// The result, or [`ExecError::MathDomain`] for `asin`/`acos` outside `[-1, 1]`.
/// Returns `0.0` for non-trig kinds.
pub fn execute(kind: OpKind, a: f64, b: f64) -> Result<f64, ExecError> {
    Ok(match kind {
        OpKind::Sin => a.to_radians().sin(),
        OpKind::Cos => a.to_radians().cos(),
        OpKind::Tan => a.to_radians().tan(),
        OpKind::Asin => unit_range(a, "asin")?.asin().to_degrees(),
        OpKind::Acos => unit_range(a, "acos")?.acos().to_degrees(),
        OpKind::Atan => a.atan().to_degrees(),
        OpKind::Angle => b.atan2(a).to_degrees().rem_euclid(FULL_TURN_DEGREES),
        OpKind::AngleDiff => {
            let forward = (b - a).rem_euclid(FULL_TURN_DEGREES);
            let backward = (a - b).rem_euclid(FULL_TURN_DEGREES);
            forward.min(backward)
        }
        _ => 0.0,
    })
}

fn unit_range(a: f64, function: &'static str) -> Result<f64, ExecError> {
    if (-1.0..=1.0).contains(&a) {
        Ok(a)
    } else {
        Err(ExecError::MathDomain(function))
    }
}

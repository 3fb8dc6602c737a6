//! Arithmetic Logic Unit (ALU).
//!
//! This module implements every `op` kind. Operands and results are `f64`;
//! bitwise kinds convert through 64-bit integers.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, Div, Idiv, Mod, Pow, Max, Min, Abs, Len, Floor, Ceil, Sqrt, Log, Log10
//! - [`logic`]:      Comparisons (Equal, LessThan, ...), Land, Or, And, Xor, Not
//! - [`shifts`]:     Shl, Shr
//! - [`trig`]:       Sin, Cos, Tan, Asin, Acos, Atan, Angle, AngleDiff
//!
//! `rand` and `noise` are dispatched here directly.

/// Floating-point arithmetic and rounding operations.
pub mod arithmetic;

/// Comparison, logical and bitwise operations.
pub mod logic;

/// Integer shift operations (shl, shr).
pub mod shifts;

/// Degree-based trigonometry and angle operations.
pub mod trig;

use rand::Rng;

use crate::common::constants::NOISE_SEED;
use crate::common::error::ExecError;
use crate::core::units::noise::noise2d;
use crate::isa::opcodes::OpKind;

/// Arithmetic Logic Unit (ALU) for `op` instructions.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an `op` kind.
    ///
    /// Dispatches to the appropriate submodule based on the operation kind.
    ///
    /// # Arguments
    ///
    /// * `kind` - The operation to perform
    /// * `a`    - First operand
    /// * `b`    - Second operand (ignored by unary kinds)
    /// * `rng`  - Random source for `rand`
    ///
    /// # Returns
    ///
    /// The result of the operation; comparisons yield `1.0` or `0.0`.
    ///
    /// # Errors
    ///
    /// [`ExecError::DivisionByZero`] for a zero divisor, [`ExecError::MathDomain`]
    /// for inputs outside a function's domain and [`ExecError::NonFinite`]
    /// when `pow` overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use mlogvm_core::core::units::alu::Alu;
    /// use mlogvm_core::isa::opcodes::OpKind;
    /// use rand::{SeedableRng, rngs::StdRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(0);
    ///
    /// assert_eq!(Alu::execute(OpKind::Add, 5.0, 1.0, &mut rng), Ok(6.0));
    /// assert_eq!(Alu::execute(OpKind::Idiv, -7.0, 2.0, &mut rng), Ok(-4.0));
    /// assert_eq!(Alu::execute(OpKind::Mod, -7.0, 3.0, &mut rng), Ok(2.0));
    /// assert_eq!(Alu::execute(OpKind::Shl, 1.0, 4.0, &mut rng), Ok(16.0));
    /// assert_eq!(Alu::execute(OpKind::LessThan, 1.0, 2.0, &mut rng), Ok(1.0));
    /// let angle = Alu::execute(OpKind::Angle, 0.0, -1.0, &mut rng).unwrap();
    /// assert!((angle - 270.0).abs() < 1e-9);
    /// assert!(Alu::execute(OpKind::Div, 1.0, 0.0, &mut rng).is_err());
    /// ```
    pub fn execute<R: Rng>(
        kind: OpKind,
        a: f64,
        b: f64,
        rng: &mut R,
    ) -> Result<f64, ExecError> {
        match kind {
            OpKind::Add
            | OpKind::Sub
            | OpKind::Mul
            | OpKind::Div
            | OpKind::Idiv
            | OpKind::Mod
            | OpKind::Pow
            | OpKind::Max
            | OpKind::Min
            | OpKind::Abs
            | OpKind::Len
            | OpKind::Floor
            | OpKind::Ceil
            | OpKind::Sqrt
            | OpKind::Log
            | OpKind::Log10 => arithmetic::execute(kind, a, b),

            OpKind::Equal
            | OpKind::NotEqual
            | OpKind::Land
            | OpKind::LessThan
            | OpKind::LessThanEq
            | OpKind::GreaterThan
            | OpKind::GreaterThanEq
            | OpKind::StrictEqual
            | OpKind::Or
            | OpKind::And
            | OpKind::Xor
            | OpKind::Not => Ok(logic::execute(kind, a, b)),

            OpKind::Shl | OpKind::Shr => Ok(shifts::execute(kind, a, b)),

            OpKind::Sin
            | OpKind::Cos
            | OpKind::Tan
            | OpKind::Asin
            | OpKind::Acos
            | OpKind::Atan
            | OpKind::Angle
            | OpKind::AngleDiff => trig::execute(kind, a, b),

            OpKind::Rand => Ok(rng.gen_range(0.0..1.0) * a),
            OpKind::Noise => Ok(noise2d(NOISE_SEED, a, b)),
        }
    }
}

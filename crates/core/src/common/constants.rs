//! Emulator-wide constants.
//!
//! Values here are architectural: changing them changes observable program
//! behavior. Tunable parameters live in [`crate::config`].

/// Absolute tolerance used by `equal`/`notEqual` comparisons.
pub const EQUALITY_EPSILON: f64 = 0.000_001;

/// Mask applied to shift amounts of `shl`/`shr` (64-bit integer semantics).
pub const SHIFT_MASK: i64 = 0x3F;

/// Seed passed to the noise generator by `op noise`.
pub const NOISE_SEED: u32 = 0;

/// Largest side count `draw poly`/`draw linePoly` will rasterize.
///
/// Larger requests are clamped; a polygon with this many sides is
/// indistinguishable from a circle at canvas resolution.
pub const MAX_POLY_SIDES: usize = 256;

/// Name of the built-in register holding the next instruction index.
pub const COUNTER_REGISTER: &str = "@counter";

/// Name of the built-in register holding logical milliseconds since reset.
pub const TIME_REGISTER: &str = "@time";

/// Degrees in a full turn.
pub const FULL_TURN_DEGREES: f64 = 360.0;

/// Numbers at or above this magnitude print in float notation even when integral.
pub const INTEGER_PRINT_LIMIT: f64 = 1.0e15;

//! Register values.
//!
//! Every register holds one dynamically-typed [`Value`]. The coercion rules
//! between kinds are defined here once:
//! 1. **Numbers:** `f64`; booleans are stored as `1`/`0`.
//! 2. **Text:** converts to a number only when the whole string parses as one.
//! 3. **Colors, array and surface references:** never convert to numbers.
//!
//! References are handles into the memory cells and displays owned by the
//! processor. They carry the linked block's name so they print without a
//! lookup, and copying one aliases the same block.

use std::fmt;
use std::sync::Arc;

use crate::common::constants::INTEGER_PRINT_LIMIT;
use crate::common::error::ExecError;

/// Hex digits in an `rrggbb` color literal.
const RGB_HEX_DIGITS: usize = 6;

/// Hex digits in an `rrggbbaa` color literal.
const RGBA_HEX_DIGITS: usize = 8;

/// An 8-bit-per-channel RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color from program-supplied channel values.
    ///
    /// Each channel is rounded and clamped to `0..=255`; NaN becomes 0.
    pub fn from_channels(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: channel(r),
            g: channel(g),
            b: channel(b),
            a: channel(a),
        }
    }

    /// Parses `rrggbb` or `rrggbbaa` hex digits, with an optional `#` or `%` prefix.
    pub fn from_hex(literal: &str) -> Option<Self> {
        let digits = literal
            .strip_prefix('#')
            .or_else(|| literal.strip_prefix('%'))
            .unwrap_or(literal);
        if !digits.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            RGB_HEX_DIGITS => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            RGBA_HEX_DIGITS => Some(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

fn channel(value: f64) -> u8 {
    // `as` saturates and maps NaN to 0.
    value.round().clamp(0.0, 255.0) as u8
}

/// Handle to a linked memory cell (an "array reference").
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArrayRef {
    index: usize,
    name: Arc<str>,
}

impl ArrayRef {
    /// Creates a handle to the cell at `index` in the processor's memory bank.
    pub fn new(index: usize, name: &str) -> Self {
        Self {
            index,
            name: Arc::from(name),
        }
    }

    /// Position of the cell in the memory bank.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Name the cell is linked under (`cell1`).
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Handle to a linked display (a "surface reference").
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceRef {
    index: usize,
    name: Arc<str>,
}

impl SurfaceRef {
    /// Creates a handle to the display at `index` in the processor's display list.
    pub fn new(index: usize, name: &str) -> Self {
        Self {
            index,
            name: Arc::from(name),
        }
    }

    /// Position of the display in the display list.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Name the display is linked under (`display1`).
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A dynamically-typed register value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A floating-point number.
    Number(f64),
    /// A string.
    Text(String),
    /// An RGBA color.
    Color(Rgba),
    /// Reference to a linked memory cell.
    Array(ArrayRef),
    /// Reference to a linked display.
    Surface(SurfaceRef),
}

impl Value {
    /// The value every undeclared register reads as.
    pub const ZERO: Self = Self::Number(0.0);

    /// Converts a boolean to the numeric `1`/`0` convention.
    pub const fn from_bool(b: bool) -> Self {
        Self::Number(if b { 1.0 } else { 0.0 })
    }

    /// Short name of the value's kind, used in fault messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::Color(_) => "color",
            Self::Array(_) => "array",
            Self::Surface(_) => "surface",
        }
    }

    /// Numeric view of the value.
    ///
    /// # Errors
    ///
    /// [`ExecError::NotANumber`] for text that does not parse as a float, and
    /// [`ExecError::TypeMismatch`] for colors and references.
    pub fn as_number(&self) -> Result<f64, ExecError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ExecError::NotANumber(s.clone())),
            other => Err(ExecError::TypeMismatch {
                expected: "number",
                found: other.kind_name(),
            }),
        }
    }

    /// Returns the number if this value is one, without any conversion.
    pub const fn number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write_number(f, *n),
            Self::Text(s) => f.write_str(s),
            Self::Color(c) => c.fmt(f),
            Self::Array(r) => f.write_str(r.name()),
            Self::Surface(r) => f.write_str(r.name()),
        }
    }
}

/// Writes a number the way `print` shows it: integral values without a fraction.
pub(crate) fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < INTEGER_PRINT_LIMIT {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{n}")
    }
}

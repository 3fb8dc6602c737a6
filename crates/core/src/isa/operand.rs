//! Instruction operands and the literal coercion rules.
//!
//! Every operand token is classified exactly once, in this order:
//! 1. **Numbers:** A token starting with a digit, sign or `.` that parses as a
//!    finite float, a `0x`/`0b` integer, or `true`/`false`.
//! 2. **Text:** A token wrapped in double quotes; the quotes are stripped.
//! 3. **Colors:** `#` or `%` followed by 6 or 8 hex digits.
//! 4. **Registers:** Anything else names a register, including the `@` built-ins.

use std::fmt;

use crate::common::value::{Rgba, write_number};

/// A classified instruction operand.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// Numeric literal.
    Number(f64),
    /// Quoted string literal, without its quotes.
    Text(String),
    /// Color literal.
    Color(Rgba),
    /// Register name.
    Register(String),
}

impl Operand {
    /// Classifies one operand token.
    ///
    /// # Examples
    ///
    /// ```
    /// use mlogvm_core::isa::operand::Operand;
    ///
    /// assert_eq!(Operand::parse("-2.5"), Operand::Number(-2.5));
    /// assert_eq!(Operand::parse("0x1F"), Operand::Number(31.0));
    /// assert_eq!(Operand::parse("\"hi there\""), Operand::Text("hi there".into()));
    /// assert_eq!(Operand::parse("x"), Operand::Register("x".into()));
    /// ```
    pub fn parse(token: &str) -> Self {
        if let Some(n) = parse_number(token) {
            return Self::Number(n);
        }
        if let Some(inner) = token.strip_prefix('"') {
            return Self::Text(inner.strip_suffix('"').unwrap_or(inner).to_owned());
        }
        if token.starts_with(['#', '%'])
            && let Some(color) = Rgba::from_hex(token)
        {
            return Self::Color(color);
        }
        Self::Register(token.to_owned())
    }

    /// Register name, if the operand is one.
    pub fn register(&self) -> Option<&str> {
        match self {
            Self::Register(name) => Some(name),
            _ => None,
        }
    }
}

/// Parses a numeric literal token.
fn parse_number(token: &str) -> Option<f64> {
    match token {
        "true" => return Some(1.0),
        "false" => return Some(0.0),
        _ => {}
    }
    let first = token.chars().next()?;
    if !(first.is_ascii_digit() || matches!(first, '-' | '+' | '.')) {
        return None;
    }

    let (negative, unsigned) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    let radix_value = |prefix: &str, radix: u32| {
        unsigned
            .strip_prefix(prefix)
            .and_then(|digits| i64::from_str_radix(digits, radix).ok())
    };
    if let Some(n) = radix_value("0x", 16).or_else(|| radix_value("0b", 2)) {
        let n = n as f64;
        return Some(if negative { -n } else { n });
    }

    token.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write_number(f, *n),
            Self::Text(s) => write!(f, "\"{s}\""),
            Self::Color(c) => c.fmt(f),
            Self::Register(name) => f.write_str(name),
        }
    }
}

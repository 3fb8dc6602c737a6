//! Opcode, draw sub-opcode, `op` kind and `jump` condition tables.
//!
//! Each table is a closed enum with a bidirectional mnemonic mapping. A
//! mnemonic missing from a table is not an error here; the translator turns
//! it into an Unsupported marker.

use std::fmt;

/// Declares a mnemonic-keyed enum with `from_mnemonic`, `mnemonic` and `ALL`.
macro_rules! mnemonic_table {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$( Self::$variant ),+];

            /// Looks up a variant by its exact (case-sensitive) mnemonic.
            pub fn from_mnemonic(text: &str) -> Option<Self> {
                match text {
                    $( $text => Some(Self::$variant), )+
                    _ => None,
                }
            }

            /// The mnemonic as written in program text.
            pub const fn mnemonic(self) -> &'static str {
                match self {
                    $( Self::$variant => $text ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.mnemonic())
            }
        }
    };
}

mnemonic_table! {
    /// Top-level instruction opcodes.
    Opcode {
        /// `read dest array index`
        Read => "read",
        /// `write value array index`
        Write => "write",
        /// `draw kind args...`
        Draw => "draw",
        /// `print value`
        Print => "print",
        /// `drawflush display`
        DrawFlush => "drawflush",
        /// `printflush target`
        PrintFlush => "printflush",
        /// `set dest value`
        Set => "set",
        /// `op kind dest a b`
        Op => "op",
        /// `wait seconds`
        Wait => "wait",
        /// `stop`
        Stop => "stop",
        /// `end`
        End => "end",
        /// `jump target condition a b`
        Jump => "jump",
    }
}

mnemonic_table! {
    /// Sub-opcodes of `draw`.
    DrawKind {
        /// Fill the whole canvas.
        Clear => "clear",
        /// Set the draw color from channels.
        Color => "color",
        /// Set the draw color from a packed color.
        Col => "col",
        /// Set the stroke width.
        Stroke => "stroke",
        /// Straight line.
        Line => "line",
        /// Filled rectangle.
        Rect => "rect",
        /// Outlined rectangle.
        LineRect => "lineRect",
        /// Filled regular polygon.
        Poly => "poly",
        /// Outlined regular polygon.
        LinePoly => "linePoly",
        /// Filled triangle.
        Triangle => "triangle",
        /// Sprite blit; recognized but never executed.
        Image => "image",
    }
}

mnemonic_table! {
    /// Operation kinds of `op`.
    OpKind {
        /// `a + b`
        Add => "add",
        /// `a - b`
        Sub => "sub",
        /// `a * b`
        Mul => "mul",
        /// `a / b`
        Div => "div",
        /// `floor(a / b)`
        Idiv => "idiv",
        /// Floored modulo.
        Mod => "mod",
        /// `a ^ b`
        Pow => "pow",
        /// `|a - b| < epsilon`
        Equal => "equal",
        /// `|a - b| >= epsilon`
        NotEqual => "notEqual",
        /// Logical and.
        Land => "land",
        /// `a < b`
        LessThan => "lessThan",
        /// `a <= b`
        LessThanEq => "lessThanEq",
        /// `a > b`
        GreaterThan => "greaterThan",
        /// `a >= b`
        GreaterThanEq => "greaterThanEq",
        /// Always 0.
        StrictEqual => "strictEqual",
        /// Integer shift left.
        Shl => "shl",
        /// Arithmetic shift right.
        Shr => "shr",
        /// Bitwise or.
        Or => "or",
        /// Bitwise and.
        And => "and",
        /// Bitwise xor.
        Xor => "xor",
        /// Bitwise not.
        Not => "not",
        /// Larger operand.
        Max => "max",
        /// Smaller operand.
        Min => "min",
        /// Direction of the vector `(a, b)` in degrees.
        Angle => "angle",
        /// Smallest difference between two angles.
        AngleDiff => "angleDiff",
        /// `|a - b|`
        Len => "len",
        /// Simplex noise at `(a, b)`.
        Noise => "noise",
        /// `|a|`
        Abs => "abs",
        /// Natural logarithm.
        Log => "log",
        /// Base-10 logarithm.
        Log10 => "log10",
        /// Round toward negative infinity.
        Floor => "floor",
        /// Round toward positive infinity.
        Ceil => "ceil",
        /// Square root.
        Sqrt => "sqrt",
        /// Uniform random in `[0, a)`.
        Rand => "rand",
        /// Sine of degrees.
        Sin => "sin",
        /// Cosine of degrees.
        Cos => "cos",
        /// Tangent of degrees.
        Tan => "tan",
        /// Arc sine, in degrees.
        Asin => "asin",
        /// Arc cosine, in degrees.
        Acos => "acos",
        /// Arc tangent, in degrees.
        Atan => "atan",
    }
}

impl OpKind {
    /// Returns true for kinds that read only the first operand.
    pub const fn is_unary(self) -> bool {
        matches!(
            self,
            Self::Not
                | Self::Abs
                | Self::Log
                | Self::Log10
                | Self::Floor
                | Self::Ceil
                | Self::Sqrt
                | Self::Rand
                | Self::Sin
                | Self::Cos
                | Self::Tan
                | Self::Asin
                | Self::Acos
                | Self::Atan
        )
    }

    /// Returns true for kinds that never read an operand (`strictEqual`).
    pub const fn is_constant(self) -> bool {
        matches!(self, Self::StrictEqual)
    }
}

mnemonic_table! {
    /// Conditions of `jump`.
    Condition {
        /// Loosely equal.
        Equal => "equal",
        /// Loosely not equal.
        NotEqual => "notEqual",
        /// `a < b`
        LessThan => "lessThan",
        /// `a <= b`
        LessThanEq => "lessThanEq",
        /// `a > b`
        GreaterThan => "greaterThan",
        /// `a >= b`
        GreaterThanEq => "greaterThanEq",
        /// Never taken.
        StrictEqual => "strictEqual",
        /// Always taken.
        Always => "always",
    }
}

impl Condition {
    /// Returns true when the condition inspects its operands.
    pub const fn reads_operands(self) -> bool {
        !matches!(self, Self::Always | Self::StrictEqual)
    }
}

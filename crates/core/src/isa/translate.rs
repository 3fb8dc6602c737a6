//! Instruction translator.
//!
//! Maps one decoded [`Instruction`] to a typed [`Operation`] the processor
//! applies directly. Opcodes, draw sub-opcodes, `op` kinds and `jump`
//! conditions outside the emulated subset translate to an [`Unsupported`]
//! marker instead of a fault, so the execution loop can warn and move on.
//!
//! Operand tokens are classified here with [`Operand::parse`]. Missing
//! operands are an [`ExecError::Arity`] fault; surplus operands are ignored,
//! since compilers pad `draw` and `jump` to a fixed width.

use std::fmt;

use crate::common::error::ExecError;
use crate::isa::instruction::Instruction;
use crate::isa::opcodes::{Condition, DrawKind, OpKind, Opcode};
use crate::isa::operand::Operand;

/// Alpha channel used when `draw color` omits it.
const OPAQUE: f64 = 255.0;

/// A typed operation ready to be applied to the processor.
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    /// `dest = array[index]`
    Read {
        /// Destination register.
        dest: String,
        /// Memory cell reference.
        array: Operand,
        /// Slot index.
        index: Operand,
    },
    /// `array[index] = value`
    Write {
        /// Value to store.
        value: Operand,
        /// Memory cell reference.
        array: Operand,
        /// Slot index.
        index: Operand,
    },
    /// A drawing command on the canvas.
    Draw(DrawCommand),
    /// Append the value's text form to the text buffer.
    Print(Operand),
    /// Present the canvas on a display.
    DrawFlush(Operand),
    /// No-op; text is drained by the host once per frame.
    PrintFlush,
    /// `dest = value`
    Set {
        /// Destination register.
        dest: String,
        /// Source value.
        value: Operand,
    },
    /// `dest = kind(a, b)`
    Op {
        /// Operation kind.
        kind: OpKind,
        /// Destination register.
        dest: String,
        /// First operand.
        a: Operand,
        /// Second operand; absent only for unary kinds.
        b: Option<Operand>,
    },
    /// Suspend execution for a number of logical seconds.
    Wait(Operand),
    /// Raise a fault every time it executes.
    Stop,
    /// Continue at instruction 0.
    End,
    /// Continue at `target` when `condition(a, b)` holds.
    Jump {
        /// Target instruction index.
        target: Operand,
        /// Branch condition.
        condition: Condition,
        /// Left-hand side.
        a: Operand,
        /// Right-hand side.
        b: Operand,
    },
}

/// A `draw` sub-operation. Arguments are kept in program order.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// `clear r g b`
    Clear([Operand; 3]),
    /// `color r g b a`
    Color([Operand; 4]),
    /// `col color`
    Col(Operand),
    /// `stroke width`
    Stroke(Operand),
    /// `line x1 y1 x2 y2`
    Line([Operand; 4]),
    /// `rect x y w h`
    Rect([Operand; 4]),
    /// `lineRect x y w h`
    LineRect([Operand; 4]),
    /// `poly x y sides radius rotation`
    Poly([Operand; 5]),
    /// `linePoly x y sides radius rotation`
    LinePoly([Operand; 5]),
    /// `triangle x1 y1 x2 y2 x3 y3`
    Triangle([Operand; 6]),
}

impl DrawCommand {
    /// Sub-opcode of the command.
    pub const fn kind(&self) -> DrawKind {
        match self {
            Self::Clear(_) => DrawKind::Clear,
            Self::Color(_) => DrawKind::Color,
            Self::Col(_) => DrawKind::Col,
            Self::Stroke(_) => DrawKind::Stroke,
            Self::Line(_) => DrawKind::Line,
            Self::Rect(_) => DrawKind::Rect,
            Self::LineRect(_) => DrawKind::LineRect,
            Self::Poly(_) => DrawKind::Poly,
            Self::LinePoly(_) => DrawKind::LinePoly,
            Self::Triangle(_) => DrawKind::Triangle,
        }
    }

    /// Arguments in program order.
    pub fn args(&self) -> &[Operand] {
        match self {
            Self::Col(arg) | Self::Stroke(arg) => std::slice::from_ref(arg),
            Self::Clear(args) => args,
            Self::Color(args) | Self::Line(args) | Self::Rect(args) | Self::LineRect(args) => args,
            Self::Poly(args) | Self::LinePoly(args) => args,
            Self::Triangle(args) => args,
        }
    }
}

/// Why an instruction was not translated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnsupportedReason {
    /// The opcode is not part of the emulated instruction set.
    UnknownOpcode,
    /// The `draw` sub-opcode, `op` kind or `jump` condition is unknown.
    UnknownVariant,
    /// The instruction is recognized but deliberately not emulated.
    NotEmulated,
}

/// Marker for an instruction the processor skips with a warning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unsupported {
    /// Mnemonic as written, including the sub-opcode when there is one.
    pub mnemonic: String,
    /// Why it was not translated.
    pub reason: UnsupportedReason,
}

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            UnsupportedReason::UnknownOpcode => write!(f, "unknown instruction `{}`", self.mnemonic),
            UnsupportedReason::UnknownVariant => write!(f, "unknown variant `{}`", self.mnemonic),
            UnsupportedReason::NotEmulated => write!(f, "`{}` is not emulated", self.mnemonic),
        }
    }
}

/// Result of translating one instruction.
#[derive(Clone, Debug, PartialEq)]
pub enum Translation {
    /// Apply this operation.
    Execute(Operation),
    /// Skip the instruction and record a warning.
    Unsupported(Unsupported),
}

impl Translation {
    fn unsupported(mnemonic: String, reason: UnsupportedReason) -> Self {
        Self::Unsupported(Unsupported { mnemonic, reason })
    }
}

/// Translates one instruction.
///
/// # Errors
///
/// [`ExecError::Arity`] when the instruction lacks required operands,
/// [`ExecError::TypeMismatch`] when a destination is a literal, and
/// [`ExecError::InvalidColor`] for a malformed `draw col` literal.
///
/// # Examples
///
/// ```
/// use mlogvm_core::isa::decode::decode;
/// use mlogvm_core::isa::translate::{Operation, Translation, translate};
///
/// let inst = decode("set x 5", 1).unwrap();
/// assert!(matches!(
///     translate(&inst),
///     Ok(Translation::Execute(Operation::Set { .. }))
/// ));
///
/// let inst = decode("foo bar baz", 1).unwrap();
/// assert!(matches!(translate(&inst), Ok(Translation::Unsupported(_))));
/// ```
pub fn translate(inst: &Instruction) -> Result<Translation, ExecError> {
    let Some(opcode) = Opcode::from_mnemonic(&inst.opcode) else {
        return Ok(Translation::unsupported(
            inst.opcode.clone(),
            UnsupportedReason::UnknownOpcode,
        ));
    };

    let operation = match opcode {
        Opcode::Read => {
            let [dest, array, index] = operands(inst, "read", 0)?;
            Operation::Read {
                dest: destination(dest)?,
                array,
                index,
            }
        }
        Opcode::Write => {
            let [value, array, index] = operands(inst, "write", 0)?;
            Operation::Write {
                value,
                array,
                index,
            }
        }
        Opcode::Draw => return translate_draw(inst),
        Opcode::Print => {
            let [value] = operands(inst, "print", 0)?;
            Operation::Print(value)
        }
        Opcode::DrawFlush => {
            let [target] = operands(inst, "drawflush", 0)?;
            Operation::DrawFlush(target)
        }
        Opcode::PrintFlush => Operation::PrintFlush,
        Opcode::Set => {
            let [dest, value] = operands(inst, "set", 0)?;
            Operation::Set {
                dest: destination(dest)?,
                value,
            }
        }
        Opcode::Op => return translate_op(inst),
        Opcode::Wait => {
            let [seconds] = operands(inst, "wait", 0)?;
            Operation::Wait(seconds)
        }
        Opcode::Stop => Operation::Stop,
        Opcode::End => Operation::End,
        Opcode::Jump => return translate_jump(inst),
    };
    Ok(Translation::Execute(operation))
}

fn translate_draw(inst: &Instruction) -> Result<Translation, ExecError> {
    let [sub] = tokens(inst, "draw", 0)?;
    let mnemonic = format!("draw {sub}");
    let Some(kind) = DrawKind::from_mnemonic(sub) else {
        return Ok(Translation::unsupported(mnemonic, UnsupportedReason::UnknownVariant));
    };

    let command = match kind {
        DrawKind::Clear => DrawCommand::Clear(operands(inst, &mnemonic, 1)?),
        DrawKind::Color => {
            let [r, g, b] = operands(inst, &mnemonic, 1)?;
            let a = inst
                .operand(4)
                .map_or(Operand::Number(OPAQUE), Operand::parse);
            DrawCommand::Color([r, g, b, a])
        }
        DrawKind::Col => {
            let [color] = operands(inst, &mnemonic, 1)?;
            if let Operand::Register(name) = &color
                && name.starts_with(['#', '%'])
            {
                return Err(ExecError::InvalidColor(name.clone()));
            }
            DrawCommand::Col(color)
        }
        DrawKind::Stroke => {
            let [width] = operands(inst, &mnemonic, 1)?;
            DrawCommand::Stroke(width)
        }
        DrawKind::Line => DrawCommand::Line(operands(inst, &mnemonic, 1)?),
        DrawKind::Rect => DrawCommand::Rect(operands(inst, &mnemonic, 1)?),
        DrawKind::LineRect => DrawCommand::LineRect(operands(inst, &mnemonic, 1)?),
        DrawKind::Poly => DrawCommand::Poly(operands(inst, &mnemonic, 1)?),
        DrawKind::LinePoly => DrawCommand::LinePoly(operands(inst, &mnemonic, 1)?),
        DrawKind::Triangle => DrawCommand::Triangle(operands(inst, &mnemonic, 1)?),
        DrawKind::Image => {
            return Ok(Translation::unsupported(mnemonic, UnsupportedReason::NotEmulated));
        }
    };
    Ok(Translation::Execute(Operation::Draw(command)))
}

fn translate_op(inst: &Instruction) -> Result<Translation, ExecError> {
    let [sub] = tokens(inst, "op", 0)?;
    let mnemonic = format!("op {sub}");
    let Some(kind) = OpKind::from_mnemonic(sub) else {
        return Ok(Translation::unsupported(mnemonic, UnsupportedReason::UnknownVariant));
    };

    let (dest, a, b) = if kind.is_constant() {
        let [dest] = operands(inst, &mnemonic, 1)?;
        let a = inst.operand(2).map_or(Operand::Number(0.0), Operand::parse);
        (dest, a, inst.operand(3).map(Operand::parse))
    } else if kind.is_unary() {
        let [dest, a] = operands(inst, &mnemonic, 1)?;
        (dest, a, inst.operand(3).map(Operand::parse))
    } else {
        let [dest, a, b] = operands(inst, &mnemonic, 1)?;
        (dest, a, Some(b))
    };
    Ok(Translation::Execute(Operation::Op {
        kind,
        dest: destination(dest)?,
        a,
        b,
    }))
}

fn translate_jump(inst: &Instruction) -> Result<Translation, ExecError> {
    let [target, cond] = tokens(inst, "jump", 0)?;
    let Some(condition) = Condition::from_mnemonic(cond) else {
        return Ok(Translation::unsupported(
            format!("jump {cond}"),
            UnsupportedReason::UnknownVariant,
        ));
    };

    let (a, b) = if condition.reads_operands() {
        let [a, b] = operands(inst, &format!("jump {cond}"), 2)?;
        (a, b)
    } else {
        let operand = |i| inst.operand(i).map_or(Operand::Number(0.0), Operand::parse);
        (operand(2), operand(3))
    };
    Ok(Translation::Execute(Operation::Jump {
        target: Operand::parse(target),
        condition,
        a,
        b,
    }))
}

/// Returns `N` raw operand tokens starting at `skip`.
fn tokens<'a, const N: usize>(
    inst: &'a Instruction,
    mnemonic: &str,
    skip: usize,
) -> Result<[&'a str; N], ExecError> {
    let available = inst.operands.get(skip..).unwrap_or_default();
    if available.len() < N {
        return Err(ExecError::Arity {
            mnemonic: mnemonic.to_owned(),
            expected: N,
            found: available.len(),
        });
    }
    Ok(std::array::from_fn(|i| available[i].as_str()))
}

/// Returns `N` classified operands starting at `skip`.
fn operands<const N: usize>(
    inst: &Instruction,
    mnemonic: &str,
    skip: usize,
) -> Result<[Operand; N], ExecError> {
    let raw: [&str; N] = tokens(inst, mnemonic, skip)?;
    Ok(raw.map(Operand::parse))
}

/// Requires a register operand, for instruction destinations.
fn destination(operand: Operand) -> Result<String, ExecError> {
    match operand {
        Operand::Register(name) => Ok(name),
        Operand::Number(_) => Err(literal_destination("number")),
        Operand::Text(_) => Err(literal_destination("text")),
        Operand::Color(_) => Err(literal_destination("color")),
    }
}

const fn literal_destination(found: &'static str) -> ExecError {
    ExecError::TypeMismatch {
        expected: "register",
        found,
    }
}

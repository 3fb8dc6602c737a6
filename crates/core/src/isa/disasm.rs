//! Operation disassembler.
//!
//! Renders a translated [`Operation`] back to canonical instruction text for
//! the decoded view, instruction traces and test diagnostics. Literals are
//! printed in normalized form (`0x10` becomes `16`, colors become `%rrggbbaa`),
//! so the output shows what the processor will actually do.
//!
//! # Usage
//!
//! ```
//! use mlogvm_core::isa::decode::decode;
//! use mlogvm_core::isa::translate::{Translation, translate};
//!
//! let inst = decode("op add  y   x 0x10", 1).unwrap();
//! let Ok(Translation::Execute(op)) = translate(&inst) else { panic!() };
//! assert_eq!(op.to_string(), "op add y x 16");
//! ```

use std::fmt;

use crate::isa::operand::Operand;
use crate::isa::translate::{DrawCommand, Operation};

/// Writes `mnemonic` followed by each operand, space separated.
fn write_args(f: &mut fmt::Formatter<'_>, mnemonic: &str, args: &[Operand]) -> fmt::Result {
    f.write_str(mnemonic)?;
    for arg in args {
        write!(f, " {arg}")?;
    }
    Ok(())
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "draw ")?;
        write_args(f, self.kind().mnemonic(), self.args())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { dest, array, index } => write!(f, "read {dest} {array} {index}"),
            Self::Write {
                value,
                array,
                index,
            } => write!(f, "write {value} {array} {index}"),
            Self::Draw(command) => command.fmt(f),
            Self::Print(value) => write!(f, "print {value}"),
            Self::DrawFlush(target) => write!(f, "drawflush {target}"),
            Self::PrintFlush => f.write_str("printflush"),
            Self::Set { dest, value } => write!(f, "set {dest} {value}"),
            Self::Op { kind, dest, a, b } => {
                write!(f, "op {kind} {dest} {a}")?;
                match b {
                    Some(b) => write!(f, " {b}"),
                    None => Ok(()),
                }
            }
            Self::Wait(seconds) => write!(f, "wait {seconds}"),
            Self::Stop => f.write_str("stop"),
            Self::End => f.write_str("end"),
            Self::Jump {
                target,
                condition,
                a,
                b,
            } => write!(f, "jump {target} {condition} {a} {b}"),
        }
    }
}

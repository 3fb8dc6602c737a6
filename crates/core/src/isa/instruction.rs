//! Decoded instructions and programs.
//!
//! An [`Instruction`] is one non-blank line split into tokens. A [`Program`]
//! is the ordered slot list produced by a successful compilation; it is
//! replaced wholesale on every recompilation and never mutated in place.

use std::fmt;

use crate::isa::decode::decode;

/// One decoded instruction line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// First token of the line.
    pub opcode: String,
    /// Remaining tokens, unclassified.
    pub operands: Vec<String>,
    /// 1-based line number in the compiled program text.
    pub source_line: usize,
}

impl Instruction {
    /// Returns the operand token at `index`, if present.
    pub fn operand(&self, index: usize) -> Option<&str> {
        self.operands.get(index).map(String::as_str)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.opcode)?;
        for operand in &self.operands {
            write!(f, " {operand}")?;
        }
        Ok(())
    }
}

/// A compiled program: instruction slots `0..N-1`, each an instruction or blank.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    slots: Vec<Option<Instruction>>,
}

impl Program {
    /// Decodes every line into a slot.
    ///
    /// Slot `i` carries source line `i + 1`; blank lines become blank slots.
    ///
    /// # Examples
    ///
    /// ```
    /// use mlogvm_core::isa::instruction::Program;
    ///
    /// let program = Program::from_lines(["set x 1", "", "end"]);
    /// assert_eq!(program.len(), 3);
    /// assert!(program.get(1).is_none());
    /// assert_eq!(program.get(2).map(|i| i.source_line), Some(3));
    /// ```
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let slots = lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| decode(line.as_ref(), i + 1))
            .collect();
        Self { slots }
    }

    /// Number of slots, blank ones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true for a program without any slot.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Instruction at slot `pc`; `None` for blank or out-of-range slots.
    pub fn get(&self, pc: usize) -> Option<&Instruction> {
        self.slots.get(pc).and_then(Option::as_ref)
    }

    /// Iterates over all slots in order.
    pub fn slots(&self) -> impl Iterator<Item = Option<&Instruction>> {
        self.slots.iter().map(Option::as_ref)
    }
}

//! Instruction line decoder.
//!
//! Splits one raw program line into whitespace-delimited tokens. Token 0 is
//! the opcode and the rest are operands. A double-quoted token is kept whole,
//! quotes included, so string literals may contain spaces; an unterminated
//! quote runs to the end of the line.
//!
//! Decoding never fails. Unknown opcodes and operand count problems are the
//! translator's concern.

use crate::isa::instruction::Instruction;

/// Splits a line into tokens, keeping quoted strings intact.
///
/// # Examples
///
/// ```
/// use mlogvm_core::isa::decode::tokenize;
///
/// assert_eq!(tokenize("print \"a b\"  x"), ["print", "\"a b\"", "x"]);
/// ```
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                current.push(ch);
                quoted = !quoted;
            }
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Decodes one line into an instruction.
///
/// # Arguments
///
/// * `line` - Raw instruction text.
/// * `source_line` - 1-based line number the instruction is reported against.
///
/// # Returns
///
/// `None` for a blank line, otherwise the decoded instruction.
pub fn decode(line: &str, source_line: usize) -> Option<Instruction> {
    let mut tokens = tokenize(line).into_iter();
    let opcode = tokens.next()?;
    Some(Instruction {
        opcode,
        operands: tokens.collect(),
        source_line,
    })
}

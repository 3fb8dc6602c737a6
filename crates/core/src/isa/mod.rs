//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the textual instruction format, the opcode tables and the
//! translation from decoded lines to typed operations.
//!
//! # Pipeline
//!
//! * `decode`: Raw line to [`instruction::Instruction`] (tokens + source line).
//! * `operand`: Token classification into literals and register names.
//! * `translate`: Instruction to [`translate::Operation`] or an Unsupported marker.
//! * `disasm`: Operation back to canonical text.

/// Line tokenizer and instruction decoder.
pub mod decode;

/// Operation disassembler for the decoded view and traces.
pub mod disasm;

/// Decoded instruction and program structures.
pub mod instruction;

/// Opcode, draw kind, `op` kind and `jump` condition tables.
pub mod opcodes;

/// Operand classification and literal coercion rules.
pub mod operand;

/// Instruction to operation translation.
pub mod translate;

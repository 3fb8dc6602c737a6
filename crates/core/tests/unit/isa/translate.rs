//! Instruction Translation.
//!
//! Verifies the mapping from decoded instructions to operations: every known
//! opcode and sub-opcode, the operand-count rules, literal destinations, and
//! the instructions that are recognized but skipped as unsupported.

use mlogvm_core::common::error::ExecError;
use mlogvm_core::isa::decode::decode;
use mlogvm_core::isa::opcodes::{Condition, DrawKind, OpKind, Opcode};
use mlogvm_core::isa::operand::Operand;
use mlogvm_core::isa::translate::{
    DrawCommand, Operation, Translation, UnsupportedReason, translate,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn translated(line: &str) -> Result<Translation, ExecError> {
    translate(&decode(line, 1).unwrap())
}

/// Translate a line that must produce an operation.
fn op(line: &str) -> Operation {
    match translated(line) {
        Ok(Translation::Execute(op)) => op,
        other => panic!("{line}: {other:?}"),
    }
}

/// Translate a line that must be skipped as unsupported.
fn unsupported(line: &str) -> (String, UnsupportedReason) {
    match translated(line) {
        Ok(Translation::Unsupported(u)) => (u.mnemonic, u.reason),
        other => panic!("{line}: {other:?}"),
    }
}

fn reg(name: &str) -> Operand {
    Operand::Register(name.to_owned())
}

// ─── Mnemonic tables ─────────────────────────────────────────────────────────

#[test]
fn every_mnemonic_round_trips() {
    for opcode in Opcode::ALL {
        assert_eq!(Opcode::from_mnemonic(opcode.mnemonic()), Some(*opcode));
    }
    for kind in DrawKind::ALL {
        assert_eq!(DrawKind::from_mnemonic(kind.mnemonic()), Some(*kind));
    }
    for kind in OpKind::ALL {
        assert_eq!(OpKind::from_mnemonic(kind.mnemonic()), Some(*kind));
    }
    for cond in Condition::ALL {
        assert_eq!(Condition::from_mnemonic(cond.mnemonic()), Some(*cond));
    }
}

#[test]
fn op_kind_table_is_complete() {
    assert_eq!(OpKind::ALL.len(), 40);
    assert!(OpKind::Sqrt.is_unary());
    assert!(!OpKind::Add.is_unary());
    assert!(OpKind::StrictEqual.is_constant());
}

// ─── Core opcodes ────────────────────────────────────────────────────────────

#[test]
fn set_and_print() {
    assert_eq!(
        op("set x 5"),
        Operation::Set {
            dest: "x".into(),
            value: Operand::Number(5.0)
        }
    );
    assert_eq!(op("print \"hi\""), Operation::Print(Operand::Text("hi".into())));
    assert_eq!(op("printflush message1"), Operation::PrintFlush);
}

#[test]
fn memory_access() {
    assert_eq!(
        op("read v cell1 3"),
        Operation::Read {
            dest: "v".into(),
            array: reg("cell1"),
            index: Operand::Number(3.0),
        }
    );
    assert_eq!(
        op("write 9 cell1 i"),
        Operation::Write {
            value: Operand::Number(9.0),
            array: reg("cell1"),
            index: reg("i"),
        }
    );
}

#[test]
fn control_flow() {
    assert_eq!(op("wait 0.5"), Operation::Wait(Operand::Number(0.5)));
    assert_eq!(op("stop"), Operation::Stop);
    assert_eq!(op("end"), Operation::End);
    assert_eq!(op("drawflush display1"), Operation::DrawFlush(reg("display1")));
}

#[test]
fn binary_op() {
    assert_eq!(
        op("op add y x 1"),
        Operation::Op {
            kind: OpKind::Add,
            dest: "y".into(),
            a: reg("x"),
            b: Some(Operand::Number(1.0)),
        }
    );
}

#[test]
fn unary_op_needs_only_one_source() {
    assert_eq!(
        op("op sqrt r 16"),
        Operation::Op {
            kind: OpKind::Sqrt,
            dest: "r".into(),
            a: Operand::Number(16.0),
            b: None,
        }
    );
}

#[test]
fn constant_op_needs_only_a_destination() {
    assert_eq!(
        op("op strictEqual r"),
        Operation::Op {
            kind: OpKind::StrictEqual,
            dest: "r".into(),
            a: Operand::Number(0.0),
            b: None,
        }
    );
}

// ─── Jumps ───────────────────────────────────────────────────────────────────

#[test]
fn conditional_jump() {
    assert_eq!(
        op("jump 2 lessThan i 3"),
        Operation::Jump {
            target: Operand::Number(2.0),
            condition: Condition::LessThan,
            a: reg("i"),
            b: Operand::Number(3.0),
        }
    );
}

#[test]
fn unconditional_jump_may_omit_operands() {
    assert_eq!(
        op("jump 0 always"),
        Operation::Jump {
            target: Operand::Number(0.0),
            condition: Condition::Always,
            a: Operand::Number(0.0),
            b: Operand::Number(0.0),
        }
    );
}

#[test]
fn conditional_jump_requires_both_operands() {
    let err = translated("jump 0 equal x").unwrap_err();
    assert_eq!(
        err,
        ExecError::Arity {
            mnemonic: "jump equal".into(),
            expected: 2,
            found: 1
        }
    );
}

// ─── Draw ────────────────────────────────────────────────────────────────────

#[test]
fn draw_commands() {
    assert_eq!(
        op("draw rect 1 2 3 4"),
        Operation::Draw(DrawCommand::Rect([
            Operand::Number(1.0),
            Operand::Number(2.0),
            Operand::Number(3.0),
            Operand::Number(4.0),
        ]))
    );
    assert_eq!(
        op("draw stroke w"),
        Operation::Draw(DrawCommand::Stroke(reg("w")))
    );
}

#[test]
fn draw_color_alpha_defaults_to_opaque() {
    let Operation::Draw(DrawCommand::Color(args)) = op("draw color 10 20 30") else {
        panic!("not a color command");
    };
    assert_eq!(args[3], Operand::Number(255.0));
}

#[test]
fn draw_col_rejects_malformed_color_literal() {
    assert_eq!(
        translated("draw col #12345").unwrap_err(),
        ExecError::InvalidColor("#12345".into())
    );
}

#[test]
fn draw_kind_accessor_matches_command() {
    let Operation::Draw(command) = op("draw linePoly 5 5 6 3 0") else {
        panic!("not a draw command");
    };
    assert_eq!(command.kind(), DrawKind::LinePoly);
    assert_eq!(command.args().len(), 5);
}

// ─── Arity and destinations ──────────────────────────────────────────────────

#[rstest]
#[case("set x", "set", 2, 1)]
#[case("read v cell1", "read", 3, 2)]
#[case("op add y x", "op add", 3, 2)]
#[case("draw line 0 0 5", "draw line", 4, 3)]
#[case("draw triangle 0 0 1 1 2", "draw triangle", 6, 5)]
#[case("print", "print", 1, 0)]
#[case("op", "op", 1, 0)]
fn missing_operands_fault(
    #[case] line: &str,
    #[case] mnemonic: &str,
    #[case] expected: usize,
    #[case] found: usize,
) {
    assert_eq!(
        translated(line).unwrap_err(),
        ExecError::Arity {
            mnemonic: mnemonic.into(),
            expected,
            found
        }
    );
}

#[test]
fn extra_operands_are_ignored() {
    assert_eq!(
        op("set x 1 2 3"),
        Operation::Set {
            dest: "x".into(),
            value: Operand::Number(1.0)
        }
    );
}

#[test]
fn literal_destination_faults() {
    assert_eq!(
        translated("set 5 x").unwrap_err(),
        ExecError::TypeMismatch {
            expected: "register",
            found: "number"
        }
    );
    assert_eq!(
        translated("op add \"s\" 1 2").unwrap_err(),
        ExecError::TypeMismatch {
            expected: "register",
            found: "text"
        }
    );
}

// ─── Unsupported ─────────────────────────────────────────────────────────────

#[test]
fn unknown_opcode_is_unsupported() {
    assert_eq!(
        unsupported("foo bar baz"),
        ("foo".into(), UnsupportedReason::UnknownOpcode)
    );
    assert_eq!(
        unsupported("ucontrol move 1 2"),
        ("ucontrol".into(), UnsupportedReason::UnknownOpcode)
    );
}

#[test]
fn unknown_variants_are_unsupported() {
    assert_eq!(
        unsupported("op frobnicate x 1 2"),
        ("op frobnicate".into(), UnsupportedReason::UnknownVariant)
    );
    assert_eq!(
        unsupported("draw sparkle 1"),
        ("draw sparkle".into(), UnsupportedReason::UnknownVariant)
    );
    assert_eq!(
        unsupported("jump 0 sometimes x y"),
        ("jump sometimes".into(), UnsupportedReason::UnknownVariant)
    );
}

#[test]
fn draw_image_is_recognized_but_not_emulated() {
    assert_eq!(
        unsupported("draw image 0 0 @copper 8 0"),
        ("draw image".into(), UnsupportedReason::NotEmulated)
    );
}

#[test]
fn unsupported_display_names_the_mnemonic() {
    let Ok(Translation::Unsupported(u)) = translated("foo") else {
        panic!("foo translated");
    };
    assert_eq!(u.to_string(), "unknown instruction `foo`");
}

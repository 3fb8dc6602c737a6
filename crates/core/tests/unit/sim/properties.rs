//! Cross-Frame Properties.
//!
//! Randomized programs and edit sequences checked against the invariants the
//! frame driver maintains: the counter always addresses a slot, a seeded run
//! is reproducible, and a straight-line program run once through comes back
//! to slot 0 with the same registers every time.

use mlogvm_core::core::Processor;
use mlogvm_core::isa::instruction::Program;
use mlogvm_core::sim::RunState;
use proptest::prelude::*;

use crate::common::harness::{PERIOD, TestContext, test_config};

/// Instructions mixing arithmetic, jumps, counter writes, waits and faults.
fn instruction() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        (0u8..4).prop_map(|r| format!("op add r{r} r{r} 1")),
        (0u8..4, -3i32..40).prop_map(|(r, n)| format!("set r{r} {n}")),
        (-5i32..40).prop_map(|n| format!("set @counter {n}")),
        (0i32..40).prop_map(|t| format!("jump {t} always")),
        (0u8..4).prop_map(|r| format!("op rand r{r} 10")),
        Just("wait 0.002".to_owned()),
        Just("op div z 1 0".to_owned()),
        Just("stop".to_owned()),
        Just("end".to_owned()),
        Just("foo bar".to_owned()),
        Just("print r0".to_owned()),
    ]
}

/// Instructions that never touch the counter and draw no randomness.
fn straight_line_instruction() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        (0u8..4).prop_map(|r| format!("op add r{r} r{r} 1")),
        (0u8..4, 0u8..4).prop_map(|(d, s)| format!("op mul r{d} r{s} 2")),
        (0u8..4, -3i32..40).prop_map(|(r, n)| format!("set r{r} {n}")),
        (0u8..4, 0u8..8).prop_map(|(r, i)| format!("write r{r} cell1 {i}")),
        (0u8..4, 0u8..8).prop_map(|(r, i)| format!("read r{r} cell1 {i}")),
        (0u8..4).prop_map(|r| format!("print r{r}")),
        Just("op div z 1 0".to_owned()),
        Just("stop".to_owned()),
        Just("foo bar".to_owned()),
        Just("draw rect 0 0 4 4".to_owned()),
    ]
}

fn program() -> impl Strategy<Value = String> {
    prop::collection::vec(instruction(), 0..12).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn counter_stays_in_range_across_edits(
        edits in prop::collection::vec((program(), 0u32..30), 1..6),
    ) {
        let mut ctx = TestContext::new();
        for (source, periods) in &edits {
            let summary = ctx.run(source, *periods);
            match ctx.sim.program() {
                Some(program) if !program.is_empty() => {
                    prop_assert_eq!(summary.state, RunState::Running);
                    prop_assert!(ctx.processor().pc < program.len());
                    prop_assert_eq!(summary.steps, u64::from(*periods));
                }
                _ => prop_assert_eq!(summary.state, RunState::Idle),
            }
        }
    }

    #[test]
    fn seeded_runs_are_reproducible(source in program(), periods in 0u32..50) {
        let mut first = TestContext::new();
        let mut second = TestContext::new();
        let a = first.run_text(&source, periods);
        let b = second.run_text(&source, periods);
        prop_assert_eq!(a, b);
        prop_assert_eq!(first.reg("r0"), second.reg("r0"));
    }

    #[test]
    fn straight_line_pass_returns_to_slot_zero(
        lines in prop::collection::vec(straight_line_instruction(), 1..12),
    ) {
        let program = Program::from_lines(&lines);
        let mut cpu = Processor::new(&test_config());
        let mut passes = Vec::new();
        for _ in 0..2 {
            cpu.reset();
            for _ in 0..program.len() {
                let _ = cpu.tick(&program, PERIOD);
            }
            prop_assert_eq!(cpu.pc, 0);
            passes.push(cpu.registers.snapshot());
        }
        prop_assert_eq!(&passes[0], &passes[1]);
    }
}

//! Frame Driver Tests.
//!
//! Drives the simulator the way a host would: one call per frame with the
//! current source and the elapsed time. Covers recompilation every frame,
//! the catch-up loop, reload policies and per-frame diagnostics.

use std::time::Duration;

use mlogvm_core::common::error::{CompileError, ExecError};
use mlogvm_core::common::value::Rgba;
use mlogvm_core::config::{Config, ReloadPolicy};
use mlogvm_core::isa::translate::UnsupportedReason;
use mlogvm_core::sim::faults::{DecodedStatus, FaultCause};
use mlogvm_core::sim::{RunState, Simulator};
use mlogvm_core::Value;
use pretty_assertions::assert_eq;

use crate::common::harness::{TestContext, test_config};
use crate::common::mocks::compiler::MockSourceCompiler;

// ─── Setup ───────────────────────────────────────────────────────────────────

#[test]
fn invalid_config_is_rejected() {
    let mut config = Config::default();
    config.processor.instructions_per_second = 0.0;
    assert!(Simulator::new(&config, mlogvm_core::PassthroughCompiler).is_err());
}

#[test]
fn absurd_rate_is_rejected() {
    let mut config = Config::default();
    config.processor.instructions_per_second = 1.0e300;
    assert!(Simulator::new(&config, mlogvm_core::PassthroughCompiler).is_err());
}

#[test]
fn starts_idle() {
    let ctx = TestContext::new();
    assert_eq!(ctx.sim.state(), RunState::Idle);
    assert!(ctx.sim.program().is_none());
    assert_eq!(ctx.sim.period(), Duration::from_millis(1));
}

// ─── Execution ───────────────────────────────────────────────────────────────

#[test]
fn unset_registers_read_zero() {
    let mut ctx = TestContext::new();
    assert_eq!(ctx.run_text("print x", 1), "0");
}

#[test]
fn set_then_op_add() {
    let mut ctx = TestContext::new();
    let summary = ctx.run("set x 5\nop add y x 1", 2);
    assert_eq!(summary.state, RunState::Running);
    assert_eq!(summary.steps, 2);
    assert_eq!(ctx.num("y"), 6.0);
}

#[test]
fn one_instruction_per_period() {
    let mut ctx = TestContext::new();
    let _ = ctx.run("op add n n 1", 10);
    assert_eq!(ctx.num("n"), 10.0);
    let _ = ctx.run("op add n n 1", 5);
    assert_eq!(ctx.num("n"), 15.0);
}

#[test]
fn fractional_periods_carry_over() {
    let mut ctx = TestContext::new();
    let half = Duration::from_micros(500);
    let first = ctx.sim.frame("op add n n 1", half);
    assert_eq!(first.steps, 0);
    let second = ctx.sim.frame("op add n n 1", half);
    assert_eq!(second.steps, 1);
    assert_eq!(ctx.num("n"), 1.0);
}

#[test]
fn jump_less_than_loop() {
    let mut ctx = TestContext::new();
    let source = "set i 0\nop add i i 1\njump 1 lessThan i 3\nprint i";
    assert_eq!(ctx.run_text(source, 8), "3");
    assert_eq!(ctx.num("i"), 3.0);
}

#[test]
fn clear_and_flush_produce_a_black_display() {
    let mut ctx = TestContext::new();
    let _ = ctx.run("draw rect 0 0 32 32\ndrawflush display1", 2);
    assert!(ctx.display().pixels().iter().all(|p| *p == Rgba::WHITE));

    let _ = ctx.run("draw clear 0 0 0\ndrawflush display1", 2);
    assert!(ctx.display().pixels().iter().all(|p| *p == Rgba::BLACK));
}

#[test]
fn wait_pauses_the_counter() {
    let mut ctx = TestContext::new();
    let source = "wait 0.0025\nprint 1";
    assert_eq!(ctx.run_text(source, 4), "");
    assert_eq!(ctx.processor().pc, 1);
    assert_eq!(ctx.run_text(source, 1), "1");
    assert_eq!(ctx.sim.stats().wait_slots, 3);
}

// ─── Diagnostics ─────────────────────────────────────────────────────────────

#[test]
fn unknown_instruction_warns_without_faulting() {
    let mut ctx = TestContext::new();
    let summary = ctx.run("foo bar baz\nset x 1", 4);
    assert_eq!(summary.faults, 0);
    assert_eq!(summary.warnings, 1);
    let warnings: Vec<_> = ctx.sim.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].source_line, 1);
    assert_eq!(warnings[0].mnemonic, "foo");
    assert_eq!(warnings[0].reason, UnsupportedReason::UnknownOpcode);
    assert_eq!(ctx.num("x"), 1.0);
}

#[test]
fn stop_faults_once_per_execution() {
    let mut ctx = TestContext::new();
    let summary = ctx.run("stop", 3);
    assert_eq!(summary.state, RunState::Running);
    assert_eq!(summary.faults, 3);
    for fault in ctx.sim.faults() {
        assert_eq!(fault.source_line, 1);
        assert_eq!(fault.cause, FaultCause::Instruction(ExecError::Stop));
    }
}

#[test]
fn faults_are_cleared_every_frame() {
    let mut ctx = TestContext::new();
    let _ = ctx.run("op div x 1 0\nset y 1", 2);
    assert_eq!(ctx.sim.faults().len(), 1);
    let summary = ctx.run("op div x 1 0\nset y 1", 0);
    assert_eq!(summary.faults, 0);
    assert!(ctx.sim.faults().is_empty());
}

#[test]
fn fault_message_names_the_error() {
    let mut ctx = TestContext::new();
    let _ = ctx.run("\nop sqrt r -4", 2);
    let fault = &ctx.sim.faults()[0];
    assert_eq!(fault.source_line, 2);
    assert_eq!(fault.to_string(), "line 2: math domain error in sqrt");
    assert!(!fault.is_compile());
}

#[test]
fn decoded_view_tracks_latest_attempt() {
    let mut ctx = TestContext::new();
    let _ = ctx.run("set x 0x1F\nfoo\nop idiv y 1 0\n", 3);
    let decoded: Vec<_> = ctx.sim.decoded().cloned().collect();
    assert_eq!(decoded.len(), 3);
    assert_eq!(decoded[0].text, "set x 31");
    assert_eq!(decoded[0].status, DecodedStatus::Executed);
    assert_eq!(decoded[1].text, "foo");
    assert_eq!(decoded[1].status, DecodedStatus::Unsupported);
    assert_eq!(decoded[2].text, "op idiv y 1 0");
    assert_eq!(decoded[2].status, DecodedStatus::Faulted);
}

// ─── Compilation ─────────────────────────────────────────────────────────────

#[test]
fn compile_error_idles_and_reports() {
    let mut compiler = MockSourceCompiler::new();
    let _ = compiler
        .expect_compile()
        .times(2)
        .returning(|_| Err(CompileError::at("unexpected token", 3, 7)));
    let mut sim = Simulator::new(&test_config(), compiler).unwrap();

    for _ in 0..2 {
        let summary = sim.frame("whatever", Duration::from_millis(5));
        assert_eq!(summary.state, RunState::Idle);
        assert_eq!(summary.steps, 0);
        assert_eq!(summary.faults, 1);
    }
    let fault = &sim.faults()[0];
    assert!(fault.is_compile());
    assert_eq!(fault.source_line, 3);
    assert_eq!(fault.message, "compile error at 3:7: unexpected token");
    assert_eq!(sim.stats().compile_failures, 2);
}

#[test]
fn compiler_sees_the_source_every_frame() {
    let mut compiler = MockSourceCompiler::new();
    let _ = compiler
        .expect_compile()
        .withf(|source| source.to_string() == "program text")
        .times(3)
        .returning(|_| Ok(vec!["op add n n 1".to_owned()]));
    let mut sim = Simulator::new(&test_config(), compiler).unwrap();

    for _ in 0..3 {
        let _ = sim.frame("program text", Duration::from_millis(1));
    }
    assert_eq!(sim.register("n"), Some(&Value::Number(3.0)));
    assert_eq!(sim.stats().program_loads, 1);
}

#[test]
fn closures_are_compilers() {
    let compiler = |source: &str| -> Result<Vec<String>, CompileError> {
        Ok(source.split(';').map(str::trim).map(str::to_owned).collect())
    };
    let mut sim = Simulator::new(&test_config(), compiler).unwrap();
    let _ = sim.frame("set a 1; set b 2", Duration::from_millis(2));
    assert_eq!(sim.register("b"), Some(&Value::Number(2.0)));
}

#[test]
fn idle_time_is_discarded() {
    let mut compiler = MockSourceCompiler::new();
    let mut failing = true;
    let _ = compiler.expect_compile().returning(move |_| {
        if std::mem::take(&mut failing) {
            Err(CompileError::new("broken"))
        } else {
            Ok(vec!["op add n n 1".to_owned()])
        }
    });
    let mut sim = Simulator::new(&test_config(), compiler).unwrap();

    let summary = sim.frame("", Duration::from_secs(10));
    assert_eq!(summary.state, RunState::Idle);
    let summary = sim.frame("", Duration::ZERO);
    assert_eq!(summary.state, RunState::Running);
    assert_eq!(summary.steps, 0);
    let summary = sim.frame("", Duration::from_millis(1));
    assert_eq!(summary.steps, 1);
}

#[test]
fn empty_program_idles_without_faults() {
    let mut ctx = TestContext::new();
    let summary = ctx.run("", 10);
    assert_eq!(summary.state, RunState::Idle);
    assert_eq!(summary.faults, 0);
    assert_eq!(summary.steps, 0);
}

#[test]
fn blank_only_program_runs() {
    let mut ctx = TestContext::new();
    let summary = ctx.run("\n\n", 4);
    assert_eq!(summary.state, RunState::Running);
    assert_eq!(summary.steps, 4);
    assert_eq!(ctx.sim.stats().blank_slots, 4);
}

// ─── Reload policies ─────────────────────────────────────────────────────────

#[test]
fn preserve_keeps_state_across_edits() {
    let mut ctx = TestContext::with_policy(ReloadPolicy::Preserve);
    let _ = ctx.run("set x 1\nset z 2\nset w 3", 2);
    assert_eq!(ctx.processor().pc, 2);
    let _ = ctx.run("set y 2", 0);
    assert_eq!(ctx.num("x"), 1.0);
    assert_eq!(ctx.processor().pc, 0);
}

#[test]
fn counter_is_wrapped_into_a_shorter_program() {
    let mut ctx = TestContext::new();
    let _ = ctx.run("set a 1\nset b 1\nset c 1\nset d 1\nset e 1", 3);
    assert_eq!(ctx.processor().pc, 3);
    let _ = ctx.run("set a 2\nset b 2", 0);
    assert_eq!(ctx.processor().pc, 1);
}

#[test]
fn reset_on_change_starts_fresh() {
    let mut ctx = TestContext::with_policy(ReloadPolicy::ResetOnChange);
    let _ = ctx.run("set x 1", 1);
    assert_eq!(ctx.num("x"), 1.0);

    let _ = ctx.run("set x 1", 0);
    assert_eq!(ctx.num("x"), 1.0);

    let _ = ctx.run("set y 2", 0);
    assert_eq!(ctx.reg("x"), None);
    assert_eq!(ctx.processor().pc, 0);
    assert!(matches!(ctx.reg("cell1"), Some(Value::Array(_))));
}

#[test]
fn explicit_reset_keeps_the_program() {
    let mut ctx = TestContext::new();
    let _ = ctx.run("op add n n 1", 3);
    ctx.sim.reset();
    assert_eq!(ctx.reg("n"), None);
    assert!(ctx.sim.program().is_some());
    let _ = ctx.run("op add n n 1", 1);
    assert_eq!(ctx.num("n"), 1.0);
}

// ─── Statistics ──────────────────────────────────────────────────────────────

#[test]
fn stats_count_the_slot_mix() {
    let mut ctx = TestContext::new();
    let _ = ctx.run("set x 1\n\nfoo\nstop", 8);
    let stats = ctx.sim.stats();
    assert_eq!(stats.frames, 1);
    assert_eq!(stats.periods, 8);
    assert_eq!(stats.logical_time, Duration::from_millis(8));
    assert_eq!(stats.blank_slots, 2);
    assert_eq!(stats.warnings, 2);
    assert_eq!(stats.faults, 2);
    assert_eq!(stats.instructions_executed, 4);
}

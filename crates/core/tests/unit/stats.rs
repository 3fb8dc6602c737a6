//! SimStats unit tests.
//!
//! Verifies default initialization, the report layout and counters
//! collected by a real run.

use std::time::Duration;

use mlogvm_core::stats::SimStats;

use crate::common::harness::TestContext;

#[test]
fn default_stats_all_zero() {
    let stats = SimStats::default();
    assert_eq!(stats.frames, 0);
    assert_eq!(stats.periods, 0);
    assert_eq!(stats.logical_time, Duration::ZERO);
    assert_eq!(stats.instructions_executed, 0);
    assert_eq!(stats.blank_slots, 0);
    assert_eq!(stats.wait_slots, 0);
    assert_eq!(stats.faults, 0);
    assert_eq!(stats.warnings, 0);
    assert_eq!(stats.compile_failures, 0);
    assert_eq!(stats.program_loads, 0);
}

#[test]
fn report_lists_every_section() {
    let mut stats = SimStats::default();
    stats.periods = 4;
    stats.instructions_executed = 3;
    stats.blank_slots = 1;
    let report = stats.to_string();
    assert!(report.contains("LOGIC PROCESSOR STATISTICS"));
    assert!(report.contains("SLOT MIX"));
    assert!(report.contains("DIAGNOSTICS"));
    assert!(report.contains("slot.executed          3 (75.00%)"));
    assert!(report.contains("slot.blank             1 (25.00%)"));
}

#[test]
fn report_handles_zero_periods() {
    let report = SimStats::default().to_string();
    assert!(report.contains("slot.executed          0 (0.00%)"));
    assert!(!report.contains("NaN"));
}

#[test]
fn run_counts_frames_and_loads() {
    let mut ctx = TestContext::new();
    let _ = ctx.run("set x 1", 3);
    let _ = ctx.run("set x 1", 2);
    let _ = ctx.run("set x 2", 1);
    let stats = ctx.sim.stats();
    assert_eq!(stats.frames, 3);
    assert_eq!(stats.periods, 6);
    assert_eq!(stats.program_loads, 2);
    assert_eq!(stats.instructions_executed, 6);
    assert_eq!(stats.logical_time, Duration::from_millis(6));
}

#[test]
fn idle_frames_add_no_periods() {
    let mut ctx = TestContext::new();
    let _ = ctx.run("", 5);
    let stats = ctx.sim.stats();
    assert_eq!(stats.frames, 1);
    assert_eq!(stats.periods, 0);
    assert_eq!(stats.compile_failures, 0);
}

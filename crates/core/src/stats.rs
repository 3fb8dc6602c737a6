//! Simulation statistics collection and reporting.
//!
//! This module tracks activity counters for the emulator. It provides:
//! 1. **Timing:** Frames driven, instruction periods elapsed and logical time.
//! 2. **Slot mix:** Executed instructions, blank slots and waiting periods.
//! 3. **Diagnostics:** Instruction faults, unsupported instructions and compile failures.
//! 4. **Programs:** How often a different program was loaded.

use std::fmt;
use std::time::{Duration, Instant};

/// Simulation statistics structure.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Frames driven by the host.
    pub frames: u64,
    /// Instruction periods elapsed while running.
    pub periods: u64,
    /// Logical time covered by those periods.
    pub logical_time: Duration,

    /// Instructions translated and applied, faulting ones included.
    pub instructions_executed: u64,
    /// Periods spent on blank slots.
    pub blank_slots: u64,
    /// Periods consumed by a pending `wait`.
    pub wait_slots: u64,

    /// Instruction faults raised.
    pub faults: u64,
    /// Unsupported instructions skipped.
    pub warnings: u64,
    /// Frames whose source failed to compile.
    pub compile_failures: u64,
    /// Times a program different from the running one was loaded.
    pub program_loads: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            frames: 0,
            periods: 0,
            logical_time: Duration::ZERO,
            instructions_executed: 0,
            blank_slots: 0,
            wait_slots: 0,
            faults: 0,
            warnings: 0,
            compile_failures: 0,
            program_loads: 0,
        }
    }
}

/// Percentage of `part` in `total`, 0 when `total` is 0.
fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let host_seconds = self.start_time.elapsed().as_secs_f64();
        let logical_seconds = self.logical_time.as_secs_f64();
        let periods = self.periods;

        writeln!(f, "==========================================================")?;
        writeln!(f, "LOGIC PROCESSOR STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "host_seconds             {host_seconds:.4} s")?;
        writeln!(f, "logical_seconds          {logical_seconds:.4} s")?;
        writeln!(f, "frames                   {}", self.frames)?;
        writeln!(f, "periods                  {periods}")?;
        writeln!(f, "program_loads            {}", self.program_loads)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "SLOT MIX")?;
        writeln!(
            f,
            "  slot.executed          {} ({:.2}%)",
            self.instructions_executed,
            percent(self.instructions_executed, periods)
        )?;
        writeln!(
            f,
            "  slot.blank             {} ({:.2}%)",
            self.blank_slots,
            percent(self.blank_slots, periods)
        )?;
        writeln!(
            f,
            "  slot.wait              {} ({:.2}%)",
            self.wait_slots,
            percent(self.wait_slots, periods)
        )?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "DIAGNOSTICS")?;
        writeln!(f, "  faults                 {}", self.faults)?;
        writeln!(f, "  unsupported            {}", self.warnings)?;
        writeln!(f, "  compile_failures       {}", self.compile_failures)?;
        write!(f, "==========================================================")
    }
}

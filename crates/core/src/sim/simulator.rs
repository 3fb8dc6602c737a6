//! Simulator: owns the processor and the running program side-by-side.
//!
//! The simulator is the frame-driven execution loop. Every frame it:
//! 1. **Recompiles:** Hands the current source to the compiler; a failure idles the processor.
//! 2. **Reloads:** Swaps in the fresh program, applying the configured reload policy.
//! 3. **Catches Up:** Runs one instruction per elapsed period, never skipping any.
//! 4. **Collects:** Records faults, warnings and the decoded view for the host.
//!
//! The processor never owns the program, so a recompilation replaces the
//! program wholesale without disturbing processor state.

use std::fmt;
use std::time::Duration;

use tracing::{debug, info};

use crate::common::value::Value;
use crate::config::{Config, ConfigError, ReloadPolicy};
use crate::core::Processor;
use crate::core::arch::display::Display;
use crate::core::processor::{StepOutcome, StepReport};
use crate::isa::instruction::Program;
use crate::sim::compiler::Compiler;
use crate::sim::faults::{DecodedLine, DecodedStatus, Fault, FaultLog, Warning};
use crate::stats::SimStats;

/// Whether instructions are being executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RunState {
    /// No runnable program: the last compile failed or produced no instructions.
    #[default]
    Idle,
    /// A program is loaded and executing.
    Running,
}

/// Summary of one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSummary {
    /// State after the frame.
    pub state: RunState,
    /// Instruction periods run this frame.
    pub steps: u64,
    /// Faults recorded this frame.
    pub faults: usize,
    /// Distinct lines warned about this frame.
    pub warnings: usize,
}

/// Top-level emulator: compiler, processor and running program.
pub struct Simulator {
    compiler: Box<dyn Compiler>,
    processor: Processor,
    program: Option<Program>,
    state: RunState,
    accumulator: Duration,
    period: Duration,
    policy: ReloadPolicy,
    log: FaultLog,
    stats: SimStats,
}

impl Simulator {
    /// Creates a simulator.
    ///
    /// # Arguments
    ///
    /// * `config` - Emulator configuration; validated here.
    /// * `compiler` - Source-to-instruction compiler queried every frame.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] when the configuration fails validation or
    /// the instruction rate is too high to represent as a period.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use mlogvm_core::config::Config;
    /// use mlogvm_core::sim::compiler::PassthroughCompiler;
    /// use mlogvm_core::sim::simulator::{RunState, Simulator};
    /// use mlogvm_core::Value;
    ///
    /// let mut sim = Simulator::new(&Config::default(), PassthroughCompiler).unwrap();
    /// let summary = sim.frame("set x 5\nop add y x 1", Duration::from_millis(10));
    /// assert_eq!(summary.state, RunState::Running);
    /// assert_eq!(sim.register("y"), Some(&Value::Number(6.0)));
    /// ```
    pub fn new(config: &Config, compiler: impl Compiler + 'static) -> Result<Self, ConfigError> {
        config.validate()?;
        let rate = config.processor.instructions_per_second;
        let period = Duration::try_from_secs_f64(rate.recip())
            .ok()
            .filter(|period| !period.is_zero())
            .ok_or_else(|| {
                ConfigError::Invalid(format!("instruction rate {rate}/s is out of range"))
            })?;

        Ok(Self {
            compiler: Box::new(compiler),
            processor: Processor::new(config),
            program: None,
            state: RunState::Idle,
            accumulator: Duration::ZERO,
            period,
            policy: config.general.reload_policy,
            log: FaultLog::new(),
            stats: SimStats::default(),
        })
    }

    /// Runs one host frame.
    ///
    /// # Arguments
    ///
    /// * `source` - Current editable source text.
    /// * `delta` - Host time elapsed since the previous frame.
    ///
    /// # Returns
    ///
    /// What happened this frame. Faults never escape as errors; they are
    /// recorded and available through [`Simulator::faults`].
    pub fn frame(&mut self, source: &str, delta: Duration) -> FrameSummary {
        self.log.clear();
        self.stats.frames += 1;

        match self.compiler.compile(source) {
            Ok(lines) => self.load(Program::from_lines(lines)),
            Err(err) => {
                debug!(line = err.line(), error = %err, "compile failed");
                self.stats.compile_failures += 1;
                self.log.fault(Fault::compile(err));
                self.idle();
            }
        }

        let mut steps = 0;
        if self.state == RunState::Running {
            self.accumulator += delta;
            while self.accumulator >= self.period {
                self.accumulator -= self.period;
                if self.step().is_some() {
                    steps += 1;
                }
            }
        }

        FrameSummary {
            state: self.state,
            steps,
            faults: self.log.faults().len(),
            warnings: self.log.warning_count(),
        }
    }

    /// Runs exactly one instruction period, independent of frame timing.
    ///
    /// # Returns
    ///
    /// `None` while idle, otherwise the report of the period.
    pub fn step(&mut self) -> Option<StepReport> {
        if self.state != RunState::Running {
            return None;
        }
        let program = self.program.as_ref()?;
        let report = self.processor.tick(program, self.period)?;
        let text = report.operation.as_ref().map_or_else(
            || program.get(report.pc).map(ToString::to_string).unwrap_or_default(),
            ToString::to_string,
        );
        self.record(&report, text);
        Some(report)
    }

    /// Fully resets the processor and discards pending time and diagnostics.
    ///
    /// The loaded program is kept.
    pub fn reset(&mut self) {
        self.processor.reset();
        self.accumulator = Duration::ZERO;
        self.log.clear();
    }

    /// Current run state.
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// The processor.
    pub const fn processor(&self) -> &Processor {
        &self.processor
    }

    /// The processor, mutably (for host-driven pokes and inspection).
    pub const fn processor_mut(&mut self) -> &mut Processor {
        &mut self.processor
    }

    /// The last successfully compiled program.
    pub const fn program(&self) -> Option<&Program> {
        self.program.as_ref()
    }

    /// Logical duration of one instruction period.
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Faults of the last frame.
    pub fn faults(&self) -> &[Fault] {
        self.log.faults()
    }

    /// Warnings of the last frame, sorted by source line.
    pub fn warnings(&self) -> impl Iterator<Item = &Warning> {
        self.log.warnings()
    }

    /// Decoded view of the last frame, sorted by source line.
    pub fn decoded(&self) -> impl Iterator<Item = &DecodedLine> {
        self.log.decoded_lines()
    }

    /// Accumulated statistics.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Takes the text printed since the last call.
    pub fn drain_text(&mut self) -> String {
        self.processor.drain_text()
    }

    /// Looks up a linked display by name.
    pub fn display(&self, name: &str) -> Option<&Display> {
        self.processor.display(name)
    }

    /// Reads a register without declaring it.
    pub fn register(&self, name: &str) -> Option<&Value> {
        self.processor.registers.peek(name)
    }

    fn load(&mut self, program: Program) {
        if self.program.as_ref() != Some(&program) {
            self.stats.program_loads += 1;
            info!(instructions = program.len(), "program loaded");
            if self.policy == ReloadPolicy::ResetOnChange && self.program.is_some() {
                debug!("program changed, resetting processor");
                self.processor.reset();
            }
        }

        if program.is_empty() {
            self.program = Some(program);
            self.idle();
            return;
        }
        if self.state == RunState::Idle {
            debug!(pc = self.processor.pc, "resuming execution");
        }
        self.processor.pc %= program.len();
        self.program = Some(program);
        self.state = RunState::Running;
    }

    fn idle(&mut self) {
        self.state = RunState::Idle;
        self.accumulator = Duration::ZERO;
    }

    fn record(&mut self, report: &StepReport, text: String) {
        self.stats.periods += 1;
        self.stats.logical_time += self.period;
        let line = report.source_line;
        let status = match &report.outcome {
            StepOutcome::Blank => {
                self.stats.blank_slots += 1;
                return;
            }
            StepOutcome::Waiting => {
                self.stats.wait_slots += 1;
                return;
            }
            StepOutcome::Executed => {
                self.stats.instructions_executed += 1;
                DecodedStatus::Executed
            }
            StepOutcome::Unsupported(unsupported) => {
                self.stats.warnings += 1;
                self.log.warn(Warning::new(unsupported.clone(), line));
                DecodedStatus::Unsupported
            }
            StepOutcome::Faulted(err) => {
                self.stats.instructions_executed += 1;
                self.stats.faults += 1;
                self.log.fault(Fault::instruction(err.clone(), line));
                DecodedStatus::Faulted
            }
        };
        self.log.decoded(DecodedLine {
            source_line: line,
            text,
            status,
        });
    }
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("state", &self.state)
            .field("processor", &self.processor)
            .field("program_len", &self.program.as_ref().map(Program::len))
            .field("accumulator", &self.accumulator)
            .field("period", &self.period)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

//! Processor Definition and Initialization.
//!
//! This module defines the central `Processor` structure, the container for all
//! state a logic program can observe. It coordinates the following:
//! 1. **State Management:** Register store, program counter, wait budget and logical clock.
//! 2. **Linked Blocks:** Memory cells and displays, exposed to programs as reference registers.
//! 3. **Output:** The drawing canvas and the text buffer drained by the host.
//! 4. **Operand Resolution:** Literal and register operands to values, including `@` built-ins.

/// Draw command application.
pub mod draw;

/// Operation execution and the per-period tick.
pub mod execution;

/// Memory cell and display access through reference operands.
pub mod memory;

use std::fmt;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::common::constants::{COUNTER_REGISTER, TIME_REGISTER};
use crate::common::error::ExecError;
use crate::common::value::{ArrayRef, SurfaceRef, Value};
use crate::config::Config;
use crate::core::arch::canvas::Canvas;
use crate::core::arch::display::Display;
use crate::core::arch::memory::MemoryCell;
use crate::core::arch::registers::RegisterStore;
use crate::isa::operand::Operand;

pub use self::execution::{Flow, StepOutcome, StepReport};

/// Milliseconds per second, for `@time`.
const MILLIS_PER_SECOND: f64 = 1000.0;

/// Main processor structure containing all program-visible state.
///
/// The processor applies one instruction per [`Processor::tick`]. It never
/// owns the program: the driver passes the current one in, so a
/// recompilation swaps programs without touching processor state.
pub struct Processor {
    /// Named registers.
    pub registers: RegisterStore,
    /// Index of the instruction executed by the next tick.
    pub pc: usize,
    /// Remaining logical wait, in seconds.
    pub wait_remaining: f64,
    /// Logical time since the last reset.
    pub elapsed: Duration,
    /// Linked memory cells.
    pub cells: Vec<MemoryCell>,
    /// Linked displays.
    pub displays: Vec<Display>,
    /// Off-screen drawing surface.
    pub canvas: Canvas,
    /// Text printed since the host last drained it.
    pub text: String,
    /// Emit a `trace` event for every executed instruction.
    pub trace: bool,
    rng: StdRng,
    seed: Option<u64>,
}

impl Processor {
    /// Creates a processor in its power-on state.
    ///
    /// # Arguments
    ///
    /// * `config` - Emulator configuration; linked blocks, canvas size, seed and tracing.
    ///
    /// # Returns
    ///
    /// A reset processor with every linked block bound to its reference register.
    pub fn new(config: &Config) -> Self {
        let canvas = Canvas::new(config.canvas.width, config.canvas.height, config.canvas.stroke);
        let cells = config
            .processor
            .cells
            .iter()
            .map(|cell| MemoryCell::new(&cell.name, cell.size))
            .collect();
        let displays = config
            .processor
            .displays
            .iter()
            .map(|name| Display::new(name, canvas.width(), canvas.height()))
            .collect();
        let seed = config.general.rand_seed;

        let mut processor = Self {
            registers: RegisterStore::new(),
            pc: 0,
            wait_remaining: 0.0,
            elapsed: Duration::ZERO,
            cells,
            displays,
            canvas,
            text: String::new(),
            trace: config.general.trace_instructions,
            rng: Self::make_rng(seed),
            seed,
        };
        processor.reset();
        processor
    }

    /// Restores the power-on state.
    ///
    /// Clears registers, memory cells, displays, canvas and text, zeroes the
    /// counter, wait budget and clock, re-seeds a seeded random source and
    /// re-binds the linked blocks.
    pub fn reset(&mut self) {
        self.registers.clear();
        self.pc = 0;
        self.wait_remaining = 0.0;
        self.elapsed = Duration::ZERO;
        self.cells.iter_mut().for_each(MemoryCell::clear);
        self.displays.iter_mut().for_each(Display::clear);
        self.canvas.reset();
        self.text.clear();
        if self.seed.is_some() {
            self.rng = Self::make_rng(self.seed);
        }
        self.link();
        info!(
            cells = self.cells.len(),
            displays = self.displays.len(),
            "processor reset"
        );
    }

    /// Takes the text printed since the last call.
    pub fn drain_text(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    /// Looks up a linked display by name.
    pub fn display(&self, name: &str) -> Option<&Display> {
        self.displays.iter().find(|d| d.name() == name)
    }

    /// Looks up a linked memory cell by name.
    pub fn cell(&self, name: &str) -> Option<&MemoryCell> {
        self.cells.iter().find(|c| c.name() == name)
    }

    /// Resolves an operand to a value.
    ///
    /// Literals resolve to themselves. `@counter` reads as the index of the
    /// next instruction and `@time` as logical milliseconds since reset. Any
    /// other register is read through the store, declaring it when absent.
    pub fn resolve(&mut self, operand: &Operand) -> Value {
        match operand {
            Operand::Number(n) => Value::Number(*n),
            Operand::Text(s) => Value::Text(s.clone()),
            Operand::Color(c) => Value::Color(*c),
            Operand::Register(name) => match name.as_str() {
                COUNTER_REGISTER => Value::Number((self.pc + 1) as f64),
                TIME_REGISTER => Value::Number(self.elapsed.as_secs_f64() * MILLIS_PER_SECOND),
                _ => self.registers.get(name).clone(),
            },
        }
    }

    /// Resolves an operand and coerces it to a number.
    ///
    /// # Errors
    ///
    /// As [`Value::as_number`].
    pub fn resolve_number(&mut self, operand: &Operand) -> Result<f64, ExecError> {
        match operand {
            Operand::Number(n) => Ok(*n),
            other => self.resolve(other).as_number(),
        }
    }

    /// Declares `dest` as numeric 0 when it does not exist yet.
    ///
    /// Built-in registers are never stored, so they are left alone.
    pub fn declare(&mut self, dest: &str) {
        if dest != COUNTER_REGISTER && dest != TIME_REGISTER {
            let _ = self.registers.get(dest);
        }
    }

    /// Writes a destination register.
    ///
    /// Assigning `@counter` requests a jump instead of storing anything;
    /// `@time` is read-only and ignores writes.
    ///
    /// # Arguments
    ///
    /// * `dest` - Destination register name.
    /// * `value` - Value to store.
    /// * `len` - Length of the running program, for wrapping jump targets.
    ///
    /// # Returns
    ///
    /// [`Flow::Jump`] when the counter was assigned, otherwise [`Flow::Next`].
    ///
    /// # Errors
    ///
    /// Coercion errors when a non-numeric value is assigned to `@counter`.
    pub fn assign(&mut self, dest: &str, value: Value, len: usize) -> Result<Flow, ExecError> {
        match dest {
            COUNTER_REGISTER => Ok(Flow::Jump(wrap_target(value.as_number()?, len))),
            TIME_REGISTER => Ok(Flow::Next),
            _ => {
                self.registers.set(dest, value);
                Ok(Flow::Next)
            }
        }
    }

    /// Binds every linked block to its reference register.
    fn link(&mut self) {
        for (i, cell) in self.cells.iter().enumerate() {
            let reference = Value::Array(ArrayRef::new(i, cell.name()));
            self.registers.set(cell.name(), reference);
        }
        for (i, display) in self.displays.iter().enumerate() {
            let reference = Value::Surface(SurfaceRef::new(i, display.name()));
            self.registers.set(display.name(), reference);
        }
    }

    fn make_rng(seed: Option<u64>) -> StdRng {
        seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
    }
}

impl fmt::Debug for Processor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Processor")
            .field("pc", &self.pc)
            .field("registers", &self.registers.len())
            .field("wait_remaining", &self.wait_remaining)
            .field("elapsed", &self.elapsed)
            .field("cells", &self.cells.len())
            .field("displays", &self.displays.len())
            .finish_non_exhaustive()
    }
}

/// Converts a program-supplied jump target to a slot index.
///
/// The target is truncated toward zero and wrapped into `0..len`; non-finite
/// targets land on slot 0.
pub fn wrap_target(target: f64, len: usize) -> usize {
    if len == 0 || !target.is_finite() {
        return 0;
    }
    target.trunc().rem_euclid(len as f64) as usize % len
}

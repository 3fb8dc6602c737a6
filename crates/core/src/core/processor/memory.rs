//! Memory Cell and Display Access.
//!
//! This module resolves reference operands to the linked blocks they name. It
//! performs the following:
//! 1. **Cell Access:** `read`/`write` through an array reference and a numeric index.
//! 2. **Display Access:** `drawflush` through a surface reference.
//!
//! A reference that does not resolve to the expected kind is a type mismatch.

use super::Processor;
use crate::common::error::ExecError;
use crate::common::value::Value;
use crate::isa::operand::Operand;

impl Processor {
    /// Reads `array[index]`.
    ///
    /// # Errors
    ///
    /// [`ExecError::TypeMismatch`] when `array` is not an array reference, and
    /// index errors from [`crate::core::arch::memory::MemoryCell::read`].
    pub fn read_cell(&mut self, array: &Operand, index: &Operand) -> Result<Value, ExecError> {
        let cell = self.cell_index(array)?;
        let index = self.resolve_number(index)?;
        self.cells
            .get(cell)
            .ok_or_else(|| dangling("array"))?
            .read(index)
            .cloned()
    }

    /// Writes `array[index] = value`.
    ///
    /// # Errors
    ///
    /// As [`Processor::read_cell`].
    pub fn write_cell(
        &mut self,
        value: &Operand,
        array: &Operand,
        index: &Operand,
    ) -> Result<(), ExecError> {
        let value = self.resolve(value);
        let cell = self.cell_index(array)?;
        let index = self.resolve_number(index)?;
        self.cells
            .get_mut(cell)
            .ok_or_else(|| dangling("array"))?
            .write(index, value)
    }

    /// Presents the canvas on the display `target` refers to.
    ///
    /// # Errors
    ///
    /// [`ExecError::TypeMismatch`] when `target` is not a surface reference.
    pub fn flush_display(&mut self, target: &Operand) -> Result<(), ExecError> {
        let index = match self.resolve(target) {
            Value::Surface(surface) => surface.index(),
            other => return Err(mismatch("surface", &other)),
        };
        let display = self
            .displays
            .get_mut(index)
            .ok_or_else(|| dangling("surface"))?;
        display.present(&self.canvas);
        Ok(())
    }

    fn cell_index(&mut self, array: &Operand) -> Result<usize, ExecError> {
        match self.resolve(array) {
            Value::Array(array) => Ok(array.index()),
            other => Err(mismatch("array", &other)),
        }
    }
}

const fn mismatch(expected: &'static str, found: &Value) -> ExecError {
    ExecError::TypeMismatch {
        expected,
        found: found.kind_name(),
    }
}

/// A reference whose block no longer exists.
const fn dangling(expected: &'static str) -> ExecError {
    ExecError::TypeMismatch {
        expected,
        found: "dangling reference",
    }
}

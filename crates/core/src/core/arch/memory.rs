//! Linked memory cells.
//!
//! A memory cell is a fixed-size array of values reachable through an array
//! reference. Every slot starts as numeric 0. Indices are program-supplied
//! floats and are truncated toward zero after a bounds check.

use crate::common::error::ExecError;
use crate::common::value::Value;

/// One fixed-size memory cell.
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryCell {
    name: String,
    slots: Vec<Value>,
}

impl MemoryCell {
    /// Creates a zero-filled cell.
    pub fn new(name: &str, size: usize) -> Self {
        Self {
            name: name.to_owned(),
            slots: vec![Value::ZERO; size],
        }
    }

    /// Name the cell is linked under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true for a cell without slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Reads the slot at `index`.
    ///
    /// # Errors
    ///
    /// [`ExecError::IndexOutOfBounds`] when `index` is negative, non-finite or
    /// not below the cell size.
    pub fn read(&self, index: f64) -> Result<&Value, ExecError> {
        let slot = self.slot(index)?;
        self.slots.get(slot).ok_or_else(|| self.out_of_bounds(index))
    }

    /// Writes the slot at `index`.
    ///
    /// # Errors
    ///
    /// As [`MemoryCell::read`].
    pub fn write(&mut self, index: f64, value: Value) -> Result<(), ExecError> {
        let slot = self.slot(index)?;
        if let Some(target) = self.slots.get_mut(slot) {
            *target = value;
        }
        Ok(())
    }

    /// Resets every slot to numeric 0.
    pub fn clear(&mut self) {
        self.slots.fill(Value::ZERO);
    }

    /// All slots in index order.
    pub fn values(&self) -> &[Value] {
        &self.slots
    }

    fn slot(&self, index: f64) -> Result<usize, ExecError> {
        if index.is_finite() && index >= 0.0 && index < self.slots.len() as f64 {
            Ok(index as usize)
        } else {
            Err(self.out_of_bounds(index))
        }
    }

    fn out_of_bounds(&self, index: f64) -> ExecError {
        ExecError::IndexOutOfBounds {
            array: self.name.clone(),
            index,
            len: self.slots.len(),
        }
    }
}

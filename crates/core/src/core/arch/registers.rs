//! Named register store.
//!
//! This module implements the register space shared by a whole run. It performs the following:
//! 1. **Storage:** Maps register names to dynamically-typed [`Value`]s.
//! 2. **Implicit Declaration:** Reading an unknown register declares it with numeric 0.
//! 3. **Inspection:** Provides a sorted snapshot of all registers for debugging views.
//!
//! Built-in `@` registers are owned by the processor and never stored here.

use std::collections::HashMap;

use crate::common::value::Value;

/// The register store.
#[derive(Clone, Debug, Default)]
pub struct RegisterStore {
    regs: HashMap<String, Value>,
}

impl RegisterStore {
    /// Creates an empty register store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register, declaring it as numeric 0 when absent.
    ///
    /// # Arguments
    ///
    /// * `name` - Register name.
    ///
    /// # Returns
    ///
    /// The register's current value.
    pub fn get(&mut self, name: &str) -> &Value {
        self.regs.entry(name.to_owned()).or_insert(Value::ZERO)
    }

    /// Reads a register without declaring it.
    pub fn peek(&self, name: &str) -> Option<&Value> {
        self.regs.get(name)
    }

    /// Writes a register, declaring it when absent.
    ///
    /// # Arguments
    ///
    /// * `name` - Register name.
    /// * `value` - The value to store.
    pub fn set(&mut self, name: &str, value: Value) {
        match self.regs.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                let _ = self.regs.insert(name.to_owned(), value);
            }
        }
    }

    /// Number of declared registers.
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    /// Returns true when no register has been declared.
    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// Iterates over all registers in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.regs.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns every register sorted by name.
    pub fn snapshot(&self) -> Vec<(String, Value)> {
        let mut regs: Vec<_> = self
            .regs
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        regs.sort_by(|a, b| a.0.cmp(&b.0));
        regs
    }

    /// Removes every register.
    pub fn clear(&mut self) {
        self.regs.clear();
    }
}

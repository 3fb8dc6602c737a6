//! Compiler interface.
//!
//! The emulator does not compile source itself. Each frame it hands the
//! current editable source to a [`Compiler`], which either returns the flat
//! instruction lines or rejects the whole program with a [`CompileError`].

use crate::common::error::CompileError;

/// Turns editable source text into instruction lines.
pub trait Compiler {
    /// Compiles `source` into one instruction per line.
    ///
    /// # Errors
    ///
    /// A [`CompileError`] when the program is rejected; nothing executes
    /// for that frame.
    fn compile(&mut self, source: &str) -> Result<Vec<String>, CompileError>;
}

/// Treats the source as already-compiled instruction text, one per line.
///
/// # Examples
///
/// ```
/// use mlogvm_core::sim::compiler::{Compiler, PassthroughCompiler};
///
/// let lines = PassthroughCompiler.compile("set x 1\n\nend\n").unwrap();
/// assert_eq!(lines, ["set x 1", "", "end"]);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughCompiler;

impl Compiler for PassthroughCompiler {
    fn compile(&mut self, source: &str) -> Result<Vec<String>, CompileError> {
        Ok(source.lines().map(str::to_owned).collect())
    }
}

impl<F> Compiler for F
where
    F: FnMut(&str) -> Result<Vec<String>, CompileError>,
{
    fn compile(&mut self, source: &str) -> Result<Vec<String>, CompileError> {
        self(source)
    }
}

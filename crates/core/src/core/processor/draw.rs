//! Draw Command Application.
//!
//! Resolves the numeric arguments of a [`DrawCommand`] and forwards them to the
//! canvas rasterizer. Color channels are rounded and clamped, the stroke width
//! is clamped to at least one pixel, and regular polygons with fewer than
//! three sides draw nothing.

use super::Processor;
use crate::common::error::ExecError;
use crate::common::value::{Rgba, Value};
use crate::core::arch::canvas::regular_polygon;
use crate::isa::operand::Operand;
use crate::isa::translate::DrawCommand;

/// Alpha used by `draw clear`.
const OPAQUE: f64 = 255.0;

impl Processor {
    /// Applies one draw command to the canvas.
    ///
    /// # Errors
    ///
    /// Coercion errors when an argument is not numeric, and
    /// [`ExecError::InvalidColor`]/[`ExecError::TypeMismatch`] when `draw col`
    /// receives something other than a color.
    pub fn draw(&mut self, command: &DrawCommand) -> Result<(), ExecError> {
        match command {
            DrawCommand::Clear(args) => {
                let [r, g, b] = self.numbers(args)?;
                self.canvas.clear(Rgba::from_channels(r, g, b, OPAQUE));
            }
            DrawCommand::Color(args) => {
                let [r, g, b, a] = self.numbers(args)?;
                self.canvas.set_color(Rgba::from_channels(r, g, b, a));
            }
            DrawCommand::Col(arg) => {
                let color = self.color(arg)?;
                self.canvas.set_color(color);
            }
            DrawCommand::Stroke(arg) => {
                let width = self.resolve_number(arg)?;
                self.canvas.set_stroke(width);
            }
            DrawCommand::Line(args) => {
                let [x1, y1, x2, y2] = self.numbers(args)?;
                self.canvas.line(x1, y1, x2, y2);
            }
            DrawCommand::Rect(args) => {
                let [x, y, w, h] = self.numbers(args)?;
                self.canvas.fill_rect(x, y, w, h);
            }
            DrawCommand::LineRect(args) => {
                let [x, y, w, h] = self.numbers(args)?;
                self.canvas.stroke_rect(x, y, w, h);
            }
            DrawCommand::Poly(args) => {
                let [x, y, sides, radius, rotation] = self.numbers(args)?;
                self.canvas
                    .fill_polygon(&regular_polygon(x, y, sides, radius, rotation));
            }
            DrawCommand::LinePoly(args) => {
                let [x, y, sides, radius, rotation] = self.numbers(args)?;
                self.canvas
                    .stroke_polygon(&regular_polygon(x, y, sides, radius, rotation));
            }
            DrawCommand::Triangle(args) => {
                let [x1, y1, x2, y2, x3, y3] = self.numbers(args)?;
                self.canvas.fill_triangle((x1, y1), (x2, y2), (x3, y3));
            }
        }
        Ok(())
    }

    /// Resolves every argument to a number, in order.
    fn numbers<const N: usize>(&mut self, args: &[Operand; N]) -> Result<[f64; N], ExecError> {
        let mut out = [0.0; N];
        for (slot, arg) in out.iter_mut().zip(args) {
            *slot = self.resolve_number(arg)?;
        }
        Ok(out)
    }

    /// Resolves a `draw col` argument: a color, or text holding a hex color.
    fn color(&mut self, arg: &Operand) -> Result<Rgba, ExecError> {
        match self.resolve(arg) {
            Value::Color(color) => Ok(color),
            Value::Text(text) => Rgba::from_hex(&text).ok_or(ExecError::InvalidColor(text)),
            other => Err(ExecError::TypeMismatch {
                expected: "color",
                found: other.kind_name(),
            }),
        }
    }
}

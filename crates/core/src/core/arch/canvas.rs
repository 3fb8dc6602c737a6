//! Processor drawing canvas.
//!
//! This module implements the off-screen surface `draw` instructions render into.
//! It provides:
//! 1. **State:** Pixel buffer, current draw color and current stroke width.
//! 2. **Primitives:** Clear, rectangles, lines, triangles and regular polygons.
//! 3. **Clipping:** Every primitive is clipped to the canvas; nothing outside is touched.
//!
//! Coordinates are y-up: pixel `(0, 0)` is the bottom-left corner and row 0 of
//! the buffer is the bottom row. A pixel is covered by a filled shape when its
//! center lies inside the shape. Writes overwrite the pixel; the surface keeps
//! no per-pixel alpha, so every stored pixel is opaque.

use std::f64::consts::TAU;

use crate::common::constants::MAX_POLY_SIDES;
use crate::common::value::Rgba;

/// Stroke widths up to this value rasterize as one-pixel lines.
const THIN_STROKE: f64 = 1.5;

/// Minimum stroke width accepted by `draw stroke`.
const MIN_STROKE: f64 = 1.0;

/// The processor's drawing surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    color: Rgba,
    stroke: f64,
    initial_stroke: f64,
}

impl Canvas {
    /// Creates a black canvas with a white draw color.
    ///
    /// # Arguments
    ///
    /// * `width` - Width in pixels.
    /// * `height` - Height in pixels.
    /// * `stroke` - Stroke width restored by [`Canvas::reset`].
    pub fn new(width: u32, height: u32, stroke: f64) -> Self {
        let initial_stroke = stroke.max(MIN_STROKE);
        Self {
            width,
            height,
            pixels: vec![Rgba::BLACK; width as usize * height as usize],
            color: Rgba::WHITE,
            stroke: initial_stroke,
            initial_stroke,
        }
    }

    /// Width in pixels.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Current draw color.
    pub const fn color(&self) -> Rgba {
        self.color
    }

    /// Current stroke width.
    pub const fn stroke(&self) -> f64 {
        self.stroke
    }

    /// The pixel buffer, bottom row first.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            self.pixels.get(y as usize * self.width as usize + x as usize).copied()
        } else {
            None
        }
    }

    /// Restores the power-on state: black pixels, white color, initial stroke.
    pub fn reset(&mut self) {
        self.pixels.fill(Rgba::BLACK);
        self.color = Rgba::WHITE;
        self.stroke = self.initial_stroke;
    }

    /// Sets the draw color.
    pub const fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    /// Sets the stroke width, clamped to at least one pixel.
    pub fn set_stroke(&mut self, width: f64) {
        self.stroke = if width.is_nan() { MIN_STROKE } else { width.max(MIN_STROKE) };
    }

    /// Fills the whole canvas with `color`.
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(opaque(color));
    }

    /// Fills the axis-aligned rectangle with its lower-left corner at `(x, y)`.
    ///
    /// Negative sizes extend the rectangle to the left or downwards.
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let (x0, x1) = ordered(x, x + w);
        let (y0, y1) = ordered(y, y + h);
        let (Some(cols), Some(rows)) = (
            covered_span(x0, x1, self.width),
            covered_span(y0, y1, self.height),
        ) else {
            return;
        };
        let color = opaque(self.color);
        for py in rows.0..rows.1 {
            for px in cols.0..cols.1 {
                self.put(px, py, color);
            }
        }
    }

    /// Outlines a rectangle with the current stroke width, drawn inside its bounds.
    pub fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let (x0, x1) = ordered(x, x + w);
        let (y0, y1) = ordered(y, y + h);
        let (w, h, s) = (x1 - x0, y1 - y0, self.stroke);
        if 2.0 * s >= w || 2.0 * s >= h {
            self.fill_rect(x0, y0, w, h);
            return;
        }
        self.fill_rect(x0, y0, w, s);
        self.fill_rect(x0, y1 - s, w, s);
        self.fill_rect(x0, y0 + s, s, h - 2.0 * s);
        self.fill_rect(x1 - s, y0 + s, s, h - 2.0 * s);
    }

    /// Draws a line with the current color and stroke width.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        if self.stroke <= THIN_STROKE {
            self.thin_line(x1, y1, x2, y2);
            return;
        }

        let half = self.stroke / 2.0;
        let (dx, dy) = (x2 - x1, y2 - y1);
        let length = dx.hypot(dy);
        if length == 0.0 {
            self.fill_rect(x1 - half, y1 - half, self.stroke, self.stroke);
            return;
        }
        let (nx, ny) = (-dy / length * half, dx / length * half);
        self.fill_polygon(&[
            (x1 + nx, y1 + ny),
            (x2 + nx, y2 + ny),
            (x2 - nx, y2 - ny),
            (x1 - nx, y1 - ny),
        ]);
    }

    /// Fills the triangle with the given corners.
    pub fn fill_triangle(&mut self, a: (f64, f64), b: (f64, f64), c: (f64, f64)) {
        self.fill_polygon(&[a, b, c]);
    }

    /// Fills an arbitrary polygon using the even-odd rule.
    pub fn fill_polygon(&mut self, points: &[(f64, f64)]) {
        if points.len() < 3 || points.iter().any(|&(x, y)| !x.is_finite() || !y.is_finite()) {
            return;
        }
        let (lo, hi) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
                (lo.min(y), hi.max(y))
            });
        let Some(rows) = covered_span(lo, hi, self.height) else {
            return;
        };

        let color = opaque(self.color);
        let mut crossings = Vec::with_capacity(points.len());
        for py in rows.0..rows.1 {
            let sy = py as f64 + 0.5;
            crossings.clear();
            for (i, &(ax, ay)) in points.iter().enumerate() {
                let (bx, by) = points[(i + 1) % points.len()];
                if (ay <= sy && sy < by) || (by <= sy && sy < ay) {
                    crossings.push(ax + (sy - ay) * (bx - ax) / (by - ay));
                }
            }
            crossings.sort_by(f64::total_cmp);
            for pair in crossings.chunks_exact(2) {
                if let Some(cols) = covered_span(pair[0], pair[1], self.width) {
                    for px in cols.0..cols.1 {
                        self.put(px, py, color);
                    }
                }
            }
        }
    }

    /// Outlines a closed polygon with the current stroke width.
    pub fn stroke_polygon(&mut self, points: &[(f64, f64)]) {
        for (i, &(ax, ay)) in points.iter().enumerate() {
            let (bx, by) = points[(i + 1) % points.len()];
            self.line(ax, ay, bx, by);
        }
    }

    fn thin_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let Some(((x1, y1), (x2, y2))) = self.clip_segment((x1, y1), (x2, y2)) else {
            return;
        };
        let color = opaque(self.color);
        let (mut x, mut y) = (x1.round() as i64, y1.round() as i64);
        let (tx, ty) = (x2.round() as i64, y2.round() as i64);
        let dx = (tx - x).abs();
        let dy = -(ty - y).abs();
        let sx = if x < tx { 1 } else { -1 };
        let sy = if y < ty { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            if let (Ok(px), Ok(py)) = (u32::try_from(x), u32::try_from(y)) {
                self.put(px, py, color);
            }
            if x == tx && y == ty {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Clips a segment to the pixel-center rectangle (Liang-Barsky).
    fn clip_segment(
        &self,
        (x0, y0): (f64, f64),
        (x1, y1): (f64, f64),
    ) -> Option<((f64, f64), (f64, f64))> {
        if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
            return None;
        }
        let (xmax, ymax) = (f64::from(self.width) - 1.0, f64::from(self.height) - 1.0);
        let (dx, dy) = (x1 - x0, y1 - y0);
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
        for (p, q) in [(-dx, x0), (dx, xmax - x0), (-dy, y0), (dy, ymax - y0)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
        Some(((x0 + t0 * dx, y0 + t0 * dy), (x0 + t1 * dx, y0 + t1 * dy)))
    }

    fn put(&mut self, x: u32, y: u32, color: Rgba) {
        if x < self.width && y < self.height {
            let index = y as usize * self.width as usize + x as usize;
            if let Some(pixel) = self.pixels.get_mut(index) {
                *pixel = color;
            }
        }
    }
}

/// Vertices of a regular polygon centered at `(x, y)`.
///
/// Vertex `j` sits at angle `2π/sides·j + rotation` (radians) on a circle of
/// `radius`. Fewer than 3 sides yields no vertices; more than
/// [`MAX_POLY_SIDES`] is clamped.
pub fn regular_polygon(x: f64, y: f64, sides: f64, radius: f64, rotation: f64) -> Vec<(f64, f64)> {
    if sides.is_nan() || sides < 3.0 {
        return Vec::new();
    }
    let sides = (sides as usize).min(MAX_POLY_SIDES);
    let step = TAU / sides as f64;
    (0..sides)
        .map(|j| {
            let angle = step * j as f64 + rotation;
            (x + angle.cos() * radius, y + angle.sin() * radius)
        })
        .collect()
}

/// Returns `(lo, hi)` in ascending order.
fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Pixel indices whose centers fall in `[lo, hi)`, clipped to `0..limit`.
fn covered_span(lo: f64, hi: f64, limit: u32) -> Option<(u32, u32)> {
    if !lo.is_finite() || !hi.is_finite() {
        return None;
    }
    let limit = f64::from(limit);
    let first = (lo - 0.5).ceil().clamp(0.0, limit);
    let end = (hi - 0.5).ceil().clamp(0.0, limit);
    (first < end).then_some((first as u32, end as u32))
}

const fn opaque(color: Rgba) -> Rgba {
    Rgba { a: u8::MAX, ..color }
}

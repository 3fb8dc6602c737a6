//! Linked displays.
//!
//! A display holds the last image presented to it by `drawflush`. Displays
//! share the canvas size and are read-only to the host between frames.

use std::io::{self, Write};

use crate::common::value::Rgba;
use crate::core::arch::canvas::Canvas;

/// Maximum channel value written to PPM headers.
const PPM_MAX_VALUE: u8 = u8::MAX;

/// One presented framebuffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Display {
    name: String,
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Display {
    /// Creates a black display.
    pub fn new(name: &str, width: u32, height: u32) -> Self {
        Self {
            name: name.to_owned(),
            width,
            height,
            pixels: vec![Rgba::BLACK; width as usize * height as usize],
        }
    }

    /// Name the display is linked under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in pixels.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Presented pixels, bottom row first.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Pixel at `(x, y)` (y-up), or `None` outside the display.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            self.pixels.get(y as usize * self.width as usize + x as usize).copied()
        } else {
            None
        }
    }

    /// Copies the canvas pixels onto the display.
    pub fn present(&mut self, canvas: &Canvas) {
        self.width = canvas.width();
        self.height = canvas.height();
        self.pixels.clear();
        self.pixels.extend_from_slice(canvas.pixels());
    }

    /// Blanks the display.
    pub fn clear(&mut self) {
        self.pixels.fill(Rgba::BLACK);
    }

    /// Writes the display as a binary PPM (P6) image, top row first.
    ///
    /// # Errors
    ///
    /// Propagates any error from `out`.
    pub fn write_ppm<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "P6\n{} {}\n{PPM_MAX_VALUE}\n", self.width, self.height)?;
        let width = self.width as usize;
        if width == 0 {
            return Ok(());
        }
        let mut row = Vec::with_capacity(width * 3);
        for line in self.pixels.chunks_exact(width).rev() {
            row.clear();
            for pixel in line {
                row.extend_from_slice(&[pixel.r, pixel.g, pixel.b]);
            }
            out.write_all(&row)?;
        }
        Ok(())
    }
}

//! Processor architectural state.
//!
//! This module contains the state a logic program can observe and mutate.
//! It includes the following modules:
//! 1. **Registers:** The named register store shared by the run.
//! 2. **Memory:** Linked memory cells addressed through array references.
//! 3. **Canvas:** The off-screen drawing surface with color and stroke state.
//! 4. **Displays:** Framebuffers that receive the canvas on `drawflush`.

/// Off-screen drawing surface and rasterizer.
pub mod canvas;

/// Linked displays.
pub mod display;

/// Linked memory cells.
pub mod memory;

/// Named register store.
pub mod registers;

//! Configuration system for the logic-processor emulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the emulator. It provides:
//! 1. **Defaults:** Baseline constants (instruction rate, canvas size, linked blocks).
//! 2. **Structures:** Hierarchical config for general, processor, and canvas settings.
//! 3. **Enums:** Reload policy applied when the compiled program changes.
//!
//! Configuration is supplied as JSON (`Config::from_json`, `Config::from_file`) or
//! built with `Config::default()`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default configuration constants for the emulator.
///
/// These values match the reference processor when not explicitly
/// overridden in a JSON configuration.
mod defaults {
    /// Instructions executed per logical second (one every 1/240 s).
    pub const INSTRUCTIONS_PER_SECOND: f64 = 240.0;

    /// Canvas width in pixels.
    pub const CANVAS_WIDTH: u32 = 176;

    /// Canvas height in pixels.
    pub const CANVAS_HEIGHT: u32 = 176;

    /// Initial stroke width in pixels.
    pub const STROKE: f64 = 1.0;

    /// Name of the memory cell linked by default.
    pub const CELL_NAME: &str = "cell1";

    /// Slot count of the memory cell linked by default.
    pub const CELL_SIZE: usize = 64;

    /// Name of the display linked by default.
    pub const DISPLAY_NAME: &str = "display1";
}

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid JSON or does not match the schema.
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration parsed but holds an unusable value.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// What happens to processor state when the compiled program changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ReloadPolicy {
    /// Keep counter, registers, canvas and memory across recompilations.
    ///
    /// The counter is wrapped into the new program's bounds.
    #[default]
    Preserve,
    /// Fully reset the processor whenever the compiled program differs
    /// from the one that was running.
    ResetOnChange,
}

/// Root configuration structure containing all emulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use mlogvm_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.processor.instructions_per_second, 240.0);
/// assert_eq!(config.canvas.width, 176);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use mlogvm_core::config::{Config, ReloadPolicy};
///
/// let json = r#"{
///     "general": { "reload_policy": "ResetOnChange", "rand_seed": 7 },
///     "processor": {
///         "instructions_per_second": 120.0,
///         "cells": [ { "name": "bank1", "size": 512 } ],
///         "displays": [ "display1", "display2" ]
///     },
///     "canvas": { "width": 80, "height": 80 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.reload_policy, ReloadPolicy::ResetOnChange);
/// assert_eq!(config.processor.cells[0].size, 512);
/// assert_eq!(config.processor.displays.len(), 2);
/// assert_eq!(config.canvas.stroke, 1.0);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General emulator settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Processor speed and linked blocks
    #[serde(default)]
    pub processor: ProcessorConfig,
    /// Drawing surface configuration
    #[serde(default)]
    pub canvas: CanvasConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`] for malformed input, [`ConfigError::Invalid`]
    /// when validation fails.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`Config::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Checks invariants the emulator relies on.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rate = self.processor.instructions_per_second;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "processor.instructions_per_second must be a positive number, got {rate}"
            )));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        if !self.canvas.stroke.is_finite() || self.canvas.stroke <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "canvas.stroke must be a positive number, got {}",
                self.canvas.stroke
            )));
        }

        let mut seen = HashSet::new();
        let names = self
            .processor
            .cells
            .iter()
            .map(|cell| cell.name.as_str())
            .chain(self.processor.displays.iter().map(String::as_str));
        for name in names {
            if name.is_empty() || name.contains(char::is_whitespace) || name.starts_with('@') {
                return Err(ConfigError::Invalid(format!(
                    "link name {name:?} is not a valid register name"
                )));
            }
            if !seen.insert(name) {
                return Err(ConfigError::Invalid(format!("link name {name:?} is used twice")));
            }
        }
        if let Some(cell) = self.processor.cells.iter().find(|cell| cell.size == 0) {
            return Err(ConfigError::Invalid(format!(
                "memory cell {:?} must have at least one slot",
                cell.name
            )));
        }
        Ok(())
    }
}

/// General emulator settings and options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Emit a `trace` event for every executed instruction
    #[serde(default)]
    pub trace_instructions: bool,

    /// Processor state handling when the compiled program changes
    #[serde(default)]
    pub reload_policy: ReloadPolicy,

    /// Seed for `op rand`; entropy-seeded when absent
    #[serde(default)]
    pub rand_seed: Option<u64>,
}

/// Processor speed and the blocks linked to it.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessorConfig {
    /// Instructions executed per logical second
    #[serde(default = "ProcessorConfig::default_rate")]
    pub instructions_per_second: f64,

    /// Linked memory cells, reachable as array references
    #[serde(default = "ProcessorConfig::default_cells")]
    pub cells: Vec<CellConfig>,

    /// Linked displays, reachable as surface references
    #[serde(default = "ProcessorConfig::default_displays")]
    pub displays: Vec<String>,
}

impl ProcessorConfig {
    /// Returns the default instruction rate.
    const fn default_rate() -> f64 {
        defaults::INSTRUCTIONS_PER_SECOND
    }

    /// Returns the default linked memory cells (`cell1`, 64 slots).
    fn default_cells() -> Vec<CellConfig> {
        vec![CellConfig::default()]
    }

    /// Returns the default linked displays (`display1`).
    fn default_displays() -> Vec<String> {
        vec![defaults::DISPLAY_NAME.to_owned()]
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            instructions_per_second: defaults::INSTRUCTIONS_PER_SECOND,
            cells: Self::default_cells(),
            displays: Self::default_displays(),
        }
    }
}

/// One linked memory cell.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CellConfig {
    /// Register name the cell is linked under
    pub name: String,

    /// Number of slots
    #[serde(default = "CellConfig::default_size")]
    pub size: usize,
}

impl CellConfig {
    /// Returns the default slot count.
    const fn default_size() -> usize {
        defaults::CELL_SIZE
    }
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            name: defaults::CELL_NAME.to_owned(),
            size: defaults::CELL_SIZE,
        }
    }
}

/// Drawing surface configuration. Every linked display shares this size.
#[derive(Debug, Clone, Deserialize)]
pub struct CanvasConfig {
    /// Width in pixels
    #[serde(default = "CanvasConfig::default_width")]
    pub width: u32,

    /// Height in pixels
    #[serde(default = "CanvasConfig::default_height")]
    pub height: u32,

    /// Stroke width after reset
    #[serde(default = "CanvasConfig::default_stroke")]
    pub stroke: f64,
}

impl CanvasConfig {
    /// Returns the default canvas width.
    const fn default_width() -> u32 {
        defaults::CANVAS_WIDTH
    }

    /// Returns the default canvas height.
    const fn default_height() -> u32 {
        defaults::CANVAS_HEIGHT
    }

    /// Returns the default stroke width.
    const fn default_stroke() -> f64 {
        defaults::STROKE
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: defaults::CANVAS_WIDTH,
            height: defaults::CANVAS_HEIGHT,
            stroke: defaults::STROKE,
        }
    }
}

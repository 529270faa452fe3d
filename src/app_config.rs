use crate::cli::Args;
use crate::config::GridConfig;
use crate::errors::{FogError, FogResult};
use crate::grid::FallMode;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const MIN_TICK_MS: u64 = 10;
pub const MAX_TICK_MS: u64 = 1000;
/// Upper bound for the assumed character cell size in pixels
pub const MAX_CELL_PX: u32 = 256;

/// Startup configuration for the whole application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub grid: GridConfig,
    pub animation: AnimationConfig,
    pub display: DisplayConfig,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

/// Animation timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Wall-clock interval between update passes (ms)
    pub tick_interval_ms: u64,
    /// Let intensity/gravity drive the trigger rate and growth factor
    pub wire_knobs: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 50,
            wire_knobs: true,
        }
    }
}

/// Display and layout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Derive grid size from the viewport instead of the controller
    pub follow_viewport: bool,
    /// Assumed pixel width of one terminal character
    pub cell_px_width: u32,
    /// Assumed pixel height of one terminal character
    pub cell_px_height: u32,
    /// Draw the faint grid line overlay
    pub show_grid_lines: bool,
    /// Draw the centred label
    pub show_label: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            follow_viewport: false,
            cell_px_width: 8,
            cell_px_height: 16,
            show_grid_lines: true,
            show_label: true,
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> FogResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            FogError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: AppConfig = serde_json::from_str(&text)?;
        info!("loaded configuration from {}", path.display());
        Ok(config.validated())
    }

    /// Build from command line flags, layered over an optional config file
    pub fn from_args(args: &Args) -> FogResult<Self> {
        let base = match &args.config {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_args(args))
    }

    pub fn with_args(mut self, args: &Args) -> Self {
        if let Some(rows) = args.rows {
            self.grid.rows = rows;
        }
        if let Some(cols) = args.cols {
            self.grid.cols = cols;
        }
        if let Some(size) = args.square_size {
            self.grid.square_size = size;
        }
        if let Some(intensity) = args.intensity {
            self.grid.falling_intensity = intensity;
        }
        if let Some(gravity) = args.gravity {
            self.grid.gravity_multiplier = gravity;
        }
        if let Some(ms) = args.tick_ms {
            self.animation.tick_interval_ms = ms;
        }
        if args.seed.is_some() {
            self.seed = args.seed;
        }
        if args.fit {
            self.display.follow_viewport = true;
        }
        if args.classic {
            self.animation.wire_knobs = false;
        }
        if args.no_grid_lines {
            self.display.show_grid_lines = false;
        }
        self.validated()
    }

    /// Force every value into a usable range
    pub fn validated(mut self) -> Self {
        self.grid = self.grid.clamped();
        self.animation.tick_interval_ms = self
            .animation
            .tick_interval_ms
            .clamp(MIN_TICK_MS, MAX_TICK_MS);
        self.display.cell_px_width = self.display.cell_px_width.clamp(1, MAX_CELL_PX);
        self.display.cell_px_height = self.display.cell_px_height.clamp(1, MAX_CELL_PX);
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.animation.tick_interval_ms)
    }

    pub fn fall_mode(&self) -> FallMode {
        if self.animation.wire_knobs {
            FallMode::Wired
        } else {
            FallMode::Classic
        }
    }

    pub fn cell_px(&self) -> (u32, u32) {
        (self.display.cell_px_width, self.display.cell_px_height)
    }
}

// Falling grid animator - owns the cell array and advances it one tick at a time
//
// Each cell is either Resting or Falling. A resting cell starts falling with
// probability `trigger_probability` per tick. A falling cell accelerates by
// `growth_factor` each tick and lands once it has fallen `(rows - 1) * square_size`
// pixels, at which point it goes back to rest with a new colour.

use crate::grid::cell::Cell;
use crate::grid::dimensions::{resolve_dimensions, DimensionOverrides, GridDimensions, Viewport};
use crate::grid::traits::{GridError, GridResult, GridTrait};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Trigger probability of the fixed reference animation (about 1% of ticks)
pub const CLASSIC_TRIGGER_PROBABILITY: f32 = 0.01;
/// Speed growth per tick of the fixed reference animation
pub const CLASSIC_GROWTH_FACTOR: f32 = 1.1;
/// Intensity 0.5 maps to the classic 1% trigger rate
pub const INTENSITY_TRIGGER_SCALE: f64 = 0.02;
/// Gravity 1.0 maps to the classic 1.1 growth
pub const GRAVITY_GROWTH_SCALE: f64 = 0.1;

/// Per-tick animation constants
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FallParams {
    pub trigger_probability: f32,
    pub growth_factor: f32,
}

impl Default for FallParams {
    fn default() -> Self {
        Self::classic()
    }
}

impl FallParams {
    pub fn classic() -> Self {
        Self {
            trigger_probability: CLASSIC_TRIGGER_PROBABILITY,
            growth_factor: CLASSIC_GROWTH_FACTOR,
        }
    }

    /// Derive from the controller knobs
    pub fn from_knobs(falling_intensity: f64, gravity_multiplier: f64) -> Self {
        let intensity = if falling_intensity.is_nan() {
            0.0
        } else {
            falling_intensity.clamp(0.0, 1.0)
        };
        let gravity = if gravity_multiplier.is_nan() {
            0.0
        } else {
            gravity_multiplier.clamp(0.0, 2.0)
        };
        Self {
            trigger_probability: (intensity * INTENSITY_TRIGGER_SCALE) as f32,
            growth_factor: (1.0 + gravity * GRAVITY_GROWTH_SCALE) as f32,
        }
    }
}

/// How the controller's intensity/gravity knobs reach the animation
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallMode {
    /// Knobs drive trigger probability and growth factor
    Wired,
    /// Knobs are accepted but the fixed reference constants are used
    Classic,
}

/// Everything the controller hands to the animator
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatorProps {
    pub rows: Option<i64>,
    pub cols: Option<i64>,
    pub square_size: Option<i64>,
    pub falling_intensity: f64,
    pub gravity_multiplier: f64,
}

impl Default for AnimatorProps {
    fn default() -> Self {
        Self {
            rows: None,
            cols: None,
            square_size: None,
            falling_intensity: 0.5,
            gravity_multiplier: 1.0,
        }
    }
}

impl AnimatorProps {
    pub fn overrides(&self) -> DimensionOverrides {
        DimensionOverrides {
            rows: self.rows,
            cols: self.cols,
            square_size: self.square_size,
        }
    }
}

/// Outcome of one update pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub started: usize,
    pub landed: usize,
    /// Cells still falling after the pass
    pub falling: usize,
}

pub struct FallingGrid {
    props: AnimatorProps,
    viewport: Viewport,
    dims: GridDimensions,
    grid: Vec<Vec<Cell>>,
    mode: FallMode,
    params: FallParams,
    rotation: u16,
    tick_count: u64,
    rng: StdRng,
}

impl FallingGrid {
    /// Mount: resolve dimensions and build a fresh resting grid
    pub fn new(props: AnimatorProps, viewport: Viewport, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let dims = resolve_dimensions(props.overrides(), viewport.width);
        let mut animator = Self {
            props,
            viewport,
            dims,
            grid: Vec::new(),
            mode: FallMode::Wired,
            params: FallParams::from_knobs(props.falling_intensity, props.gravity_multiplier),
            rotation: 0,
            tick_count: 0,
            rng,
        };
        animator.rebuild();
        animator
    }

    pub fn with_mode(mut self, mode: FallMode) -> Self {
        self.set_mode(mode);
        self
    }

    pub fn set_mode(&mut self, mode: FallMode) {
        self.mode = mode;
        self.refresh_params();
    }

    pub fn mode(&self) -> FallMode {
        self.mode
    }

    /// Override the derived parameters directly
    pub fn set_params(&mut self, params: FallParams) {
        self.params = params;
    }

    pub fn params(&self) -> FallParams {
        self.params
    }

    pub fn props(&self) -> AnimatorProps {
        self.props
    }

    pub fn rotation(&self) -> u16 {
        self.rotation
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn fall_threshold(&self) -> f32 {
        self.dims.fall_threshold()
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[Cell]> {
        self.grid.iter().map(|row| row.as_slice())
    }

    /// Apply new controller output. Rebuilds only when the resolved size changes.
    pub fn set_props(&mut self, props: AnimatorProps) -> bool {
        self.props = props;
        self.refresh_params();
        let dims = resolve_dimensions(props.overrides(), self.viewport.width);
        if dims != self.dims {
            self.dims = dims;
            self.rebuild();
            true
        } else {
            false
        }
    }

    /// Viewport changed: re-derive and always start over from a resting grid
    pub fn on_resize(&mut self, viewport: Viewport) {
        debug!(
            "viewport resized {}x{} -> {}x{}",
            self.viewport.width, self.viewport.height, viewport.width, viewport.height
        );
        self.viewport = viewport;
        self.dims = resolve_dimensions(self.props.overrides(), viewport.width);
        self.rebuild();
    }

    /// Force a resting cell into its fall, as a pointer click does
    pub fn start_fall(&mut self, row: usize, col: usize) -> GridResult<()> {
        self.validate_coordinates(row, col)?;
        let cell = &mut self.grid[row][col];
        if cell.falling {
            return Err(GridError::AlreadyFalling { row, col });
        }
        cell.begin_fall();
        Ok(())
    }

    /// One full update pass over every cell, then advance the frame rotation
    pub fn tick(&mut self) -> TickReport {
        let threshold = self.dims.fall_threshold();
        let FallParams {
            trigger_probability,
            growth_factor,
        } = self.params;
        let rng = &mut self.rng;
        let mut report = TickReport::default();

        for cell in self.grid.iter_mut().flat_map(|row| row.iter_mut()) {
            if cell.falling {
                let speed = cell.speed * growth_factor;
                let position = cell.position + speed;
                if position < threshold {
                    cell.speed = speed;
                    cell.position = position;
                    cell.active = true;
                    report.falling += 1;
                } else {
                    cell.land(rng);
                    report.landed += 1;
                }
            } else if rng.gen::<f32>() < trigger_probability {
                cell.begin_fall();
                report.started += 1;
                report.falling += 1;
            }
        }

        self.rotation = (self.rotation + 1) % 360;
        self.tick_count += 1;
        report
    }

    fn refresh_params(&mut self) {
        self.params = match self.mode {
            FallMode::Wired => {
                FallParams::from_knobs(self.props.falling_intensity, self.props.gravity_multiplier)
            }
            FallMode::Classic => FallParams::classic(),
        };
    }

    fn rebuild(&mut self) {
        let GridDimensions { rows, cols, .. } = self.dims;
        let rng = &mut self.rng;
        self.grid = (0..rows)
            .map(|_| (0..cols).map(|_| Cell::resting(rng)).collect())
            .collect();
        info!(
            "grid rebuilt: {}x{} squares of {}px",
            rows, cols, self.dims.square_size
        );
    }
}

impl GridTrait for FallingGrid {
    fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    fn cell(&self, row: usize, col: usize) -> GridResult<&Cell> {
        self.validate_coordinates(row, col)?;
        Ok(&self.grid[row][col])
    }

    fn active_cells(&self) -> usize {
        self.grid
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.active)
            .count()
    }
}

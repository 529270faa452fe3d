// Grid configuration and the controller that mutates it
// All mutation goes through clamping, nothing here can fail

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// User adjustable grid parameters
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: u32,
    pub cols: u32,
    pub square_size: u32,
    pub falling_intensity: f64,
    pub gravity_multiplier: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 15,
            cols: 20,
            square_size: 25,
            falling_intensity: 0.5,
            gravity_multiplier: 1.0,
        }
    }
}

impl GridConfig {
    pub fn new(rows: u32, cols: u32, square_size: u32) -> Self {
        Self {
            rows,
            cols,
            square_size,
            ..Self::default()
        }
        .clamped()
    }

    /// Returns a copy with every field forced into its slider range
    pub fn clamped(&self) -> Self {
        let mut out = self.clone();
        for field in ConfigField::ALL {
            let value = field.spec().clamp(self.get(field));
            out.store(field, value);
        }
        out
    }

    /// Read a field as f64, the slider's native unit
    pub fn get(&self, field: ConfigField) -> f64 {
        match field {
            ConfigField::Rows => self.rows as f64,
            ConfigField::Cols => self.cols as f64,
            ConfigField::SquareSize => self.square_size as f64,
            ConfigField::FallingIntensity => self.falling_intensity,
            ConfigField::GravityMultiplier => self.gravity_multiplier,
        }
    }

    // Assumes `value` is already clamped
    fn store(&mut self, field: ConfigField, value: f64) {
        match field {
            ConfigField::Rows => self.rows = value as u32,
            ConfigField::Cols => self.cols = value as u32,
            ConfigField::SquareSize => self.square_size = value as u32,
            ConfigField::FallingIntensity => self.falling_intensity = value,
            ConfigField::GravityMultiplier => self.gravity_multiplier = value,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigField {
    Rows,
    Cols,
    SquareSize,
    FallingIntensity,
    GravityMultiplier,
}

/// Declared range and step for one slider
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSpec {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub integer: bool,
}

impl FieldSpec {
    /// Coerce any input into the declared range. NaN maps to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        let value = if self.integer { value.round() } else { value };
        value.max(self.min).min(self.max)
    }

    /// Position of `value` within the range, 0.0 at min and 1.0 at max
    pub fn ratio(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.clamp(value) - self.min) / span).clamp(0.0, 1.0)
    }
}

impl ConfigField {
    pub const ALL: [ConfigField; 5] = [
        ConfigField::Rows,
        ConfigField::Cols,
        ConfigField::SquareSize,
        ConfigField::FallingIntensity,
        ConfigField::GravityMultiplier,
    ];

    pub fn spec(self) -> FieldSpec {
        match self {
            ConfigField::Rows => FieldSpec {
                label: "Rows",
                min: 5.0,
                max: 30.0,
                step: 1.0,
                integer: true,
            },
            ConfigField::Cols => FieldSpec {
                label: "Columns",
                min: 5.0,
                max: 30.0,
                step: 1.0,
                integer: true,
            },
            ConfigField::SquareSize => FieldSpec {
                label: "Square Size",
                min: 10.0,
                max: 40.0,
                step: 1.0,
                integer: true,
            },
            ConfigField::FallingIntensity => FieldSpec {
                label: "Falling Intensity",
                min: 0.0,
                max: 1.0,
                step: 0.1,
                integer: false,
            },
            ConfigField::GravityMultiplier => FieldSpec {
                label: "Gravity Multiplier",
                min: 0.0,
                max: 2.0,
                step: 0.1,
                integer: false,
            },
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

/// Owns the configuration and every way of changing it
pub struct ConfigController {
    config: GridConfig,
    selected: ConfigField,
    rng: StdRng,
}

impl ConfigController {
    pub fn new(config: GridConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_seed(config: GridConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GridConfig, rng: StdRng) -> Self {
        Self {
            config: config.clamped(),
            selected: ConfigField::Rows,
            rng,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn field_value(&self, field: ConfigField) -> f64 {
        self.config.get(field)
    }

    /// Set one field, clamping to its declared range. Returns the stored value.
    pub fn set_field(&mut self, field: ConfigField, value: f64) -> f64 {
        let clamped = field.spec().clamp(value);
        self.config.store(field, clamped);
        debug!("config {:?} <- {} (requested {})", field, clamped, value);
        clamped
    }

    /// Move a slider by whole steps
    pub fn nudge(&mut self, field: ConfigField, steps: i32) -> f64 {
        let spec = field.spec();
        let mut target = self.config.get(field) + steps as f64 * spec.step;
        if !spec.integer {
            // keep 0.1 steps from drifting to 0.30000000000000004
            target = (target * 10.0).round() / 10.0;
        }
        self.set_field(field, target)
    }

    /// Replace the whole configuration with fresh uniform draws
    pub fn randomize(&mut self) -> &GridConfig {
        let rng = &mut self.rng;
        self.config = GridConfig {
            rows: rng.gen_range(10..25),
            cols: rng.gen_range(15..30),
            square_size: rng.gen_range(20..30),
            falling_intensity: rng.gen_range(0.0..1.0),
            gravity_multiplier: rng.gen_range(0.0..2.0),
        };
        debug!("config randomized: {:?}", self.config);
        &self.config
    }

    pub fn selected(&self) -> ConfigField {
        self.selected
    }

    pub fn select_next(&mut self) -> ConfigField {
        let idx = (self.selected.index() + 1) % ConfigField::ALL.len();
        self.selected = ConfigField::ALL[idx];
        self.selected
    }

    pub fn select_prev(&mut self) -> ConfigField {
        let len = ConfigField::ALL.len();
        let idx = (self.selected.index() + len - 1) % len;
        self.selected = ConfigField::ALL[idx];
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_range(field: ConfigField, value: f64) -> bool {
        let spec = field.spec();
        value >= spec.min && value <= spec.max
    }

    #[test]
    fn test_set_field_clamps_every_field() {
        let mut ctl = ConfigController::with_seed(GridConfig::default(), 1);
        let inputs = [
            f64::NEG_INFINITY,
            -1e9,
            -3.0,
            0.0,
            0.45,
            7.0,
            29.6,
            31.0,
            1e12,
            f64::INFINITY,
            f64::NAN,
        ];
        for field in ConfigField::ALL {
            for &v in &inputs {
                let stored = ctl.set_field(field, v);
                assert!(in_range(field, stored), "{:?} <- {} gave {}", field, v, stored);
                assert_eq!(stored, ctl.field_value(field));
            }
        }
    }

    #[test]
    fn test_rows_and_intensity_ranges() {
        let mut ctl = ConfigController::with_seed(GridConfig::default(), 2);
        assert_eq!(ctl.set_field(ConfigField::Rows, 100.0), 30.0);
        assert_eq!(ctl.set_field(ConfigField::Rows, -4.0), 5.0);
        assert_eq!(ctl.set_field(ConfigField::Rows, 12.4), 12.0);
        assert_eq!(ctl.set_field(ConfigField::FallingIntensity, 3.0), 1.0);
        assert_eq!(ctl.set_field(ConfigField::FallingIntensity, -0.5), 0.0);
        assert_eq!(ctl.config().rows, 12);
        assert_eq!(ctl.config().falling_intensity, 0.0);
    }

    #[test]
    fn test_nudge_moves_by_step() {
        let mut ctl = ConfigController::with_seed(GridConfig::default(), 3);
        assert_eq!(ctl.nudge(ConfigField::Cols, 2), 22.0);
        assert_eq!(ctl.nudge(ConfigField::FallingIntensity, -2), 0.3);
        assert_eq!(ctl.nudge(ConfigField::GravityMultiplier, 50), 2.0);
        assert_eq!(ctl.nudge(ConfigField::SquareSize, -100), 10.0);
    }

    #[test]
    fn test_randomize_ranges() {
        let mut ctl = ConfigController::with_seed(GridConfig::default(), 4);
        for _ in 0..2000 {
            let c = ctl.randomize().clone();
            assert!((10..25).contains(&c.rows));
            assert!((15..30).contains(&c.cols));
            assert!((20..30).contains(&c.square_size));
            assert!((0.0..1.0).contains(&c.falling_intensity));
            assert!((0.0..2.0).contains(&c.gravity_multiplier));
        }
    }

    #[test]
    fn test_selection_wraps() {
        let mut ctl = ConfigController::with_seed(GridConfig::default(), 5);
        assert_eq!(ctl.select_prev(), ConfigField::GravityMultiplier);
        assert_eq!(ctl.select_next(), ConfigField::Rows);
        assert_eq!(ctl.select_next(), ConfigField::Cols);
    }

    #[test]
    fn test_config_clamped_on_construction() {
        let wild = GridConfig {
            rows: 0,
            cols: 99,
            square_size: 3,
            falling_intensity: 4.0,
            gravity_multiplier: -1.0,
        };
        let ctl = ConfigController::with_seed(wild, 6);
        assert_eq!(ctl.config().rows, 5);
        assert_eq!(ctl.config().cols, 30);
        assert_eq!(ctl.config().square_size, 10);
        assert_eq!(ctl.config().falling_intensity, 1.0);
        assert_eq!(ctl.config().gravity_multiplier, 0.0);
    }
}

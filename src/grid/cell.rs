// Per-position animation state and its colour

use rand::Rng;
use std::fmt;

/// Exclusive upper bound for sampled RGB channels
pub const CHANNEL_LIMIT: u8 = 200;
pub const ALPHA_MIN: f32 = 0.3;
pub const ALPHA_MAX: f32 = 1.0;

/// Translucent colour, alpha in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Muted translucent palette: channels uniform in [0,200), alpha uniform in [0.3,1.0)
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            r: rng.gen_range(0..CHANNEL_LIMIT),
            g: rng.gen_range(0..CHANNEL_LIMIT),
            b: rng.gen_range(0..CHANNEL_LIMIT),
            a: rng.gen_range(ALPHA_MIN..ALPHA_MAX),
        }
    }

    /// Composite over an opaque background, returning the visible RGB
    pub fn blend_over(&self, background: (u8, u8, u8)) -> (u8, u8, u8) {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| -> u8 {
            (fg as f32 * a + bg as f32 * (1.0 - a)).round().clamp(0.0, 255.0) as u8
        };
        (
            mix(self.r, background.0),
            mix(self.g, background.1),
            mix(self.b, background.2),
        )
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {:.2})", self.r, self.g, self.b, self.a)
    }
}

/// One grid position. `falling` implies `active`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Cell {
    pub falling: bool,
    pub color: Rgba,
    /// Pixels fallen so far
    pub position: f32,
    /// Pixels per tick
    pub speed: f32,
    pub active: bool,
}

impl Cell {
    /// A resting, inactive cell with a freshly sampled colour
    pub fn resting<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            falling: false,
            color: Rgba::random(rng),
            position: 0.0,
            speed: 1.0,
            active: false,
        }
    }

    pub fn is_resting(&self) -> bool {
        !self.falling
    }

    /// Enter the falling state at the top of the cell
    pub fn begin_fall(&mut self) {
        self.falling = true;
        self.position = 0.0;
        self.speed = 1.0;
        self.active = true;
    }

    /// Finish a fall cycle: back to rest with a new colour
    pub fn land<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.falling = false;
        self.position = 0.0;
        self.speed = 1.0;
        self.color = Rgba::random(rng);
        self.active = false;
    }
}

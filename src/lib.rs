//! Animated grid of falling translucent squares.
//!
//! The [`config::ConfigController`] owns the user facing knobs, the
//! [`grid::FallingGrid`] owns the cell array and advances it one tick at a
//! time, and [`app::App`] wires the two together for the terminal front end.

pub mod app;
pub mod app_config;
pub mod cli;
pub mod config;
pub mod display;
pub mod errors;
pub mod grid;
pub mod lifecycle;
pub mod performance_monitor;
pub mod terminal;

pub use app::{App, Section};
pub use app_config::{AnimationConfig, AppConfig, DisplayConfig};
pub use config::{ConfigController, ConfigField, GridConfig};
pub use errors::{FogError, FogResult};
pub use grid::{
    derive_dimensions, AnimatorProps, Cell, FallMode, FallParams, FallingGrid, GridDimensions,
    GridTrait, Rgba, TickReport, Viewport,
};
pub use lifecycle::{AppEvent, Lifecycle};
pub use performance_monitor::PerformanceMonitor;

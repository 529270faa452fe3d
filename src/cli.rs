use clap::Parser;
use std::path::PathBuf;

/// Falling squares in your terminal
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "fog_grid", version, about)]
pub struct Args {
    /// Grid rows (5-30)
    #[arg(long)]
    pub rows: Option<u32>,

    /// Grid columns (5-30)
    #[arg(long)]
    pub cols: Option<u32>,

    /// Square size in pixels (10-40)
    #[arg(long = "square-size")]
    pub square_size: Option<u32>,

    /// Falling intensity (0-1)
    #[arg(long)]
    pub intensity: Option<f64>,

    /// Gravity multiplier (0-2)
    #[arg(long)]
    pub gravity: Option<f64>,

    /// Milliseconds between animation ticks
    #[arg(long = "tick-ms")]
    pub tick_ms: Option<u64>,

    /// Seed the random number generators
    #[arg(long)]
    pub seed: Option<u64>,

    /// Size the grid from the terminal instead of the sliders
    #[arg(long)]
    pub fit: bool,

    /// Use the fixed 1% trigger and 1.1 growth regardless of the sliders
    #[arg(long)]
    pub classic: bool,

    /// Hide the grid line overlay
    #[arg(long = "no-grid-lines")]
    pub no_grid_lines: bool,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write logs to this file (stderr would corrupt the screen)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

// Application state: controller, animator and the glue between them
//
// Data only flows one way: controller -> props -> animator. The animator never
// writes back into the controller.

use crate::app_config::AppConfig;
use crate::config::{ConfigController, ConfigField};
use crate::display::layout::{screen_areas, GridLayout};
use crate::grid::{AnimatorProps, FallMode, FallingGrid, GridError, GridTrait, Viewport};
use crate::lifecycle::AppEvent;
use crate::performance_monitor::PerformanceMonitor;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use log::{debug, info, warn};
use ratatui::layout::Rect;
use std::time::Instant;

/// Side panel contents
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    About,
    Config,
    Code,
    Hidden,
}

impl Section {
    pub fn next(self) -> Self {
        match self {
            Section::About => Section::Config,
            Section::Config => Section::Code,
            Section::Code => Section::Hidden,
            Section::Hidden => Section::About,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::About => "About",
            Section::Config => "Grid Configuration",
            Section::Code => "Code",
            Section::Hidden => "",
        }
    }
}

/// Reports the terminal size in pixels when the terminal knows it
pub type PixelProbe = Box<dyn Fn() -> Option<(u32, u32)>>;

pub struct App {
    pub config: AppConfig,
    pub controller: ConfigController,
    pub animator: FallingGrid,
    pub monitor: PerformanceMonitor,
    pub section: Section,
    pub follow_viewport: bool,
    pub show_help: bool,
    pub should_quit: bool,
    /// Terminal size in character cells
    pub terminal_size: (u16, u16),
    pixel_probe: PixelProbe,
}

impl App {
    /// Mount with the terminal at `terminal_size` (columns, rows)
    pub fn new(config: AppConfig, terminal_size: (u16, u16)) -> Self {
        Self::with_pixel_probe(config, terminal_size, Box::new(|| None))
    }

    pub fn with_pixel_probe(config: AppConfig, terminal_size: (u16, u16), pixel_probe: PixelProbe) -> Self {
        let controller = match config.seed {
            Some(seed) => ConfigController::with_seed(config.grid.clone(), seed),
            None => ConfigController::new(config.grid.clone()),
        };
        let follow_viewport = config.display.follow_viewport;
        let viewport = viewport_for(terminal_size, config.cell_px(), pixel_probe());
        let props = props_from(&controller, follow_viewport);
        // different stream from the controller so randomize() does not shadow the cells
        let animator_seed = config.seed.map(|s| s.wrapping_add(1));
        let animator = FallingGrid::new(props, viewport, animator_seed).with_mode(config.fall_mode());
        info!(
            "mounted: viewport {}x{}px, grid {:?}",
            viewport.width,
            viewport.height,
            animator.dimensions()
        );

        Self {
            config,
            controller,
            animator,
            monitor: PerformanceMonitor::new(),
            section: Section::About,
            follow_viewport,
            show_help: false,
            should_quit: false,
            terminal_size,
            pixel_probe,
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => self.on_tick(),
            AppEvent::Key(key) => self.on_key(key),
            AppEvent::Mouse(mouse) => self.on_mouse(mouse),
            AppEvent::Resize(cols, rows) => self.on_resize(cols, rows),
            AppEvent::InputClosed(reason) => {
                warn!("input lost ({}), quitting", reason);
                self.should_quit = true;
            }
        }
    }

    pub fn on_tick(&mut self) {
        let started = Instant::now();
        let report = self.animator.tick();
        self.monitor.record_tick(report, started.elapsed());
    }

    pub fn on_resize(&mut self, cols: u16, rows: u16) {
        self.terminal_size = (cols, rows);
        let viewport = viewport_for(self.terminal_size, self.config.cell_px(), (self.pixel_probe)());
        self.animator.on_resize(viewport);
        self.monitor.grid_reset();
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.show_help {
            // any key closes help, q still quits
            self.show_help = false;
            if key.code == KeyCode::Char('q') {
                self.should_quit = true;
            }
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab => self.section = self.section.next(),
            KeyCode::Char('1') => self.section = Section::About,
            KeyCode::Char('2') => self.section = Section::Config,
            KeyCode::Char('3') => self.section = Section::Code,
            KeyCode::Char('0') => self.section = Section::Hidden,
            KeyCode::Up | KeyCode::Char('k') => {
                self.controller.select_prev();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.controller.select_next();
            }
            KeyCode::Left | KeyCode::Char('h') => self.nudge_selected(-1),
            KeyCode::Right | KeyCode::Char('l') => self.nudge_selected(1),
            KeyCode::Char('r') => self.randomize(),
            KeyCode::Char('v') => self.toggle_follow_viewport(),
            KeyCode::Char('m') => self.toggle_mode(),
            _ => {}
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some((row, col)) = self.grid_layout().cell_at(mouse.column, mouse.row) else {
            return;
        };
        match self.animator.start_fall(row, col) {
            Ok(()) => debug!("click started fall at ({}, {})", row, col),
            Err(GridError::AlreadyFalling { .. }) => {}
            Err(e) => debug!("click ignored: {}", e),
        }
    }

    pub fn set_field(&mut self, field: ConfigField, value: f64) {
        self.controller.set_field(field, value);
        self.push_props();
    }

    pub fn nudge_selected(&mut self, steps: i32) {
        let field = self.controller.selected();
        self.controller.nudge(field, steps);
        self.push_props();
    }

    pub fn randomize(&mut self) {
        let config = self.controller.randomize();
        info!("randomized: {:?}", config);
        self.push_props();
    }

    pub fn toggle_follow_viewport(&mut self) {
        self.follow_viewport = !self.follow_viewport;
        info!("follow viewport: {}", self.follow_viewport);
        self.push_props();
    }

    pub fn toggle_mode(&mut self) {
        let mode = match self.animator.mode() {
            FallMode::Wired => FallMode::Classic,
            FallMode::Classic => FallMode::Wired,
        };
        info!("fall mode: {:?}", mode);
        self.animator.set_mode(mode);
    }

    /// Where the grid is drawn for the current terminal size
    pub fn grid_layout(&self) -> GridLayout {
        let (cols, rows) = self.terminal_size;
        let areas = screen_areas(Rect::new(0, 0, cols, rows), self.section != Section::Hidden);
        GridLayout::compute(areas.grid, self.animator.dimensions(), self.config.cell_px())
    }

    fn push_props(&mut self) {
        let props = props_from(&self.controller, self.follow_viewport);
        if self.animator.set_props(props) {
            self.monitor.grid_reset();
        }
    }
}

fn props_from(controller: &ConfigController, follow_viewport: bool) -> AnimatorProps {
    let config = controller.config();
    let dim = |v: u32| if follow_viewport { None } else { Some(v as i64) };
    AnimatorProps {
        rows: dim(config.rows),
        cols: dim(config.cols),
        square_size: dim(config.square_size),
        falling_intensity: config.falling_intensity,
        gravity_multiplier: config.gravity_multiplier,
    }
}

/// Real pixel size when reported, otherwise estimated from character cells
pub fn viewport_for(terminal_size: (u16, u16), cell_px: (u32, u32), pixels: Option<(u32, u32)>) -> Viewport {
    match pixels {
        Some((w, h)) if w > 0 && h > 0 => Viewport::new(w, h),
        _ => Viewport::from_cells(terminal_size.0, terminal_size.1, cell_px),
    }
}

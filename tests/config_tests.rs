//! Integration tests: the config controller feeding the animator through App
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fog_grid::config::{ConfigController, ConfigField, GridConfig};
use fog_grid::grid::GridTrait;
use fog_grid::{App, AppConfig, AppEvent};

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

#[test]
fn test_out_of_range_values_are_clamped() {
    let mut controller = ConfigController::with_seed(GridConfig::default(), 1);
    assert_eq!(controller.set_field(ConfigField::Rows, 100.0), 30.0);
    assert_eq!(controller.set_field(ConfigField::Cols, -4.0), 5.0);
    assert_eq!(controller.set_field(ConfigField::SquareSize, 3.0), 10.0);
    assert_eq!(controller.set_field(ConfigField::FallingIntensity, 1.7), 1.0);
    assert_eq!(controller.set_field(ConfigField::GravityMultiplier, f64::NAN), 0.0);

    let config = controller.config();
    assert_eq!((config.rows, config.cols, config.square_size), (30, 5, 10));
    assert_eq!(config.falling_intensity, 1.0);
    assert_eq!(config.gravity_multiplier, 0.0);
}

#[test]
fn test_integer_fields_round() {
    let mut controller = ConfigController::with_seed(GridConfig::default(), 2);
    assert_eq!(controller.set_field(ConfigField::Rows, 12.6), 13.0);
    assert_eq!(controller.config().rows, 13);
    assert_eq!(controller.set_field(ConfigField::FallingIntensity, 0.35), 0.35);
}

#[test]
fn test_randomize_draws_from_documented_ranges() {
    let mut controller = ConfigController::with_seed(GridConfig::default(), 3);
    for _ in 0..1000 {
        let c = controller.randomize().clone();
        assert!((10..25).contains(&c.rows), "rows {}", c.rows);
        assert!((15..30).contains(&c.cols), "cols {}", c.cols);
        assert!((20..30).contains(&c.square_size), "size {}", c.square_size);
        assert!((0.0..1.0).contains(&c.falling_intensity));
        assert!((0.0..2.0).contains(&c.gravity_multiplier));
    }
}

#[test]
fn test_nudge_walks_to_bounds() {
    let mut controller = ConfigController::with_seed(GridConfig::default(), 4);
    for _ in 0..30 {
        controller.nudge(ConfigField::GravityMultiplier, 1);
    }
    assert_eq!(controller.config().gravity_multiplier, 2.0);
    for _ in 0..5 {
        controller.nudge(ConfigField::GravityMultiplier, -1);
    }
    assert_eq!(controller.config().gravity_multiplier, 1.5);
}

#[test]
fn test_slider_changes_reach_animator_without_resize() {
    let mut config = AppConfig::default();
    config.seed = Some(5);
    let mut app = App::new(config, (140, 45));
    assert_eq!(app.animator.dimensions().square_size, 25);

    app.set_field(ConfigField::SquareSize, 33.0);
    assert_eq!(app.animator.dimensions().square_size, 33);

    app.set_field(ConfigField::FallingIntensity, 1.0);
    assert!((app.animator.params().trigger_probability - 0.02).abs() < 1e-6);
}

#[test]
fn test_keyboard_randomize_rebuilds_grid() {
    let mut config = AppConfig::default();
    config.seed = Some(6);
    let mut app = App::new(config, (140, 45));
    app.handle_event(key(KeyCode::Char('r')));
    let c = app.controller.config().clone();
    let dims = app.animator.dimensions();
    assert_eq!(dims.rows, c.rows as usize);
    assert_eq!(dims.cols, c.cols as usize);
    assert_eq!(dims.square_size, c.square_size);
    assert_eq!(app.animator.active_cells(), 0);
}

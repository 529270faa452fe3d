// Display formatting utilities

use crate::config::ConfigField;

const SPINNER: [char; 8] = ['│', '╱', '─', '╲', '│', '╱', '─', '╲'];

/// Slider track like `━━━━━━●─────` for a ratio in [0, 1]
pub fn slider_track(ratio: f64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
    let knob = ((width - 1) as f64 * ratio).round() as usize;
    let mut out = String::with_capacity(width * 3);
    for i in 0..width {
        out.push(match i.cmp(&knob) {
            std::cmp::Ordering::Less => '━',
            std::cmp::Ordering::Equal => '●',
            std::cmp::Ordering::Greater => '─',
        });
    }
    out
}

/// Slider label value, one decimal place for every field
pub fn format_field_value(field: ConfigField, value: f64) -> String {
    format!("{}: {:.1}", field.spec().label, value)
}

/// A glyph that turns with the frame rotation (degrees)
pub fn rotation_glyph(rotation: u16) -> char {
    let idx = ((rotation % 360) as usize * SPINNER.len()) / 360;
    SPINNER[idx]
}

pub fn format_rotation(rotation: u16) -> String {
    format!("{} {:>3}°", rotation_glyph(rotation), rotation % 360)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_track_ends() {
        assert_eq!(slider_track(0.0, 5), "●────");
        assert_eq!(slider_track(1.0, 5), "━━━━●");
        assert_eq!(slider_track(0.5, 5), "━━●──");
        assert_eq!(slider_track(f64::NAN, 3), "●──");
        assert_eq!(slider_track(0.5, 0), "");
    }

    #[test]
    fn test_field_value_format() {
        assert_eq!(format_field_value(ConfigField::Rows, 15.0), "Rows: 15.0");
        assert_eq!(
            format_field_value(ConfigField::FallingIntensity, 0.26),
            "Falling Intensity: 0.3"
        );
    }

    #[test]
    fn test_rotation_glyph_cycles() {
        assert_eq!(rotation_glyph(0), '│');
        assert_eq!(rotation_glyph(45), '╱');
        assert_eq!(rotation_glyph(90), '─');
        assert_eq!(rotation_glyph(359), '╲');
        assert_eq!(format_rotation(7), "│   7°");
    }
}

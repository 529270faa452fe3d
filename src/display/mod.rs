// Display module for layout math and frame rendering
pub mod formatters;
pub mod layout;
pub mod render;

// Re-export main functions
pub use formatters::{format_field_value, format_rotation, rotation_glyph, slider_track};
pub use layout::{centered_rect, screen_areas, GridLayout, ScreenAreas};
pub use render::{render_app, BACKGROUND_RGB};

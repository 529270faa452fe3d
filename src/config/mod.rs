// Configuration controller: the user facing knobs
pub mod grid_config;

pub use grid_config::{ConfigController, ConfigField, FieldSpec, GridConfig};

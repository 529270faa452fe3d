// Grid module - the animated cell array and everything it is built from

pub mod animation;
pub mod cell;
pub mod dimensions;
pub mod traits;

// Re-export the main grid types for easy access
pub use animation::{AnimatorProps, FallMode, FallParams, FallingGrid, TickReport};
pub use cell::{Cell, Rgba};
pub use dimensions::{
    derive_dimensions, resolve_dimensions, DimensionOverrides, GridDimensions, Viewport,
};
pub use traits::{CellDisplay, GridError, GridResult, GridTrait};

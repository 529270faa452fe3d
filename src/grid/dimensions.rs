// Grid size resolution: explicit overrides on top of viewport-derived defaults

/// Viewports narrower than this get the small preset
pub const SMALL_VIEWPORT_BREAKPOINT: u32 = 640;

/// Viewport size in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Estimate pixel size from a character grid when the terminal does not report pixels
    pub fn from_cells(columns: u16, rows: u16, cell_px: (u32, u32)) -> Self {
        Self {
            width: (columns as u32).saturating_mul(cell_px.0),
            height: (rows as u32).saturating_mul(cell_px.1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDimensions {
    pub rows: usize,
    pub cols: usize,
    pub square_size: u32,
}

impl GridDimensions {
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// Pixel distance a square falls before landing: `(rows - 1) * square_size`
    pub fn fall_threshold(&self) -> f32 {
        self.rows.saturating_sub(1) as f32 * self.square_size as f32
    }

}

/// Per-field overrides. `None` defers to the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DimensionOverrides {
    pub rows: Option<i64>,
    pub cols: Option<i64>,
    pub square_size: Option<i64>,
}

/// Two-breakpoint default layout for a viewport width
pub fn derive_dimensions(viewport_width: u32) -> GridDimensions {
    if viewport_width < SMALL_VIEWPORT_BREAKPOINT {
        GridDimensions {
            rows: 10,
            cols: 10,
            square_size: 20,
        }
    } else {
        GridDimensions {
            rows: 15,
            cols: 20,
            square_size: 30,
        }
    }
}

/// Apply overrides; negative values collapse to zero (an empty grid)
pub fn resolve_dimensions(overrides: DimensionOverrides, viewport_width: u32) -> GridDimensions {
    let derived = derive_dimensions(viewport_width);
    let non_negative = |v: i64| v.max(0);
    GridDimensions {
        rows: overrides
            .rows
            .map(|v| non_negative(v) as usize)
            .unwrap_or(derived.rows),
        cols: overrides
            .cols
            .map(|v| non_negative(v) as usize)
            .unwrap_or(derived.cols),
        square_size: overrides
            .square_size
            .map(|v| non_negative(v).min(u32::MAX as i64) as u32)
            .unwrap_or(derived.square_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoints() {
        let small = derive_dimensions(639);
        assert_eq!((small.rows, small.cols, small.square_size), (10, 10, 20));
        let large = derive_dimensions(640);
        assert_eq!((large.rows, large.cols, large.square_size), (15, 20, 30));
        assert_eq!(derive_dimensions(0), small);
    }

    #[test]
    fn test_overrides_apply_per_field() {
        let dims = resolve_dimensions(
            DimensionOverrides {
                rows: Some(7),
                cols: None,
                square_size: Some(12),
            },
            1024,
        );
        assert_eq!((dims.rows, dims.cols, dims.square_size), (7, 20, 12));
    }

    #[test]
    fn test_negative_overrides_are_empty() {
        let dims = resolve_dimensions(
            DimensionOverrides {
                rows: Some(-3),
                cols: Some(0),
                square_size: None,
            },
            100,
        );
        assert!(dims.is_empty());
        assert_eq!(dims.fall_threshold(), 0.0);
    }

    #[test]
    fn test_fall_threshold() {
        let dims = GridDimensions {
            rows: 2,
            cols: 1,
            square_size: 10,
        };
        assert_eq!(dims.fall_threshold(), 10.0);
    }

    #[test]
    fn test_viewport_from_cells() {
        assert_eq!(Viewport::from_cells(80, 24, (8, 16)), Viewport::new(640, 384));
        assert_eq!(
            Viewport::from_cells(u16::MAX, 2, (u32::MAX, 16)),
            Viewport::new(u32::MAX, 32)
        );
    }
}

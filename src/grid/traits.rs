// Common traits and error types for the animated grid

use crate::grid::cell::Cell;
use crate::grid::dimensions::GridDimensions;

/// Result type for grid operations
pub type GridResult<T> = Result<T, GridError>;

/// Errors that can occur during grid operations
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    InvalidCoordinates {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    AlreadyFalling {
        row: usize,
        col: usize,
    },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::InvalidCoordinates {
                row,
                col,
                rows,
                cols,
            } => {
                write!(
                    f,
                    "Invalid coordinates ({}, {}), grid is {}x{}",
                    row, col, rows, cols
                )
            }
            GridError::AlreadyFalling { row, col } => {
                write!(f, "Cell ({}, {}) is already falling", row, col)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Read access shared by anything that renders a grid
pub trait GridTrait {
    fn dimensions(&self) -> GridDimensions;

    fn cell(&self, row: usize, col: usize) -> GridResult<&Cell>;

    /// Cells currently drawn (falling squares)
    fn active_cells(&self) -> usize;

    /// Validate coordinates against grid bounds
    fn validate_coordinates(&self, row: usize, col: usize) -> GridResult<()> {
        let dims = self.dimensions();
        if row >= dims.rows || col >= dims.cols {
            return Err(GridError::InvalidCoordinates {
                row,
                col,
                rows: dims.rows,
                cols: dims.cols,
            });
        }
        Ok(())
    }
}

/// Trait for displaying grid cells
pub trait CellDisplay {
    /// Glyph used for this cell in a text frame
    fn glyph(&self) -> char;

    /// Whether the cell paints anything
    fn is_visible(&self) -> bool;
}

impl CellDisplay for Cell {
    fn glyph(&self) -> char {
        if self.falling {
            '█'
        } else {
            '·'
        }
    }

    fn is_visible(&self) -> bool {
        self.active
    }
}

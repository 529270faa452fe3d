// Pixel grid to terminal cell mapping
//
// Squares are measured in pixels; the terminal draws in character cells of an
// assumed pixel size. A square becomes `sq_w x sq_h` characters (at least 1x1),
// shrunk further when the frame would not fit the available area.

use crate::grid::GridDimensions;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Where a grid of a given size lands on screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub frame: Rect,
    pub rows: usize,
    pub cols: usize,
    pub sq_w: u16,
    pub sq_h: u16,
    pub square_size: u32,
}

impl GridLayout {
    /// Fit `dims` into `area`, centred, with one character of border on each side
    pub fn compute(area: Rect, dims: GridDimensions, cell_px: (u32, u32)) -> Self {
        let (px_w, px_h) = (cell_px.0.max(1) as f32, cell_px.1.max(1) as f32);
        let size = dims.square_size as f32;
        let mut sq_w = ((size / px_w).round() as u16).max(1);
        let mut sq_h = ((size / px_h).round() as u16).max(1);

        let inner_w = area.width.saturating_sub(2);
        let inner_h = area.height.saturating_sub(2);
        if dims.cols > 0 {
            let fit_w = (inner_w as usize / dims.cols).clamp(1, u16::MAX as usize) as u16;
            sq_w = sq_w.min(fit_w);
        }
        if dims.rows > 0 {
            let fit_h = (inner_h as usize / dims.rows).clamp(1, u16::MAX as usize) as u16;
            sq_h = sq_h.min(fit_h);
        }

        // overflow is clipped, like a frame capped at the viewport size
        let width = (dims.cols * sq_w as usize).min(inner_w as usize) as u16;
        let height = (dims.rows * sq_h as usize).min(inner_h as usize) as u16;
        let frame = Rect {
            x: area.x + 1 + (inner_w - width) / 2,
            y: area.y + 1 + (inner_h - height) / 2,
            width,
            height,
        };

        Self {
            frame,
            rows: dims.rows,
            cols: dims.cols,
            sq_w,
            sq_h,
            square_size: dims.square_size,
        }
    }

    /// Frame plus its border
    pub fn outer(&self) -> Rect {
        Rect {
            x: self.frame.x.saturating_sub(1),
            y: self.frame.y.saturating_sub(1),
            width: self.frame.width + 2,
            height: self.frame.height + 2,
        }
    }

    /// Resting square slot, clipped to the frame
    pub fn square_rect(&self, row: usize, col: usize) -> Option<Rect> {
        self.offset_rect(row, col, 0)
    }

    /// A falling square shifted down by `position` pixels, clipped to the frame
    pub fn falling_rect(&self, row: usize, col: usize, position: f32) -> Option<Rect> {
        let shift = self.pixels_to_rows(position);
        self.offset_rect(row, col, shift)
    }

    /// Convert a pixel offset into whole character rows
    pub fn pixels_to_rows(&self, position: f32) -> u32 {
        if self.square_size == 0 || !position.is_finite() || position <= 0.0 {
            return 0;
        }
        (position / self.square_size as f32 * self.sq_h as f32).floor() as u32
    }

    /// Which cell slot a screen coordinate falls into
    pub fn cell_at(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        if x < self.frame.x || y < self.frame.y {
            return None;
        }
        if x >= self.frame.x + self.frame.width || y >= self.frame.y + self.frame.height {
            return None;
        }
        let col = ((x - self.frame.x) / self.sq_w) as usize;
        let row = ((y - self.frame.y) / self.sq_h) as usize;
        if row < self.rows && col < self.cols {
            Some((row, col))
        } else {
            None
        }
    }

    fn offset_rect(&self, row: usize, col: usize, shift_rows: u32) -> Option<Rect> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let left = col as u32 * self.sq_w as u32;
        let top = row as u32 * self.sq_h as u32 + shift_rows;
        let (fw, fh) = (self.frame.width as u32, self.frame.height as u32);
        if left >= fw || top >= fh {
            return None;
        }
        let width = (self.sq_w as u32).min(fw - left);
        let height = (self.sq_h as u32).min(fh - top);
        Some(Rect {
            x: self.frame.x + left as u16,
            y: self.frame.y + top as u16,
            width: width as u16,
            height: height as u16,
        })
    }
}

/// Top-level screen regions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenAreas {
    pub header: Rect,
    pub grid: Rect,
    pub panel: Option<Rect>,
    pub footer: Rect,
}

pub const PANEL_WIDTH: u16 = 38;

pub fn screen_areas(area: Rect, panel_open: bool) -> ScreenAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(3),    // Grid + panel
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    let (grid, panel) = if panel_open && rows[1].width > PANEL_WIDTH * 2 {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(PANEL_WIDTH)])
            .split(rows[1]);
        (cols[0], Some(cols[1]))
    } else {
        (rows[1], None)
    };

    ScreenAreas {
        header: rows[0],
        grid,
        panel,
        footer: rows[2],
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(rows: usize, cols: usize, square_size: u32) -> GridDimensions {
        GridDimensions {
            rows,
            cols,
            square_size,
        }
    }

    #[test]
    fn test_square_size_maps_to_chars() {
        let layout = GridLayout::compute(Rect::new(0, 0, 200, 100), dims(15, 20, 30), (8, 16));
        assert_eq!((layout.sq_w, layout.sq_h), (4, 2));
        assert_eq!((layout.frame.width, layout.frame.height), (80, 30));
        // centred inside the 198x98 inner area
        assert_eq!((layout.frame.x, layout.frame.y), (1 + 59, 1 + 34));
    }

    #[test]
    fn test_shrinks_to_fit() {
        let layout = GridLayout::compute(Rect::new(0, 0, 42, 12), dims(15, 20, 30), (8, 16));
        assert_eq!((layout.sq_w, layout.sq_h), (2, 1));
        assert_eq!(layout.frame.width, 40);
        // 15 rows cannot fit in 10, the rest is clipped
        assert_eq!(layout.frame.height, 10);
        assert!(layout.square_rect(14, 0).is_none());
        assert!(layout.square_rect(9, 19).is_some());
    }

    #[test]
    fn test_falling_rect_shifts_and_clips() {
        let layout = GridLayout::compute(Rect::new(0, 0, 200, 100), dims(15, 20, 30), (8, 16));
        let base = layout.square_rect(0, 0).unwrap();
        // one full square of fall = sq_h rows
        let fallen = layout.falling_rect(0, 0, 30.0).unwrap();
        assert_eq!(fallen.y, base.y + 2);
        assert_eq!(layout.pixels_to_rows(14.9), 0);
        assert_eq!(layout.pixels_to_rows(15.0), 1);
        let bottom = layout.falling_rect(14, 0, 15.0).unwrap();
        assert_eq!(bottom.height, 1);
        assert!(layout.falling_rect(14, 0, 30.0).is_none());
    }

    #[test]
    fn test_cell_at_round_trip() {
        let layout = GridLayout::compute(Rect::new(0, 0, 200, 100), dims(15, 20, 30), (8, 16));
        let r = layout.square_rect(3, 7).unwrap();
        assert_eq!(layout.cell_at(r.x, r.y), Some((3, 7)));
        assert_eq!(layout.cell_at(r.x + r.width - 1, r.y + r.height - 1), Some((3, 7)));
        assert_eq!(layout.cell_at(0, 0), None);
    }

    #[test]
    fn test_empty_grid_layout() {
        let layout = GridLayout::compute(Rect::new(0, 0, 50, 20), dims(0, 0, 20), (8, 16));
        assert_eq!(layout.frame.width, 0);
        assert_eq!(layout.frame.height, 0);
        assert!(layout.square_rect(0, 0).is_none());
        assert_eq!(layout.cell_at(25, 10), None);
    }

    #[test]
    fn test_panel_only_when_room() {
        let wide = screen_areas(Rect::new(0, 0, 160, 40), true);
        assert!(wide.panel.is_some());
        assert_eq!(wide.header.height, 3);
        assert_eq!(wide.footer.height, 1);
        let narrow = screen_areas(Rect::new(0, 0, 60, 40), true);
        assert!(narrow.panel.is_none());
    }
}

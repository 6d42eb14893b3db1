//! Screen layout: where the grid and the control panel sit.

use super::rect::Rect;

/// Pre-computed screen regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenLayout {
    /// The whole composed screen.
    pub screen: Rect,
    /// The ASCII grid, ticker rows included.
    pub grid: Rect,
    /// The one-row control panel beneath the grid.
    pub panel: Rect,
}

impl ScreenLayout {
    /// Height of the control panel in rows.
    pub const PANEL_ROWS: u16 = 1;

    /// Lay out a `columns x rows` grid with the panel underneath.
    pub fn new(columns: u16, rows: u16) -> Self {
        let screen = Rect::from_size(columns, rows.saturating_add(Self::PANEL_ROWS));
        let (grid, panel) = screen.split_vertical(rows);
        Self { screen, grid, panel }
    }
}

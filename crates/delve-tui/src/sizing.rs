//! Fit the map window to the terminal

use delve_core::{DungeonConfig, ViewportConfig};

/// Columns taken by the side panel
pub const SIDE_PANEL_WIDTH: u16 = 30;
/// Columns lost to the map border and spacing
pub const UI_PADDING: u16 = 3;
/// Rows lost to the map border
pub const RESERVED_ROWS: u16 = 2;

/// Window size the map area of a `cols x rows` terminal can show
pub fn viewport_for_terminal(cols: u16, rows: u16) -> ViewportConfig {
    let width = cols.saturating_sub(SIDE_PANEL_WIDTH + UI_PADDING).max(1);
    let height = rows.saturating_sub(RESERVED_ROWS).max(1);
    ViewportConfig::new(usize::from(width), usize::from(height))
}

/// Adjust a config so it is valid with the given window
///
/// The map grows to at least twice the window width and at least the window
/// height, then the window is clamped to the map. Zero map dimensions are
/// left alone so validation still rejects them.
pub fn fit_config(config: &DungeonConfig, viewport: ViewportConfig) -> DungeonConfig {
    let grow = |current: usize, wanted: usize| {
        if current == 0 { 0 } else { current.max(wanted) }
    };
    let cols = grow(config.cols, viewport.width * 2);
    let rows = grow(config.rows, viewport.height);
    let viewport = viewport.clamped_to(rows, cols);
    DungeonConfig {
        rows,
        cols,
        viewport_width: viewport.width,
        viewport_height: viewport.height,
        ..config.clone()
    }
}

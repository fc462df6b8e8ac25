//! Player-centred window onto the map
//!
//! Projection is the only place where the visited mask grows: every map
//! cell that is visible while a window is built gets remembered.

use serde::{Deserialize, Serialize};

use crate::error::{DungeonError, Result};
use crate::grid::{Cell, Glyph, Grid, Pos};
use crate::vision::{VisitedMask, is_visible};

/// Visible window size in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub width: usize,
    pub height: usize,
}

impl ViewportConfig {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Window must be non-empty and fit inside a `rows x cols` map
    pub fn validate_for(&self, rows: usize, cols: usize) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(DungeonError::InvalidConfig(format!(
                "viewport must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > cols || self.height > rows {
            return Err(DungeonError::InvalidConfig(format!(
                "viewport {}x{} is larger than the {}x{} map",
                self.width, self.height, cols, rows
            )));
        }
        Ok(())
    }

    /// Shrink to fit a `rows x cols` map, never below one cell
    pub fn clamped_to(&self, rows: usize, cols: usize) -> Self {
        Self {
            width: self.width.min(cols).max(1),
            height: self.height.min(rows).max(1),
        }
    }

    /// Map position shown in the window's top-left corner
    pub fn origin(&self, player: Pos) -> Pos {
        Pos::new(
            player.row.saturating_sub(self.height / 2),
            player.col.saturating_sub(self.width / 2),
        )
    }
}

/// Render the window around `player`
///
/// Each in-map window cell shows its true terrain when visible (always, with
/// line of sight off) and is marked visited. Remembered cells out of sight
/// show as walls or [`Glyph::Explored`]. Everything else, including window
/// cells past the map edge, shows as wall. The player glyph is written last.
pub fn project(
    grid: &Grid<Cell>,
    player: Pos,
    viewport: ViewportConfig,
    visited: &mut VisitedMask,
    line_of_sight: bool,
) -> Grid<Glyph> {
    let mut view = Grid::filled(viewport.height, viewport.width, Glyph::Wall);
    let origin = viewport.origin(player);

    for view_row in 0..viewport.height {
        for view_col in 0..viewport.width {
            let map_pos = Pos::new(origin.row + view_row, origin.col + view_col);
            let Some(cell) = grid.get(map_pos) else {
                continue;
            };

            let glyph = if !line_of_sight || is_visible(player, map_pos, grid) {
                visited.mark(map_pos);
                Glyph::from(cell)
            } else if visited.is_visited(map_pos) {
                match cell {
                    Cell::Wall => Glyph::Wall,
                    _ => Glyph::Explored,
                }
            } else {
                continue;
            };
            view.set_if_inside(Pos::new(view_row, view_col), glyph);
        }
    }

    if player.row >= origin.row && player.col >= origin.col {
        view.set_if_inside(
            Pos::new(player.row - origin.row, player.col - origin.col),
            Glyph::Player,
        );
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::{Room, carve_room};

    fn room_grid() -> Grid<Cell> {
        let mut grid = Grid::new(10, 10);
        carve_room(&mut grid, &Room::new(2, 2, 6, 6));
        grid
    }

    #[test]
    fn test_origin_centres_and_clamps() {
        let vp = ViewportConfig::new(5, 5);
        assert_eq!(vp.origin(Pos::new(4, 4)), Pos::new(2, 2));
        assert_eq!(vp.origin(Pos::new(1, 0)), Pos::new(0, 0));

        let wide = ViewportConfig::new(40, 20);
        assert_eq!(wide.origin(Pos::new(50, 50)), Pos::new(40, 30));
    }

    #[test]
    fn test_validate_for() {
        assert!(ViewportConfig::new(5, 5).validate_for(10, 10).is_ok());
        assert!(ViewportConfig::new(10, 10).validate_for(10, 10).is_ok());
        assert!(ViewportConfig::new(11, 5).validate_for(10, 10).is_err());
        assert!(ViewportConfig::new(5, 11).validate_for(10, 10).is_err());
        assert!(ViewportConfig::new(0, 5).validate_for(10, 10).is_err());
    }

    #[test]
    fn test_clamped_to() {
        let vp = ViewportConfig::new(50, 30).clamped_to(20, 40);
        assert_eq!(vp, ViewportConfig::new(40, 20));
        let vp = ViewportConfig::new(0, 0).clamped_to(20, 40);
        assert_eq!(vp, ViewportConfig::new(1, 1));
    }

    #[test]
    fn test_projection_without_line_of_sight() {
        let grid = room_grid();
        let mut visited = VisitedMask::new(10, 10);
        let view = project(
            &grid,
            Pos::new(4, 4),
            ViewportConfig::new(5, 5),
            &mut visited,
            false,
        );

        assert_eq!((view.rows(), view.cols()), (5, 5));
        assert_eq!(view.get(Pos::new(2, 2)), Some(Glyph::Player));
        assert_eq!(view.count(Glyph::Floor), 24);
        assert_eq!(visited.count(), 25);
    }

    #[test]
    fn test_window_past_map_edge_shows_wall() {
        let grid = room_grid();
        let mut visited = VisitedMask::new(10, 10);
        // Player near the bottom right, window hangs off the map
        let view = project(
            &grid,
            Pos::new(7, 7),
            ViewportConfig::new(8, 8),
            &mut visited,
            false,
        );
        assert_eq!((view.rows(), view.cols()), (8, 8));
        // Origin (3, 3): map rows 3..10 exist, window row 7 maps to row 10
        assert_eq!(view.get(Pos::new(4, 4)), Some(Glyph::Player));
        assert!(view.iter_rows().nth(7).unwrap().iter().all(|&g| g == Glyph::Wall));
    }

    #[test]
    fn test_remembered_floor_becomes_explored() {
        let mut grid = room_grid();
        // Split the room with a wall at column 5, leaving a door at row 2
        for row in 3..8 {
            grid.set(Pos::new(row, 5), Cell::Wall).unwrap();
        }
        let vp = ViewportConfig::new(10, 10);
        let mut visited = VisitedMask::new(10, 10);

        // From the doorway row, the far side is in view
        project(&grid, Pos::new(2, 6), vp, &mut visited, true);
        assert!(visited.is_visited(Pos::new(4, 7)));

        // From the other side of the wall it is remembered, not seen
        let view = project(&grid, Pos::new(5, 3), vp, &mut visited, true);
        let origin = vp.origin(Pos::new(5, 3));
        let at = |p: Pos| view.get(Pos::new(p.row - origin.row, p.col - origin.col));
        assert_eq!(at(Pos::new(4, 7)), Some(Glyph::Explored));
        assert_eq!(at(Pos::new(4, 4)), Some(Glyph::Floor));
        assert_eq!(at(Pos::new(4, 5)), Some(Glyph::Wall));
    }

    #[test]
    fn test_unseen_cells_look_like_wall() {
        let mut grid = room_grid();
        for row in 2..8 {
            grid.set(Pos::new(row, 5), Cell::Wall).unwrap();
        }
        let mut visited = VisitedMask::new(10, 10);
        let view = project(
            &grid,
            Pos::new(4, 3),
            ViewportConfig::new(10, 10),
            &mut visited,
            true,
        );
        // Origin (0, 0): the far side of the wall was never seen
        assert_eq!(view.get(Pos::new(4, 7)), Some(Glyph::Wall));
        assert!(!visited.is_visited(Pos::new(4, 7)));
        assert_eq!(view.get(Pos::new(4, 3)), Some(Glyph::Player));
    }
}

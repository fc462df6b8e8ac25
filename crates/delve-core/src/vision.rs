//! Line of sight and exploration memory

use crate::grid::{Cell, Grid, Pos};

/// Bresenham line from one cell to another, both ends included
///
/// Steps along both axes on the same iteration when the error term allows,
/// so diagonal runs advance one row and one column per cell.
#[derive(Debug, Clone)]
pub struct Line {
    row: i64,
    col: i64,
    to_row: i64,
    to_col: i64,
    d_row: i64,
    d_col: i64,
    step_row: i64,
    step_col: i64,
    err: i64,
    done: bool,
}

impl Line {
    pub fn new(from: Pos, to: Pos) -> Self {
        let (row, col) = (from.row as i64, from.col as i64);
        let (to_row, to_col) = (to.row as i64, to.col as i64);
        let d_col = (to_col - col).abs();
        let d_row = (to_row - row).abs();
        Self {
            row,
            col,
            to_row,
            to_col,
            d_row,
            d_col,
            step_row: if row < to_row { 1 } else { -1 },
            step_col: if col < to_col { 1 } else { -1 },
            err: d_col - d_row,
            done: false,
        }
    }
}

impl Iterator for Line {
    type Item = Pos;

    fn next(&mut self) -> Option<Pos> {
        if self.done {
            return None;
        }

        // Never negative: every step moves toward a non-negative target
        let current = Pos::new(self.row as usize, self.col as usize);
        if self.row == self.to_row && self.col == self.to_col {
            self.done = true;
            return Some(current);
        }

        let e2 = 2 * self.err;
        if e2 > -self.d_row {
            self.err -= self.d_row;
            self.col += self.step_col;
        }
        if e2 < self.d_col {
            self.err += self.d_col;
            self.row += self.step_row;
        }
        Some(current)
    }
}

/// Check if `to` can be seen from `from`
///
/// Walks the line from `from`; any wall met before `to` (the starting cell
/// included) blocks the view. The target itself may be a wall. Endpoints
/// outside the grid are never visible.
pub fn is_visible(from: Pos, to: Pos, grid: &Grid<Cell>) -> bool {
    if !grid.contains(from) || !grid.contains(to) {
        return false;
    }

    for pos in Line::new(from, to) {
        if pos == to {
            return true;
        }
        if grid.get(pos).is_none_or(|cell| cell.blocks_sight()) {
            return false;
        }
    }
    false
}

/// Per-cell record of whether the player ever had sight of it
///
/// Only ever grows during a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitedMask {
    cells: Grid<bool>,
}

impl VisitedMask {
    /// All-unvisited mask
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: Grid::filled(rows, cols, false),
        }
    }

    /// Mark a cell seen; returns true if it was not seen before
    pub fn mark(&mut self, pos: Pos) -> bool {
        let fresh = self.cells.get(pos) == Some(false);
        if fresh {
            self.cells.set_if_inside(pos, true);
        }
        fresh
    }

    pub fn is_visited(&self, pos: Pos) -> bool {
        self.cells.get(pos).unwrap_or(false)
    }

    /// Number of cells seen so far
    pub fn count(&self) -> usize {
        self.cells.count(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::{Room, carve_room};

    fn open_grid(rows: usize, cols: usize) -> Grid<Cell> {
        let mut grid = Grid::new(rows, cols);
        carve_room(&mut grid, &Room::new(1, 1, rows - 2, cols - 2));
        grid
    }

    #[test]
    fn test_line_endpoints() {
        let line: Vec<Pos> = Line::new(Pos::new(2, 2), Pos::new(2, 6)).collect();
        assert_eq!(line.len(), 5);
        assert_eq!(line.first(), Some(&Pos::new(2, 2)));
        assert_eq!(line.last(), Some(&Pos::new(2, 6)));

        let single: Vec<Pos> = Line::new(Pos::new(3, 3), Pos::new(3, 3)).collect();
        assert_eq!(single, vec![Pos::new(3, 3)]);
    }

    #[test]
    fn test_line_diagonal() {
        let line: Vec<Pos> = Line::new(Pos::new(4, 4), Pos::new(1, 1)).collect();
        assert_eq!(
            line,
            vec![
                Pos::new(4, 4),
                Pos::new(3, 3),
                Pos::new(2, 2),
                Pos::new(1, 1)
            ]
        );
    }

    #[test]
    fn test_line_is_connected() {
        let line: Vec<Pos> = Line::new(Pos::new(0, 0), Pos::new(3, 11)).collect();
        assert_eq!(line.last(), Some(&Pos::new(3, 11)));
        for pair in line.windows(2) {
            let dr = pair[0].row.abs_diff(pair[1].row);
            let dc = pair[0].col.abs_diff(pair[1].col);
            assert!(dr <= 1 && dc <= 1 && dr + dc > 0);
        }
    }

    #[test]
    fn test_visible_from_self() {
        let grid = open_grid(6, 6);
        assert!(is_visible(Pos::new(2, 2), Pos::new(2, 2), &grid));
    }

    #[test]
    fn test_visible_across_open_floor() {
        let grid = open_grid(10, 10);
        assert!(is_visible(Pos::new(1, 1), Pos::new(8, 8), &grid));
        assert!(is_visible(Pos::new(8, 8), Pos::new(1, 1), &grid));
        assert!(is_visible(Pos::new(1, 4), Pos::new(8, 4), &grid));
    }

    #[test]
    fn test_wall_target_is_visible() {
        let grid = open_grid(6, 6);
        // Border wall directly reachable over floor
        assert!(is_visible(Pos::new(2, 2), Pos::new(2, 5), &grid));
        // Wall behind that wall is not
        let mut wide = open_grid(6, 8);
        wide.set(Pos::new(2, 5), Cell::Wall).unwrap();
        assert!(!is_visible(Pos::new(2, 2), Pos::new(2, 6), &wide));
    }

    #[test]
    fn test_wall_blocks_sight() {
        let mut grid = open_grid(7, 12);
        grid.set(Pos::new(3, 6), Cell::Wall).unwrap();
        assert!(!is_visible(Pos::new(3, 2), Pos::new(3, 9), &grid));
        assert!(!is_visible(Pos::new(3, 9), Pos::new(3, 2), &grid));
        assert!(is_visible(Pos::new(3, 2), Pos::new(3, 6), &grid));
    }

    #[test]
    fn test_viewer_inside_wall_sees_nothing_else() {
        let grid = Grid::new(5, 5);
        assert!(!is_visible(Pos::new(2, 2), Pos::new(2, 3), &grid));
        assert!(is_visible(Pos::new(2, 2), Pos::new(2, 2), &grid));
    }

    #[test]
    fn test_out_of_bounds_is_not_visible() {
        let grid = open_grid(5, 5);
        assert!(!is_visible(Pos::new(2, 2), Pos::new(2, 9), &grid));
        assert!(!is_visible(Pos::new(7, 2), Pos::new(2, 2), &grid));
    }

    #[test]
    fn test_visited_mask() {
        let mut mask = VisitedMask::new(4, 4);
        assert_eq!(mask.count(), 0);
        assert!(mask.mark(Pos::new(1, 2)));
        assert!(!mask.mark(Pos::new(1, 2)));
        assert!(mask.is_visited(Pos::new(1, 2)));
        assert!(!mask.is_visited(Pos::new(2, 1)));
        assert!(!mask.mark(Pos::new(9, 9)));
        assert!(!mask.is_visited(Pos::new(9, 9)));
        assert_eq!(mask.count(), 1);
    }
}

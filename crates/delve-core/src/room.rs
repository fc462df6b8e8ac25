//! Rooms and random room placement
//!
//! Rooms are axis-aligned floor rectangles. Placement draws a base size,
//! jitters height and width around it (width doubled for the 2:1 shape of a
//! terminal character), rejects shapes that look far from square on screen
//! and keeps a one-cell gap between any two rooms.

use log::debug;

use crate::config::DungeonConfig;
use crate::grid::{Cell, Grid, Pos};
use crate::rng::GameRng;

/// Candidate rooms tried per `generate_room` call
pub const ROOM_RETRIES: usize = 10;

/// Terminal cells are about twice as tall as they are wide
pub const FONT_ASPECT_RATIO: f64 = 2.0;

/// Largest accepted deviation of the on-screen width/height ratio from 1.0
pub const MAX_RATIO_DEVIATION: f64 = 0.2;

/// Cells kept free around a room when checking placement
pub const ROOM_GAP: usize = 1;

/// A rectangular room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Room {
    pub top_row: usize,
    pub left_col: usize,
    pub height: usize,
    pub width: usize,
}

impl Room {
    pub const fn new(top_row: usize, left_col: usize, height: usize, width: usize) -> Self {
        Self {
            top_row,
            left_col,
            height,
            width,
        }
    }

    /// Row just past the bottom edge
    pub const fn bottom(&self) -> usize {
        self.top_row + self.height
    }

    /// Column just past the right edge
    pub const fn right(&self) -> usize {
        self.left_col + self.width
    }

    /// Integer midpoint, used for corridor anchors and start/finish markers
    pub const fn center(&self) -> Pos {
        Pos::new(
            self.top_row + self.height / 2,
            self.left_col + self.width / 2,
        )
    }

    /// Euclidean distance between the two centers
    pub fn distance_to(&self, other: &Room) -> f64 {
        let a = self.center();
        let b = other.center();
        let dr = a.row as f64 - b.row as f64;
        let dc = a.col as f64 - b.col as f64;
        (dr * dr + dc * dc).sqrt()
    }

    /// Every position inside the room
    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (self.top_row..self.bottom())
            .flat_map(move |row| (self.left_col..self.right()).map(move |col| Pos::new(row, col)))
    }
}

/// Carve a room to floor, skipping anything outside the grid
pub fn carve_room(grid: &mut Grid<Cell>, room: &Room) {
    for pos in room.cells() {
        grid.set_if_inside(pos, Cell::Floor);
    }
}

/// Places rooms on a map according to a [`DungeonConfig`]
#[derive(Debug, Clone, Copy)]
pub struct RoomPlacer<'a> {
    config: &'a DungeonConfig,
}

impl<'a> RoomPlacer<'a> {
    pub fn new(config: &'a DungeonConfig) -> Self {
        Self { config }
    }

    /// Try up to [`ROOM_RETRIES`] candidates, carving and returning the first valid one
    pub fn generate_room(&self, grid: &mut Grid<Cell>, rng: &mut GameRng) -> Option<Room> {
        for _ in 0..ROOM_RETRIES {
            let Some((height, width)) = self.roll_dimensions(rng) else {
                continue;
            };

            let padding = self.config.padding as i64;
            let rows = grid.rows() as i64;
            let cols = grid.cols() as i64;
            let top_row = rng.random_even(padding, rows - height as i64 - padding);
            let left_col = rng.random_even(padding, cols - width as i64 - padding);

            let room = Room::new(top_row as usize, left_col as usize, height, width);
            if is_valid_placement(grid, &room) {
                carve_room(grid, &room);
                return Some(room);
            }
        }
        None
    }

    /// Place rooms until the target count is reached or attempts run out
    ///
    /// Returns rooms in placement order. Fewer rooms than requested is a
    /// normal outcome.
    pub fn place_all(&self, grid: &mut Grid<Cell>, rng: &mut GameRng) -> Vec<Room> {
        let target = self.config.target_room_count;
        let mut rooms = Vec::with_capacity(target);
        let mut attempts = 0;

        while attempts < self.config.max_attempts && rooms.len() < target {
            attempts += 1;
            if let Some(room) = self.generate_room(grid, rng) {
                rooms.push(room);
            }
        }

        debug!(
            "placed {}/{} rooms in {} attempts",
            rooms.len(),
            target,
            attempts
        );
        rooms
    }

    /// Draw (height, width), `None` if the shape fails the aspect check
    fn roll_dimensions(&self, rng: &mut GameRng) -> Option<(usize, usize)> {
        let min = self.config.min_room_size as i64;
        let max = self.config.max_room_size as i64;

        let base = rng.random_even(min, max);
        let height = rng.random_even((base - 2).max(min), (base + 2).min(max));
        let width = rng.random_even((base * 2 - 2).max(min * 2), (base * 2 + 2).min(max * 2));

        if height <= 0 || width <= 0 {
            return None;
        }

        let visual_ratio = width as f64 / FONT_ASPECT_RATIO / height as f64;
        if (visual_ratio - 1.0).abs() > MAX_RATIO_DEVIATION {
            return None;
        }

        Some((height as usize, width as usize))
    }
}

/// Room must sit strictly inside the map and its footprint grown by
/// [`ROOM_GAP`] must not touch any carved cell
pub fn is_valid_placement(grid: &Grid<Cell>, room: &Room) -> bool {
    if room.bottom() >= grid.rows() || room.right() >= grid.cols() {
        return false;
    }

    let rows = room.top_row.saturating_sub(ROOM_GAP)..room.bottom() + ROOM_GAP;
    let cols = room.left_col.saturating_sub(ROOM_GAP)..room.right() + ROOM_GAP;
    for row in rows {
        for col in cols.clone() {
            if grid
                .get(Pos::new(row, col))
                .is_some_and(|cell| cell.is_passable())
            {
                return false;
            }
        }
    }
    true
}

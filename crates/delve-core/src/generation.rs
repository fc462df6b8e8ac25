//! Level generation
//!
//! Runs room placement, corridor carving and marker placement in order and
//! hands back the finished layout.

use log::{info, warn};

use crate::config::DungeonConfig;
use crate::corridor::{CorridorConnector, Edge};
use crate::error::{DungeonError, Result};
use crate::grid::{Cell, Grid, Pos};
use crate::rng::GameRng;
use crate::room::{Room, RoomPlacer};

/// A level needs a start room and a different finish room
pub const MIN_ROOMS: usize = 2;

/// Output of [`generate_layout`]
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub grid: Grid<Cell>,
    /// Rooms in placement order
    pub rooms: Vec<Room>,
    /// Spanning-tree edges that were carved
    pub corridors: Vec<Edge>,
    /// Center of the first room
    pub start: Pos,
    /// Center of the last room
    pub finish: Pos,
}

/// Build a level from `config`, drawing all randomness from `rng`
pub fn generate_layout(config: &DungeonConfig, rng: &mut GameRng) -> Result<Layout> {
    config.validate()?;

    let mut grid = Grid::new(config.rows, config.cols);
    let rooms = RoomPlacer::new(config).place_all(&mut grid, rng);

    let (Some(first), Some(last)) = (rooms.first(), rooms.last()) else {
        return Err(insufficient(rooms.len()));
    };
    if rooms.len() < MIN_ROOMS {
        return Err(insufficient(rooms.len()));
    }
    if rooms.len() < config.target_room_count {
        warn!(
            "placed {} of {} requested rooms",
            rooms.len(),
            config.target_room_count
        );
    }

    let report = CorridorConnector::new(&mut grid).connect(&rooms);

    let start = first.center();
    let finish = last.center();
    grid.set(start, Cell::Start)?;
    grid.set(finish, Cell::Finish)?;

    info!(
        "generated {}x{} dungeon (seed {}): {} rooms, {} corridors",
        config.rows,
        config.cols,
        rng.seed(),
        rooms.len(),
        report.corridors.len()
    );

    Ok(Layout {
        grid,
        rooms,
        corridors: report.corridors,
        start,
        finish,
    })
}

fn insufficient(placed: usize) -> DungeonError {
    DungeonError::InsufficientRooms {
        placed,
        required: MIN_ROOMS,
    }
}

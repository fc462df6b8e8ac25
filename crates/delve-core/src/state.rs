//! Dungeon session state
//!
//! [`DungeonState`] owns a finished level, the player position, the visited
//! mask and the display settings. Front ends mutate it only through
//! movement and the line-of-sight toggle.

use log::debug;

use crate::command::{Command, Direction};
use crate::config::DungeonConfig;
use crate::error::{DungeonError, Result};
use crate::generation::generate_layout;
use crate::grid::{Cell, Glyph, Grid, Pos};
use crate::rng::GameRng;
use crate::room::Room;
use crate::viewport::{ViewportConfig, project};
use crate::vision::VisitedMask;

/// A playable level and everything the player has done in it
#[derive(Debug, Clone)]
pub struct DungeonState {
    grid: Grid<Cell>,
    rooms: Vec<Room>,
    start: Pos,
    finish: Option<Pos>,
    player: Pos,
    visited: VisitedMask,
    viewport: ViewportConfig,
    line_of_sight: bool,
    seed: Option<u64>,
}

impl DungeonState {
    /// Generate a new level from a random seed
    pub fn generate(config: &DungeonConfig) -> Result<Self> {
        Self::build(config, &mut GameRng::from_entropy())
    }

    /// Generate a level; the same config and seed give the same level
    pub fn generate_seeded(config: &DungeonConfig, seed: u64) -> Result<Self> {
        Self::build(config, &mut GameRng::new(seed))
    }

    fn build(config: &DungeonConfig, rng: &mut GameRng) -> Result<Self> {
        let layout = generate_layout(config, rng)?;
        let visited = VisitedMask::new(layout.grid.rows(), layout.grid.cols());
        Ok(Self {
            grid: layout.grid,
            rooms: layout.rooms,
            start: layout.start,
            finish: Some(layout.finish),
            player: layout.start,
            visited,
            viewport: config.viewport(),
            line_of_sight: config.line_of_sight_enabled,
            seed: Some(rng.seed()),
        })
    }

    /// Wrap a hand-made map
    ///
    /// The player must stand on a non-wall cell and the viewport must fit the
    /// map. Start and finish are taken from the first matching cells; start
    /// falls back to the player position.
    pub fn from_grid(
        grid: Grid<Cell>,
        player: Pos,
        viewport: ViewportConfig,
        line_of_sight: bool,
    ) -> Result<Self> {
        if grid.at(player)? == Cell::Wall {
            return Err(DungeonError::InvalidConfig(format!(
                "player start ({}, {}) is inside a wall",
                player.row, player.col
            )));
        }
        viewport.validate_for(grid.rows(), grid.cols())?;

        let visited = VisitedMask::new(grid.rows(), grid.cols());
        Ok(Self {
            start: grid.find(Cell::Start).unwrap_or(player),
            finish: grid.find(Cell::Finish),
            rooms: Vec::new(),
            grid,
            player,
            visited,
            viewport,
            line_of_sight,
            seed: None,
        })
    }

    /// Move one cell; returns false (and stays put) if blocked
    pub fn move_player(&mut self, direction: Direction) -> bool {
        let (d_row, d_col) = direction.delta();
        let Some(target) = self.player.offset(d_row, d_col) else {
            return false;
        };

        match self.grid.get(target) {
            Some(cell) if cell.is_passable() => {
                self.player = target;
                true
            }
            _ => false,
        }
    }

    pub fn toggle_line_of_sight(&mut self) {
        self.line_of_sight = !self.line_of_sight;
        debug!("line of sight {}", if self.line_of_sight { "on" } else { "off" });
    }

    /// Run a front-end command, returning whether it took effect
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Move(direction) => self.move_player(direction),
            Command::ToggleLineOfSight => {
                self.toggle_line_of_sight();
                true
            }
        }
    }

    /// Current window around the player
    ///
    /// Takes `&mut self` because everything visible gets remembered.
    pub fn viewport(&mut self) -> Grid<Glyph> {
        project(
            &self.grid,
            self.player,
            self.viewport,
            &mut self.visited,
            self.line_of_sight,
        )
    }

    /// Whole level with true terrain and the player, ignoring fog of war
    pub fn full_map(&self) -> Grid<Glyph> {
        let mut map = self.grid.map(Glyph::from);
        map.set_if_inside(self.player, Glyph::Player);
        map
    }

    pub fn has_reached_exit(&self) -> bool {
        self.grid.get(self.player) == Some(Cell::Finish)
    }

    /// Change the window size; takes effect on the next [`viewport`](Self::viewport)
    pub fn set_viewport(&mut self, viewport: ViewportConfig) -> Result<()> {
        viewport.validate_for(self.grid.rows(), self.grid.cols())?;
        self.viewport = viewport;
        Ok(())
    }

    pub fn viewport_config(&self) -> ViewportConfig {
        self.viewport
    }

    pub fn grid(&self) -> &Grid<Cell> {
        &self.grid
    }

    /// Rooms in placement order; empty for hand-made maps
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn finish(&self) -> Option<Pos> {
        self.finish
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn visited(&self) -> &VisitedMask {
        &self.visited
    }

    pub fn line_of_sight_enabled(&self) -> bool {
        self.line_of_sight
    }

    /// Seed the level was generated from, `None` for hand-made maps
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

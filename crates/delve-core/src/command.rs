//! Player commands
//!
//! The only vocabulary an input source needs to drive a [`DungeonState`](crate::DungeonState).

use strum::{Display, EnumIter};

/// Movement directions, one axis at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Get the delta (d_row, d_col) for this direction
    pub const fn delta(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Player command types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Move(Direction),
    ToggleLineOfSight,
}

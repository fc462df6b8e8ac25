//! Error types for dungeon generation and map access

use thiserror::Error;

/// Errors raised by the dungeon core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DungeonError {
    /// Generation could not place enough rooms for a start and a finish
    #[error("only {placed} room(s) placed, at least {required} are needed")]
    InsufficientRooms { placed: usize, required: usize },

    /// A coordinate fell outside the grid
    #[error("position ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Configuration rejected at construction
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DungeonError>;

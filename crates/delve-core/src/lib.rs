//! delve-core: dungeon generation and visibility engine
//!
//! This crate builds grid levels from randomly placed rooms joined by a
//! minimum spanning tree of corridors, tracks what the player has seen and
//! projects a player-centred window of the map for display.
//!
//! It performs no terminal or file I/O. Front ends drive it through
//! [`DungeonState`] and [`Command`].

pub mod command;
pub mod config;
pub mod corridor;
pub mod error;
pub mod generation;
pub mod grid;
pub mod room;
pub mod state;
pub mod viewport;
pub mod vision;

mod rng;

pub use command::{Command, Direction};
pub use config::DungeonConfig;
pub use error::{DungeonError, Result};
pub use grid::{Cell, Glyph, Grid, Pos};
pub use rng::GameRng;
pub use state::DungeonState;
pub use viewport::ViewportConfig;
pub use vision::VisitedMask;

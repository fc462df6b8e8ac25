//! Generation settings
//!
//! Every field has a default, so a partial JSON document is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::{DungeonError, Result};
use crate::generation::MIN_ROOMS;
use crate::viewport::ViewportConfig;

/// Parameters for building a dungeon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    /// Map height in cells
    pub rows: usize,
    /// Map width in cells
    pub cols: usize,
    pub min_room_size: usize,
    pub max_room_size: usize,
    /// Minimum distance between a room and the map edge
    pub padding: usize,
    /// Total `generate_room` calls allowed across all rooms
    pub max_attempts: usize,
    pub target_room_count: usize,
    pub viewport_width: usize,
    pub viewport_height: usize,
    pub line_of_sight_enabled: bool,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            rows: 100,
            cols: 160,
            min_room_size: 7,
            max_room_size: 15,
            padding: 2,
            max_attempts: 500,
            target_room_count: 25,
            viewport_width: 40,
            viewport_height: 20,
            line_of_sight_enabled: true,
        }
    }
}

impl DungeonConfig {
    /// Window size carried by this config
    pub fn viewport(&self) -> ViewportConfig {
        ViewportConfig::new(self.viewport_width, self.viewport_height)
    }

    /// Reject configurations generation cannot work with
    pub fn validate(&self) -> Result<()> {
        self.validate_layout()?;
        self.viewport().validate_for(self.rows, self.cols)
    }

    /// Check the map and room settings, leaving the window out
    ///
    /// Front ends that size the window themselves run this before fitting.
    pub fn validate_layout(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(invalid(format!(
                "map dimensions must be positive, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.min_room_size == 0 {
            return Err(invalid("min_room_size must be at least 1"));
        }
        if self.min_room_size > self.max_room_size {
            return Err(invalid(format!(
                "min_room_size ({}) exceeds max_room_size ({})",
                self.min_room_size, self.max_room_size
            )));
        }
        if self.max_attempts == 0 {
            return Err(invalid("max_attempts must be at least 1"));
        }
        if self.target_room_count < MIN_ROOMS {
            return Err(invalid(format!(
                "target_room_count must be at least {MIN_ROOMS}, got {}",
                self.target_room_count
            )));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> DungeonError {
    DungeonError::InvalidConfig(msg.into())
}

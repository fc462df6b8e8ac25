//! delve-tui: terminal front end
//!
//! Turns key presses into [`delve_core::Command`]s, draws the projected
//! window with ratatui and owns the terminal lifecycle.

pub mod app;
pub mod display;
pub mod input;
pub mod sizing;
pub mod terminal;
pub mod theme;
pub mod throttle;
pub mod widgets;

pub use app::{App, UiMode};
pub use display::GraphicsMode;
pub use theme::Theme;
pub use throttle::FrameLimiter;

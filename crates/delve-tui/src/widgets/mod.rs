//! Custom widgets

mod map;
mod panel;

pub use map::MapWidget;
pub use panel::{BottomPanel, PanelInfo, PanelMode, SidePanel, bottom_panel_lines, side_panel_lines};

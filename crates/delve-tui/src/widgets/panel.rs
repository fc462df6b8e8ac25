//! Side and bottom panels

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use delve_core::{DungeonState, Pos};

use crate::theme::Theme;

/// Which panel content is shown; at most one of the two overlays is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PanelMode {
    #[default]
    Playing,
    Inventory,
    Options,
}

impl PanelMode {
    /// Open `mode`, or go back to playing if it is already open
    pub fn toggled(self, mode: PanelMode) -> PanelMode {
        if self == mode { PanelMode::Playing } else { mode }
    }
}

/// Session facts shown in the side panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelInfo {
    pub player: Pos,
    pub seed: Option<u64>,
    pub line_of_sight: bool,
    pub explored: usize,
    pub rooms: usize,
}

impl PanelInfo {
    pub fn from_state(state: &DungeonState) -> Self {
        Self {
            player: state.player(),
            seed: state.seed(),
            line_of_sight: state.line_of_sight_enabled(),
            explored: state.visited().count(),
            rooms: state.rooms().len(),
        }
    }
}

pub fn side_panel_lines(mode: PanelMode, info: &PanelInfo) -> Vec<String> {
    if mode == PanelMode::Inventory {
        return vec![
            "=== Inventory ===".to_string(),
            "No items".to_string(),
            String::new(),
            "Press I to close".to_string(),
        ];
    }

    let seed = info
        .seed
        .map_or_else(|| "-".to_string(), |s| s.to_string());
    vec![
        "=== Player Info ===".to_string(),
        format!("Position: {},{}", info.player.row, info.player.col),
        format!("Rooms: {}", info.rooms),
        format!("Explored: {} cells", info.explored),
        format!(
            "Line of sight: {}",
            if info.line_of_sight { "on" } else { "off" }
        ),
        format!("Seed: {seed}"),
    ]
}

pub fn bottom_panel_lines(mode: PanelMode) -> Vec<String> {
    if mode == PanelMode::Options {
        return vec![
            "=== Options ===".to_string(),
            "No current actions available".to_string(),
            String::new(),
            "Press O to close".to_string(),
        ];
    }

    vec![
        "[WASD] Move  [T] Sight".to_string(),
        "[I] Inventory  [O] Options".to_string(),
        "[M] Map  [N] New  [Q] Menu".to_string(),
    ]
}

/// Player info, or the inventory placeholder
pub struct SidePanel<'a> {
    mode: PanelMode,
    info: PanelInfo,
    theme: &'a Theme,
}

impl<'a> SidePanel<'a> {
    pub fn new(mode: PanelMode, info: PanelInfo, theme: &'a Theme) -> Self {
        Self { mode, info, theme }
    }
}

impl Widget for SidePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = side_panel_lines(self.mode, &self.info);
        render_lines(lines, "Stats", self.theme, area, buf);
    }
}

/// Key help, or the options placeholder
pub struct BottomPanel<'a> {
    mode: PanelMode,
    theme: &'a Theme,
}

impl<'a> BottomPanel<'a> {
    pub fn new(mode: PanelMode, theme: &'a Theme) -> Self {
        Self { mode, theme }
    }
}

impl Widget for BottomPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = bottom_panel_lines(self.mode);
        render_lines(lines, "Commands", self.theme, area, buf);
    }
}

fn render_lines(lines: Vec<String>, title: &str, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let text: Vec<Line> = lines
        .into_iter()
        .map(|l| {
            if l.starts_with("===") {
                Line::styled(l, Style::default().fg(theme.accent))
            } else {
                Line::styled(l, Style::default().fg(theme.text))
            }
        })
        .collect();

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));

    Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

//! Application state and main UI controller

use std::hash::{DefaultHasher, Hash, Hasher};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use log::{info, warn};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use delve_core::generation::MIN_ROOMS;
use delve_core::{DungeonConfig, DungeonError, DungeonState, Glyph, Grid, Result};

use crate::display::{self, GlyphSet, GraphicsMode};
use crate::input::{Action, is_actionable, key_to_action};
use crate::sizing::{SIDE_PANEL_WIDTH, fit_config, viewport_for_terminal};
use crate::theme::Theme;
use crate::widgets::{BottomPanel, MapWidget, PanelInfo, PanelMode, SidePanel};

/// Generation attempts before giving up, each with a new seed
pub const GENERATION_RETRIES: usize = 5;

/// Entries of the main menu, in display order
pub const MENU_ITEMS: [&str; 3] = ["New Game", "View Rules", "Quit"];

const BOTTOM_PANEL_HEIGHT: u16 = 7;

/// UI mode - what the app is currently displaying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiMode {
    Menu { cursor: usize },
    Rules,
    Playing,
    /// The player stands on the exit
    ExitReached,
}

/// Generate a level, retrying with a new seed when too few rooms fit
///
/// With a fixed seed, retries use the following seeds so runs stay
/// reproducible. Other errors are returned at once.
pub fn generate_with_retry(config: &DungeonConfig, seed: Option<u64>) -> Result<DungeonState> {
    let mut last_error = DungeonError::InsufficientRooms {
        placed: 0,
        required: MIN_ROOMS,
    };

    for attempt in 0..GENERATION_RETRIES {
        let result = match seed {
            Some(seed) => DungeonState::generate_seeded(config, seed.wrapping_add(attempt as u64)),
            None => DungeonState::generate(config),
        };
        match result {
            Ok(state) => return Ok(state),
            Err(e @ DungeonError::InsufficientRooms { .. }) => {
                warn!("generation attempt {} failed: {e}", attempt + 1);
                last_error = e;
            }
            Err(e) => return Err(e),
        }
    }
    Err(last_error)
}

/// Application state
pub struct App {
    /// Settings new dungeons start from, before fitting to the terminal
    config: DungeonConfig,
    /// Seed for the next dungeon only
    seed: Option<u64>,
    terminal_size: (u16, u16),
    state: Option<DungeonState>,
    /// Last projected window, refreshed whenever the game changes
    view: Option<Grid<Glyph>>,
    mode: UiMode,
    panels: PanelMode,
    show_full_map: bool,
    should_quit: bool,
    /// Color theme (adapts to light/dark terminal background)
    theme: Theme,
    glyph_set: Box<dyn GlyphSet>,
}

impl App {
    pub fn new(
        config: DungeonConfig,
        seed: Option<u64>,
        theme: Theme,
        graphics_mode: GraphicsMode,
    ) -> Self {
        Self {
            config,
            seed,
            terminal_size: (80, 24),
            state: None,
            view: None,
            mode: UiMode::Menu { cursor: 0 },
            panels: PanelMode::Playing,
            show_full_map: false,
            should_quit: false,
            theme,
            glyph_set: display::detect_glyph_set(graphics_mode),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn panels(&self) -> PanelMode {
        self.panels
    }

    pub fn is_full_map_open(&self) -> bool {
        self.show_full_map
    }

    pub fn state(&self) -> Option<&DungeonState> {
        self.state.as_ref()
    }

    pub fn view(&self) -> Option<&Grid<Glyph>> {
        self.view.as_ref()
    }

    /// Handle a terminal event
    ///
    /// Fails only when a new dungeon could not be generated.
    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) if is_actionable(&key) => self.handle_key(key),
            Event::Resize(cols, rows) => self.resize(cols, rows),
            _ => Ok(()),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        match self.mode {
            UiMode::Menu { cursor } => self.handle_menu_input(key, cursor),
            UiMode::Rules => {
                self.handle_rules_input(key);
                Ok(())
            }
            UiMode::Playing => self.handle_game_input(key),
            UiMode::ExitReached => self.handle_exit_input(key),
        }
    }

    fn handle_menu_input(&mut self, key: KeyEvent, cursor: usize) -> Result<()> {
        match key.code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => {
                self.mode = UiMode::Menu {
                    cursor: cursor.saturating_sub(1),
                };
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => {
                self.mode = UiMode::Menu {
                    cursor: (cursor + 1).min(MENU_ITEMS.len() - 1),
                };
            }
            KeyCode::Enter | KeyCode::Char(' ') => match cursor {
                0 => self.new_game()?,
                1 => self.mode = UiMode::Rules,
                _ => self.should_quit = true,
            },
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
        Ok(())
    }

    fn handle_rules_input(&mut self, key: KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('q')
        ) {
            self.mode = UiMode::Menu { cursor: 1 };
        }
    }

    fn handle_game_input(&mut self, key: KeyEvent) -> Result<()> {
        let Some(action) = key_to_action(key) else {
            return Ok(());
        };

        match action {
            Action::Game(command) => {
                if let Some(state) = self.state.as_mut() {
                    state.apply(command);
                    if state.has_reached_exit() {
                        info!("exit reached at {:?}", state.player());
                        self.mode = UiMode::ExitReached;
                    }
                }
                self.refresh_view();
            }
            Action::ToggleInventory => self.panels = self.panels.toggled(PanelMode::Inventory),
            Action::ToggleOptions => self.panels = self.panels.toggled(PanelMode::Options),
            Action::ToggleFullMap => self.show_full_map = !self.show_full_map,
            Action::NewDungeon => self.new_game()?,
            Action::Back => {
                if self.show_full_map {
                    self.show_full_map = false;
                } else {
                    self.mode = UiMode::Menu { cursor: 0 };
                }
            }
            Action::Quit => self.should_quit = true,
        }
        Ok(())
    }

    fn handle_exit_input(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('n') | KeyCode::Enter => self.new_game()?,
            KeyCode::Char('q') | KeyCode::Esc => self.mode = UiMode::Menu { cursor: 0 },
            _ => {}
        }
        Ok(())
    }

    /// Generate a dungeon sized for the current terminal and start playing it
    pub fn new_game(&mut self) -> Result<()> {
        let (cols, rows) = self.terminal_size;
        let config = fit_config(&self.config, viewport_for_terminal(cols, rows));
        let state = generate_with_retry(&config, self.seed.take())?;
        self.play(state);
        Ok(())
    }

    /// Start playing an existing dungeon
    pub fn play(&mut self, state: DungeonState) {
        self.state = Some(state);
        self.mode = UiMode::Playing;
        self.panels = PanelMode::Playing;
        self.show_full_map = false;
        self.refresh_view();
    }

    /// Track a new terminal size and refit the running game's window
    pub fn resize(&mut self, cols: u16, rows: u16) -> Result<()> {
        self.terminal_size = (cols, rows);
        if let Some(state) = self.state.as_mut() {
            let grid = state.grid();
            let viewport = viewport_for_terminal(cols, rows).clamped_to(grid.rows(), grid.cols());
            state.set_viewport(viewport)?;
        }
        self.refresh_view();
        Ok(())
    }

    fn refresh_view(&mut self) {
        self.view = self.state.as_mut().map(DungeonState::viewport);
    }

    /// Hash of everything the next frame would show
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.mode.hash(&mut hasher);
        self.panels.hash(&mut hasher);
        self.show_full_map.hash(&mut hasher);
        self.terminal_size.hash(&mut hasher);
        self.view.hash(&mut hasher);
        self.state.as_ref().map(PanelInfo::from_state).hash(&mut hasher);
        hasher.finish()
    }

    /// Render the UI
    pub fn render(&self, frame: &mut Frame) {
        match self.mode {
            UiMode::Menu { cursor } => self.render_menu(frame, cursor),
            UiMode::Rules => {
                self.render_menu(frame, 1);
                self.render_rules(frame);
            }
            UiMode::Playing => self.render_game(frame),
            UiMode::ExitReached => {
                self.render_game(frame);
                self.render_exit_reached(frame);
            }
        }
    }

    fn render_game(&self, frame: &mut Frame) {
        let (Some(state), Some(view)) = (self.state.as_ref(), self.view.as_ref()) else {
            return;
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(SIDE_PANEL_WIDTH)])
            .split(frame.area());
        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(BOTTOM_PANEL_HEIGHT)])
            .split(columns[1]);

        let map = MapWidget::new(view, self.glyph_set.as_ref(), &self.theme).title(" Dungeon ");
        frame.render_widget(map, columns[0]);
        frame.render_widget(
            SidePanel::new(self.panels, PanelInfo::from_state(state), &self.theme),
            side[0],
        );
        frame.render_widget(BottomPanel::new(self.panels, &self.theme), side[1]);

        if self.show_full_map {
            let area = centered_rect(90, 90, frame.area());
            frame.render_widget(Clear, area);
            let full = state.full_map();
            let widget = MapWidget::new(&full, self.glyph_set.as_ref(), &self.theme)
                .title(" Map (m to close) ")
                .focus(state.player());
            frame.render_widget(widget, area);
        }
    }

    fn render_menu(&self, frame: &mut Frame, cursor: usize) {
        let area = centered_rect(40, 40, frame.area());

        let mut lines = vec![Line::from(""), Line::from("")];
        for (i, item) in MENU_ITEMS.iter().enumerate() {
            let line = if i == cursor {
                Line::styled(
                    format!("> {item}"),
                    Style::default()
                        .fg(self.theme.cursor_fg)
                        .bg(self.theme.cursor_bg),
                )
            } else {
                Line::styled(format!("  {item}"), Style::default().fg(self.theme.text))
            };
            lines.push(line);
        }
        lines.push(Line::from(""));
        lines.push(Line::styled(
            "Up/Down to choose, Enter to select",
            Style::default().fg(self.theme.text_dim),
        ));

        let block = Block::default()
            .title(" Delve ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_accent));
        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn render_rules(&self, frame: &mut Frame) {
        let area = centered_rect(70, 70, frame.area());
        frame.render_widget(Clear, area);

        let rules = r#"Rules:

- Use WASD or the arrow keys to move your character (@)
- You can only see what is in your line of sight;
  places you have seen stay on the map as dots
- Find the exit to win the game

Keys:
  t  toggle line of sight     m  full map
  i  inventory panel          o  options panel
  n  new dungeon              q  back to menu

Press ESC or ENTER to close"#;

        let block = Block::default()
            .title(" Rules ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_accent));
        let paragraph = Paragraph::new(rules)
            .block(block)
            .style(Style::default().fg(self.theme.text));
        frame.render_widget(paragraph, area);
    }

    fn render_exit_reached(&self, frame: &mut Frame) {
        let area = centered_rect(50, 30, frame.area());
        frame.render_widget(Clear, area);

        let lines = vec![
            Line::from(""),
            Line::styled(
                "You found the exit!",
                Style::default().fg(self.theme.accent),
            ),
            Line::from(""),
            Line::styled(
                "[N] New dungeon   [Q] Menu",
                Style::default().fg(self.theme.text_dim),
            ),
        ];
        let block = Block::default()
            .title(" Exit ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_win));
        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_gives_up_after_budget() {
        // Nothing fits, so every attempt fails with too few rooms
        let config = DungeonConfig {
            rows: 6,
            cols: 60,
            min_room_size: 5,
            max_room_size: 5,
            padding: 1,
            max_attempts: 5,
            viewport_width: 10,
            viewport_height: 5,
            ..DungeonConfig::default()
        };
        assert!(matches!(
            generate_with_retry(&config, Some(1)),
            Err(DungeonError::InsufficientRooms { placed: 0, .. })
        ));
    }

    #[test]
    fn test_retry_returns_config_errors_directly() {
        let config = DungeonConfig {
            rows: 0,
            ..DungeonConfig::default()
        };
        assert!(matches!(
            generate_with_retry(&config, None),
            Err(DungeonError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_retry_skips_single_room_target() {
        let config = DungeonConfig {
            target_room_count: 1,
            ..DungeonConfig::default()
        };
        assert!(matches!(
            generate_with_retry(&config, Some(3)),
            Err(DungeonError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_retry_with_seed_is_reproducible() {
        let config = DungeonConfig {
            rows: 40,
            cols: 80,
            min_room_size: 4,
            max_room_size: 8,
            target_room_count: 6,
            viewport_width: 20,
            viewport_height: 10,
            ..DungeonConfig::default()
        };
        let a = generate_with_retry(&config, Some(5)).unwrap();
        let b = generate_with_retry(&config, Some(5)).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.seed(), b.seed());
    }

    #[test]
    fn test_centered_rect_inside_parent() {
        let parent = Rect::new(0, 0, 100, 50);
        let r = centered_rect(50, 50, parent);
        assert_eq!((r.x, r.width), (25, 50));
        assert!((24..=26).contains(&r.height));
        assert!(r.bottom() <= parent.bottom());
    }
}

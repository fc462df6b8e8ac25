use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

use delve_core::room::{Room, carve_room};
use delve_core::{Cell, DungeonConfig, DungeonError, DungeonState, Grid, Pos, ViewportConfig};
use delve_tui::widgets::PanelMode;
use delve_tui::{App, GraphicsMode, Theme, UiMode};

fn small_config() -> DungeonConfig {
    DungeonConfig {
        rows: 40,
        cols: 80,
        min_room_size: 4,
        max_room_size: 8,
        target_room_count: 6,
        ..DungeonConfig::default()
    }
}

fn app() -> App {
    App::new(small_config(), Some(7), Theme::dark(), GraphicsMode::Classic)
}

fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn release(code: KeyCode) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Release,
        state: KeyEventState::NONE,
    })
}

/// Room with the finish one step right of the player
fn exit_next_door() -> DungeonState {
    let mut grid = Grid::new(12, 24);
    carve_room(&mut grid, &Room::new(2, 2, 6, 12));
    grid.set(Pos::new(4, 5), Cell::Finish).unwrap();
    DungeonState::from_grid(grid, Pos::new(4, 4), ViewportConfig::new(20, 10), true).unwrap()
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let area = buffer.area;
    let mut text = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn test_menu_navigation() {
    let mut app = app();
    assert_eq!(app.mode(), UiMode::Menu { cursor: 0 });

    app.handle_event(press(KeyCode::Down)).unwrap();
    assert_eq!(app.mode(), UiMode::Menu { cursor: 1 });
    app.handle_event(press(KeyCode::Enter)).unwrap();
    assert_eq!(app.mode(), UiMode::Rules);
    app.handle_event(press(KeyCode::Esc)).unwrap();
    assert_eq!(app.mode(), UiMode::Menu { cursor: 1 });

    // Cursor stops at both ends
    app.handle_event(press(KeyCode::Up)).unwrap();
    app.handle_event(press(KeyCode::Up)).unwrap();
    assert_eq!(app.mode(), UiMode::Menu { cursor: 0 });
    for _ in 0..5 {
        app.handle_event(press(KeyCode::Down)).unwrap();
    }
    assert_eq!(app.mode(), UiMode::Menu { cursor: 2 });

    app.handle_event(press(KeyCode::Enter)).unwrap();
    assert!(app.should_quit());
}

#[test]
fn test_new_game_from_menu() {
    let mut app = app();
    app.handle_event(press(KeyCode::Enter)).unwrap();
    assert_eq!(app.mode(), UiMode::Playing);

    let state = app.state().unwrap();
    assert_eq!(state.player(), state.start());
    // Default 80x24 terminal leaves a 47x22 window and widens the map to fit
    assert_eq!(state.viewport_config(), ViewportConfig::new(47, 22));
    assert!(state.grid().cols() >= 94);

    let view = app.view().unwrap();
    assert_eq!((view.rows(), view.cols()), (22, 47));
}

#[test]
fn test_panels_toggle() {
    let mut app = app();
    app.handle_event(press(KeyCode::Enter)).unwrap();

    app.handle_event(press(KeyCode::Char('i'))).unwrap();
    assert_eq!(app.panels(), PanelMode::Inventory);
    app.handle_event(press(KeyCode::Char('o'))).unwrap();
    assert_eq!(app.panels(), PanelMode::Options);
    app.handle_event(press(KeyCode::Char('o'))).unwrap();
    assert_eq!(app.panels(), PanelMode::Playing);

    app.handle_event(press(KeyCode::Char('m'))).unwrap();
    assert!(app.is_full_map_open());
    // Back closes the map before leaving the game
    app.handle_event(press(KeyCode::Char('q'))).unwrap();
    assert!(!app.is_full_map_open());
    assert_eq!(app.mode(), UiMode::Playing);
    app.handle_event(press(KeyCode::Char('q'))).unwrap();
    assert_eq!(app.mode(), UiMode::Menu { cursor: 0 });
}

#[test]
fn test_line_of_sight_toggle_reaches_state() {
    let mut app = app();
    app.handle_event(press(KeyCode::Enter)).unwrap();
    assert!(app.state().unwrap().line_of_sight_enabled());
    app.handle_event(press(KeyCode::Char('t'))).unwrap();
    assert!(!app.state().unwrap().line_of_sight_enabled());
}

#[test]
fn test_release_events_are_ignored() {
    let mut app = app();
    app.play(exit_next_door());
    app.handle_event(release(KeyCode::Char('d'))).unwrap();
    assert_eq!(app.state().unwrap().player(), Pos::new(4, 4));
    app.handle_event(press(KeyCode::Char('a'))).unwrap();
    assert_eq!(app.state().unwrap().player(), Pos::new(4, 3));
}

#[test]
fn test_reaching_exit() {
    let mut app = app();
    app.play(exit_next_door());
    app.handle_event(press(KeyCode::Right)).unwrap();
    assert_eq!(app.mode(), UiMode::ExitReached);
    assert!(app.state().unwrap().has_reached_exit());

    // Movement is ignored on the exit screen
    app.handle_event(press(KeyCode::Left)).unwrap();
    assert_eq!(app.state().unwrap().player(), Pos::new(4, 5));

    app.handle_event(press(KeyCode::Char('n'))).unwrap();
    assert_eq!(app.mode(), UiMode::Playing);
    assert!(!app.state().unwrap().has_reached_exit());
}

#[test]
fn test_ctrl_c_quits_anywhere() {
    let mut app = app();
    app.play(exit_next_door());
    app.handle_event(Event::Key(KeyEvent::new(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL,
    )))
    .unwrap();
    assert!(app.should_quit());
}

#[test]
fn test_resize_refits_window() {
    let mut app = app();
    app.play(exit_next_door());

    app.handle_event(Event::Resize(45, 10)).unwrap();
    assert_eq!(
        app.state().unwrap().viewport_config(),
        ViewportConfig::new(12, 8)
    );

    // Larger than the 12x24 map: clamped
    app.resize(200, 60).unwrap();
    assert_eq!(
        app.state().unwrap().viewport_config(),
        ViewportConfig::new(24, 12)
    );
    let view = app.view().unwrap();
    assert_eq!((view.rows(), view.cols()), (12, 24));
}

#[test]
fn test_fingerprint_tracks_changes() {
    let mut app = app();
    app.play(exit_next_door());
    let before = app.fingerprint();

    app.handle_event(press(KeyCode::Char('x'))).unwrap();
    assert_eq!(app.fingerprint(), before);

    app.handle_event(press(KeyCode::Char('s'))).unwrap();
    assert_ne!(app.fingerprint(), before);
}

#[test]
fn test_fingerprint_tracks_panels() {
    let mut app = app();
    app.play(exit_next_door());
    let playing = app.fingerprint();

    app.handle_event(press(KeyCode::Char('i'))).unwrap();
    let inventory = app.fingerprint();
    assert_ne!(inventory, playing);

    app.handle_event(press(KeyCode::Char('o'))).unwrap();
    assert_ne!(app.fingerprint(), inventory);
    assert_ne!(app.fingerprint(), playing);

    app.handle_event(press(KeyCode::Char('o'))).unwrap();
    assert_eq!(app.fingerprint(), playing);
}

#[test]
fn test_new_game_rejects_empty_map() {
    let config = DungeonConfig {
        rows: 0,
        cols: 0,
        ..small_config()
    };
    let mut app = App::new(config, Some(7), Theme::dark(), GraphicsMode::Classic);
    assert!(matches!(
        app.handle_event(press(KeyCode::Enter)),
        Err(DungeonError::InvalidConfig(_))
    ));
    assert!(app.state().is_none());
}

#[test]
fn test_render_game_screen() {
    let mut app = app();
    app.play(exit_next_door());

    let mut terminal = Terminal::new(TestBackend::new(60, 14)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();

    let text = screen_text(&terminal);
    assert!(text.contains('@'));
    assert!(text.contains('>'));
    assert!(text.contains("Dungeon"));
    assert!(text.contains("Player Info"));
}

#[test]
fn test_render_menu_and_exit_popup() {
    let mut app = app();
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

    terminal.draw(|frame| app.render(frame)).unwrap();
    let text = screen_text(&terminal);
    assert!(text.contains("New Game"));
    assert!(text.contains("Quit"));

    app.play(exit_next_door());
    app.handle_event(press(KeyCode::Char('d'))).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
    assert!(screen_text(&terminal).contains("You found the exit!"));
}

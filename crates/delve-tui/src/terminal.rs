//! Terminal lifecycle
//!
//! [`TerminalSession`] puts the terminal into raw mode on the alternate
//! screen and puts it back when dropped. [`install_panic_hook`] restores the
//! terminal before a panic message is printed so it stays readable.

use std::io::{self, Stdout};
use std::panic;

use crossterm::{
    cursor, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Raw-mode, alternate-screen terminal restored on drop
pub struct TerminalSession {
    terminal: Tui,
}

impl TerminalSession {
    /// Enter raw mode and the alternate screen; undone again if any step fails
    pub fn start() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        let terminal = execute!(stdout, EnterAlternateScreen, cursor::Hide)
            .and_then(|()| Terminal::new(CrosstermBackend::new(stdout)));
        match terminal {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                if let Err(restore_err) = restore() {
                    log::error!("failed to restore terminal: {restore_err}");
                }
                Err(e)
            }
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Tui {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = restore() {
            log::error!("failed to restore terminal: {e}");
        }
    }
}

/// Leave the alternate screen and raw mode; safe to call more than once
///
/// Raw mode is switched off even when the screen commands fail. The first
/// error is returned.
pub fn restore() -> io::Result<()> {
    let mut stdout = io::stdout();
    let screen = execute!(stdout, cursor::Show, LeaveAlternateScreen);
    let raw = disable_raw_mode();
    first_error(screen, raw)
}

fn first_error(first: io::Result<()>, second: io::Result<()>) -> io::Result<()> {
    first.and(second)
}

/// Chain a hook that restores the terminal before the default panic output
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore();
        previous(info);
    }));
}

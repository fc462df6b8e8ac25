//! Delve - a procedurally generated dungeon in the terminal
//!
//! Main entry point for the game.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use crossterm::event::{self, Event};

use delve_core::{DungeonConfig, DungeonError};
use delve_tui::app::generate_with_retry;
use delve_tui::display::{detect_glyph_set, glyph_lines};
use delve_tui::sizing::{fit_config, viewport_for_terminal};
use delve_tui::terminal::{TerminalSession, install_panic_hook};
use delve_tui::throttle::DEFAULT_FRAME_INTERVAL;
use delve_tui::{App, FrameLimiter, GraphicsMode, Theme};

/// Explore a procedurally generated dungeon
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Delve - find the exit of a random dungeon", long_about = None)]
struct Args {
    /// JSON file with dungeon settings; flags override its values
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Seed for the first dungeon
    #[arg(long)]
    seed: Option<u64>,

    /// Map height in cells
    #[arg(long)]
    rows: Option<usize>,

    /// Map width in cells
    #[arg(long)]
    cols: Option<usize>,

    /// Target number of rooms
    #[arg(long)]
    rooms: Option<usize>,

    #[arg(long)]
    min_room_size: Option<usize>,

    #[arg(long)]
    max_room_size: Option<usize>,

    /// Minimum distance between rooms and the map edge
    #[arg(long)]
    padding: Option<usize>,

    /// Room placement attempts
    #[arg(long)]
    max_attempts: Option<usize>,

    /// Start with line of sight disabled
    #[arg(long = "no-line-of-sight")]
    no_line_of_sight: bool,

    /// Graphics mode (classic, unicode, auto)
    #[arg(short = 'g', long = "graphics", default_value = "auto")]
    graphics: GraphicsMode,

    /// Use colors for a light terminal background
    #[arg(long)]
    light: bool,

    /// Write log output to this file
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Print a generated map as text and exit
    #[arg(long = "print-map")]
    print_map: bool,
}

impl Args {
    /// Config file (or defaults) with command-line overrides applied
    fn dungeon_config(&self) -> io::Result<DungeonConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => DungeonConfig::default(),
        };

        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(rooms) = self.rooms {
            config.target_room_count = rooms;
        }
        if let Some(size) = self.min_room_size {
            config.min_room_size = size;
        }
        if let Some(size) = self.max_room_size {
            config.max_room_size = size;
        }
        if let Some(padding) = self.padding {
            config.padding = padding;
        }
        if let Some(attempts) = self.max_attempts {
            config.max_attempts = attempts;
        }
        if self.no_line_of_sight {
            config.line_of_sight_enabled = false;
        }
        Ok(config)
    }
}

fn load_config(path: &Path) -> io::Result<DungeonConfig> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{}: {e}", path.display()),
        )
    })
}

/// Generate one dungeon and write the whole map to stdout
fn print_map(config: &DungeonConfig, seed: Option<u64>, graphics: GraphicsMode) -> io::Result<()> {
    let window = config.viewport().clamped_to(config.rows, config.cols);
    let config = DungeonConfig {
        viewport_width: window.width,
        viewport_height: window.height,
        ..config.clone()
    };
    let state = generate_with_retry(&config, seed).map_err(io::Error::other)?;

    let glyph_set = detect_glyph_set(graphics);
    for line in glyph_lines(&state.full_map(), glyph_set.as_ref()) {
        println!("{line}");
    }
    if let Some(seed) = state.seed() {
        println!("seed: {seed}");
    }
    Ok(())
}

/// Log to a file when asked; the terminal belongs to the UI otherwise
fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let default_filter = if log_file.is_some() { "warn" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> io::Result<()> {
    // Parse command-line arguments before terminal setup
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = args.dungeon_config()?;

    // Reject bad settings while the terminal is still in normal mode
    let invalid = |e: DungeonError| io::Error::new(io::ErrorKind::InvalidInput, e);
    config.validate_layout().map_err(invalid)?;
    if args.print_map {
        return print_map(&config, args.seed, args.graphics);
    }

    let (cols, rows) = crossterm::terminal::size()?;
    fit_config(&config, viewport_for_terminal(cols, rows))
        .validate()
        .map_err(invalid)?;

    let theme = Theme::detect(args.light);
    let mut app = App::new(config, args.seed, theme, args.graphics);

    install_panic_hook();
    let mut session = TerminalSession::start()?;
    let size = session.terminal_mut().size()?;
    app.resize(size.width, size.height)
        .map_err(io::Error::other)?;

    let started = Instant::now();
    let mut limiter = FrameLimiter::default();

    // Main loop
    loop {
        if limiter.should_render(started.elapsed(), app.fingerprint()) {
            session.terminal_mut().draw(|frame| app.render(frame))?;
        }

        if event::poll(DEFAULT_FRAME_INTERVAL)? {
            let event = event::read()?;
            if matches!(event, Event::Resize(..)) {
                limiter.invalidate();
            }
            app.handle_event(event).map_err(io::Error::other)?;
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

mod config;
mod game;
mod grid;
mod input;
mod mode;
mod placement;
mod screenshot;
mod snake;
mod sound;
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::game::Game;
use crate::input::Action;
use crate::screenshot::Screenshots;
use crate::sound::SoundBoard;

/// Upper bound on how long a frame waits for input.
const FRAME_BUDGET: Duration = Duration::from_millis(16);

#[derive(Parser)]
#[command(name = "evil-snake")]
#[command(version, about = "Snake with rules that change while you play")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value_t = 15)]
    columns: u32,

    /// Grid height in cells
    #[arg(long, default_value_t = 10)]
    rows: u32,

    /// Cell size in window units
    #[arg(long, default_value_t = 60)]
    cell_size: u32,

    /// Score that wins the game
    #[arg(long, default_value_t = 50)]
    winning_score: u32,

    /// Number of walls placed in walls mode
    #[arg(long, default_value_t = 5)]
    walls: usize,

    /// Seconds between game mode rolls
    #[arg(long, default_value_t = 10.0)]
    event_interval: f64,

    /// Disable the terminal bell
    #[arg(long)]
    mute: bool,

    #[arg(long, default_value = "evil-snake.log")]
    log_file: PathBuf,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[arg(long, default_value = "screenshots")]
    screenshot_dir: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let event_interval = Duration::try_from_secs_f64(self.event_interval)
            .context("Event interval must be a non-negative number of seconds")?;
        Ok(Settings {
            columns: self.columns,
            rows: self.rows,
            cell_size: self.cell_size,
            event_interval,
            wall_amount: self.walls,
            winning_score: self.winning_score,
            ..Settings::default()
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings()?;
    settings.validate().context("Invalid game settings")?;

    // Set up logging before anything else
    WriteLogger::init(
        cli.log_level.into(),
        Config::default(),
        File::create(&cli.log_file)
            .with_context(|| format!("Failed to create {}", cli.log_file.display()))?,
    )
    .context("Failed to initialize logger")?;

    let grid = settings.grid();
    info!(
        "Starting Evil Snake on a {}x{} grid ({}x{} window)",
        grid.columns(),
        grid.rows(),
        grid.width(),
        grid.height()
    );

    let mut game = Game::new(&settings)?;
    let screenshots = Screenshots::new(&cli.screenshot_dir);
    let mut sounds = SoundBoard::new(io::stdout(), cli.mute);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run(&mut terminal, &mut game, &screenshots, &mut sounds);

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("Stopping Evil Snake");
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    game: &mut Game,
    screenshots: &Screenshots,
    sounds: &mut SoundBoard<Stdout>,
) -> Result<()> {
    let mut last_frame = Instant::now();

    loop {
        let mut capture = false;

        // Handle input
        if event::poll(FRAME_BUDGET)? {
            if let Event::Key(key) = event::read()? {
                match Action::from_key_event(key) {
                    Some(Action::Exit) => break,
                    Some(Action::Screenshot) => capture = true,
                    Some(Action::OpenScreenshotFolder) => screenshots.open_folder(),
                    Some(action) => game.handle_action(action, Instant::now())?,
                    None => {}
                }
            }
        }

        let now = Instant::now();
        game.update(now - last_frame, now)?;
        last_frame = now;

        for sound in game.drain_sounds() {
            sounds.play(sound);
        }

        let frame = terminal.draw(|f| ui::render(f, game, now))?;
        if capture {
            screenshots.save(frame.buffer);
        }
    }

    info!(
        "Leaving from {:?} with score {} (screenshots in {})",
        game.state(),
        game.score(),
        screenshots.dir().display()
    );
    Ok(())
}

use std::time::{Duration, Instant};

use log::info;
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::config::Settings;
use crate::grid::{Direction, Grid, GridPosition};
use crate::input::Action;
use crate::mode::{GameMode, ModeChange, ModeScheduler};
use crate::placement::{random_food_position, PlacementError};
use crate::snake::Snake;
use crate::sound::Sound;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Playing,
    Paused,
    Finished,
    GameOver,
}

pub struct Game<R = ThreadRng> {
    rng: R,
    grid: Grid,
    winning_score: u32,
    state: GameState,
    mode: GameMode,
    score: u32,
    snake: Snake,
    food: GridPosition,
    walls: Vec<GridPosition>,
    scheduler: ModeScheduler,
    default_speed: Duration,
    since_last_move: Duration,
    // Wall-clock markers for the elapsed time display. `stopped_at` freezes
    // the clock while paused and after the game ends.
    started_at: Option<Instant>,
    stopped_at: Option<Instant>,
    sounds: Vec<Sound>,
}

impl Game<ThreadRng> {
    pub fn new(settings: &Settings) -> Result<Self, PlacementError> {
        Game::new_with_rng(settings, rand::thread_rng())
    }
}

impl<R> Game<R> {
    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> GridPosition {
        self.food
    }

    pub fn walls(&self) -> &[GridPosition] {
        &self.walls
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Playing time so far; zero in the menu.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(started_at) => self
                .stopped_at
                .unwrap_or(now)
                .saturating_duration_since(started_at),
            None => Duration::ZERO,
        }
    }

    /// Sound events raised since the last call.
    pub fn drain_sounds(&mut self) -> std::vec::Drain<'_, Sound> {
        self.sounds.drain(..)
    }
}

impl<R: Rng> Game<R> {
    pub fn new_with_rng(settings: &Settings, mut rng: R) -> Result<Self, PlacementError> {
        let grid = settings.grid();
        let snake = Snake::new(grid.random_position(&mut rng), settings.default_speed);
        let food = random_food_position(&mut rng, &grid, &snake, &[])?;

        Ok(Game {
            rng,
            grid,
            winning_score: settings.winning_score,
            state: GameState::Menu,
            mode: GameMode::Normal,
            score: 0,
            snake,
            food,
            walls: Vec::new(),
            scheduler: ModeScheduler::new(settings),
            default_speed: settings.default_speed,
            since_last_move: Duration::ZERO,
            started_at: None,
            stopped_at: None,
            sounds: Vec::new(),
        })
    }

    /// Applies a player action. Actions that make no sense in the current
    /// state are ignored.
    pub fn handle_action(&mut self, action: Action, now: Instant) -> Result<(), PlacementError> {
        match action {
            Action::QuitToMenu => {
                if self.state != GameState::Menu {
                    self.reset()?;
                }
            }
            Action::Pause => {
                if self.state == GameState::Playing {
                    info!("Paused with score {}", self.score);
                    self.stopped_at = Some(now);
                    self.state = GameState::Paused;
                }
            }
            Action::Resume => {
                if self.state == GameState::Paused {
                    info!("Resumed");
                    // Paused time does not count towards the elapsed time
                    if let (Some(started_at), Some(stopped_at)) =
                        (self.started_at, self.stopped_at)
                    {
                        let paused_for = now.saturating_duration_since(stopped_at);
                        self.started_at = Some(started_at + paused_for);
                    }
                    self.stopped_at = None;
                    self.state = GameState::Playing;
                }
            }
            Action::Move(direction) => self.change_direction(direction, now),
            Action::Screenshot | Action::OpenScreenshotFolder | Action::Exit => {}
        }
        Ok(())
    }

    fn change_direction(&mut self, direction: Direction, now: Instant) {
        match self.state {
            GameState::Menu => {
                info!("Starting game heading {:?}", direction);
                self.sounds.push(Sound::Start);
                self.started_at = Some(now);
                self.stopped_at = None;
                self.state = GameState::Playing;
                self.snake.set_direction(direction);
            }
            GameState::Playing => self.snake.set_direction(direction),
            _ => {}
        }
    }

    /// Advances the simulation by one frame of `delta`.
    pub fn update(&mut self, delta: Duration, now: Instant) -> Result<(), PlacementError> {
        if self.state == GameState::Playing && self.score >= self.winning_score {
            info!("Finished with score {}", self.score);
            self.stopped_at = Some(now);
            self.state = GameState::Finished;
            return Ok(());
        }

        if self.state != GameState::Playing {
            return Ok(());
        }

        self.since_last_move += delta;

        if self.scheduler.tick(delta) {
            let selected = GameMode::random(&mut self.rng);
            self.switch_mode(selected)?;
        }

        if self.since_last_move >= self.snake.speed() {
            self.since_last_move = Duration::ZERO;

            if self.snake.move_and_check_for_food(self.food, &self.grid) {
                self.sounds.push(Sound::Eat);
                self.score += 1;
                self.food =
                    random_food_position(&mut self.rng, &self.grid, &self.snake, &self.walls)?;
            }

            if self.snake.has_collided(&self.walls) {
                info!(
                    "Game over with score {} at length {}",
                    self.score,
                    self.snake.len()
                );
                self.sounds.push(Sound::Explosion);
                self.stopped_at = Some(now);
                self.state = GameState::GameOver;
            }
        }

        Ok(())
    }

    fn switch_mode(&mut self, selected: GameMode) -> Result<(), PlacementError> {
        let change = self.scheduler.change_mode(
            &mut self.rng,
            selected,
            self.mode,
            &self.grid,
            &self.snake,
            self.food,
        )?;
        if let Some(change) = change {
            self.apply_mode_change(change);
        }
        Ok(())
    }

    fn apply_mode_change(&mut self, change: ModeChange) {
        info!("Mode changed from {} to {}", self.mode, change.mode);
        self.mode = change.mode;
        self.snake.set_speed(change.speed);
        self.walls = change.walls;
        self.sounds.push(Sound::Start);
    }

    /// Back to the menu with a fresh snake, food and rules.
    fn reset(&mut self) -> Result<(), PlacementError> {
        info!("Back to menu from {:?} with score {}", self.state, self.score);
        self.score = 0;
        self.state = GameState::Menu;
        self.mode = GameMode::Normal;
        self.walls.clear();
        self.started_at = None;
        self.stopped_at = None;
        self.since_last_move = Duration::ZERO;
        self.scheduler.reset();

        self.snake.set_speed(self.default_speed);
        self.snake.reset_to_position(self.grid.random_position(&mut self.rng));
        self.food = random_food_position(&mut self.rng, &self.grid, &self.snake, &self.walls)?;
        Ok(())
    }
}

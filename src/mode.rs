use std::fmt;
use std::time::Duration;

use rand::Rng;

use crate::config::Settings;
use crate::grid::{Grid, GridPosition};
use crate::placement::{random_wall_position, PlacementError};
use crate::snake::Snake;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GameMode {
    #[default]
    Normal,
    Fast,
    Walls,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Normal, GameMode::Fast, GameMode::Walls];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> GameMode {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameMode::Normal => "Normal",
            GameMode::Fast => "Fast",
            GameMode::Walls => "Walls",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of an actual mode switch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeChange {
    pub mode: GameMode,
    pub speed: Duration,
    pub walls: Vec<GridPosition>,
}

/// Rolls for a new ruleset every `interval` of playing time.
#[derive(Clone, Debug)]
pub struct ModeScheduler {
    interval: Duration,
    since_last_check: Duration,
    default_speed: Duration,
    fast_speed: Duration,
    wall_amount: usize,
}

impl ModeScheduler {
    pub fn new(settings: &Settings) -> Self {
        ModeScheduler {
            interval: settings.event_interval,
            since_last_check: Duration::ZERO,
            default_speed: settings.default_speed,
            fast_speed: settings.fast_speed,
            wall_amount: settings.wall_amount,
        }
    }

    /// Accumulates `delta` and reports whether a check is due. The
    /// accumulator restarts from zero whenever it fires.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.since_last_check += delta;
        if self.since_last_check >= self.interval {
            self.since_last_check = Duration::ZERO;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.since_last_check = Duration::ZERO;
    }

    pub fn speed_for(&self, mode: GameMode) -> Duration {
        match mode {
            GameMode::Fast => self.fast_speed,
            GameMode::Normal | GameMode::Walls => self.default_speed,
        }
    }

    /// Rules for `selected`, or `None` when it is already the current mode.
    pub fn change_mode<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        selected: GameMode,
        current: GameMode,
        grid: &Grid,
        snake: &Snake,
        food: GridPosition,
    ) -> Result<Option<ModeChange>, PlacementError> {
        if selected == current {
            return Ok(None);
        }

        let mut walls = Vec::new();
        if selected == GameMode::Walls {
            walls.reserve(self.wall_amount);
            for _ in 0..self.wall_amount {
                let wall = random_wall_position(rng, grid, snake, food, &walls)?;
                walls.push(wall);
            }
        }

        Ok(Some(ModeChange {
            mode: selected,
            speed: self.speed_for(selected),
            walls,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixture() -> (Settings, Grid, Snake, GridPosition) {
        let settings = Settings::default();
        let grid = settings.grid();
        let snake = Snake::new(grid.cell(3, 3), settings.default_speed);
        let food = grid.cell(4, 3);
        (settings, grid, snake, food)
    }

    #[test]
    fn test_tick_fires_on_interval() {
        let (settings, ..) = fixture();
        let mut scheduler = ModeScheduler::new(&settings);

        assert!(!scheduler.tick(Duration::from_secs(4)));
        assert!(!scheduler.tick(Duration::from_secs(5)));
        assert!(scheduler.tick(Duration::from_secs(1)));
        // Restarted from zero after firing
        assert!(!scheduler.tick(Duration::from_secs(9)));

        scheduler.reset();
        assert!(!scheduler.tick(Duration::from_secs(9)));
        assert!(scheduler.tick(Duration::from_secs(1)));
    }

    #[test]
    fn test_same_mode_is_a_no_op() {
        let (settings, grid, snake, food) = fixture();
        let scheduler = ModeScheduler::new(&settings);
        let mut rng = StdRng::seed_from_u64(1);

        for mode in GameMode::ALL {
            let change = scheduler
                .change_mode(&mut rng, mode, mode, &grid, &snake, food)
                .unwrap();
            assert_eq!(change, None);
        }
    }

    #[test]
    fn test_fast_mode() {
        let (settings, grid, snake, food) = fixture();
        let scheduler = ModeScheduler::new(&settings);
        let mut rng = StdRng::seed_from_u64(1);

        let change = scheduler
            .change_mode(&mut rng, GameMode::Fast, GameMode::Walls, &grid, &snake, food)
            .unwrap()
            .unwrap();

        assert_eq!(change.mode, GameMode::Fast);
        assert_eq!(change.speed, settings.fast_speed);
        assert!(change.walls.is_empty());
    }

    #[test]
    fn test_walls_mode() {
        let (settings, grid, snake, food) = fixture();
        let scheduler = ModeScheduler::new(&settings);
        let mut rng = StdRng::seed_from_u64(9);

        let change = scheduler
            .change_mode(&mut rng, GameMode::Walls, GameMode::Normal, &grid, &snake, food)
            .unwrap()
            .unwrap();

        assert_eq!(change.speed, settings.default_speed);
        assert_eq!(change.walls.len(), settings.wall_amount);
        for (i, wall) in change.walls.iter().enumerate() {
            assert!(!snake.occupies(*wall));
            assert_ne!(*wall, food);
            assert!(!change.walls[i + 1..].contains(wall));
        }
    }

    #[test]
    fn test_random_mode_draws_every_mode() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut seen = [false; 3];
        for _ in 0..100 {
            let mode = GameMode::random(&mut rng);
            seen[GameMode::ALL.iter().position(|m| *m == mode).unwrap()] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(GameMode::Normal.to_string(), "Normal");
        assert_eq!(GameMode::Fast.to_string(), "Fast");
        assert_eq!(GameMode::Walls.to_string(), "Walls");
        assert_eq!(GameMode::default(), GameMode::Normal);
    }
}

use std::error::Error;
use std::fmt;
use std::time::Duration;

use crate::grid::Grid;

/// Tunables of a game session.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub columns: u32,
    pub rows: u32,
    pub cell_size: u32,
    pub default_speed: Duration,
    pub fast_speed: Duration,
    /// How often the mode scheduler rolls for a new mode.
    pub event_interval: Duration,
    pub wall_amount: usize,
    pub winning_score: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            columns: 15,
            rows: 10,
            cell_size: 60,
            default_speed: Duration::from_millis(150),
            fast_speed: Duration::from_millis(80),
            event_interval: Duration::from_secs(10),
            wall_amount: 5,
            winning_score: 50,
        }
    }
}

impl Settings {
    pub fn grid(&self) -> Grid {
        Grid::new(self.columns, self.rows, self.cell_size)
    }

    /// Rejects settings under which food or walls could run out of free cells.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 || self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        let width = self.columns.checked_mul(self.cell_size);
        let height = self.rows.checked_mul(self.cell_size);
        if width.is_none() || height.is_none() {
            return Err(ConfigError::GridTooLarge {
                columns: self.columns,
                rows: self.rows,
                cell_size: self.cell_size,
            });
        }
        if self.fast_speed >= self.default_speed {
            return Err(ConfigError::FastModeNotFaster {
                default_speed: self.default_speed,
                fast_speed: self.fast_speed,
            });
        }
        if self.event_interval.is_zero() {
            return Err(ConfigError::ZeroEventInterval);
        }

        // Longest snake is winning_score + 1 segments, plus every wall and the food
        let required = self.winning_score as usize + 1 + self.wall_amount + 1;
        let cells = self.grid().cell_count();
        if cells < required {
            return Err(ConfigError::GridTooSmall { cells, required });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    EmptyGrid,
    FastModeNotFaster {
        default_speed: Duration,
        fast_speed: Duration,
    },
    ZeroEventInterval,
    GridTooSmall { cells: usize, required: usize },
    GridTooLarge {
        columns: u32,
        rows: u32,
        cell_size: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyGrid => write!(f, "grid must have at least one cell"),
            ConfigError::FastModeNotFaster {
                default_speed,
                fast_speed,
            } => write!(
                f,
                "fast speed ({:?}) must be shorter than the default speed ({:?})",
                fast_speed, default_speed
            ),
            ConfigError::ZeroEventInterval => write!(f, "event interval must not be zero"),
            ConfigError::GridTooSmall { cells, required } => write!(
                f,
                "grid has {} cells but the winning snake, walls and food need {}",
                cells, required
            ),
            ConfigError::GridTooLarge {
                columns,
                rows,
                cell_size,
            } => write!(
                f,
                "a {}x{} grid of {}-unit cells does not fit in the window coordinates",
                columns, rows, cell_size
            ),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.grid().columns(), 15);
        assert_eq!(settings.grid().rows(), 10);
        assert_eq!(settings.grid().width(), 900);
        assert_eq!(settings.grid().height(), 600);
    }

    #[test]
    fn test_empty_grid() {
        let settings = Settings {
            cell_size: 0,
            ..Settings::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::EmptyGrid));
    }

    #[test]
    fn test_fast_mode_must_be_faster() {
        let settings = Settings {
            fast_speed: Duration::from_millis(150),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::FastModeNotFaster { .. })
        ));
    }

    #[test]
    fn test_grid_too_small() {
        let settings = Settings {
            columns: 4,
            rows: 4,
            wall_amount: 5,
            winning_score: 10,
            ..Settings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ConfigError::GridTooSmall {
                cells: 16,
                required: 17
            })
        );

        let settings = Settings {
            winning_score: 9,
            ..settings
        };
        assert_eq!(settings.validate(), Ok(()));
    }

    #[test]
    fn test_grid_too_large() {
        let settings = Settings {
            columns: 100_000,
            cell_size: 100_000,
            ..Settings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ConfigError::GridTooLarge {
                columns: 100_000,
                rows: 10,
                cell_size: 100_000
            })
        );

        let settings = Settings {
            columns: 10,
            rows: u32::MAX,
            cell_size: 2,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::GridTooLarge { .. })
        ));
    }
}

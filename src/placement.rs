use std::error::Error;
use std::fmt;

use log::{debug, warn};
use rand::seq::IteratorRandom;
use rand::Rng;

use crate::grid::{Grid, GridPosition};
use crate::snake::Snake;

/// Random draws tried before falling back to scanning every free cell.
const MAX_SAMPLING_ATTEMPTS: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementError {
    GridFull { cells: usize },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::GridFull { cells } => {
                write!(f, "no free cell left on a grid of {} cells", cells)
            }
        }
    }
}

impl Error for PlacementError {}

/// Draws a cell that is not occupied by the snake or any wall.
pub fn random_food_position<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &Grid,
    snake: &Snake,
    walls: &[GridPosition],
) -> Result<GridPosition, PlacementError> {
    let pos = random_free_position(rng, grid, |pos| {
        snake.occupies(pos) || walls.contains(&pos)
    })?;
    debug!("Placed food at {:?}", pos);
    Ok(pos)
}

/// Draws a cell that is not occupied by the snake, the food or an already placed wall.
pub fn random_wall_position<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &Grid,
    snake: &Snake,
    food: GridPosition,
    walls: &[GridPosition],
) -> Result<GridPosition, PlacementError> {
    let pos = random_free_position(rng, grid, |pos| {
        snake.occupies(pos) || pos == food || walls.contains(&pos)
    })?;
    debug!("Placed wall at {:?}", pos);
    Ok(pos)
}

fn random_free_position<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &Grid,
    is_occupied: impl Fn(GridPosition) -> bool,
) -> Result<GridPosition, PlacementError> {
    for _ in 0..MAX_SAMPLING_ATTEMPTS {
        let pos = grid.random_position(rng);
        if !is_occupied(pos) {
            return Ok(pos);
        }
    }

    warn!(
        "No free cell after {} draws, scanning the whole grid",
        MAX_SAMPLING_ATTEMPTS
    );
    grid.positions()
        .filter(|pos| !is_occupied(*pos))
        .choose(rng)
        .ok_or(PlacementError::GridFull {
            cells: grid.cell_count(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn long_snake(grid: &Grid, length: usize) -> Snake {
        let mut snake = Snake::new(grid.cell(0, 0), Duration::from_millis(100));
        snake.set_direction(Direction::Right);
        // Growing by eating the cell ahead on every move
        for _ in 1..length {
            let ahead = grid.step(snake.head(), snake.direction());
            snake.move_and_check_for_food(ahead, grid);
        }
        snake
    }

    #[test]
    fn test_food_avoids_snake_and_walls() {
        let grid = Grid::new(6, 4, 10);
        let snake = long_snake(&grid, 6);
        let walls = vec![grid.cell(0, 1), grid.cell(3, 2), grid.cell(5, 3)];
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let food = random_food_position(&mut rng, &grid, &snake, &walls).unwrap();
            assert!(!snake.occupies(food));
            assert!(!walls.contains(&food));
            assert_eq!(food.x % 10, 0);
            assert_eq!(food.y % 10, 0);
        }
    }

    #[test]
    fn test_wall_avoids_snake_food_and_other_walls() {
        let grid = Grid::new(5, 5, 10);
        let snake = long_snake(&grid, 5);
        let food = grid.cell(2, 2);
        let mut walls = Vec::new();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..10 {
            let wall = random_wall_position(&mut rng, &grid, &snake, food, &walls).unwrap();
            assert!(!snake.occupies(wall));
            assert_ne!(wall, food);
            assert!(!walls.contains(&wall));
            walls.push(wall);
        }
    }

    #[test]
    fn test_last_free_cell_is_found() {
        let grid = Grid::new(3, 3, 10);
        let snake = long_snake(&grid, 3);
        // Everything but the bottom-right cell is taken
        let walls: Vec<GridPosition> = grid
            .positions()
            .filter(|pos| !snake.occupies(*pos) && *pos != grid.cell(2, 2))
            .collect();
        let mut rng = StdRng::seed_from_u64(11);

        let food = random_food_position(&mut rng, &grid, &snake, &walls).unwrap();

        assert_eq!(food, grid.cell(2, 2));
    }

    #[test]
    fn test_full_grid_is_an_error() {
        let grid = Grid::new(2, 2, 10);
        let snake = long_snake(&grid, 2);
        let walls = vec![grid.cell(0, 1), grid.cell(1, 1)];
        let mut rng = StdRng::seed_from_u64(5);

        let result = random_food_position(&mut rng, &grid, &snake, &walls);

        assert_eq!(result, Err(PlacementError::GridFull { cells: 4 }));
    }
}

use std::collections::VecDeque;
use std::time::Duration;

use crate::grid::{Direction, Grid, GridPosition};

/// The player's snake. The head is kept apart from the rest of the body so a
/// snake can never be empty.
#[derive(Debug, Clone)]
pub struct Snake {
    head: GridPosition,
    // Segments behind the head, nearest first.
    body: VecDeque<GridPosition>,
    direction: Direction,
    speed: Duration,
}

impl Snake {
    pub fn new(position: GridPosition, speed: Duration) -> Self {
        Snake {
            head: position,
            body: VecDeque::new(),
            direction: Direction::None,
            speed,
        }
    }

    pub fn head(&self) -> GridPosition {
        self.head
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Time between two moves.
    pub fn speed(&self) -> Duration {
        self.speed
    }

    pub fn set_speed(&mut self, speed: Duration) {
        self.speed = speed;
    }

    pub fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// All segments, head first.
    pub fn segments(&self) -> impl Iterator<Item = &GridPosition> {
        std::iter::once(&self.head).chain(self.body.iter())
    }

    pub fn occupies(&self, pos: GridPosition) -> bool {
        self.head == pos || self.body.contains(&pos)
    }

    /// Turns the snake unless `requested` would reverse it onto itself.
    pub fn set_direction(&mut self, requested: Direction) {
        if requested == Direction::None {
            return;
        }
        if requested.opposite() != self.direction {
            self.direction = requested;
        }
    }

    /// Advances one cell and reports whether the new head landed on `food`.
    /// Eating keeps the tail, so the snake grows by one segment.
    pub fn move_and_check_for_food(&mut self, food: GridPosition, grid: &Grid) -> bool {
        if self.direction == Direction::None {
            return false;
        }

        let new_head = grid.step(self.head, self.direction);
        self.body.push_front(self.head);
        self.head = new_head;

        if new_head == food {
            true
        } else {
            self.body.pop_back();
            false
        }
    }

    /// True when the head overlaps any other segment or any wall.
    pub fn has_collided(&self, walls: &[GridPosition]) -> bool {
        self.body.contains(&self.head) || walls.contains(&self.head)
    }

    pub fn reset_to_position(&mut self, position: GridPosition) {
        self.head = position;
        self.body.clear();
        self.direction = Direction::Right;
    }
}

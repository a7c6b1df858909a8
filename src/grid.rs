use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::None => Direction::None,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// One-cell step in grid units, before scaling by the cell size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PosDelta {
    pub x: i64,
    pub y: i64,
}

impl From<Direction> for PosDelta {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::None => PosDelta { x: 0, y: 0 },
            Direction::Up => PosDelta { x: 0, y: -1 },
            Direction::Down => PosDelta { x: 0, y: 1 },
            Direction::Left => PosDelta { x: -1, y: 0 },
            Direction::Right => PosDelta { x: 1, y: 0 },
        }
    }
}

/// Top-left corner of a cell, in window units. Always a multiple of the cell size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub x: u32,
    pub y: u32,
}

impl GridPosition {
    pub fn new(x: u32, y: u32) -> Self {
        GridPosition { x, y }
    }
}

/// The play field: window dimensions plus the size of a square cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cell_size: u32,
}

impl Grid {
    pub fn new(columns: u32, rows: u32, cell_size: u32) -> Self {
        Grid {
            width: columns * cell_size,
            height: rows * cell_size,
            cell_size,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn columns(&self) -> u32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> u32 {
        self.height / self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    /// Position of the cell at `column`/`row`.
    pub fn cell(&self, column: u32, row: u32) -> GridPosition {
        GridPosition::new(column * self.cell_size, row * self.cell_size)
    }

    /// Column and row of an aligned position.
    pub fn cell_of(&self, pos: GridPosition) -> (u32, u32) {
        (pos.x / self.cell_size, pos.y / self.cell_size)
    }

    /// Uniformly drawn cell-aligned position inside the window.
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> GridPosition {
        let column = rng.gen_range(0..self.columns());
        let row = rng.gen_range(0..self.rows());
        self.cell(column, row)
    }

    /// Every cell of the grid, row by row.
    pub fn positions(&self) -> impl Iterator<Item = GridPosition> + '_ {
        (0..self.rows())
            .flat_map(move |row| (0..self.columns()).map(move |column| self.cell(column, row)))
    }

    /// Moves `pos` by `delta` cells, wrapping around the window edges.
    pub fn wrapped_add(&self, pos: GridPosition, delta: PosDelta) -> GridPosition {
        let cell = self.cell_size as i64;
        let new_x = (pos.x as i64 + delta.x * cell).rem_euclid(self.width as i64) as u32;
        let new_y = (pos.y as i64 + delta.y * cell).rem_euclid(self.height as i64) as u32;
        GridPosition { x: new_x, y: new_y }
    }

    pub fn step(&self, pos: GridPosition, direction: Direction) -> GridPosition {
        self.wrapped_add(pos, direction.into())
    }
}

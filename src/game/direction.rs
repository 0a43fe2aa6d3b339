/// A single grid-aligned coordinate.  Coordinates are signed so that a
/// basic-variant head that has left the field can still be represented
/// until the wall check declares it fatal.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Cell {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Cell {
    pub(crate) const fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the cell one step from `cell` in this direction, without any
    /// wrapping or clamping
    pub(crate) fn step(self, cell: Cell) -> Cell {
        let Cell { x, y } = cell;
        match self {
            Direction::Up => Cell::new(x, y - 1),
            Direction::Down => Cell::new(x, y + 1),
            Direction::Left => Cell::new(x - 1, y),
            Direction::Right => Cell::new(x + 1, y),
        }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

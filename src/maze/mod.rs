pub mod cell;

pub use cell::{Cell, Direction};

use crate::error::MazeError;

/// Cell coordinate as `(row, col)`, 0-indexed from the top-left corner.
pub type Coord = (u16, u16);

/// A rectangular grid of [`Cell`]s whose open walls form the maze.
///
/// The grid is allocated once and mutated in place. Walls are only ever opened through
/// [`Maze::open_wall`], which updates both sides of a wall together, so two adjacent cells
/// always agree on whether the passage between them is open.
pub struct Maze {
    cells: Box<[Cell]>,
    rows: u16,
    cols: u16,
}

impl Maze {
    /// Creates a maze with every wall standing.
    pub fn new(rows: u16, cols: u16) -> Result<Self, MazeError> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidDimensions {
                rows,
                cols,
                max: u16::MAX,
            });
        }
        let cells = vec![Cell::CLOSED; rows as usize * cols as usize].into_boxed_slice();
        Ok(Maze { cells, rows, cols })
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a maze has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Checks if the given coordinate is within the bounds of the maze.
    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.rows && coord.1 < self.cols
    }

    /// Like [`Maze::is_in_bounds`], but reports the offending coordinate.
    pub fn check_in_bounds(&self, coord: Coord) -> Result<(), MazeError> {
        if self.is_in_bounds(coord) {
            Ok(())
        } else {
            Err(MazeError::InvalidCoordinate {
                coord,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Row-major index of an in-bounds coordinate.
    pub fn ravel_index(&self, coord: Coord) -> usize {
        coord.0 as usize * self.cols as usize + coord.1 as usize
    }

    /// Inverse of [`Maze::ravel_index`].
    pub fn unravel_index(&self, index: usize) -> Coord {
        let cols = self.cols as usize;
        ((index / cols) as u16, (index % cols) as u16)
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    /// The adjacent coordinate in `direction`, if it lies inside the grid.
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        if !self.is_in_bounds(coord) {
            return None;
        }
        let (row, col) = coord;
        let next = match direction {
            Direction::North => (row.checked_sub(1)?, col),
            Direction::East => (row, col.checked_add(1)?),
            Direction::South => (row.checked_add(1)?, col),
            Direction::West => (row, col.checked_sub(1)?),
        };
        self.is_in_bounds(next).then_some(next)
    }

    /// In-bounds neighbors of `coord` with the direction leading to each, in canonical
    /// North, East, South, West order. Walls are ignored.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = (Coord, Direction)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| Some((self.neighbor(coord, direction)?, direction)))
    }

    /// Neighbors reachable from `coord` through an open wall, in canonical order.
    pub fn open_neighbors(&self, coord: Coord) -> impl Iterator<Item = (Coord, Direction)> + '_ {
        self.neighbors(coord)
            .filter(move |&(_, direction)| !self[coord].has_wall(direction))
    }

    /// Whether movement from `coord` towards `direction` is unobstructed.
    /// Always `false` towards the outside of the grid.
    pub fn is_open(&self, coord: Coord, direction: Direction) -> bool {
        self.neighbor(coord, direction).is_some() && !self[coord].has_wall(direction)
    }

    /// Removes the wall between `coord` and its neighbor in `direction`, on both sides.
    ///
    /// # Returns
    /// `Ok(true)` if a wall was removed, `Ok(false)` if the passage was already open.
    ///
    /// # Errors
    /// [`MazeError::InvalidCoordinate`] if `coord` is out of bounds or `direction` points
    /// outside the grid. The maze is left untouched in that case.
    pub fn open_wall(&mut self, coord: Coord, direction: Direction) -> Result<bool, MazeError> {
        self.check_in_bounds(coord)?;
        let neighbor = self
            .neighbor(coord, direction)
            .ok_or(MazeError::InvalidCoordinate {
                coord,
                rows: self.rows,
                cols: self.cols,
            })?;
        let here = self.ravel_index(coord);
        let there = self.ravel_index(neighbor);
        let was_closed = self.cells[here].has_wall(direction);
        self.cells[here].set_wall(direction, false);
        self.cells[there].set_wall(direction.opposite(), false);
        Ok(was_closed)
    }

    /// Puts every wall back up.
    pub fn close_all_walls(&mut self) {
        self.cells.iter_mut().for_each(Cell::close_walls);
    }

    /// Clears the generation-time visited marks.
    pub fn clear_visited(&mut self) {
        self.cells.iter_mut().for_each(|cell| cell.visited = false);
    }

    pub(crate) fn mark_visited(&mut self, coord: Coord) {
        let idx = self.ravel_index(coord);
        self.cells[idx].visited = true;
    }

    /// Open passages, each listed once from its northern or western cell
    /// (so the direction is always [`Direction::South`] or [`Direction::East`]).
    pub fn passages(&self) -> impl Iterator<Item = (Coord, Direction)> + '_ {
        self.coords().flat_map(move |coord| {
            [Direction::East, Direction::South]
                .into_iter()
                .filter(move |&direction| self.is_open(coord, direction))
                .map(move |direction| (coord, direction))
        })
    }

    /// Number of open passages. A perfect maze has exactly `rows * cols - 1`.
    pub fn passage_count(&self) -> usize {
        self.passages().count()
    }

    /// Checks that every pair of adjacent cells agrees on the wall between them, and that
    /// no boundary wall is open.
    pub fn verify_wall_pairing(&self) -> Result<(), MazeError> {
        for coord in self.coords() {
            for direction in Direction::ALL {
                let consistent = match self.neighbor(coord, direction) {
                    Some(neighbor) => {
                        self[coord].has_wall(direction)
                            == self[neighbor].has_wall(direction.opposite())
                    }
                    None => self[coord].has_wall(direction),
                };
                if !consistent {
                    return Err(MazeError::InconsistentWallState { coord, direction });
                }
            }
        }
        Ok(())
    }

    #[cfg(test)]
    /// Opens a single side of a wall, breaking the pairing. Test-only.
    pub(crate) fn open_one_side(&mut self, coord: Coord, direction: Direction) {
        let idx = self.ravel_index(coord);
        self.cells[idx].set_wall(direction, false);
    }
}

impl std::ops::Index<Coord> for Maze {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.cells[self.ravel_index(index)]
    }
}

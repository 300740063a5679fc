/// One of the four cardinal directions a cell can open towards.
///
/// The discriminant is the index into [`Cell::walls`], and the declaration order is the
/// canonical iteration order used by neighbor lookup and every traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    /// All directions in canonical order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The direction pointing back from the neighbor.
    pub fn opposite(self) -> Direction {
        Direction::ALL[(self as usize + 2) % 4]
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::North => write!(f, "north"),
            Direction::East => write!(f, "east"),
            Direction::South => write!(f, "south"),
            Direction::West => write!(f, "west"),
        }
    }
}

/// A single maze cell: four walls plus the generation-time visited mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// `true` means the wall is standing. Indexed by [`Direction::index`].
    walls: [bool; 4],
    /// Only meaningful while a generator runs. Traversals keep their own visited set.
    pub(crate) visited: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Cell::CLOSED
    }
}

impl Cell {
    /// A cell with every wall standing.
    pub const CLOSED: Cell = Cell {
        walls: [true; 4],
        visited: false,
    };

    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls[direction.index()]
    }

    pub fn walls(&self) -> [bool; 4] {
        self.walls
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub(super) fn close_walls(&mut self) {
        self.walls = [true; 4];
    }

    // Only the grid may touch a single side, so that both halves of a wall move together.
    pub(super) fn set_wall(&mut self, direction: Direction, standing: bool) {
        self.walls[direction.index()] = standing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::East.opposite(), Direction::West);
        assert_eq!(Direction::South.opposite(), Direction::North);
        assert_eq!(Direction::West.opposite(), Direction::East);
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn test_canonical_indices() {
        let indices = Direction::ALL.map(Direction::index);
        assert_eq!(indices, [0, 1, 2, 3]);
    }

    #[test]
    fn test_new_cell_is_closed() {
        let cell = Cell::default();
        assert_eq!(cell.walls(), [true; 4]);
        assert!(!cell.is_visited());
    }
}

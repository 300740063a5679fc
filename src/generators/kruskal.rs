use rand::{Rng, seq::SliceRandom};

use crate::{
    error::MazeError,
    generators::union_find::UnionFind,
    maze::{Coord, Direction, Maze},
};

/// Wall edge between two adjacent cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: Coord,
    pub to: Coord,
    /// Direction from `from` to `to`, either South or East
    pub direction: Direction,
}

/// Every interior wall of the grid exactly once: the South edge of each cell above the
/// last row and the East edge of each cell left of the last column.
pub fn wall_edges(maze: &Maze) -> Vec<Edge> {
    maze.coords()
        .flat_map(|from| {
            [Direction::South, Direction::East].map(|direction| {
                maze.neighbor(from, direction).map(|to| Edge {
                    from,
                    to,
                    direction,
                })
            })
        })
        .flatten()
        .collect()
}

/// Carves a perfect maze with randomized Kruskal.
///
/// Walls are processed in a uniformly shuffled order and removed whenever they separate two
/// cells that are not connected yet. Generation visited marks are not used.
pub fn randomized_kruskal<R: Rng + ?Sized>(maze: &mut Maze, rng: &mut R) -> Result<(), MazeError> {
    maze.close_all_walls();

    let mut uf = UnionFind::new(maze.len());

    let mut edges = wall_edges(maze);
    edges.shuffle(rng);

    for edge in edges {
        let idx1 = maze.ravel_index(edge.from);
        let idx2 = maze.ravel_index(edge.to);

        // If cells are not yet connected, remove the wall between them
        if uf.find(idx1) != uf.find(idx2) {
            uf.union(idx1, idx2);
            maze.open_wall(edge.from, edge.direction)?;
        }
        if uf.set_count() == 1 {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_edge_count() {
        for (rows, cols) in [(1, 1), (2, 2), (3, 5), (7, 4), (1, 6)] {
            let maze = Maze::new(rows, cols).unwrap();
            let expected = rows as usize * (cols as usize - 1) + (rows as usize - 1) * cols as usize;
            assert_eq!(wall_edges(&maze).len(), expected, "{rows}x{cols}");
        }
    }

    #[test]
    fn test_edges_are_south_or_east() {
        let maze = Maze::new(3, 3).unwrap();
        for edge in wall_edges(&maze) {
            assert_eq!(maze.neighbor(edge.from, edge.direction), Some(edge.to));
            assert!(matches!(edge.direction, Direction::South | Direction::East));
        }
    }

    #[test]
    fn test_spanning_tree_edge_count() {
        let mut maze = Maze::new(8, 5).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        randomized_kruskal(&mut maze, &mut rng).unwrap();
        assert_eq!(maze.passage_count(), 8 * 5 - 1);
    }

    #[test]
    fn test_does_not_touch_visited_marks() {
        let mut maze = Maze::new(3, 3).unwrap();
        maze.mark_visited((1, 1));
        let mut rng = StdRng::seed_from_u64(5);
        randomized_kruskal(&mut maze, &mut rng).unwrap();
        assert!(maze[(1, 1)].is_visited());
        assert!(!maze[(0, 0)].is_visited());
    }
}

use rand::Rng;

use crate::{
    error::MazeError,
    maze::{Coord, Direction, Maze},
};

/// The cell the backtracker starts carving from.
pub const START: Coord = (0, 0);

/// Carves a perfect maze with the randomized depth-first backtracker.
///
/// Every wall is closed and every visited mark cleared first. Each opened wall joins a
/// visited cell to a cell that was not visited yet, so the result is a spanning tree.
pub fn recursive_backtrack<R: Rng + ?Sized>(maze: &mut Maze, rng: &mut R) -> Result<(), MazeError> {
    maze.close_all_walls();
    maze.clear_visited();

    let mut current = START;
    maze.mark_visited(current);

    // The stack keeps the cells we may need to come back to
    let mut stack: Vec<Coord> = Vec::new();

    loop {
        let unvisited = maze
            .neighbors(current)
            .filter(|&(c, _)| !maze[c].is_visited())
            .collect::<Vec<(Coord, Direction)>>();

        if !unvisited.is_empty() {
            let (next, direction) = unvisited[rng.random_range(0..unvisited.len())];
            maze.mark_visited(next);
            stack.push(current);
            maze.open_wall(current, direction)?;
            current = next;
        } else if let Some(previous) = stack.pop() {
            // Dead end, backtrack
            current = previous;
        } else {
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
    fn test_visits_every_cell() {
        let mut maze = Maze::new(6, 9).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        recursive_backtrack(&mut maze, &mut rng).unwrap();
        assert!(maze.coords().all(|c| maze[c].is_visited()));
        assert_eq!(maze.passage_count(), 6 * 9 - 1);
    }

    #[test]
    fn test_single_cell() {
        let mut maze = Maze::new(1, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        recursive_backtrack(&mut maze, &mut rng).unwrap();
        assert_eq!(maze.passage_count(), 0);
        assert!(maze[(0, 0)].is_visited());
    }

    #[test]
    fn test_single_row_is_a_corridor() {
        let mut maze = Maze::new(1, 5).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        recursive_backtrack(&mut maze, &mut rng).unwrap();
        for col in 0..4 {
            assert!(maze.is_open((0, col), Direction::East));
        }
    }

    #[test]
    fn test_resets_previous_maze() {
        let mut maze = Maze::new(4, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        recursive_backtrack(&mut maze, &mut rng).unwrap();
        recursive_backtrack(&mut maze, &mut rng).unwrap();
        assert_eq!(maze.passage_count(), 15);
    }
}

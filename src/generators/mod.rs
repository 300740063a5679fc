use rand::{Rng, SeedableRng, rngs::StdRng};

pub mod kruskal;
pub mod recur_backtrack;
pub mod union_find;

use kruskal::randomized_kruskal;
use recur_backtrack::recursive_backtrack;

use crate::{error::MazeError, maze::Maze};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Generator {
    /// Randomized depth-first backtracker
    #[value(name = "backtracker")]
    RecurBacktrack,
    /// Randomized Kruskal over a union-find
    Kruskal,
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::RecurBacktrack => write!(f, "Recursive Backtracker"),
            Generator::Kruskal => write!(f, "Kruskal's Algorithm"),
        }
    }
}

/// Generate a perfect maze in place, with a fresh generator seeded from `seed`.
///
/// The same seed, generator and dimensions always produce the same maze.
pub fn generate_maze(maze: &mut Maze, generator: Generator, seed: Option<u64>) -> Result<(), MazeError> {
    generate_maze_with_rng(maze, generator, &mut get_rng(seed))
}

/// Generate a perfect maze in place, drawing randomness from `rng`.
pub fn generate_maze_with_rng<R: Rng + ?Sized>(
    maze: &mut Maze,
    generator: Generator,
    rng: &mut R,
) -> Result<(), MazeError> {
    tracing::debug!(
        "[generate] {} on a {}x{} grid",
        generator,
        maze.rows(),
        maze.cols()
    );
    match generator {
        Generator::RecurBacktrack => recursive_backtrack(maze, rng)?,
        Generator::Kruskal => randomized_kruskal(maze, rng)?,
    }
    tracing::info!(
        "[generate] {} finished with {} passages",
        generator,
        maze.passage_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{Coord, Direction};
    use std::collections::VecDeque;

    const GENERATORS: [Generator; 2] = [Generator::RecurBacktrack, Generator::Kruskal];
    const SHAPES: [(u16, u16); 5] = [(2, 2), (3, 3), (5, 8), (10, 10), (1, 7)];

    /// Number of connected components of the open-wall graph, ignoring one passage.
    fn components(maze: &Maze, skip: Option<(Coord, Direction)>) -> usize {
        let blocked = |coord: Coord, direction: Direction| match skip {
            Some((from, dir)) => {
                (coord, direction) == (from, dir)
                    || maze.neighbor(from, dir) == Some(coord) && direction == dir.opposite()
            }
            None => false,
        };
        let mut seen = vec![false; maze.len()];
        let mut count = 0;
        for root in maze.coords() {
            if seen[maze.ravel_index(root)] {
                continue;
            }
            count += 1;
            seen[maze.ravel_index(root)] = true;
            let mut queue = VecDeque::from([root]);
            while let Some(current) = queue.pop_front() {
                for (next, direction) in maze.open_neighbors(current) {
                    if blocked(current, direction) || seen[maze.ravel_index(next)] {
                        continue;
                    }
                    seen[maze.ravel_index(next)] = true;
                    queue.push_back(next);
                }
            }
        }
        count
    }

    #[test]
    fn test_perfect_maze() {
        for generator in GENERATORS {
            for (rows, cols) in SHAPES {
                for seed in 0..5 {
                    let mut maze = Maze::new(rows, cols).unwrap();
                    generate_maze(&mut maze, generator, Some(seed)).unwrap();
                    assert_eq!(
                        maze.passage_count(),
                        rows as usize * cols as usize - 1,
                        "{generator} {rows}x{cols} seed {seed}"
                    );
                    assert_eq!(components(&maze, None), 1, "{generator} {rows}x{cols}");
                    assert!(maze.verify_wall_pairing().is_ok());
                }
            }
        }
    }

    #[test]
    fn test_every_passage_is_a_bridge() {
        for generator in GENERATORS {
            let mut maze = Maze::new(6, 7).unwrap();
            generate_maze(&mut maze, generator, Some(99)).unwrap();
            let passages = maze.passages().collect::<Vec<_>>();
            for passage in passages {
                assert_eq!(components(&maze, Some(passage)), 2, "{generator} {passage:?}");
            }
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        for generator in GENERATORS {
            let mut first = Maze::new(9, 6).unwrap();
            let mut second = Maze::new(9, 6).unwrap();
            generate_maze(&mut first, generator, Some(1234)).unwrap();
            generate_maze(&mut second, generator, Some(1234)).unwrap();
            assert!(first.coords().all(|c| first[c].walls() == second[c].walls()));
        }
    }

    #[test]
    fn test_regenerating_replaces_walls() {
        let mut maze = Maze::new(5, 5).unwrap();
        let mut rng = get_rng(Some(8));
        generate_maze_with_rng(&mut maze, Generator::RecurBacktrack, &mut rng).unwrap();
        generate_maze_with_rng(&mut maze, Generator::Kruskal, &mut rng).unwrap();
        assert_eq!(maze.passage_count(), 24);
        assert_eq!(components(&maze, None), 1);
    }
}

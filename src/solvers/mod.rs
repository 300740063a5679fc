mod frontier;
mod traversal;

pub use traversal::{CancelToken, Step, Traversal, TraversalStatus};

use crate::{
    error::MazeError,
    maze::{Coord, Maze},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Solver {
    /// Breadth-first search, finds a shortest path
    Bfs,
    /// Depth-first search
    Dfs,
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
        }
    }
}

/// Outcome of a traversal run to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub status: TraversalStatus,
    /// Cells in the order they were expanded
    pub expanded: Vec<Coord>,
    /// Start to goal, both included. `None` unless the goal was found.
    pub path: Option<Vec<Coord>>,
}

impl Solution {
    /// Number of passages crossed along the path.
    pub fn path_len(&self) -> Option<usize> {
        self.path.as_ref().map(|path| path.len() - 1)
    }
}

/// Runs `solver` from `start` to `goal` without pausing between steps.
pub fn solve_maze(maze: &Maze, solver: Solver, start: Coord, goal: Coord) -> Result<Solution, MazeError> {
    let mut traversal = Traversal::new(maze, solver, start, goal)?;
    let status = traversal.run_to_end();
    Ok(Solution {
        status,
        path: traversal.path(),
        expanded: traversal.expanded().to_vec(),
    })
}

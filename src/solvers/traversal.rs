use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use super::{Solver, frontier::Frontier};
use crate::{
    error::MazeError,
    maze::{Coord, Maze},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalStatus {
    /// More steps are available
    Running,
    /// The goal was dequeued; the path can be reconstructed
    Found,
    /// The frontier ran dry without reaching the goal
    Exhausted,
    /// Stopped through [`CancelToken::cancel`] or [`Traversal::cancel`]
    Cancelled,
}

impl TraversalStatus {
    pub fn is_finished(self) -> bool {
        self != TraversalStatus::Running
    }
}

/// One unit of traversal work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// `cell` was expanded; `discovered` are the neighbors newly added to the frontier.
    Expanded { cell: Coord, discovered: Vec<Coord> },
    /// The goal cell was taken off the frontier. Terminal.
    Found(Coord),
    /// Nothing left to expand. Terminal.
    Exhausted,
}

/// Shared flag a driver sets to stop a traversal at its next step boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// A pull-based BFS or DFS over the open passages of a [`Maze`].
///
/// Each call to [`Traversal::step`] (or [`Iterator::next`]) expands at most one cell.
/// The traversal borrows the maze for its whole lifetime, so the maze cannot be regenerated
/// while a traversal over it is alive. All bookkeeping (visited set, predecessors, frontier)
/// belongs to the traversal; the maze is never written to.
pub struct Traversal<'a> {
    maze: &'a Maze,
    solver: Solver,
    start: Coord,
    goal: Coord,
    frontier: Frontier,
    visited: Box<[bool]>,
    predecessors: Box<[Option<Coord>]>,
    /// Cells in the order they were expanded
    expanded: Vec<Coord>,
    status: TraversalStatus,
    cancel: CancelToken,
}

impl<'a> Traversal<'a> {
    /// Prepares a traversal from `start` to `goal`.
    ///
    /// # Errors
    /// [`MazeError::InvalidCoordinate`] if either endpoint is outside the maze.
    pub fn new(maze: &'a Maze, solver: Solver, start: Coord, goal: Coord) -> Result<Self, MazeError> {
        maze.check_in_bounds(start)?;
        maze.check_in_bounds(goal)?;
        let mut traversal = Traversal {
            maze,
            solver,
            start,
            goal,
            frontier: Frontier::new(solver),
            visited: vec![false; maze.len()].into_boxed_slice(),
            predecessors: vec![None; maze.len()].into_boxed_slice(),
            expanded: Vec::new(),
            status: TraversalStatus::Running,
            cancel: CancelToken::new(),
        };
        traversal.restart();
        Ok(traversal)
    }

    /// Uses `token` for cancellation instead of the traversal's own one.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// A handle that cancels this traversal at its next step.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn status(&self) -> TraversalStatus {
        self.status
    }

    /// Cells expanded so far, in order. The goal itself is never expanded.
    pub fn expanded(&self) -> &[Coord] {
        &self.expanded
    }

    /// Discovered cells not expanded yet, in the order they will be taken.
    pub fn frontier(&self) -> impl Iterator<Item = Coord> + '_ {
        self.frontier.iter()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Whether `coord` has been discovered. Out-of-bounds coordinates never are.
    pub fn is_visited(&self, coord: Coord) -> bool {
        self.maze.is_in_bounds(coord) && self.visited[self.maze.ravel_index(coord)]
    }

    /// The cell `coord` was discovered from. `None` for the start and for undiscovered cells.
    pub fn predecessor(&self, coord: Coord) -> Option<Coord> {
        if !self.maze.is_in_bounds(coord) {
            return None;
        }
        self.predecessors[self.maze.ravel_index(coord)]
    }

    /// The path from start to goal, both included, once the goal has been found.
    pub fn path(&self) -> Option<Vec<Coord>> {
        if self.status != TraversalStatus::Found {
            return None;
        }
        let mut path = vec![self.goal];
        let mut current = self.goal;
        while let Some(previous) = self.predecessor(current) {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        Some(path)
    }

    /// Throws away all progress and starts over from the start cell.
    pub fn restart(&mut self) {
        self.discard();
        self.cancel.reset();
        let idx = self.maze.ravel_index(self.start);
        self.visited[idx] = true;
        self.frontier.push(self.start);
        self.status = TraversalStatus::Running;
    }

    /// Stops the traversal now, discarding its progress.
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        self.stop_cancelled();
    }

    /// Expands the next cell of the frontier.
    ///
    /// Returns `None` once the traversal has finished, or when it gets cancelled.
    pub fn step(&mut self) -> Option<Step> {
        if self.status.is_finished() {
            return None;
        }
        if self.cancel.is_cancelled() {
            self.stop_cancelled();
            return None;
        }

        let Some(current) = self.frontier.pop() else {
            self.status = TraversalStatus::Exhausted;
            tracing::info!(
                "[solve] {} exhausted after expanding {} cells",
                self.solver,
                self.expanded.len()
            );
            return Some(Step::Exhausted);
        };

        if current == self.goal {
            self.status = TraversalStatus::Found;
            tracing::info!(
                "[solve] {} reached {:?} after expanding {} cells",
                self.solver,
                self.goal,
                self.expanded.len()
            );
            return Some(Step::Found(current));
        }

        self.expanded.push(current);
        let maze = self.maze;
        let mut discovered = Vec::new();
        for (next, _) in maze.open_neighbors(current) {
            let idx = maze.ravel_index(next);
            if self.visited[idx] {
                continue;
            }
            self.visited[idx] = true;
            self.predecessors[idx] = Some(current);
            self.frontier.push(next);
            discovered.push(next);
        }
        Some(Step::Expanded {
            cell: current,
            discovered,
        })
    }

    /// Steps until the traversal finishes and returns the final status.
    pub fn run_to_end(&mut self) -> TraversalStatus {
        while self.step().is_some() {}
        self.status
    }

    fn stop_cancelled(&mut self) {
        if self.status == TraversalStatus::Cancelled {
            return;
        }
        tracing::debug!(
            "[solve] {} cancelled after expanding {} cells",
            self.solver,
            self.expanded.len()
        );
        self.discard();
        self.status = TraversalStatus::Cancelled;
    }

    fn discard(&mut self) {
        self.frontier.clear();
        self.visited.fill(false);
        self.predecessors.fill(None);
        self.expanded.clear();
    }
}

impl Iterator for Traversal<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}

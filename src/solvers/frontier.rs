use std::collections::VecDeque;

use super::Solver;
use crate::maze::Coord;

/// Discovered cells waiting to be expanded.
/// BFS pops the oldest discovery, DFS the newest.
pub(super) enum Frontier {
    Queue(VecDeque<Coord>),
    Stack(Vec<Coord>),
}

impl Frontier {
    pub(super) fn new(solver: Solver) -> Self {
        match solver {
            Solver::Bfs => Frontier::Queue(VecDeque::new()),
            Solver::Dfs => Frontier::Stack(Vec::new()),
        }
    }

    pub(super) fn push(&mut self, coord: Coord) {
        match self {
            Frontier::Queue(queue) => queue.push_back(coord),
            Frontier::Stack(stack) => stack.push(coord),
        }
    }

    pub(super) fn pop(&mut self) -> Option<Coord> {
        match self {
            Frontier::Queue(queue) => queue.pop_front(),
            Frontier::Stack(stack) => stack.pop(),
        }
    }

    pub(super) fn clear(&mut self) {
        match self {
            Frontier::Queue(queue) => queue.clear(),
            Frontier::Stack(stack) => stack.clear(),
        }
    }

    pub(super) fn len(&self) -> usize {
        match self {
            Frontier::Queue(queue) => queue.len(),
            Frontier::Stack(stack) => stack.len(),
        }
    }

    /// Cells in the order they would be popped.
    pub(super) fn iter(&self) -> Box<dyn Iterator<Item = Coord> + '_> {
        match self {
            Frontier::Queue(queue) => Box::new(queue.iter().copied()),
            Frontier::Stack(stack) => Box::new(stack.iter().rev().copied()),
        }
    }
}

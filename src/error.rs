use thiserror::Error;

use crate::maze::{Coord, Direction};

/// Errors raised by the maze core.
///
/// A traversal that runs out of frontier is not an error: it ends in
/// [`TraversalStatus::Exhausted`](crate::solvers::TraversalStatus::Exhausted).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    /// Rows and columns must each lie in `1..=max`.
    #[error("invalid maze dimensions {rows}x{cols}: both must be between 1 and {max}")]
    InvalidDimensions { rows: u16, cols: u16, max: u16 },

    /// A coordinate (or the neighbor a direction points to) lies outside the grid.
    #[error("coordinate ({}, {}) is outside the {rows}x{cols} grid", .coord.0, .coord.1)]
    InvalidCoordinate { coord: Coord, rows: u16, cols: u16 },

    /// An open wall on one side of a cell pair without its opposite being open.
    #[error("{direction} wall of cell ({}, {}) disagrees with its neighbor", .coord.0, .coord.1)]
    InconsistentWallState { coord: Coord, direction: Direction },
}

//! Perfect maze generation (recursive backtracker, Kruskal) and step-by-step BFS/DFS
//! traversal, plus a terminal front-end that animates them.
//!
//! The maze and the traversals never sleep or read input; a driver pulls traversal steps
//! at whatever pace it likes and cancels between steps.

pub mod app;
pub mod config;
pub mod error;
pub mod generators;
pub mod maze;
pub mod solvers;

pub use error::MazeError;
pub use maze::{Cell, Coord, Direction, Maze};

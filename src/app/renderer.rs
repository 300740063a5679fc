use std::{
    fmt,
    io::{Stdout, Write},
};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::maze::{Coord, Direction, Maze};

/// What a single lattice position shows on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Empty,
    Wall,
    /// Expanded by the running traversal
    Visited,
    /// Part of the found path
    Route,
    Start,
    Goal,
}

impl Paint {
    /// The width of each lattice position when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Paint::Empty => "  ".with(Color::Reset),
            Paint::Wall => "⬜".with(Color::White),
            Paint::Visited => "🟩".with(Color::Green),
            Paint::Route => "🟨".with(Color::Yellow),
            Paint::Start => "🟧".with(Color::DarkYellow),
            Paint::Goal => "🟪".with(Color::Magenta),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Paint::CELL_WIDTH as usize,
                "Each cell must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// Position on the wall lattice, `(y, x)`. Wider than [`Coord`]: a `u16` grid needs
/// `2 * n + 1` lattice lines.
pub type LatticePos = (u32, u32);

/// Lattice dimensions `(height, width)` for a maze: walls sit between and around cells.
pub fn lattice_size(maze: &Maze) -> LatticePos {
    lattice_coord((maze.rows(), maze.cols()))
}

/// Lattice position `(y, x)` of a maze cell.
pub fn lattice_coord((row, col): Coord) -> LatticePos {
    (u32::from(row) * 2 + 1, u32::from(col) * 2 + 1)
}

/// Lattice position of the wall between two adjacent cells.
fn lattice_between(a: Coord, b: Coord) -> LatticePos {
    let (ay, ax) = lattice_coord(a);
    let (by, bx) = lattice_coord(b);
    ((ay + by) / 2, (ax + bx) / 2)
}

/// How the bare maze looks at lattice position `(y, x)`.
pub fn lattice_paint(maze: &Maze, (y, x): LatticePos) -> Paint {
    let (height, width) = lattice_size(maze);
    if y == 0 || x == 0 || y + 1 >= height || x + 1 >= width {
        return Paint::Wall;
    }
    // Inside the border, y / 2 <= rows and x / 2 <= cols, so both fit a u16
    let (row, col) = ((y / 2) as u16, (x / 2) as u16);
    match (y % 2, x % 2) {
        // Cell
        (1, 1) => Paint::Empty,
        // Wall between (row, col) and its East neighbor
        (1, 0) => {
            if maze.is_open((row, col - 1), Direction::East) {
                Paint::Empty
            } else {
                Paint::Wall
            }
        }
        // Wall between (row, col) and its South neighbor
        (0, 1) => {
            if maze.is_open((row - 1, col), Direction::South) {
                Paint::Empty
            } else {
                Paint::Wall
            }
        }
        // Corner posts always stand
        _ => Paint::Wall,
    }
}

pub struct Renderer {
    /// Standard output handle to write to the terminal
    stdout: Stdout,
    /// Screen rows and lattice columns of the last drawn maze
    lattice_dims: Option<(u16, u16)>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            stdout: std::io::stdout(),
            lattice_dims: None,
        }
    }

    /// Check if terminal size is sufficient for the given lattice dimensions.
    /// If not, display a message and return Ok(false).
    fn check_resize(&mut self, height: u32, width: u32) -> std::io::Result<bool> {
        let (term_width, term_height) = terminal::size()?;
        let needed_width = u64::from(width) * u64::from(Paint::CELL_WIDTH);
        // Two extra lines for the status and controls
        let needed_height = u64::from(height) + 2;
        if u64::from(term_width) < needed_width || u64::from(term_height) < needed_height {
            let msg = format!(
                "Terminal size is too small ({}x{}) for the maze ({}x{}). Please resize the terminal or pick smaller dimensions.\r\n",
                term_width, term_height, needed_width, needed_height,
            );
            queue!(
                self.stdout,
                terminal::Clear(ClearType::All),
                cursor::MoveTo(0, 0),
                style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold)),
                style::PrintStyledContent(
                    "Press Esc to exit...\r\n"
                        .with(Color::Blue)
                        .attribute(Attribute::Bold)
                )
            )?;
            self.stdout.flush()?;
            return Ok(false);
        }
        Ok(true)
    }

    /// Draw the whole maze with start and goal highlighted, wiping any traversal colors.
    /// Returns Ok(false) if the terminal is too small to show it.
    pub fn draw_maze(&mut self, maze: &Maze, start: Coord, goal: Coord) -> std::io::Result<bool> {
        let (height, width) = lattice_size(maze);
        if !self.check_resize(height, width)? {
            self.lattice_dims = None;
            return Ok(false);
        }
        // The terminal is at least this large, so both fit
        let (Ok(screen_height), Ok(screen_width)) = (u16::try_from(height), u16::try_from(width)) else {
            self.lattice_dims = None;
            return Ok(false);
        };
        self.lattice_dims = Some((screen_height, screen_width));

        queue!(self.stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        for y in 0..height {
            for x in 0..width {
                self.stdout.queue(style::Print(lattice_paint(maze, (y, x))))?;
            }
            self.stdout.queue(style::Print("\r\n"))?;
        }
        self.paint(start, Paint::Start)?;
        self.paint(goal, Paint::Goal)?;
        self.draw_controls()?;
        self.stdout.flush()?;
        Ok(true)
    }

    /// Paint a single maze cell.
    pub fn paint(&mut self, coord: Coord, paint: Paint) -> std::io::Result<()> {
        self.paint_lattice(lattice_coord(coord), paint)
    }

    fn paint_lattice(&mut self, (y, x): LatticePos, paint: Paint) -> std::io::Result<()> {
        // Skip if nothing is on screen, or the position lies outside the drawn lattice
        let Some((height, width)) = self.lattice_dims else {
            return Ok(());
        };
        if y >= u32::from(height) || x >= u32::from(width) {
            return Ok(());
        }
        // x < width <= terminal width / CELL_WIDTH, so neither value overflows
        queue!(
            self.stdout,
            cursor::MoveTo(x as u16 * Paint::CELL_WIDTH, y as u16),
            style::Print(paint)
        )?;
        Ok(())
    }

    /// Paint the route through a path, including the opened walls between its cells.
    /// The first and last cells keep their start/goal colors.
    pub fn paint_route(&mut self, path: &[Coord]) -> std::io::Result<()> {
        for pair in path.windows(2) {
            self.paint_lattice(lattice_between(pair[0], pair[1]), Paint::Route)?;
        }
        if path.len() > 2 {
            for &coord in &path[1..path.len() - 1] {
                self.paint(coord, Paint::Route)?;
            }
        }
        self.flush()
    }

    /// Show a one-line message below the maze, cut to the terminal width.
    pub fn status(&mut self, msg: &str, color: Color) -> std::io::Result<()> {
        let Some((height, _)) = self.lattice_dims else {
            return Ok(());
        };
        let (term_width, _) = terminal::size()?;
        let (msg, _) = msg.unicode_truncate(term_width as usize);
        queue!(
            self.stdout,
            cursor::MoveTo(0, height),
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(msg.with(color).attribute(Attribute::Bold)),
        )?;
        self.flush()
    }

    fn draw_controls(&mut self) -> std::io::Result<()> {
        let Some((height, _)) = self.lattice_dims else {
            return Ok(());
        };
        let (term_width, _) = terminal::size()?;
        let controls = "B: BFS  D: DFS  K: Kruskal  G: Backtracker  R: Reset  ↑/↓: Speed  Esc: Quit";
        let (controls, _) = controls.unicode_truncate(term_width as usize);
        queue!(
            self.stdout,
            cursor::MoveTo(0, height + 1),
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(controls.with(Color::Cyan)),
        )?;
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.stdout.flush()
    }

    /// Move the cursor below everything drawn so far.
    pub fn park_cursor(&mut self) -> std::io::Result<()> {
        if let Some((height, _)) = self.lattice_dims {
            queue!(self.stdout, cursor::MoveTo(0, height + 2))?;
        }
        self.flush()
    }
}

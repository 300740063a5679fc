mod renderer;

pub use renderer::{LatticePos, Paint, Renderer, lattice_paint, lattice_size};

use std::{
    io::{Stdout, Write},
    time::Duration,
};

use crossterm::{
    cursor,
    event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::Color,
    terminal::{self, ClearType},
};
use rand::rngs::StdRng;

use crate::{
    config::Config,
    error::MazeError,
    generators::{Generator, generate_maze_with_rng, get_rng},
    maze::{Coord, Maze},
    solvers::{Solver, Step, Traversal, TraversalStatus},
};

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Solve(Solver),
    Generate(Generator),
    /// Wipe traversal colors, cancelling a running traversal
    Reset,
    SpeedUp,
    SlowDown,
    Quit,
}

impl Command {
    pub fn from_key(key: KeyEvent) -> Option<Command> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'b' => Some(Command::Solve(Solver::Bfs)),
                'd' => Some(Command::Solve(Solver::Dfs)),
                'k' => Some(Command::Generate(Generator::Kruskal)),
                'g' => Some(Command::Generate(Generator::RecurBacktrack)),
                'r' => Some(Command::Reset),
                'q' => Some(Command::Quit),
                _ => None,
            },
            KeyCode::Up => Some(Command::SpeedUp),
            KeyCode::Down => Some(Command::SlowDown),
            KeyCode::Esc => Some(Command::Quit),
            _ => None, // Ignore other keys
        }
    }
}

/// Interactive terminal front-end: one maze, regenerated and solved on demand.
///
/// Everything runs on the calling thread. A traversal is pulled one step per tick and
/// input is polled between steps, so cancelling never interrupts a step halfway.
pub struct App {
    maze: Maze,
    start: Coord,
    goal: Coord,
    /// Session RNG, so a seeded session replays the same sequence of mazes
    rng: StdRng,
    step_delay: Duration,
    renderer: Renderer,
}

impl App {
    /// Slowest animation allowed when slowing down
    const MAX_STEP_DELAY: Duration = Duration::from_millis(1000);

    /// Builds the app and its first maze from a configuration.
    pub fn new(config: &Config) -> Result<Self, MazeError> {
        let mut maze = config.validate()?;
        let mut rng = get_rng(config.seed);
        generate_maze_with_rng(&mut maze, config.generator, &mut rng)?;
        Ok(App {
            maze,
            start: config.start,
            goal: config.end(),
            rng,
            step_delay: Duration::from_millis(config.delay_ms),
            renderer: Renderer::new(),
        })
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Main application loop. Returns when the user quits.
    pub fn run(&mut self) -> std::io::Result<()> {
        tracing::info!(
            "Started main app loop on a {}x{} maze",
            self.maze.rows(),
            self.maze.cols()
        );
        self.redraw()?;
        loop {
            let Some(command) = App::read_command()? else {
                continue;
            };
            tracing::debug!("[app loop] command {:?}", command);
            if !self.apply(command)? {
                break;
            }
        }
        self.renderer.park_cursor()?;
        tracing::info!("Exiting main app loop");
        Ok(())
    }

    /// Carries out one command. Returns Ok(false) when the app should exit.
    fn apply(&mut self, command: Command) -> std::io::Result<bool> {
        match command {
            Command::Solve(solver) => {
                // A key pressed mid-traversal may itself be a command
                let mut next = Some(Command::Solve(solver));
                while let Some(Command::Solve(solver)) = next {
                    next = self.solve(solver)?;
                }
                match next {
                    Some(command) => self.apply(command),
                    None => Ok(true),
                }
            }
            Command::Generate(generator) => {
                generate_maze_with_rng(&mut self.maze, generator, &mut self.rng)
                    .map_err(std::io::Error::other)?;
                self.redraw()?;
                self.renderer
                    .status(&format!("Generated a new maze with {generator}"), Color::Green)?;
                Ok(true)
            }
            Command::Reset => {
                self.redraw()?;
                Ok(true)
            }
            Command::SpeedUp => {
                self.step_delay = faster(self.step_delay);
                self.show_speed()?;
                Ok(true)
            }
            Command::SlowDown => {
                self.step_delay = slower(self.step_delay, App::MAX_STEP_DELAY);
                self.show_speed()?;
                Ok(true)
            }
            Command::Quit => Ok(false),
        }
    }

    /// Animates `solver` over the current maze.
    ///
    /// Returns a command that interrupted the animation and still has to be carried out:
    /// `Reset` or `Quit` (the traversal was cancelled), or another `Solve`.
    fn solve(&mut self, solver: Solver) -> std::io::Result<Option<Command>> {
        self.redraw()?;
        self.renderer
            .status(&format!("Running {solver}..."), Color::Yellow)?;

        let mut traversal = Traversal::new(&self.maze, solver, self.start, self.goal)
            .map_err(std::io::Error::other)?;
        let cancel = traversal.cancel_token();
        let mut pending = None;

        while let Some(step) = traversal.step() {
            match step {
                Step::Expanded { cell, .. } => {
                    if cell != self.start {
                        self.renderer.paint(cell, Paint::Visited)?;
                    }
                    self.renderer.flush()?;
                }
                Step::Found(_) | Step::Exhausted => break,
            }

            // Pace the animation while listening for input
            if let Some(command) = App::poll_command(self.step_delay)? {
                match command {
                    Command::SpeedUp => self.step_delay = faster(self.step_delay),
                    Command::SlowDown => {
                        self.step_delay = slower(self.step_delay, App::MAX_STEP_DELAY)
                    }
                    command @ (Command::Reset | Command::Quit | Command::Solve(_)) => {
                        cancel.cancel();
                        pending = Some(command);
                    }
                    // No regenerating while the maze is being read
                    Command::Generate(_) => {}
                }
            }
        }

        let expanded = traversal.expanded().len();
        match traversal.status() {
            TraversalStatus::Found => {
                let path = traversal.path().unwrap_or_default();
                self.renderer.paint_route(&path)?;
                self.renderer.status(
                    &format!(
                        "{solver}: path found! {} steps, {} cells expanded",
                        path.len().saturating_sub(1),
                        expanded
                    ),
                    Color::Green,
                )?;
            }
            TraversalStatus::Exhausted => {
                tracing::warn!("[app loop] {} found no path in a generated maze", solver);
                self.renderer.status(
                    &format!("{solver}: no path found after {expanded} cells"),
                    Color::Red,
                )?;
            }
            TraversalStatus::Cancelled => {
                tracing::info!("[app loop] {} cancelled by user", solver);
            }
            TraversalStatus::Running => {}
        }
        drop(traversal);

        if pending == Some(Command::Reset) {
            self.redraw()?;
            return Ok(None);
        }
        Ok(pending)
    }

    fn redraw(&mut self) -> std::io::Result<()> {
        self.renderer.draw_maze(&self.maze, self.start, self.goal)?;
        Ok(())
    }

    fn show_speed(&mut self) -> std::io::Result<()> {
        self.renderer.status(
            &format!("Step delay: {} ms", self.step_delay.as_millis()),
            Color::Cyan,
        )
    }

    /// Block until a key maps to a command, or a resize asks for nothing.
    fn read_command() -> std::io::Result<Option<Command>> {
        match event::read()? {
            event::Event::Key(key_event) => Ok(Command::from_key(key_event)),
            event::Event::Resize(_, _) => Ok(Some(Command::Reset)),
            _ => Ok(None),
        }
    }

    /// Wait up to `timeout` for a command. The full timeout passes when nothing is pressed.
    fn poll_command(timeout: Duration) -> std::io::Result<Option<Command>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        App::read_command()
    }
}

/// Halve the step delay.
fn faster(delay: Duration) -> Duration {
    delay / 2
}

/// Double the step delay, up to `max`. A zero delay becomes one millisecond.
fn slower(delay: Duration, max: Duration) -> Duration {
    (delay * 2).max(Duration::from_millis(1)).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(
            Command::from_key(press(KeyCode::Char('b'))),
            Some(Command::Solve(Solver::Bfs))
        );
        assert_eq!(
            Command::from_key(press(KeyCode::Char('D'))),
            Some(Command::Solve(Solver::Dfs))
        );
        assert_eq!(
            Command::from_key(press(KeyCode::Char('k'))),
            Some(Command::Generate(Generator::Kruskal))
        );
        assert_eq!(
            Command::from_key(press(KeyCode::Char('g'))),
            Some(Command::Generate(Generator::RecurBacktrack))
        );
        assert_eq!(Command::from_key(press(KeyCode::Char('r'))), Some(Command::Reset));
        assert_eq!(Command::from_key(press(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(Command::from_key(press(KeyCode::Up)), Some(Command::SpeedUp));
        assert_eq!(Command::from_key(press(KeyCode::Down)), Some(Command::SlowDown));
        assert_eq!(Command::from_key(press(KeyCode::Char('x'))), None);
        assert_eq!(
            Command::from_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
    }

    #[test]
    fn test_key_release_ignored() {
        let mut key = press(KeyCode::Char('b'));
        key.kind = KeyEventKind::Release;
        assert_eq!(Command::from_key(key), None);
    }

    #[test]
    fn test_speed_bounds() {
        let max = Duration::from_millis(1000);
        assert_eq!(faster(Duration::from_millis(10)), Duration::from_millis(5));
        assert_eq!(faster(Duration::ZERO), Duration::ZERO);
        assert_eq!(slower(Duration::ZERO, max), Duration::from_millis(1));
        assert_eq!(slower(Duration::from_millis(10), max), Duration::from_millis(20));
        assert_eq!(slower(Duration::from_millis(800), max), max);
    }

    #[test]
    fn test_new_app_builds_seeded_maze() {
        let config = Config {
            rows: 6,
            cols: 4,
            seed: Some(42),
            generator: Generator::Kruskal,
            ..Config::default()
        };
        let app = App::new(&config).unwrap();
        assert_eq!(app.maze().passage_count(), 23);
        assert_eq!(app.goal, (5, 3));
        assert_eq!(app.step_delay(), Duration::from_millis(10));

        let again = App::new(&config).unwrap();
        assert!(app.maze().coords().all(|c| app.maze()[c].walls() == again.maze()[c].walls()));
    }

    #[test]
    fn test_new_app_rejects_bad_end() {
        let config = Config {
            rows: 3,
            cols: 3,
            end: Some((0, 3)),
            ..Config::default()
        };
        assert!(matches!(
            App::new(&config),
            Err(MazeError::InvalidCoordinate { .. })
        ));
    }
}

use std::time::Instant;

use clap::{Parser, ValueEnum};
use mazetrace::{
    generators::{Generator, generate_maze_with_rng, get_rng},
    maze::Maze,
    solvers::{Solver, TraversalStatus, solve_maze},
};

/// Generate and solve mazes headlessly and report how long each combination takes.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of maze rows
    #[arg(long, default_value_t = 255)]
    rows: u16,

    /// Number of maze columns
    #[arg(long, default_value_t = 255)]
    cols: u16,

    /// Mazes per generator and solver combination
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Only time this solver. Every solver runs when omitted
    #[arg(long, value_enum)]
    solver: Option<Solver>,
}

impl Args {
    fn solvers(&self) -> Vec<Solver> {
        match self.solver {
            Some(solver) => vec![solver],
            None => Solver::value_variants().to_vec(),
        }
    }
}

fn main() -> Result<(), mazetrace::MazeError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let args = Args::parse();

    let mut maze = Maze::new(args.rows, args.cols)?;
    let goal = (args.rows - 1, args.cols - 1);
    let mut rng = get_rng(args.seed);

    for generator in [Generator::RecurBacktrack, Generator::Kruskal] {
        for solver in args.solvers() {
            let mut generate_time = std::time::Duration::ZERO;
            let mut solve_time = std::time::Duration::ZERO;
            let mut path_total = 0;
            for _ in 0..args.iterations {
                let started = Instant::now();
                generate_maze_with_rng(&mut maze, generator, &mut rng)?;
                generate_time += started.elapsed();

                let started = Instant::now();
                let solution = solve_maze(&maze, solver, (0, 0), goal)?;
                solve_time += started.elapsed();

                if solution.status != TraversalStatus::Found {
                    tracing::error!("{} found no path in a maze made by {}", solver, generator);
                }
                path_total += solution.path_len().unwrap_or(0);
            }
            let runs = args.iterations.max(1) as u32;
            println!(
                "{generator} + {solver}: generate {:?}/maze, solve {:?}/maze, mean path {}",
                generate_time / runs,
                solve_time / runs,
                path_total / args.iterations.max(1),
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_selection() {
        let args = Args::try_parse_from(["profile"]).unwrap();
        assert_eq!(args.solvers(), vec![Solver::Bfs, Solver::Dfs]);

        let args = Args::try_parse_from(["profile", "--solver", "dfs"]).unwrap();
        assert_eq!(args.solver, Some(Solver::Dfs));
        assert_eq!(args.solvers(), vec![Solver::Dfs]);

        assert!(Args::try_parse_from(["profile", "--solver", "astar"]).is_err());
    }
}

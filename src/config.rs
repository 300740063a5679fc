use std::path::PathBuf;

use clap::Parser;

use crate::{
    error::MazeError,
    generators::Generator,
    maze::{Coord, Maze},
};

/// Parse a `ROW,COL` pair.
fn parse_coord(s: &str) -> Result<Coord, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{s}'"))?;
    let row = row
        .trim()
        .parse::<u16>()
        .map_err(|e| format!("invalid row '{row}': {e}"))?;
    let col = col
        .trim()
        .parse::<u16>()
        .map_err(|e| format!("invalid column '{col}': {e}"))?;
    Ok((row, col))
}

/// Generate a perfect maze and watch BFS and DFS find their way through it.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Number of maze rows
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u16).range(1..=i64::from(Config::MAX_DIMENSION)))]
    pub rows: u16,

    /// Number of maze columns
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u16).range(1..=i64::from(Config::MAX_DIMENSION)))]
    pub cols: u16,

    /// Random seed. A fixed seed makes every maze of the session reproducible
    #[arg(long)]
    pub seed: Option<u64>,

    /// Algorithm for the first maze
    #[arg(long, value_enum, default_value_t = Generator::RecurBacktrack)]
    pub generator: Generator,

    /// Delay between traversal steps, in milliseconds
    #[arg(long, default_value_t = 10)]
    pub delay_ms: u64,

    /// Start cell as ROW,COL
    #[arg(long, value_parser = parse_coord, default_value = "0,0")]
    pub start: Coord,

    /// End cell as ROW,COL. Defaults to the bottom-right cell
    #[arg(long, value_parser = parse_coord)]
    pub end: Option<Coord>,

    /// Directory for the log file
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,

    /// Maximum log level (error, warn, info, debug, trace)
    #[arg(long, default_value_t = tracing::Level::INFO)]
    pub log_level: tracing::Level,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rows: 30,
            cols: 30,
            seed: None,
            generator: Generator::RecurBacktrack,
            delay_ms: 10,
            start: (0, 0),
            end: None,
            log_dir: PathBuf::from("logs"),
            log_level: tracing::Level::INFO,
        }
    }
}

impl Config {
    /// Largest accepted row or column count, so the drawn lattice still fits a terminal coordinate
    pub const MAX_DIMENSION: u16 = 4096;

    /// The end cell, resolved against the grid dimensions.
    pub fn end(&self) -> Coord {
        self.end
            .unwrap_or((self.rows.saturating_sub(1), self.cols.saturating_sub(1)))
    }

    /// Rejects empty or oversized grids and endpoints outside the grid, and returns the
    /// blank maze the configuration describes.
    pub fn validate(&self) -> Result<Maze, MazeError> {
        let allowed = 1..=Self::MAX_DIMENSION;
        if !allowed.contains(&self.rows) || !allowed.contains(&self.cols) {
            return Err(MazeError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
                max: Self::MAX_DIMENSION,
            });
        }
        let maze = Maze::new(self.rows, self.cols)?;
        maze.check_in_bounds(self.start)?;
        maze.check_in_bounds(self.end())?;
        Ok(maze)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("3,4"), Ok((3, 4)));
        assert_eq!(parse_coord(" 0 , 12 "), Ok((0, 12)));
        assert!(parse_coord("3;4").is_err());
        assert!(parse_coord("-1,2").is_err());
    }

    #[test]
    fn test_defaults_match_parser() {
        let parsed = Config::try_parse_from(["mazetrace"]).unwrap();
        let default = Config::default();
        assert_eq!(parsed.rows, default.rows);
        assert_eq!(parsed.cols, default.cols);
        assert_eq!(parsed.start, default.start);
        assert_eq!(parsed.end(), (29, 29));
        assert_eq!(parsed.generator, Generator::RecurBacktrack);
        assert_eq!(parsed.log_level, tracing::Level::INFO);
    }

    #[test]
    fn test_parse_arguments() {
        let config = Config::try_parse_from([
            "mazetrace",
            "--rows",
            "3",
            "--cols",
            "5",
            "--seed",
            "42",
            "--generator",
            "kruskal",
            "--end",
            "1,2",
        ])
        .unwrap();
        assert_eq!((config.rows, config.cols), (3, 5));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.generator, Generator::Kruskal);
        assert_eq!(config.end(), (1, 2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_dimension_limits() {
        assert!(Config::try_parse_from(["mazetrace", "--rows", "0"]).is_err());
        assert!(Config::try_parse_from(["mazetrace", "--cols", "5000"]).is_err());
        assert!(Config::try_parse_from(["mazetrace", "--cols", "4096"]).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_coordinates() {
        let config = Config {
            rows: 4,
            cols: 4,
            end: Some((4, 0)),
            ..Config::default()
        };
        assert_eq!(
            config.validate().err(),
            Some(MazeError::InvalidCoordinate {
                coord: (4, 0),
                rows: 4,
                cols: 4
            })
        );

        let config = Config {
            rows: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MazeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_validate_enforces_dimension_cap() {
        // Built directly, so clap's range check never ran
        let config = Config {
            rows: 40000,
            cols: 2,
            ..Config::default()
        };
        assert_eq!(
            config.validate().err(),
            Some(MazeError::InvalidDimensions {
                rows: 40000,
                cols: 2,
                max: Config::MAX_DIMENSION
            })
        );

        let config = Config {
            rows: 3,
            cols: Config::MAX_DIMENSION + 1,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            rows: Config::MAX_DIMENSION,
            cols: 1,
            ..Config::default()
        };
        let maze = config.validate().unwrap();
        assert_eq!((maze.rows(), maze.cols()), (Config::MAX_DIMENSION, 1));
    }
}

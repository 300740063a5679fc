use clap::Parser;
use tracing_appender::{non_blocking::WorkerGuard, rolling};

use mazetrace::{app::App, config::Config};

/// Log to a file: the terminal belongs to the maze while the app runs.
fn init_logging(config: &Config) -> std::io::Result<WorkerGuard> {
    let file_appender = rolling::RollingFileAppender::builder()
        .rotation(rolling::Rotation::NEVER)
        .filename_prefix("mazetrace.log")
        .build(&config.log_dir)
        .map_err(std::io::Error::other)?;
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(config.log_level)
        .init();
    Ok(guard)
}

fn main() -> std::io::Result<()> {
    let config = Config::parse();
    // Keep the guard alive so buffered log lines are flushed on exit
    let guard = init_logging(&config)?;

    let mut app = match App::new(&config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            eprintln!("{e}");
            // `exit` skips destructors, so flush the log writer first
            drop(guard);
            std::process::exit(2);
        }
    };
    tracing::info!("Starting with {:?}", config);

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = app.run();
    App::restore_terminal(&mut stdout)?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dropping_guard_flushes_log_file() {
        let log_dir = std::env::temp_dir().join(format!("mazetrace-log-{}", std::process::id()));
        let config = Config {
            log_dir: log_dir.clone(),
            ..Config::default()
        };
        let guard = init_logging(&config).unwrap();
        tracing::error!("Invalid configuration: flushed before exit");
        drop(guard);

        let written = std::fs::read_to_string(log_dir.join("mazetrace.log")).unwrap();
        assert!(written.contains("Invalid configuration: flushed before exit"));
        std::fs::remove_dir_all(&log_dir).unwrap();
    }
}

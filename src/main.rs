mod calc;
mod cmd;
mod data;
mod ui;

use clap::{Parser, Subcommand};
use flexi_logger::{FileSpec, Logger};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "datepick", about = "pick a booking date from an availability calendar")]
struct Cli {
    /// Path to the data directory containing config and availability files (default: ./config)
    #[arg(long, default_value = "./config")]
    data_dir: PathBuf,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write default config and availability files
    Init,
    /// Print one month non-interactively
    Show {
        /// Month to show as YYYY-MM (default: current month)
        #[arg(short, long)]
        month: Option<String>,
        /// Print the rendered grid as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Keep the handle alive so file output is flushed on exit.
    let _logger = init_logging(cli.log_file.as_deref())?;

    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };
    data::persistence::set_data_dir(data_dir.clone());

    // Auto-init when the data directory is missing or empty and the user did not
    // explicitly invoke the `init` subcommand.
    let is_init_command = matches!(cli.command, Some(Commands::Init));
    if !is_init_command && dir_needs_init(&data_dir) {
        eprintln!(
            "Data directory '{}' is missing or empty, running init...",
            data_dir.display()
        );
        cmd::init::run()?;
    }

    match cli.command {
        None => cmd::root::run(),
        Some(Commands::Init) => cmd::init::run(),
        Some(Commands::Show { month, json }) => cmd::show::run(month.as_deref(), json),
    }
}

/// Stderr at `warn` by default so the TUI stays clean; a log file gets `debug`.
/// `RUST_LOG` overrides either.
fn init_logging(log_file: Option<&Path>) -> anyhow::Result<flexi_logger::LoggerHandle> {
    let default_level = if log_file.is_some() { "debug" } else { "warn" };
    let mut logger = Logger::try_with_env_or_str(default_level)?;
    if let Some(path) = log_file {
        logger = logger.log_to_file(FileSpec::try_from(path)?);
    }
    Ok(logger.start()?)
}

/// Returns true when `dir` does not exist or exists but contains no files.
fn dir_needs_init(dir: &Path) -> bool {
    if !dir.exists() {
        return true;
    }
    dir.read_dir()
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_dir_needs_init_nonexistent() {
        let tmp = TempDir::new().unwrap();
        assert!(dir_needs_init(&tmp.path().join("does_not_exist")));
    }

    #[test]
    fn test_dir_needs_init_empty_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(dir_needs_init(tmp.path()));
    }

    #[test]
    fn test_dir_needs_init_after_init() {
        let tmp = TempDir::new().unwrap();
        cmd::init::run_in_dir(tmp.path()).unwrap();
        assert!(!dir_needs_init(tmp.path()));
        fs::remove_file(tmp.path().join("config.yaml")).unwrap();
        assert!(!dir_needs_init(tmp.path()));
    }

    #[test]
    fn test_cli_parses_show_flags() {
        let cli = Cli::try_parse_from(["datepick", "show", "--month", "2024-03", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Show { month, json }) => {
                assert_eq!(month.as_deref(), Some("2024-03"));
                assert!(json);
            }
            _ => panic!("expected show command"),
        }
        assert_eq!(cli.data_dir, PathBuf::from("./config"));
    }

    #[test]
    fn test_cli_no_subcommand_runs_picker() {
        let cli = Cli::try_parse_from(["datepick", "--log-file", "/tmp/dp.log"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/dp.log")));
    }
}

//! Command line front end for the N-Queens decision-diagram assistant

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nqueens_bdd::{
    bdd::Cell,
    config::{CliOverrides, OutputFormat, Settings},
    queens::{InferenceStrategy, Placement, QueensBoard},
    utils::{BoardFormatter, ColorOutput},
};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nqueens_bdd")]
#[command(about = "N-Queens assistant backed by binary decision diagrams")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Place queens on a board and show what follows from them
    Play {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Board size (overrides config)
        #[arg(short, long)]
        size: Option<usize>,

        /// Inference strategy (overrides config)
        #[arg(long, value_enum)]
        strategy: Option<InferenceStrategy>,

        /// Queen to place, as `col,row` (repeatable)
        #[arg(short, long = "queen")]
        queens: Vec<Cell>,

        /// Print the board after every placement
        #[arg(long)]
        show_steps: bool,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Build the formula for a board size and report on it
    Analyze {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Board size (overrides config)
        #[arg(short, long)]
        size: Option<usize>,

        /// Engine node limit (overrides config)
        #[arg(long)]
        node_limit: Option<usize>,
    },

    /// Create a default configuration file
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Play { verbose: true, .. });
    init_tracing(verbose);

    match cli.command {
        Commands::Play { config, size, strategy, queens, show_steps, json, verbose: _ } => {
            let overrides = CliOverrides {
                size,
                strategy,
                node_limit: None,
                format: json.then_some(OutputFormat::Json),
            };
            play_command(config, overrides, queens, show_steps)
        }
        Commands::Analyze { config, size, node_limit } => {
            let overrides = CliOverrides {
                size,
                node_limit,
                ..CliOverrides::default()
            };
            analyze_command(config, overrides)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(config_path: &PathBuf, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        Settings::default()
    };

    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;
    Ok(settings)
}

fn play_command(
    config_path: PathBuf,
    overrides: CliOverrides,
    queens: Vec<Cell>,
    show_steps: bool,
) -> Result<()> {
    let settings = load_settings(&config_path, &overrides)?;
    let format = settings.output.format;
    let text = format == OutputFormat::Text;

    if text {
        println!("{}", ColorOutput::info(&format!(
            "♛ Building {}x{} board...", settings.board.size, settings.board.size
        )));
    }
    let mut board = QueensBoard::from_settings(&settings)
        .context("Failed to build the placement formula")?;

    for cell in queens {
        match board.insert(cell).with_context(|| format!("Failed to place a queen at {}", cell))? {
            Placement::Placed(report) => {
                if text {
                    println!("{}", ColorOutput::success(&format!(
                        "Placed queen at {} ({} forbidden, {} forced)",
                        cell, report.forbidden, report.forced
                    )));
                }
            }
            Placement::AlreadyDecided(verdict) => {
                if text {
                    println!("{}", ColorOutput::warning(&format!(
                        "Skipped {}: cell is already {:?}", cell, verdict
                    )));
                }
            }
        }

        if show_steps && text {
            println!("{}", BoardFormatter::format_grid_with_coords(board.grid()));
        }
    }

    println!("{}", BoardFormatter::render(&board, format)?);

    if text && !board.rows_without_candidates().is_empty() {
        println!("{}", ColorOutput::error("❌ These placements admit no solution"));
    }

    Ok(())
}

fn analyze_command(config_path: PathBuf, overrides: CliOverrides) -> Result<()> {
    let settings = load_settings(&config_path, &overrides)?;

    println!("{}", ColorOutput::info("🔬 Analyzing placement formula..."));
    let start_time = Instant::now();
    let board = QueensBoard::from_settings(&settings)
        .context("Failed to build the placement formula")?;
    let total_time = start_time.elapsed();

    let statistics = board.statistics();
    println!("{}", statistics.build);
    println!("{}", statistics);
    println!("Initial board ({:.3}s):", total_time.as_secs_f64());
    println!("{}", BoardFormatter::format_grid_with_coords(board.grid()));

    if let Some(witness) = board.witness() {
        let cells: Vec<String> = witness.iter().map(|cell| cell.to_string()).collect();
        println!("Example solution: {}", cells.join(" "));
    } else {
        println!("{}", ColorOutput::warning("No solution exists for this board size"));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up configuration..."));

    let config_dir = directory.join("config");
    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create directory {}", config_dir.display()))?;

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default().to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit {}", config_path.display());
    println!("2. Run: cargo run -- play --queen 0,0 --queen 2,1");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "nqueens_bdd",
            "play",
            "--size", "6",
            "--queen", "1,0",
            "-q", "3,1",
            "--strategy", "row-and-column-singletons",
        ]);

        let Ok(Cli { command: Commands::Play { size, queens, strategy, .. } }) = cli else {
            panic!("play command did not parse");
        };
        assert_eq!(size, Some(6));
        assert_eq!(queens, vec![Cell::new(1, 0), Cell::new(3, 1)]);
        assert_eq!(strategy, Some(InferenceStrategy::RowAndColumnSingletons));
    }

    #[test]
    fn test_bad_queen_is_rejected() {
        let cli = Cli::try_parse_from(["nqueens_bdd", "play", "--queen", "1"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        let config_path = temp_dir.path().join("config/default.yaml");
        assert!(config_path.exists());
        assert!(Settings::from_file(&config_path).is_ok());
    }

    #[test]
    fn test_play_command() {
        let overrides = CliOverrides {
            size: Some(4),
            ..CliOverrides::default()
        };
        let result = play_command(
            PathBuf::from("does/not/exist.yaml"),
            overrides,
            vec![Cell::new(1, 0), Cell::new(0, 0)],
            true,
        );

        assert!(result.is_ok());
    }
}

//! Turf CLI - play or simulate territory games from the command line.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use turf::GameConfig;
use turf::config::DEFAULT_ROUNDS;

/// Turf - a territory-claiming polyomino tile game
#[derive(Parser, Debug)]
#[command(name = "turf")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play an interactive game in the terminal
    Play {
        /// Number of players (2-9)
        #[arg(short, long, default_value = "2")]
        players: usize,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Tile rounds after the starting placement
        #[arg(short, long, default_value_t = DEFAULT_ROUNDS)]
        rounds: u32,

        /// Disable coloured output
        #[arg(long)]
        no_color: bool,
    },

    /// Run many autoplayed games in parallel and aggregate statistics
    Simulate {
        /// Number of players (2-9)
        #[arg(short, long, default_value = "2")]
        players: usize,

        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Tile rounds after the starting placement
        #[arg(short, long, default_value_t = DEFAULT_ROUNDS)]
        rounds: u32,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(long)]
        progress: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    let result = match args.command {
        Commands::Play {
            players,
            seed,
            rounds,
            no_color,
        } => {
            let mut config = GameConfig::new(players).with_rounds(rounds);
            config.seed = seed;
            cli::play::execute(config, !no_color)
        }

        Commands::Simulate {
            players,
            games,
            seed,
            rounds,
            threads,
            format,
            progress,
        } => {
            let config = GameConfig::new(players).with_rounds(rounds);
            cli::simulate::execute(config, games, seed, threads, format, progress)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

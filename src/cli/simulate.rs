//! Simulate command implementation.

use super::output::{JsonSimulationResult, SimulationStats, format_simulation_text};
use super::{CliError, OutputFormat};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;
use tracing::warn;
use turf::autoplay::RandomInput;
use turf::game::{NullObserver, check_invariants};
use turf::{GameConfig, GameState};

/// Play one autoplayed game and fold its result into `stats`.
fn run_game(config: GameConfig, seed: u64, stats: &mut SimulationStats) {
    let mut state = match GameState::new(config.with_seed(seed)) {
        Ok(state) => state,
        Err(e) => {
            warn!(seed, error = %e, "game setup failed");
            stats.failed += 1;
            return;
        }
    };

    let mut input = RandomInput::new(seed);
    match state.play(&mut input, &mut NullObserver) {
        Ok(outcome) => {
            let violations = check_invariants(&state);
            if !violations.is_empty() {
                warn!(seed, count = violations.len(), first = %violations[0], "invariant violations");
                stats.invariant_failures += 1;
            }
            stats.add_outcome(&outcome);
        }
        Err(e) => {
            warn!(seed, error = %e, "game failed");
            stats.failed += 1;
        }
    }
}

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or output fails.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn execute(
    config: GameConfig,
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    format: OutputFormat,
    progress: bool,
) -> Result<(), CliError> {
    config.validate()?;

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed.unwrap_or_else(rand::random);

    // Progress bar
    let pb = if progress {
        let pb = ProgressBar::new(games);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let num_players = config.players;

    // Each thread accumulates into its own SimulationStats, merged at the end
    let stats = (0..games)
        .into_par_iter()
        .fold(
            || SimulationStats::new(num_players),
            |mut local_stats, i| {
                run_game(config, base_seed.wrapping_add(i), &mut local_stats);
                if let Some(pb) = &pb {
                    pb.inc(1);
                }
                local_stats
            },
        )
        .reduce(
            || SimulationStats::new(num_players),
            |mut a, b| {
                a.merge(&b);
                a
            },
        );

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        OutputFormat::Text => {
            println!();
            print!("{}", format_simulation_text(&stats));
            println!();
            println!("Base seed: {base_seed}");
            println!("Duration: {:.2}s ({:.0} games/sec)", duration.as_secs_f64(), games_per_sec);
        }
        OutputFormat::Json => {
            let json_result = JsonSimulationResult::from_stats(&stats);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}

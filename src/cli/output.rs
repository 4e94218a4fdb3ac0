//! Output formatting utilities for CLI.

// Allow format! with push_str for readability, and float conversion of counters
#![allow(clippy::format_push_string, clippy::cast_precision_loss)]

use serde::Serialize;
use turf::GameOutcome;

/// Aggregated statistics over many games.
#[derive(Debug, Default)]
pub(super) struct SimulationStats {
    /// Games that finished.
    pub(super) games_played: u64,
    /// Games that failed to set up or run.
    pub(super) failed: u64,
    /// Games whose final state broke an invariant.
    pub(super) invariant_failures: u64,
    /// Win count per player.
    pub(super) wins: Vec<u64>,
    /// Total square side per player.
    total_sides: Vec<u64>,
    /// Square side sum of squares for std dev calculation.
    side_sq_sums: Vec<u64>,
    /// Total territory cells per player.
    total_territory: Vec<u64>,
    /// Largest square seen in any game.
    pub(super) best_side: u16,
}

impl SimulationStats {
    /// Create new stats for n players.
    pub(super) fn new(num_players: usize) -> Self {
        Self {
            wins: vec![0; num_players],
            total_sides: vec![0; num_players],
            side_sq_sums: vec![0; num_players],
            total_territory: vec![0; num_players],
            ..Self::default()
        }
    }

    /// Add a game outcome to the stats.
    pub(super) fn add_outcome(&mut self, outcome: &GameOutcome) {
        self.games_played += 1;

        if let Some(winner) = outcome.winner {
            if let Some(wins) = self.wins.get_mut(winner) {
                *wins += 1;
            }
        }

        for (i, score) in outcome.scores.iter().enumerate() {
            if i < self.total_sides.len() {
                let side = u64::from(score.side);
                self.total_sides[i] += side;
                self.side_sq_sums[i] += side * side;
            }
            self.best_side = self.best_side.max(score.side);
        }

        for (i, cells) in outcome.territory.iter().enumerate() {
            if let Some(total) = self.total_territory.get_mut(i) {
                *total += u64::try_from(*cells).unwrap_or(u64::MAX);
            }
        }
    }

    /// Merge stats from another accumulator.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.failed += other.failed;
        self.invariant_failures += other.invariant_failures;
        self.best_side = self.best_side.max(other.best_side);
        for (a, b) in self.wins.iter_mut().zip(&other.wins) {
            *a += b;
        }
        for (a, b) in self.total_sides.iter_mut().zip(&other.total_sides) {
            *a += b;
        }
        for (a, b) in self.side_sq_sums.iter_mut().zip(&other.side_sq_sums) {
            *a += b;
        }
        for (a, b) in self.total_territory.iter_mut().zip(&other.total_territory) {
            *a += b;
        }
    }

    /// Get win rate for a player (0.0-1.0).
    pub(super) fn win_rate(&self, player_idx: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.wins.get(player_idx).copied().unwrap_or(0) as f64 / self.games_played as f64
    }

    /// Get average square side for a player.
    pub(super) fn avg_side(&self, player_idx: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_sides.get(player_idx).copied().unwrap_or(0) as f64 / self.games_played as f64
    }

    /// Get square side standard deviation for a player.
    pub(super) fn side_std_dev(&self, player_idx: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        let n = self.games_played as f64;
        let mean = self.avg_side(player_idx);
        let sq_sum = self.side_sq_sums.get(player_idx).copied().unwrap_or(0) as f64;
        let variance = (sq_sum / n) - (mean * mean);
        if variance < 0.0 { 0.0 } else { variance.sqrt() }
    }

    /// Get average territory for a player.
    pub(super) fn avg_territory(&self, player_idx: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_territory.get(player_idx).copied().unwrap_or(0) as f64
            / self.games_played as f64
    }
}

/// JSON-serializable simulation result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSimulationResult {
    /// Players per game.
    players_per_game: usize,
    /// Total games played.
    games_played: u64,
    /// Games that failed.
    failed: u64,
    /// Games with invariant violations.
    invariant_failures: u64,
    /// Largest square seen.
    best_side: u16,
    /// Per-player statistics.
    players: Vec<JsonSimulationPlayer>,
}

/// JSON-serializable per-seat statistics.
#[derive(Debug, Serialize)]
pub(super) struct JsonSimulationPlayer {
    /// Seat (1-based).
    player: usize,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Average square side.
    avg_side: f64,
    /// Square side standard deviation.
    side_std_dev: f64,
    /// Average territory cells.
    avg_territory: f64,
}

impl JsonSimulationResult {
    /// Create from stats.
    pub(super) fn from_stats(stats: &SimulationStats) -> Self {
        let players = (0..stats.wins.len())
            .map(|i| JsonSimulationPlayer {
                player: i + 1,
                wins: stats.wins[i],
                win_rate: stats.win_rate(i),
                avg_side: stats.avg_side(i),
                side_std_dev: stats.side_std_dev(i),
                avg_territory: stats.avg_territory(i),
            })
            .collect();

        Self {
            players_per_game: stats.wins.len(),
            games_played: stats.games_played,
            failed: stats.failed,
            invariant_failures: stats.invariant_failures,
            best_side: stats.best_side,
            players,
        }
    }
}

/// Format simulation stats as human-readable text.
pub(super) fn format_simulation_text(stats: &SimulationStats) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Simulation Results ({} games, {} players)\n",
        stats.games_played,
        stats.wins.len()
    ));
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for (i, wins) in stats.wins.iter().enumerate() {
        output.push_str(&format!(
            "  Player {}: {:.1}% ({wins} wins)\n",
            i + 1,
            stats.win_rate(i) * 100.0
        ));
    }

    output.push_str("\nAverage Square Side:\n");
    for i in 0..stats.wins.len() {
        output.push_str(&format!(
            "  Player {}: {:.2} (+/- {:.2}), {:.1} cells\n",
            i + 1,
            stats.avg_side(i),
            stats.side_std_dev(i),
            stats.avg_territory(i)
        ));
    }

    output.push_str(&format!("\nLargest Square: {0}x{0}\n", stats.best_side));
    if stats.failed > 0 {
        output.push_str(&format!("Failed games: {}\n", stats.failed));
    }
    if stats.invariant_failures > 0 {
        output.push_str(&format!(
            "Games with invariant violations: {}\n",
            stats.invariant_failures
        ));
    }

    output
}

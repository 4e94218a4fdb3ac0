//! Game configuration and rule constants.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// Fewest players a game supports.
pub const MIN_PLAYERS: usize = 2;

/// Most players a game supports.
pub const MAX_PLAYERS: usize = 9;

/// Tile rounds played after the starting placement.
pub const DEFAULT_ROUNDS: u32 = 9;

/// Number of tiles after the front of the supply offered for exchange.
pub const UPCOMING_TILES: usize = 5;

/// Attempts allowed when seeding a single bonus cell.
pub const BONUS_PLACEMENT_ATTEMPTS: u32 = 100;

/// Exchange coupons every player starts with.
pub const STARTING_COUPONS: u32 = 1;

/// Side length of the square board for a given player count.
#[must_use]
pub const fn board_side(players: usize) -> u16 {
    if players < 5 { 20 } else { 30 }
}

/// Number of tiles in the supply: `ceil(32 * players / 3)`.
#[must_use]
pub const fn supply_size(players: usize) -> usize {
    (players * 32).div_ceil(3)
}

/// Settings for a single game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of players (2-9).
    pub players: usize,
    /// Tile rounds after the starting placement.
    pub rounds: u32,
    /// Seed for the session's random source (entropy when `None`).
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: MIN_PLAYERS,
            rounds: DEFAULT_ROUNDS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a config for `players` with default rounds and no fixed seed.
    #[must_use]
    pub fn new(players: usize) -> Self {
        Self {
            players,
            ..Self::default()
        }
    }

    /// Builder-style seed override.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder-style round count override.
    #[must_use]
    pub const fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Check the player count.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidPlayerCount`] outside `2..=9`.
    pub fn validate(&self) -> GameResult<()> {
        if (MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players) {
            Ok(())
        } else {
            Err(GameError::InvalidPlayerCount(self.players))
        }
    }

    /// Board side length for this config.
    #[must_use]
    pub const fn board_side(&self) -> u16 {
        board_side(self.players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_side() {
        assert_eq!(board_side(2), 20);
        assert_eq!(board_side(4), 20);
        assert_eq!(board_side(5), 30);
        assert_eq!(board_side(9), 30);
    }

    #[test]
    fn test_supply_size_rounds_up() {
        assert_eq!(supply_size(2), 22);
        assert_eq!(supply_size(3), 32);
        assert_eq!(supply_size(4), 43);
        assert_eq!(supply_size(9), 96);
    }

    #[test]
    fn test_validate_player_count() {
        assert!(GameConfig::new(2).validate().is_ok());
        assert!(GameConfig::new(9).validate().is_ok());
        assert_eq!(
            GameConfig::new(1).validate(),
            Err(GameError::InvalidPlayerCount(1))
        );
        assert_eq!(
            GameConfig::new(10).validate(),
            Err(GameError::InvalidPlayerCount(10))
        );
    }

    #[test]
    fn test_builders() {
        let config = GameConfig::new(3).with_seed(7).with_rounds(4);
        assert_eq!(config.players, 3);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.rounds, 4);
    }
}

//! Error types for the territory engine.

use std::fmt;

use crate::game::CellType;

/// Fatal errors raised while building or running a game.
///
/// Recoverable conditions (an illegal placement, a theft that finds nothing)
/// are not errors: the turn resolver re-prompts instead of propagating them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Bonus seeding ran out of attempts before finding an isolated interior cell.
    BoardSetupFailed {
        /// The bonus type being seeded.
        bonus: CellType,
        /// Number of attempts made.
        attempts: u32,
    },
    /// A draw was requested from an exhausted tile supply.
    EmptySupply,
    /// An exchange index did not address a tile in the supply.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of tiles in the supply.
        len: usize,
    },
    /// Player count outside the supported range.
    InvalidPlayerCount(usize),
    /// A shape definition could not be parsed.
    InvalidShape(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::BoardSetupFailed { bonus, attempts } => {
                write!(
                    f,
                    "board setup failed: no isolated empty cell for {bonus:?} after {attempts} attempts"
                )
            }
            GameError::EmptySupply => write!(f, "no more tiles to draw"),
            GameError::IndexOutOfRange { index, len } => {
                write!(f, "tile index {index} out of range (supply holds {len})")
            }
            GameError::InvalidPlayerCount(n) => {
                write!(
                    f,
                    "invalid player count: {n} (expected {}-{})",
                    crate::config::MIN_PLAYERS,
                    crate::config::MAX_PLAYERS
                )
            }
            GameError::InvalidShape(reason) => write!(f, "invalid shape: {reason}"),
        }
    }
}

impl std::error::Error for GameError {}

/// Result type for engine operations.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(GameError::EmptySupply.to_string(), "no more tiles to draw");
        let msg = GameError::IndexOutOfRange { index: 7, len: 3 }.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains('3'));
        assert!(GameError::InvalidPlayerCount(12).to_string().contains("2-9"));
    }

    #[test]
    fn test_setup_failure_names_bonus() {
        let err = GameError::BoardSetupFailed {
            bonus: CellType::BonusRobbery,
            attempts: 100,
        };
        let msg = err.to_string();
        assert!(msg.contains("BonusRobbery"));
        assert!(msg.contains("100"));
    }
}

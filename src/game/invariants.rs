//! Game invariants - sanity checks that detect bugs.
//!
//! The turn rules should never break these. Tests and fuzzing call
//! [`check_invariants`] after every step; a violation is always a bug.

use std::collections::HashSet;

use crate::game::{Board, CellType, GameState};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

fn violation(message: String) -> InvariantViolation {
    InvariantViolation { message }
}

/// Check the invariants that hold for any board built through the game rules.
///
/// - a cell carries an owner and a symbol exactly when it is grass;
/// - bonus cells never sit on the outer ring;
/// - placed tiles lie on the board, never overlap, and cover only grass owned
///   by the tile's owner.
#[must_use]
pub fn check_board(board: &Board) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let last = board.side().saturating_sub(1);

    for (coord, cell) in board.iter() {
        let grass = cell.cell_type == CellType::Grass;
        if grass != cell.owner.is_some() || grass != cell.symbol.is_some() {
            violations.push(violation(format!(
                "Cell at {coord:?} is {:?} with owner {:?} and symbol {:?}",
                cell.cell_type, cell.owner, cell.symbol
            )));
        }

        let on_border = coord.x == 0 || coord.y == 0 || coord.x == last || coord.y == last;
        if cell.cell_type.is_bonus() && on_border {
            violations.push(violation(format!(
                "Bonus {:?} on the border at {coord:?}",
                cell.cell_type
            )));
        }
    }

    let mut covered = HashSet::new();
    for (idx, placed) in board.placed_tiles().iter().enumerate() {
        for coord in placed.footprint() {
            if !covered.insert(coord) {
                violations.push(violation(format!(
                    "Placed tile #{idx} overlaps another tile at {coord:?}"
                )));
            }
            match board.get(coord) {
                Some(cell) if cell.cell_type == CellType::Grass && cell.owner == Some(placed.owner) => {}
                Some(cell) => violations.push(violation(format!(
                    "Placed tile #{idx} of player {} covers {coord:?} holding {:?} owned by {:?}",
                    placed.owner, cell.cell_type, cell.owner
                ))),
                None => violations.push(violation(format!(
                    "Placed tile #{idx} extends off the board at {coord:?}"
                ))),
            }
        }
    }

    violations
}

/// Check all game invariants.
///
/// Adds the session-level checks to [`check_board`]: once round 0 is over,
/// every player owns exactly one tile that cannot be stolen, and no tile
/// record names a player outside the roster.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = check_board(&state.board);

    for placed in state.board.placed_tiles() {
        if !state.players.iter().any(|p| p.id == placed.owner) {
            violations.push(violation(format!(
                "Placed tile owned by unknown player {}",
                placed.owner
            )));
        }
    }

    if state.round > 0 {
        for player in &state.players {
            let starts = state
                .board
                .placed_tiles()
                .iter()
                .filter(|p| p.owner == player.id && !p.stealable)
                .count();
            if starts != 1 {
                violations.push(violation(format!(
                    "Player {} has {starts} unstealable tiles, expected 1",
                    player.id
                )));
            }
        }
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autoplay::RandomInput;
    use crate::config::GameConfig;
    use crate::game::{Cell, Coord, NullObserver, Tile};

    fn started_game() -> GameState {
        let mut state = GameState::new(GameConfig::new(2).with_seed(8)).unwrap();
        state
            .play_round(&mut RandomInput::new(8), &mut NullObserver)
            .unwrap();
        state
    }

    #[test]
    fn test_valid_game_passes() {
        let game = started_game();
        assert!(check_invariants(&game).is_empty());
        assert_invariants(&game);
    }

    #[test]
    fn test_grass_without_owner_detected() {
        let mut game = started_game();
        game.board.set_unchecked(Coord::new(0, 0), Cell::new(CellType::Grass));

        let violations = check_invariants(&game);
        assert!(!violations.is_empty());
        assert!(violations[0].message.contains("owner"));
    }

    #[test]
    fn test_border_bonus_detected() {
        let mut game = started_game();
        game.board.set(Coord::new(0, 5), Cell::new(CellType::BonusRobbery));

        let violations = check_invariants(&game);
        assert!(violations.iter().any(|v| v.message.contains("border")));
    }

    #[test]
    fn test_overwritten_footprint_detected() {
        let mut game = started_game();
        let anchor = game.board.placed_tiles()[0].anchor;
        game.board.set(anchor, Cell::stone());

        let violations = check_invariants(&game);
        assert!(violations.iter().any(|v| v.message.contains("covers")));
    }

    #[test]
    fn test_missing_starting_tile_detected() {
        let mut game = started_game();
        let mut board = Board::empty(game.board.side());
        let placed = game.board.placed_tiles()[0].clone();
        board.place(
            placed.anchor,
            &Tile::starting(),
            &mut game.players[usize::from(placed.owner)],
            false,
        );
        game.board = board;

        let violations = check_invariants(&game);
        assert!(violations.iter().any(|v| v.message.contains("unstealable")));
    }
}

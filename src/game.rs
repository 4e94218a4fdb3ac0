//! Game layer for Turf.
//!
//! Implements the territory rules:
//! - Polyomino shapes and oriented tiles
//! - The shuffled tile supply with skip-ahead exchange
//! - The board with placement legality, bonuses, stones and theft
//! - Largest-square scoring
//! - The per-player turn state machine and the game session

mod board;
mod catalog;
mod invariants;
mod player;
mod scoring;
mod shape;
mod state;
mod supply;
mod turn;

pub use board::{
    AbsorbedBonus, Board, Cell, CellType, Coord, PlacedTile, PlacementReport, SYMBOL_PALETTE,
};
pub use catalog::catalog;
pub use invariants::{InvariantViolation, assert_invariants, check_board, check_invariants};
pub use player::{Player, PlayerColor, PlayerId};
pub use scoring::{TerritoryScore, compute_territory_score, determine_winner, final_scores};
pub use shape::{Rotation, Shape, Tile};
pub use state::{GameOutcome, GameState};
pub use supply::TileSupply;
pub use turn::{
    CoordPurpose, GameObserver, InputSource, Menu, NullObserver, TurnEvent, TurnPhase,
    TurnResolver,
};

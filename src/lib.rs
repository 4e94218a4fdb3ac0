// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Turf: a territory-claiming polyomino tile game engine.
//!
//! Two to nine players take turns laying polyomino tiles on a square board,
//! growing connected territory, picking up bonuses, dropping stones and
//! stealing each other's tiles. After a fixed number of rounds the player
//! holding the largest solid square of territory wins.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI (play / simulate)  Autoplay   │
//! ├─────────────────────────────────────┤
//! │   GameState  ->  TurnResolver       │
//! ├─────────────────────────────────────┤
//! │   Board   TileSupply   Scoring      │
//! ├─────────────────────────────────────┤
//! │   Shape / Tile   Catalogue          │
//! └─────────────────────────────────────┘
//! ```
//!
//! The engine never reads a terminal: decisions come through
//! [`InputSource`] and rendering data goes out through [`GameObserver`].

pub mod autoplay;
pub mod config;
pub mod error;
pub mod game;
pub mod render;

pub use config::GameConfig;
pub use error::{GameError, GameResult};

// Re-export key game types at crate root for convenience
pub use game::{
    Board, Cell, CellType, Coord, GameObserver, GameOutcome, GameState, InputSource, Player,
    PlayerId, Shape, TerritoryScore, Tile, TileSupply, TurnEvent,
};

//! The tile supply queue.

use std::collections::VecDeque;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::supply_size;
use crate::error::{GameError, GameResult};
use crate::game::{Tile, catalog};

/// Ordered, finite supply of tiles built once per game.
///
/// The supply only shrinks: every draw or exchange removes exactly one tile.
#[derive(Debug, Clone)]
pub struct TileSupply {
    tiles: VecDeque<Tile>,
}

impl TileSupply {
    /// Shuffle the catalogue and keep the first `ceil(32 * players / 3)` shapes.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalogue fails to parse.
    pub fn new<R: Rng + ?Sized>(players: usize, rng: &mut R) -> GameResult<Self> {
        let mut shapes = catalog()?;
        shapes.shuffle(rng);
        shapes.truncate(supply_size(players));
        Ok(Self::from_tiles(shapes.into_iter().map(Tile::new)))
    }

    /// Build a supply from tiles in draw order.
    pub fn from_tiles(tiles: impl IntoIterator<Item = Tile>) -> Self {
        Self {
            tiles: tiles.into_iter().collect(),
        }
    }

    /// Number of tiles left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the supply is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Remove and return the front tile.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::EmptySupply`] if no tiles remain.
    pub fn draw(&mut self) -> GameResult<Tile> {
        self.tiles.pop_front().ok_or(GameError::EmptySupply)
    }

    /// Take the tile at `index`, cycling every tile before it to the back.
    ///
    /// Skipped tiles keep their relative order, so `exchange(0)` is a plain draw.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::IndexOutOfRange`] unless `index < len()`.
    pub fn exchange(&mut self, index: usize) -> GameResult<Tile> {
        let len = self.tiles.len();
        if index >= len {
            return Err(GameError::IndexOutOfRange { index, len });
        }
        self.tiles.rotate_left(index);
        self.draw()
    }

    /// View the first `min(n, len())` tiles without changing the supply.
    #[must_use]
    pub fn peek(&self, n: usize) -> Vec<&Tile> {
        self.tiles.iter().take(n).collect()
    }
}

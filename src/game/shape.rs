//! Polyomino masks and oriented tiles.

use std::fmt;

use crate::error::{GameError, GameResult};

/// An immutable polyomino mask stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Shape {
    /// Parse a mask from row strings, `#` marking an occupied cell and `.` an empty one.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidShape`] for an empty or ragged mask, an unknown
    /// character, or a mask with no occupied cell.
    pub fn parse(rows: &[&str]) -> GameResult<Self> {
        let Some(first) = rows.first() else {
            return Err(GameError::InvalidShape("no rows".to_string()));
        };
        let cols = first.chars().count();
        if cols == 0 {
            return Err(GameError::InvalidShape("empty first row".to_string()));
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.chars().count() != cols {
                return Err(GameError::InvalidShape(format!("ragged row {row:?}")));
            }
            for ch in row.chars() {
                match ch {
                    '#' => cells.push(true),
                    '.' => cells.push(false),
                    other => {
                        return Err(GameError::InvalidShape(format!(
                            "unexpected character {other:?}"
                        )));
                    }
                }
            }
        }

        if !cells.iter().any(|&c| c) {
            return Err(GameError::InvalidShape("no occupied cell".to_string()));
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// A 1x1 mask.
    #[must_use]
    pub fn monomino() -> Self {
        Self {
            rows: 1,
            cols: 1,
            cells: vec![true],
        }
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the cell at `(row, col)` is occupied. Out-of-range cells are empty.
    #[must_use]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col]
    }

    /// Iterate `(row, col)` of occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, occupied)| **occupied)
            .map(move |(idx, _)| (idx / cols, idx % cols))
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Rotate 90 degrees clockwise: `rotated[j][rows-1-i] = mask[i][j]`.
    #[must_use]
    pub fn rotate_clockwise(&self) -> Self {
        let (rows, cols) = (self.rows, self.cols);
        // Rotated mask has `rows` columns and `cols` rows.
        let mut cells = vec![false; rows * cols];
        for i in 0..rows {
            for j in 0..cols {
                cells[j * rows + (rows - 1 - i)] = self.cells[i * cols + j];
            }
        }
        Self {
            rows: cols,
            cols: rows,
            cells,
        }
    }

    /// Mirror left-to-right by reversing each row.
    #[must_use]
    pub fn flip_horizontal(&self) -> Self {
        let mut cells = self.cells.clone();
        for row in cells.chunks_mut(self.cols) {
            row.reverse();
        }
        Self {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.cols).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &cell in row {
                write!(f, "{}", if cell { '#' } else { '.' })?;
            }
        }
        Ok(())
    }
}

/// Clockwise rotation applied to a tile's base shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    /// As defined in the catalogue.
    #[default]
    Deg0,
    /// One quarter turn clockwise.
    Deg90,
    /// Half turn.
    Deg180,
    /// Three quarter turns clockwise.
    Deg270,
}

impl Rotation {
    /// All four rotations in clockwise order.
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// The next rotation clockwise.
    #[must_use]
    pub const fn rotate_cw(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    /// Number of clockwise quarter turns.
    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    /// Angle in degrees.
    #[must_use]
    pub const fn degrees(self) -> u16 {
        self.quarter_turns() as u16 * 90
    }
}

/// A base shape plus its current orientation.
///
/// Only the orientation is mutable; the effective mask is recomputed on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    base: Shape,
    rotation: Rotation,
    flipped: bool,
}

impl Tile {
    /// Wrap a shape in its default orientation.
    #[must_use]
    pub const fn new(base: Shape) -> Self {
        Self {
            base,
            rotation: Rotation::Deg0,
            flipped: false,
        }
    }

    /// The 1x1 starting tile.
    #[must_use]
    pub fn starting() -> Self {
        Self::new(Shape::monomino())
    }

    /// The unrotated, unflipped shape.
    #[must_use]
    pub const fn base(&self) -> &Shape {
        &self.base
    }

    /// Current rotation.
    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Whether the tile is mirrored.
    #[must_use]
    pub const fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Turn the tile a quarter clockwise.
    pub fn rotate_clockwise(&mut self) {
        self.rotation = self.rotation.rotate_cw();
    }

    /// Toggle the horizontal mirror.
    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    /// Apply rotation then flip to the base shape.
    #[must_use]
    pub fn effective_mask(&self) -> Shape {
        let mut shape = self.base.clone();
        for _ in 0..self.rotation.quarter_turns() {
            shape = shape.rotate_clockwise();
        }
        if self.flipped {
            shape = shape.flip_horizontal();
        }
        shape
    }

    /// `(row, col)` offsets of occupied cells in the effective mask.
    #[must_use]
    pub fn occupied_offsets(&self) -> Vec<(usize, usize)> {
        self.effective_mask().occupied().collect()
    }

    /// All eight rotation/flip variants of this tile's base shape.
    pub fn orientations(&self) -> impl Iterator<Item = Tile> + '_ {
        [false, true].into_iter().flat_map(move |flipped| {
            Rotation::ALL.into_iter().map(move |rotation| Tile {
                base: self.base.clone(),
                rotation,
                flipped,
            })
        })
    }
}

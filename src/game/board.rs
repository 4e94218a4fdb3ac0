//! The territory board: cells, placement rules, bonuses, stones and theft.

use rand::Rng;
use tracing::debug;

use crate::config::BONUS_PLACEMENT_ATTEMPTS;
use crate::error::{GameError, GameResult};
use crate::game::{Player, PlayerId, Tile};

/// Glyphs given to grass so that neighbouring territories read apart.
pub const SYMBOL_PALETTE: [char; 4] = ['█', '▓', '▒', '░'];

/// A coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct Coord {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Get adjacent coordinates (up, down, left, right).
    ///
    /// Returns a fixed-size array and count to avoid heap allocation.
    /// The array contains valid coordinates in indices 0..count.
    #[must_use]
    #[inline]
    pub fn adjacent(&self, width: u16, height: u16) -> ([Coord; 4], u8) {
        let mut result = [Coord::new(0, 0); 4];
        let mut count = 0u8;

        if self.y > 0 {
            result[count as usize] = Coord::new(self.x, self.y - 1); // up
            count += 1;
        }
        if self.y + 1 < height {
            result[count as usize] = Coord::new(self.x, self.y + 1); // down
            count += 1;
        }
        if self.x > 0 {
            result[count as usize] = Coord::new(self.x - 1, self.y); // left
            count += 1;
        }
        if self.x + 1 < width {
            result[count as usize] = Coord::new(self.x + 1, self.y); // right
            count += 1;
        }

        (result, count)
    }
}

/// What occupies a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[repr(u8)]
pub enum CellType {
    /// Unclaimed ground.
    Empty = 0,
    /// Territory owned by a player.
    Grass = 1,
    /// Blocked by a stone.
    Stone = 2,
    /// Grants an exchange coupon when absorbed.
    BonusExchange = 3,
    /// Grants a stone to place when absorbed.
    BonusStone = 4,
    /// Grants a robbery when absorbed.
    BonusRobbery = 5,
}

impl CellType {
    /// Whether this is one of the three bonus types.
    #[must_use]
    pub const fn is_bonus(self) -> bool {
        matches!(
            self,
            CellType::BonusExchange | CellType::BonusStone | CellType::BonusRobbery
        )
    }

    /// Whether a tile may not be laid over this cell.
    #[must_use]
    pub const fn blocks_placement(self) -> bool {
        matches!(self, CellType::Grass | CellType::Stone)
    }
}

/// A single cell on the board.
///
/// `owner` and `symbol` are set exactly when the cell is grass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// What occupies the cell.
    pub cell_type: CellType,
    /// Owning player (grass only).
    pub owner: Option<PlayerId>,
    /// Display glyph (grass only).
    pub symbol: Option<char>,
}

impl Cell {
    /// An unclaimed cell.
    pub const EMPTY: Cell = Cell::new(CellType::Empty);

    /// An unowned cell of the given type.
    #[must_use]
    pub const fn new(cell_type: CellType) -> Self {
        Self {
            cell_type,
            owner: None,
            symbol: None,
        }
    }

    /// A grass cell owned by `owner`.
    #[must_use]
    pub const fn grass(owner: PlayerId, symbol: char) -> Self {
        Self {
            cell_type: CellType::Grass,
            owner: Some(owner),
            symbol: Some(symbol),
        }
    }

    /// A stone cell.
    #[must_use]
    pub const fn stone() -> Self {
        Self::new(CellType::Stone)
    }

    /// Whether owner and symbol are present exactly when the cell is grass.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        let grass = matches!(self.cell_type, CellType::Grass);
        grass == self.owner.is_some() && grass == self.symbol.is_some()
    }
}

/// A tile that has been committed to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedTile {
    /// The tile in the orientation it was placed with.
    pub tile: Tile,
    /// Board position of the mask's top-left corner.
    pub anchor: Coord,
    /// The player who placed it.
    pub owner: PlayerId,
    /// Whether a robbery may take it.
    pub stealable: bool,
}

impl PlacedTile {
    /// Board coordinates covered by the tile.
    #[must_use]
    pub fn footprint(&self) -> Vec<Coord> {
        self.tile
            .occupied_offsets()
            .into_iter()
            .filter_map(|(row, col)| offset_coord(self.anchor, row, col))
            .collect()
    }

    /// Whether the tile covers `coord`.
    #[must_use]
    pub fn covers(&self, coord: Coord) -> bool {
        self.footprint().contains(&coord)
    }
}

/// A bonus picked up by a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsorbedBonus {
    /// Where the bonus cell was.
    pub coord: Coord,
    /// Which bonus it was.
    pub bonus: CellType,
}

/// Outcome of committing a placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementReport {
    /// Cells now covered by the tile.
    pub footprint: Vec<Coord>,
    /// Glyph assigned to the new grass.
    pub symbol: char,
    /// Bonuses resolved by the placement, in resolution order.
    pub absorbed: Vec<AbsorbedBonus>,
}

/// The square game board.
#[derive(Debug, Clone)]
pub struct Board {
    /// Side length in cells.
    side: u16,
    /// Cells stored in row-major order.
    cells: Vec<Cell>,
    /// Committed tiles in placement order.
    placed: Vec<PlacedTile>,
}

/// `anchor` shifted by a mask offset, or `None` past `u16::MAX`.
fn offset_coord(anchor: Coord, row: usize, col: usize) -> Option<Coord> {
    let x = anchor.x.checked_add(u16::try_from(col).ok()?)?;
    let y = anchor.y.checked_add(u16::try_from(row).ok()?)?;
    Some(Coord::new(x, y))
}

impl Board {
    /// Create a board for `players` and seed its bonus cells.
    ///
    /// Seeds `ceil(1.5n)` exchange, `ceil(0.5n)` stone and `n` robbery bonuses.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::BoardSetupFailed`] if a bonus cannot be seeded.
    pub fn new<R: Rng + ?Sized>(players: usize, rng: &mut R) -> GameResult<Self> {
        let mut board = Self::empty(crate::config::board_side(players));

        let exchange = (players * 3).div_ceil(2);
        let stone = players.div_ceil(2);
        let robbery = players;

        for _ in 0..exchange {
            board.seed_bonus(CellType::BonusExchange, rng)?;
        }
        for _ in 0..stone {
            board.seed_bonus(CellType::BonusStone, rng)?;
        }
        for _ in 0..robbery {
            board.seed_bonus(CellType::BonusRobbery, rng)?;
        }

        Ok(board)
    }

    /// Create an all-empty board with no bonuses.
    #[must_use]
    pub fn empty(side: u16) -> Self {
        let size = usize::from(side) * usize::from(side);
        Self {
            side,
            cells: vec![Cell::EMPTY; size],
            placed: Vec::new(),
        }
    }

    /// Place one bonus on a random interior cell isolated from other non-empty cells.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::BoardSetupFailed`] after
    /// [`BONUS_PLACEMENT_ATTEMPTS`] misses, or at once on a board with no interior.
    pub fn seed_bonus<R: Rng + ?Sized>(&mut self, bonus: CellType, rng: &mut R) -> GameResult<()> {
        if self.side < 3 {
            return Err(GameError::BoardSetupFailed { bonus, attempts: 0 });
        }

        for _ in 0..BONUS_PLACEMENT_ATTEMPTS {
            let coord = Coord::new(
                rng.gen_range(1..self.side - 1),
                rng.gen_range(1..self.side - 1),
            );
            let (adjacent, count) = coord.adjacent(self.side, self.side);
            let isolated = self.cell(coord).cell_type == CellType::Empty
                && adjacent[..count as usize]
                    .iter()
                    .all(|n| self.cell(*n).cell_type == CellType::Empty);
            if isolated {
                let idx = self.index(coord);
                self.cells[idx] = Cell::new(bonus);
                debug!(?bonus, x = coord.x, y = coord.y, "seeded bonus");
                return Ok(());
            }
        }

        Err(GameError::BoardSetupFailed {
            bonus,
            attempts: BONUS_PLACEMENT_ATTEMPTS,
        })
    }

    /// Side length in cells.
    #[must_use]
    pub const fn side(&self) -> u16 {
        self.side
    }

    /// Check if a coordinate is within the board.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.side && coord.y < self.side
    }

    fn index(&self, coord: Coord) -> usize {
        usize::from(coord.y) * usize::from(self.side) + usize::from(coord.x)
    }

    fn cell(&self, coord: Coord) -> &Cell {
        &self.cells[self.index(coord)]
    }

    /// Get the cell at the given coordinate.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        self.in_bounds(coord).then(|| self.cell(coord))
    }

    /// Overwrite a cell, bypassing the placement rules.
    ///
    /// Returns `false` and changes nothing if the coordinate is out of bounds
    /// or the cell carries an owner or symbol without being grass (or the reverse).
    pub fn set(&mut self, coord: Coord, cell: Cell) -> bool {
        if !self.in_bounds(coord) || !cell.is_consistent() {
            return false;
        }
        let idx = self.index(coord);
        self.cells[idx] = cell;
        true
    }

    /// Overwrite a cell with no checks at all, for corrupting boards in tests.
    #[cfg(test)]
    pub(crate) fn set_unchecked(&mut self, coord: Coord, cell: Cell) {
        let idx = self.index(coord);
        self.cells[idx] = cell;
    }

    /// Iterate over all coordinates and cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> {
        let side = usize::from(self.side);
        self.cells.iter().enumerate().map(move |(idx, cell)| {
            #[allow(clippy::cast_possible_truncation)]
            let coord = Coord::new((idx % side) as u16, (idx / side) as u16);
            (coord, cell)
        })
    }

    /// Committed tiles in placement order.
    #[must_use]
    pub fn placed_tiles(&self) -> &[PlacedTile] {
        &self.placed
    }

    /// Number of grass cells owned by a player.
    #[must_use]
    pub fn territory_size(&self, player: PlayerId) -> usize {
        self.cells
            .iter()
            .filter(|c| c.cell_type == CellType::Grass && c.owner == Some(player))
            .count()
    }

    /// Number of stones on the board.
    #[must_use]
    pub fn stone_count(&self) -> usize {
        self.count_type(CellType::Stone)
    }

    /// Number of cells of the given type.
    #[must_use]
    pub fn count_type(&self, cell_type: CellType) -> usize {
        self.cells.iter().filter(|c| c.cell_type == cell_type).count()
    }

    /// Whether at least one cell is empty.
    #[must_use]
    pub fn has_empty_cell(&self) -> bool {
        self.cells.iter().any(|c| c.cell_type == CellType::Empty)
    }

    /// Board coordinates of `tile`'s occupied cells at `anchor`, or `None` if any falls outside.
    #[must_use]
    pub fn footprint(&self, anchor: Coord, tile: &Tile) -> Option<Vec<Coord>> {
        tile.effective_mask()
            .occupied()
            .map(|(row, col)| offset_coord(anchor, row, col).filter(|c| self.in_bounds(*c)))
            .collect()
    }

    /// Check whether `player` may lay `tile` with its top-left corner at `anchor`.
    ///
    /// Every covered cell must be on the board and not grass or stone, and no
    /// covered cell may border another player's grass. Unless this is the
    /// starting placement, at least one covered cell must border the player's own grass.
    #[must_use]
    pub fn can_place(&self, anchor: Coord, tile: &Tile, player: PlayerId, is_starting: bool) -> bool {
        let Some(footprint) = self.footprint(anchor, tile) else {
            return false;
        };

        let mut touches_own = false;
        for coord in footprint {
            if self.cell(coord).cell_type.blocks_placement() {
                return false;
            }

            let (adjacent, count) = coord.adjacent(self.side, self.side);
            for neighbour in &adjacent[..count as usize] {
                match self.cell(*neighbour).owner {
                    Some(owner) if owner != player => return false,
                    Some(_) => touches_own = true,
                    None => {}
                }
            }
        }

        is_starting || touches_own
    }

    /// Whether `tile`, as currently oriented, fits anywhere under the non-starting rule.
    #[must_use]
    pub fn can_place_anywhere(&self, tile: &Tile, player: PlayerId) -> bool {
        (0..self.side).any(|y| {
            (0..self.side).any(|x| self.can_place(Coord::new(x, y), tile, player, false))
        })
    }

    /// Whether any rotation or flip of `tile` fits anywhere under the non-starting rule.
    #[must_use]
    pub fn can_place_any_orientation(&self, tile: &Tile, player: PlayerId) -> bool {
        tile.orientations()
            .any(|oriented| self.can_place_anywhere(&oriented, player))
    }

    /// First palette glyph not used by grass bordering `footprint`.
    fn choose_symbol(&self, footprint: &[Coord]) -> char {
        let mut used = [false; SYMBOL_PALETTE.len()];
        for coord in footprint {
            let (adjacent, count) = coord.adjacent(self.side, self.side);
            for neighbour in &adjacent[..count as usize] {
                let cell = self.cell(*neighbour);
                if cell.cell_type != CellType::Grass {
                    continue;
                }
                if let Some(pos) = cell
                    .symbol
                    .and_then(|s| SYMBOL_PALETTE.iter().position(|&p| p == s))
                {
                    used[pos] = true;
                }
            }
        }

        SYMBOL_PALETTE
            .iter()
            .zip(used)
            .find(|(_, taken)| !taken)
            .map_or(SYMBOL_PALETTE[0], |(symbol, _)| *symbol)
    }

    /// Commit a placement that [`Board::can_place`] has accepted.
    ///
    /// Covered cells become the player's grass first; only then are bonuses
    /// resolved, both those the tile was laid over and those bordering it, so
    /// the tile's own cells are never mistaken for bonuses. Each bonus bumps the
    /// matching counter on `player` and a bordering bonus cell joins the
    /// player's territory.
    ///
    /// Returns `None` and leaves the board untouched if any covered cell would
    /// fall off the board.
    pub fn place(
        &mut self,
        anchor: Coord,
        tile: &Tile,
        player: &mut Player,
        stealable: bool,
    ) -> Option<PlacementReport> {
        let footprint = self.footprint(anchor, tile)?;

        let covered: Vec<AbsorbedBonus> = footprint
            .iter()
            .filter(|c| self.cell(**c).cell_type.is_bonus())
            .map(|c| AbsorbedBonus {
                coord: *c,
                bonus: self.cell(*c).cell_type,
            })
            .collect();

        let symbol = self.choose_symbol(&footprint);
        for coord in &footprint {
            let idx = self.index(*coord);
            self.cells[idx] = Cell::grass(player.id, symbol);
        }

        let mut absorbed = Vec::new();
        for bonus in covered {
            grant_bonus(player, bonus.bonus);
            absorbed.push(bonus);
        }

        for coord in &footprint {
            let (adjacent, count) = coord.adjacent(self.side, self.side);
            for neighbour in &adjacent[..count as usize] {
                let idx = self.index(*neighbour);
                let bonus = self.cells[idx].cell_type;
                if !bonus.is_bonus() {
                    continue;
                }
                grant_bonus(player, bonus);
                self.cells[idx] = Cell::grass(player.id, symbol);
                absorbed.push(AbsorbedBonus {
                    coord: *neighbour,
                    bonus,
                });
            }
        }

        debug!(
            player = player.id,
            x = anchor.x,
            y = anchor.y,
            cells = footprint.len(),
            bonuses = absorbed.len(),
            stealable,
            "placed tile"
        );

        self.placed.push(PlacedTile {
            tile: tile.clone(),
            anchor,
            owner: player.id,
            stealable,
        });

        Some(PlacementReport {
            footprint,
            symbol,
            absorbed,
        })
    }

    /// Whether some stealable tile belongs to a player other than `player`.
    #[must_use]
    pub fn has_stealable_tile_against(&self, player: PlayerId) -> bool {
        self.placed.iter().any(|p| p.stealable && p.owner != player)
    }

    /// Lift the stealable tile covering `target` off the board for `new_owner`.
    ///
    /// The tile's cells become empty and its record is removed; the record is
    /// returned so the tile can be laid again through [`Board::place`]. Returns
    /// `None` if no stealable tile covers `target` or if it already belongs to
    /// `new_owner`.
    pub fn steal_tile(&mut self, target: Coord, new_owner: PlayerId) -> Option<PlacedTile> {
        let idx = self
            .placed
            .iter()
            .position(|p| p.stealable && p.covers(target))?;
        if self.placed[idx].owner == new_owner {
            return None;
        }

        let stolen = self.placed.remove(idx);
        for coord in stolen.footprint() {
            let cell_idx = self.index(coord);
            self.cells[cell_idx] = Cell::EMPTY;
        }

        debug!(
            thief = new_owner,
            victim = stolen.owner,
            x = target.x,
            y = target.y,
            "stole tile"
        );
        Some(stolen)
    }

    /// Put a stolen tile back where it was, for its previous owner.
    ///
    /// Used when the thief has nowhere to lay it, straight after
    /// [`Board::steal_tile`]: every footprint cell must still be empty.
    pub fn restore(&mut self, placed: PlacedTile) {
        let footprint = placed.footprint();
        debug_assert!(
            footprint.iter().all(|c| self.get(*c) == Some(&Cell::EMPTY)),
            "restoring a tile over cells that are no longer empty"
        );
        let symbol = self.choose_symbol(&footprint);
        for coord in &footprint {
            let idx = self.index(*coord);
            self.cells[idx] = Cell::grass(placed.owner, symbol);
        }
        debug!(owner = placed.owner, "restored tile");
        self.placed.push(placed);
    }

    /// Turn an empty cell into a stone. Returns `false` if the cell is not empty.
    pub fn place_stone(&mut self, coord: Coord) -> bool {
        if self.get(coord).map(|c| c.cell_type) != Some(CellType::Empty) {
            return false;
        }
        let idx = self.index(coord);
        self.cells[idx] = Cell::stone();
        true
    }

    /// Clear a stone. Returns `false` if the cell is not a stone.
    pub fn remove_stone(&mut self, coord: Coord) -> bool {
        if self.get(coord).map(|c| c.cell_type) != Some(CellType::Stone) {
            return false;
        }
        let idx = self.index(coord);
        self.cells[idx] = Cell::EMPTY;
        true
    }
}

fn grant_bonus(player: &mut Player, bonus: CellType) {
    match bonus {
        CellType::BonusExchange => player.add_coupon(),
        CellType::BonusStone => player.add_stone_bonus(),
        CellType::BonusRobbery => player.add_robbery_bonus(),
        CellType::Empty | CellType::Grass | CellType::Stone => {}
    }
}

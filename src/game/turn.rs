//! Turn resolution: the per-player state machine that drives a round.
//!
//! The resolver never talks to a terminal. Every decision comes from an
//! [`InputSource`] and everything worth showing goes to a [`GameObserver`],
//! so the same code runs interactive games, batch simulations and tests.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::UPCOMING_TILES;
use crate::error::GameResult;
use crate::game::{Board, CellType, Coord, Player, PlayerId, Tile, TileSupply};

/// Why the resolver is asking for a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CoordPurpose {
    /// Anchor of the 1x1 starting tile.
    StartingTile,
    /// Anchor (top-left corner) of the tile being placed.
    PlaceTile,
    /// Empty cell to turn into a stone.
    PlaceStone,
    /// Stone to clear with a coupon.
    RemoveStone,
    /// Any cell of an opponent's tile to steal.
    StealTile,
}

/// Which menu the resolver is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Menu {
    /// 1 = take the front tile, 2 = exchange with a coupon, 3 = remove a stone with a coupon.
    TileAcquisition,
    /// Position among the upcoming tiles to take (1 = right after the front).
    ExchangeTile,
    /// 1 = confirm, 2 = rotate clockwise, 3 = flip.
    Orientation,
}

/// Source of validated player decisions.
///
/// Implementations must answer within the requested bounds; the resolver
/// re-asks whenever an answer breaks a game rule.
pub trait InputSource {
    /// A coordinate with both components in `[0, bound)`.
    fn request_coordinates(&mut self, purpose: CoordPurpose, bound: u16) -> Coord;

    /// A menu choice in `[min, max]`.
    fn request_menu_choice(&mut self, menu: Menu, min: u32, max: u32) -> u32;
}

/// Something that happened during a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TurnEvent {
    /// A new round began.
    RoundStarted {
        /// Round number, 0 being the starting placement.
        round: u32,
    },
    /// A player's turn began.
    TurnStarted {
        /// Whose turn it is.
        player: PlayerId,
    },
    /// The chosen anchor breaks the placement rules.
    InvalidPlacement,
    /// The chosen orientation fits nowhere; pick another.
    OrientationBlocked,
    /// The coupon action cannot be taken, the front tile is drawn instead.
    CouponActionUnavailable,
    /// The chosen cell holds no stone.
    NotAStone,
    /// The chosen cell is not empty.
    NotEmpty,
    /// No opponent tile that can be stolen covers the chosen cell.
    NothingToSteal,
    /// A tile became territory.
    TilePlaced {
        /// The new owner.
        player: PlayerId,
        /// Covered cells.
        footprint: Vec<Coord>,
    },
    /// A bonus cell was absorbed.
    BonusAbsorbed {
        /// Who received it.
        player: PlayerId,
        /// Which bonus.
        bonus: CellType,
    },
    /// A stone was put down.
    StonePlaced {
        /// Where.
        coord: Coord,
    },
    /// A stone was cleared.
    StoneRemoved {
        /// Where.
        coord: Coord,
    },
    /// A pending stone was dropped because the board has no empty cell.
    StoneSkipped {
        /// Who held the stone.
        player: PlayerId,
    },
    /// A tile changed hands.
    TileStolen {
        /// The new owner.
        thief: PlayerId,
        /// The previous owner.
        victim: PlayerId,
    },
    /// The thief had nowhere to lay a stolen tile, so it went back.
    StolenTileRestored {
        /// The owner who got it back.
        victim: PlayerId,
    },
    /// A robbery was spent with no opponent tile to take.
    RobberyWasted {
        /// Who held the robbery.
        player: PlayerId,
    },
    /// The tile fits nowhere in any orientation and was discarded.
    Stalled {
        /// Who could not place.
        player: PlayerId,
    },
    /// The supply was empty when the player went to draw.
    SupplyExhausted {
        /// Who missed a tile.
        player: PlayerId,
    },
    /// End-of-game coupons lost because no 1x1 placement exists.
    CouponsForfeited {
        /// Who lost them.
        player: PlayerId,
        /// How many.
        coupons: u32,
    },
}

/// Receiver of rendering data and turn events. Every method defaults to a no-op.
pub trait GameObserver {
    /// Show the board and roster.
    fn render_board(&mut self, _board: &Board, _players: &[Player]) {}

    /// Show the tile being oriented.
    fn render_tile(&mut self, _tile: &Tile) {}

    /// Show the front of the supply.
    fn render_upcoming(&mut self, _tiles: &[&Tile]) {}

    /// React to a turn event.
    fn notify(&mut self, _event: &TurnEvent) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl GameObserver for NullObserver {}

/// Phase of the turn currently being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum TurnPhase {
    /// Round 0: lay the 1x1 starting tile.
    StartingPlacement,
    /// Draw, exchange, or clear a stone and draw.
    TileAcquisition,
    /// Rotate and flip until confirmed.
    Orientation,
    /// Pick an anchor the board accepts.
    Placement,
    /// Spend pending stones and robberies.
    BonusDrain,
    /// Nothing left to do.
    #[default]
    Done,
}

/// Drives one player's turn against the shared game state.
pub struct TurnResolver<'a, I: ?Sized, O: ?Sized> {
    board: &'a mut Board,
    supply: &'a mut TileSupply,
    players: &'a mut [Player],
    input: &'a mut I,
    observer: &'a mut O,
    phase: TurnPhase,
}

impl<'a, I, O> TurnResolver<'a, I, O>
where
    I: InputSource + ?Sized,
    O: GameObserver + ?Sized,
{
    /// Borrow the game state for the duration of a turn.
    pub fn new(
        board: &'a mut Board,
        supply: &'a mut TileSupply,
        players: &'a mut [Player],
        input: &'a mut I,
        observer: &'a mut O,
    ) -> Self {
        Self {
            board,
            supply,
            players,
            input,
            observer,
            phase: TurnPhase::Done,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> TurnPhase {
        self.phase
    }

    fn enter(&mut self, phase: TurnPhase) {
        debug!(from = ?self.phase, to = ?phase, "turn phase");
        self.phase = phase;
    }

    fn show_board(&mut self) {
        self.observer.render_board(self.board, self.players);
    }

    /// Lay `player`'s 1x1 starting tile.
    ///
    /// The tile needs no contact with the player's own territory, may not
    /// border an opponent, and can never be stolen. Bonuses it absorbs stay
    /// pending until the player's next drain.
    pub fn starting_placement(&mut self, player: PlayerId) {
        self.enter(TurnPhase::StartingPlacement);
        self.observer.notify(&TurnEvent::TurnStarted { player });
        self.show_board();

        let tile = Tile::starting();
        let side = self.board.side();
        loop {
            let anchor = self
                .input
                .request_coordinates(CoordPurpose::StartingTile, side);
            if self.board.can_place(anchor, &tile, player, true) {
                self.commit(player, anchor, &tile, false);
                break;
            }
            self.observer.notify(&TurnEvent::InvalidPlacement);
        }

        self.enter(TurnPhase::Done);
    }

    /// Play a regular turn: acquire a tile, orient it, place it, drain bonuses.
    ///
    /// # Errors
    ///
    /// Propagates supply errors; an exhausted supply is not an error and
    /// skips straight to the bonus drain.
    pub fn play_turn(&mut self, player: PlayerId) -> GameResult<()> {
        self.observer.notify(&TurnEvent::TurnStarted { player });

        if self.supply.is_empty() {
            warn!(player, "supply exhausted, no tile this turn");
            self.observer
                .notify(&TurnEvent::SupplyExhausted { player });
        } else {
            let tile = self.acquire_tile(player)?;
            if !self.orient_and_place(player, tile) {
                warn!(player, "tile fits nowhere, discarded");
                self.observer.notify(&TurnEvent::Stalled { player });
            }
        }

        self.drain_bonuses(player);
        self.enter(TurnPhase::Done);
        Ok(())
    }

    fn acquire_tile(&mut self, player: PlayerId) -> GameResult<Tile> {
        self.enter(TurnPhase::TileAcquisition);
        self.show_board();
        self.observer
            .render_upcoming(&self.supply.peek(UPCOMING_TILES + 1));

        match self
            .input
            .request_menu_choice(Menu::TileAcquisition, 1, 3)
        {
            2 => {
                if let Some(tile) = self.exchange_with_coupon(player)? {
                    return Ok(tile);
                }
            }
            3 => self.remove_stone_with_coupon(player),
            _ => {}
        }

        self.supply.draw()
    }

    /// Spend a coupon to take one of the upcoming tiles. `None` if unavailable.
    fn exchange_with_coupon(&mut self, player: PlayerId) -> GameResult<Option<Tile>> {
        let offered = UPCOMING_TILES.min(self.supply.len().saturating_sub(1));
        let idx = usize::from(player);
        if offered == 0 || !self.players[idx].use_coupon() {
            self.observer.notify(&TurnEvent::CouponActionUnavailable);
            return Ok(None);
        }

        #[allow(clippy::cast_possible_truncation)]
        let choice = self
            .input
            .request_menu_choice(Menu::ExchangeTile, 1, offered as u32);
        let index = (choice as usize).clamp(1, offered);
        debug!(player, index, "exchanging tile");
        self.supply.exchange(index).map(Some)
    }

    /// Spend a coupon to clear a stone. The caller draws afterwards either way.
    fn remove_stone_with_coupon(&mut self, player: PlayerId) {
        let idx = usize::from(player);
        if self.board.stone_count() == 0 || !self.players[idx].use_coupon() {
            self.observer.notify(&TurnEvent::CouponActionUnavailable);
            return;
        }

        let side = self.board.side();
        loop {
            let coord = self
                .input
                .request_coordinates(CoordPurpose::RemoveStone, side);
            if self.board.remove_stone(coord) {
                debug!(player, x = coord.x, y = coord.y, "removed stone");
                self.observer.notify(&TurnEvent::StoneRemoved { coord });
                return;
            }
            self.observer.notify(&TurnEvent::NotAStone);
        }
    }

    /// Orient and lay `tile` as a stealable tile.
    ///
    /// Returns `false` without touching the board if no orientation fits anywhere.
    fn orient_and_place(&mut self, player: PlayerId, mut tile: Tile) -> bool {
        if !self.board.can_place_any_orientation(&tile, player) {
            return false;
        }

        loop {
            self.orient(&mut tile);
            if self.board.can_place_anywhere(&tile, player) {
                break;
            }
            self.observer.notify(&TurnEvent::OrientationBlocked);
        }

        self.place_loop(player, &tile);
        true
    }

    fn orient(&mut self, tile: &mut Tile) {
        self.enter(TurnPhase::Orientation);
        loop {
            self.observer.render_tile(tile);
            match self.input.request_menu_choice(Menu::Orientation, 1, 3) {
                2 => tile.rotate_clockwise(),
                3 => tile.flip(),
                _ => return,
            }
        }
    }

    /// Ask for anchors until the board accepts one, then commit as stealable.
    fn place_loop(&mut self, player: PlayerId, tile: &Tile) {
        self.enter(TurnPhase::Placement);
        let side = self.board.side();
        loop {
            let anchor = self.input.request_coordinates(CoordPurpose::PlaceTile, side);
            if self.board.can_place(anchor, tile, player, false) {
                self.commit(player, anchor, tile, true);
                return;
            }
            self.observer.notify(&TurnEvent::InvalidPlacement);
        }
    }

    fn commit(&mut self, player: PlayerId, anchor: Coord, tile: &Tile, stealable: bool) {
        let Some(report) = self.board.place(
            anchor,
            tile,
            &mut self.players[usize::from(player)],
            stealable,
        ) else {
            warn!(player, x = anchor.x, y = anchor.y, "placement off the board ignored");
            return;
        };
        self.observer.notify(&TurnEvent::TilePlaced {
            player,
            footprint: report.footprint.clone(),
        });
        for absorbed in &report.absorbed {
            debug!(player, bonus = ?absorbed.bonus, "absorbed bonus");
            self.observer.notify(&TurnEvent::BonusAbsorbed {
                player,
                bonus: absorbed.bonus,
            });
        }
        self.show_board();
    }

    /// Spend every pending stone and robbery, including ones granted on the way.
    pub fn drain_bonuses(&mut self, player: PlayerId) {
        let idx = usize::from(player);
        loop {
            self.enter(TurnPhase::BonusDrain);
            if self.players[idx].use_stone_bonus() {
                self.resolve_stone(player);
            } else if self.players[idx].use_robbery_bonus() {
                self.resolve_robbery(player);
            } else {
                break;
            }
        }
    }

    fn resolve_stone(&mut self, player: PlayerId) {
        if !self.board.has_empty_cell() {
            warn!(player, "no empty cell for stone");
            self.observer.notify(&TurnEvent::StoneSkipped { player });
            return;
        }

        let side = self.board.side();
        loop {
            let coord = self
                .input
                .request_coordinates(CoordPurpose::PlaceStone, side);
            if self.board.place_stone(coord) {
                debug!(player, x = coord.x, y = coord.y, "placed stone");
                self.observer.notify(&TurnEvent::StonePlaced { coord });
                self.show_board();
                return;
            }
            self.observer.notify(&TurnEvent::NotEmpty);
        }
    }

    fn resolve_robbery(&mut self, player: PlayerId) {
        if !self.board.has_stealable_tile_against(player) {
            debug!(player, "robbery with nothing to steal");
            self.observer.notify(&TurnEvent::RobberyWasted { player });
            return;
        }

        let side = self.board.side();
        let stolen = loop {
            let target = self
                .input
                .request_coordinates(CoordPurpose::StealTile, side);
            if let Some(stolen) = self.board.steal_tile(target, player) {
                break stolen;
            }
            self.observer.notify(&TurnEvent::NothingToSteal);
        };

        let victim = stolen.owner;
        self.observer.notify(&TurnEvent::TileStolen {
            thief: player,
            victim,
        });
        self.show_board();

        if self.board.can_place_any_orientation(&stolen.tile, player) {
            let tile = stolen.tile.clone();
            self.orient_and_place(player, tile);
        } else {
            warn!(player, victim, "stolen tile fits nowhere, returned");
            self.board.restore(stolen);
            self.observer
                .notify(&TurnEvent::StolenTileRestored { victim });
            self.show_board();
        }
    }

    /// Turn every remaining coupon into a forced 1x1 placement.
    ///
    /// Each coupon is spent before its placement; bonuses absorbed along the
    /// way are drained at once, and a new coupon earns another placement. A
    /// player with no legal 1x1 anchor forfeits what is left.
    pub fn forced_placements(&mut self, player: PlayerId) {
        let idx = usize::from(player);
        let tile = Tile::starting();

        while self.players[idx].coupons() > 0 {
            if !self.board.can_place_anywhere(&tile, player) {
                let coupons = self.players[idx].coupons();
                while self.players[idx].use_coupon() {}
                warn!(player, coupons, "no room for forced placement, coupons forfeited");
                self.observer
                    .notify(&TurnEvent::CouponsForfeited { player, coupons });
                break;
            }

            self.players[idx].use_coupon();
            self.place_loop(player, &tile);
            self.drain_bonuses(player);
        }

        self.enter(TurnPhase::Done);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autoplay::ScriptedInput;
    use crate::game::{Cell, PlayerColor, Shape};

    #[derive(Default)]
    struct Recorder {
        events: Vec<TurnEvent>,
        tiles_shown: usize,
        upcoming: Vec<usize>,
    }

    impl GameObserver for Recorder {
        fn render_tile(&mut self, _tile: &Tile) {
            self.tiles_shown += 1;
        }

        fn render_upcoming(&mut self, tiles: &[&Tile]) {
            self.upcoming = tiles.iter().map(|t| t.base().cols()).collect();
        }

        fn notify(&mut self, event: &TurnEvent) {
            self.events.push(event.clone());
        }
    }

    impl Recorder {
        fn count(&self, event: &TurnEvent) -> usize {
            self.events.iter().filter(|e| *e == event).count()
        }
    }

    struct Fixture {
        board: Board,
        supply: TileSupply,
        players: Vec<Player>,
        observer: Recorder,
    }

    impl Fixture {
        fn new(supply: TileSupply) -> Self {
            Self {
                board: Board::empty(20),
                supply,
                players: vec![
                    Player::new(0, "A", PlayerColor::Red),
                    Player::new(1, "B", PlayerColor::Blue),
                ],
                observer: Recorder::default(),
            }
        }

        fn resolver<'a>(
            &'a mut self,
            input: &'a mut ScriptedInput,
        ) -> TurnResolver<'a, ScriptedInput, Recorder> {
            TurnResolver::new(
                &mut self.board,
                &mut self.supply,
                &mut self.players,
                input,
                &mut self.observer,
            )
        }

        /// Lay starting tiles directly.
        fn start(&mut self, player: PlayerId, at: Coord) {
            let idx = usize::from(player);
            self.board
                .place(at, &Tile::starting(), &mut self.players[idx], false);
        }

        fn owner(&self, x: u16, y: u16) -> Option<PlayerId> {
            self.board.get(Coord::new(x, y)).and_then(|c| c.owner)
        }
    }

    fn bar(len: usize) -> Tile {
        let row = "#".repeat(len);
        Tile::new(Shape::parse(&[row.as_str()]).unwrap())
    }

    fn bars(lens: impl IntoIterator<Item = usize>) -> TileSupply {
        TileSupply::from_tiles(lens.into_iter().map(bar))
    }

    fn no_tiles() -> TileSupply {
        TileSupply::from_tiles(Vec::new())
    }

    fn c(x: u16, y: u16) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn test_starting_placement_retries_until_legal() {
        let mut fx = Fixture::new(bars([2]));
        fx.start(1, c(5, 5));
        let mut input = ScriptedInput::new(0).with_coords([c(6, 5), c(10, 10)]);

        let mut resolver = fx.resolver(&mut input);
        resolver.starting_placement(0);
        assert_eq!(resolver.phase(), TurnPhase::Done);

        assert_eq!(fx.observer.count(&TurnEvent::InvalidPlacement), 1);
        assert_eq!(fx.owner(10, 10), Some(0));
        assert!(!fx.board.placed_tiles().last().unwrap().stealable);
    }

    #[test]
    fn test_take_front_tile() {
        let mut fx = Fixture::new(bars([2, 3, 4]));
        fx.start(0, c(10, 10));
        let mut input = ScriptedInput::new(0)
            .with_choices([1, 1])
            .with_coords([c(11, 10)]);

        fx.resolver(&mut input).play_turn(0).unwrap();

        assert_eq!(fx.board.territory_size(0), 3);
        assert_eq!(fx.supply.len(), 2);
        assert_eq!(fx.observer.upcoming, vec![2, 3, 4]);
        assert!(fx.board.placed_tiles().last().unwrap().stealable);
    }

    #[test]
    fn test_exchange_spends_coupon_and_cycles_supply() {
        let mut fx = Fixture::new(bars(2..8));
        fx.start(0, c(10, 10));
        let mut input = ScriptedInput::new(0)
            .with_choices([2, 3, 1])
            .with_coords([c(11, 10)]);

        fx.resolver(&mut input).play_turn(0).unwrap();

        assert_eq!(fx.players[0].coupons(), 0);
        assert_eq!(fx.board.territory_size(0), 6);
        let widths: Vec<usize> = fx
            .supply
            .peek(10)
            .iter()
            .map(|t| t.base().cols())
            .collect();
        assert_eq!(widths, vec![6, 7, 2, 3, 4]);
    }

    #[test]
    fn test_exchange_without_coupon_takes_front() {
        let mut fx = Fixture::new(bars([2, 3, 4]));
        fx.start(0, c(10, 10));
        fx.players[0].use_coupon();
        let mut input = ScriptedInput::new(0)
            .with_choices([2, 1])
            .with_coords([c(11, 10)]);

        fx.resolver(&mut input).play_turn(0).unwrap();

        assert_eq!(fx.observer.count(&TurnEvent::CouponActionUnavailable), 1);
        assert_eq!(fx.board.territory_size(0), 3);
        assert_eq!(fx.supply.len(), 2);
    }

    #[test]
    fn test_exchange_with_single_tile_is_unavailable() {
        let mut fx = Fixture::new(bars([2]));
        fx.start(0, c(10, 10));
        let mut input = ScriptedInput::new(0)
            .with_choices([2, 1])
            .with_coords([c(11, 10)]);

        fx.resolver(&mut input).play_turn(0).unwrap();

        assert_eq!(fx.players[0].coupons(), 1);
        assert!(fx.supply.is_empty());
    }

    #[test]
    fn test_remove_stone_then_draw() {
        let mut fx = Fixture::new(bars([2, 3]));
        fx.start(0, c(10, 10));
        fx.board.place_stone(c(3, 3));
        let mut input = ScriptedInput::new(0)
            .with_choices([3, 1])
            .with_coords([c(4, 4), c(3, 3), c(11, 10)]);

        fx.resolver(&mut input).play_turn(0).unwrap();

        assert_eq!(fx.board.stone_count(), 0);
        assert_eq!(fx.players[0].coupons(), 0);
        assert_eq!(fx.observer.count(&TurnEvent::NotAStone), 1);
        assert_eq!(fx.observer.count(&TurnEvent::StoneRemoved { coord: c(3, 3) }), 1);
        assert_eq!(fx.board.territory_size(0), 3);
    }

    #[test]
    fn test_remove_stone_without_stones_is_unavailable() {
        let mut fx = Fixture::new(bars([2]));
        fx.start(0, c(10, 10));
        let mut input = ScriptedInput::new(0)
            .with_choices([3, 1])
            .with_coords([c(11, 10)]);

        fx.resolver(&mut input).play_turn(0).unwrap();

        assert_eq!(fx.players[0].coupons(), 1);
        assert_eq!(fx.observer.count(&TurnEvent::CouponActionUnavailable), 1);
    }

    #[test]
    fn test_rotate_before_placing() {
        let mut fx = Fixture::new(bars([2]));
        fx.start(0, c(10, 10));
        let mut input = ScriptedInput::new(0)
            .with_choices([1, 2, 1])
            .with_coords([c(10, 11)]);

        fx.resolver(&mut input).play_turn(0).unwrap();

        assert_eq!(fx.owner(10, 11), Some(0));
        assert_eq!(fx.owner(10, 12), Some(0));
        assert_eq!(fx.observer.tiles_shown, 2);
    }

    #[test]
    fn test_blocked_orientation_returns_to_orientation() {
        let mut fx = Fixture::new(bars([5]));
        // Stones beside the start leave room for a vertical bar only.
        fx.start(0, c(0, 0));
        fx.board.place_stone(c(1, 0));
        fx.board.place_stone(c(1, 1));
        fx.board.place_stone(c(1, 2));
        fx.board.place_stone(c(1, 3));
        fx.board.place_stone(c(1, 4));
        fx.board.place_stone(c(1, 5));
        let mut input = ScriptedInput::new(0)
            .with_choices([1, 1, 2, 1])
            .with_coords([c(0, 1)]);

        fx.resolver(&mut input).play_turn(0).unwrap();

        assert_eq!(fx.observer.count(&TurnEvent::OrientationBlocked), 1);
        assert_eq!(fx.board.territory_size(0), 6);
    }

    #[test]
    fn test_stalled_tile_is_discarded() {
        let mut fx = Fixture::new(bars([4, 2]));
        fx.board = Board::empty(3);
        fx.start(0, c(0, 0));
        let mut input = ScriptedInput::new(0).with_choices([1]);

        fx.resolver(&mut input).play_turn(0).unwrap();

        assert_eq!(fx.observer.count(&TurnEvent::Stalled { player: 0 }), 1);
        assert_eq!(fx.board.territory_size(0), 1);
        assert_eq!(fx.supply.len(), 1);
    }

    #[test]
    fn test_supply_exhausted_skips_tile() {
        let mut fx = Fixture::new(no_tiles());
        fx.start(0, c(10, 10));
        let mut input = ScriptedInput::new(0);

        fx.resolver(&mut input).play_turn(0).unwrap();

        assert_eq!(fx.observer.count(&TurnEvent::SupplyExhausted { player: 0 }), 1);
        assert_eq!(fx.board.territory_size(0), 1);
    }

    #[test]
    fn test_stone_bonus_drain() {
        let mut fx = Fixture::new(bars([2]));
        fx.start(0, c(10, 10));
        fx.board.set(c(11, 11), Cell::new(CellType::BonusStone));
        let mut input = ScriptedInput::new(0)
            .with_choices([1, 1])
            .with_coords([c(11, 10), c(10, 10), c(0, 0)]);

        fx.resolver(&mut input).play_turn(0).unwrap();

        assert_eq!(fx.players[0].stone_bonus(), 0);
        assert_eq!(fx.board.get(c(0, 0)).unwrap().cell_type, CellType::Stone);
        assert_eq!(fx.observer.count(&TurnEvent::NotEmpty), 1);
        assert_eq!(fx.owner(11, 11), Some(0));
    }

    #[test]
    fn test_stone_bonus_skipped_on_full_board() {
        let mut fx = Fixture::new(no_tiles());
        fx.board = Board::empty(3);
        for (coord, _) in Board::empty(3).iter() {
            fx.board.set(coord, Cell::stone());
        }
        fx.players[0].add_stone_bonus();
        let mut input = ScriptedInput::new(0);

        fx.resolver(&mut input).drain_bonuses(0);

        assert_eq!(fx.players[0].stone_bonus(), 0);
        assert_eq!(fx.observer.count(&TurnEvent::StoneSkipped { player: 0 }), 1);
    }

    #[test]
    fn test_robbery_steals_and_replaces() {
        let mut fx = Fixture::new(bars([2]));
        fx.start(0, c(2, 2));
        fx.start(1, c(15, 15));
        let victim_tile = bar(2);
        fx.board
            .place(c(16, 15), &victim_tile, &mut fx.players[1], true);
        fx.board.set(c(3, 3), Cell::new(CellType::BonusRobbery));
        let mut input = ScriptedInput::new(0)
            .with_choices([1, 1, 1])
            .with_coords([c(3, 2), c(0, 19), c(16, 15), c(5, 2)]);

        fx.resolver(&mut input).play_turn(0).unwrap();

        assert_eq!(fx.players[0].robbery_bonus(), 0);
        assert_eq!(fx.observer.count(&TurnEvent::NothingToSteal), 1);
        assert_eq!(
            fx.observer
                .count(&TurnEvent::TileStolen { thief: 0, victim: 1 }),
            1
        );
        assert_eq!(fx.board.territory_size(0), 6);
        assert_eq!(fx.board.territory_size(1), 1);
        assert_eq!(fx.owner(6, 2), Some(0));
        assert_eq!(fx.board.get(c(16, 15)).unwrap(), &Cell::EMPTY);
    }

    #[test]
    fn test_robbery_without_target_is_wasted() {
        let mut fx = Fixture::new(no_tiles());
        fx.start(0, c(2, 2));
        fx.start(1, c(15, 15));
        fx.players[0].add_robbery_bonus();
        let mut input = ScriptedInput::new(0);

        fx.resolver(&mut input).drain_bonuses(0);

        assert_eq!(fx.players[0].robbery_bonus(), 0);
        assert_eq!(fx.observer.count(&TurnEvent::RobberyWasted { player: 0 }), 1);
        assert_eq!(fx.board.territory_size(1), 1);
    }

    #[test]
    fn test_stolen_tile_restored_when_thief_is_boxed_in() {
        let mut fx = Fixture::new(no_tiles());
        fx.start(0, c(0, 0));
        fx.board.place_stone(c(1, 0));
        fx.board.place_stone(c(0, 1));
        fx.start(1, c(10, 10));
        fx.board
            .place(c(11, 10), &bar(3), &mut fx.players[1], true);
        fx.players[0].add_robbery_bonus();
        let mut input = ScriptedInput::new(0).with_coords([c(12, 10)]);

        fx.resolver(&mut input).drain_bonuses(0);

        assert_eq!(
            fx.observer
                .count(&TurnEvent::StolenTileRestored { victim: 1 }),
            1
        );
        assert_eq!(fx.board.territory_size(1), 4);
        assert_eq!(fx.board.territory_size(0), 1);
        assert!(fx.board.has_stealable_tile_against(0));
    }

    #[test]
    fn test_forced_placements_spend_every_coupon() {
        let mut fx = Fixture::new(no_tiles());
        fx.start(0, c(10, 10));
        fx.players[0].add_coupon();
        let mut input = ScriptedInput::new(0).with_coords([c(11, 10), c(12, 10)]);

        fx.resolver(&mut input).forced_placements(0);

        assert_eq!(fx.players[0].coupons(), 0);
        assert_eq!(fx.board.territory_size(0), 3);
    }

    #[test]
    fn test_forced_placement_bonus_grants_another() {
        let mut fx = Fixture::new(no_tiles());
        fx.start(0, c(10, 10));
        fx.board.set(c(12, 10), Cell::new(CellType::BonusExchange));
        let mut input = ScriptedInput::new(0).with_coords([c(11, 10), c(9, 10)]);

        fx.resolver(&mut input).forced_placements(0);

        assert_eq!(fx.players[0].coupons(), 0);
        // Start, two forced cells and the absorbed bonus.
        assert_eq!(fx.board.territory_size(0), 4);
    }

    #[test]
    fn test_forced_placement_forfeits_when_boxed_in() {
        let mut fx = Fixture::new(no_tiles());
        fx.start(0, c(0, 0));
        fx.board.place_stone(c(1, 0));
        fx.board.place_stone(c(0, 1));
        fx.players[0].add_coupon();
        let mut input = ScriptedInput::new(0);

        fx.resolver(&mut input).forced_placements(0);

        assert_eq!(fx.players[0].coupons(), 0);
        assert_eq!(
            fx.observer.count(&TurnEvent::CouponsForfeited {
                player: 0,
                coupons: 2
            }),
            1
        );
    }
}

#![no_main]

//! Board operation fuzzer.
//!
//! Applies an arbitrary sequence of placements, stones and thefts to a board,
//! going through the same legality checks the turn resolver uses, and checks
//! the board invariants after every step.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use turf::game::{catalog, check_board};
use turf::{Board, Coord, Player, Tile};

/// A fuzzer-generated board operation.
#[derive(Arbitrary, Debug, Clone)]
enum BoardOp {
    /// Lay a catalogue tile if the rules allow it.
    Place {
        player: u8,
        shape: u8,
        turns: u8,
        flip: bool,
        x: u8,
        y: u8,
    },
    /// Drop a stone on an empty cell.
    Stone { x: u8, y: u8 },
    /// Clear a stone.
    ClearStone { x: u8, y: u8 },
    /// Steal the tile under a cell and try to lay it for the thief.
    Steal {
        thief: u8,
        x: u8,
        y: u8,
        to_x: u8,
        to_y: u8,
    },
}

/// Structured input for board fuzzing.
#[derive(Arbitrary, Debug)]
struct BoardInput {
    /// Large board when set.
    large: bool,
    /// Starting cells for the first two players.
    starts: [(u8, u8); 2],
    /// Operations to apply (capped).
    ops: Vec<BoardOp>,
}

fuzz_target!(|input: BoardInput| {
    let Ok(shapes) = catalog() else {
        return;
    };
    let side: u16 = if input.large { 30 } else { 20 };
    let at = |x: u8, y: u8| Coord::new(u16::from(x) % side, u16::from(y) % side);

    let mut board = Board::empty(side);
    let mut players = Player::roster(2);
    for (idx, (x, y)) in input.starts.iter().enumerate() {
        let anchor = at(*x, *y);
        let id = players[idx].id;
        if board.can_place(anchor, &Tile::starting(), id, true) {
            board.place(anchor, &Tile::starting(), &mut players[idx], false);
        }
    }

    for op in input.ops.iter().take(200) {
        match op.clone() {
            BoardOp::Place {
                player,
                shape,
                turns,
                flip,
                x,
                y,
            } => {
                let idx = usize::from(player % 2);
                let mut tile = Tile::new(shapes[usize::from(shape) % shapes.len()].clone());
                for _ in 0..turns % 4 {
                    tile.rotate_clockwise();
                }
                if flip {
                    tile.flip();
                }
                let anchor = at(x, y);
                if board.can_place(anchor, &tile, players[idx].id, false) {
                    let report = board.place(anchor, &tile, &mut players[idx], true);
                    assert!(report.is_some_and(|r| r.footprint.len() == tile.base().cell_count()));
                }
            }
            BoardOp::Stone { x, y } => {
                board.place_stone(at(x, y));
            }
            BoardOp::ClearStone { x, y } => {
                board.remove_stone(at(x, y));
            }
            BoardOp::Steal {
                thief,
                x,
                y,
                to_x,
                to_y,
            } => {
                let idx = usize::from(thief % 2);
                let id = players[idx].id;
                if let Some(stolen) = board.steal_tile(at(x, y), id) {
                    assert!(stolen.stealable);
                    assert_ne!(stolen.owner, id);
                    let anchor = at(to_x, to_y);
                    if board.can_place(anchor, &stolen.tile, id, false) {
                        board.place(anchor, &stolen.tile, &mut players[idx], true);
                    } else {
                        board.restore(stolen);
                    }
                }
            }
        }

        let violations = check_board(&board);
        assert!(violations.is_empty(), "{violations:?}");
    }
});

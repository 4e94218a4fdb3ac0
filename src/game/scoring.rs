//! End-of-game scoring: the largest square of territory each player holds.

use serde::Serialize;

use crate::game::{Board, CellType, Coord, Player, PlayerId};

/// A player's final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TerritoryScore {
    /// Side length of the largest all-owned square.
    pub side: u16,
    /// Owned grass strictly inside the square, excluding its last row and column.
    pub tie_break: u32,
    /// Bottom-right corner of the square (`None` without territory).
    pub bottom_right: Option<Coord>,
}

impl TerritoryScore {
    /// Comparison key: square side first, then the tie-break count.
    #[must_use]
    pub const fn rank(&self) -> (u16, u32) {
        (self.side, self.tie_break)
    }
}

/// Compute the largest square of cells owned by `player`.
///
/// Runs the classic largest-square dynamic program: a cell's entry is zero if
/// the player does not own it, one on the first row or column, and otherwise one
/// more than the smallest of its left, upper and upper-left entries. The first
/// maximum met in row-major order wins.
///
/// The tie-break counts owned grass in `[x-side+1, x) × [y-side+1, y)` for the
/// bottom-right corner `(x, y)`, which leaves out the square's last row and column.
#[must_use]
pub fn compute_territory_score(board: &Board, player: PlayerId) -> TerritoryScore {
    let side = usize::from(board.side());
    let owned = |x: usize, y: usize| {
        #[allow(clippy::cast_possible_truncation)]
        let coord = Coord::new(x as u16, y as u16);
        board
            .get(coord)
            .is_some_and(|c| c.cell_type == CellType::Grass && c.owner == Some(player))
    };

    let mut table = vec![0u16; side * side];
    let mut best = 0u16;
    let mut best_x = 0usize;
    let mut best_y = 0usize;

    for y in 0..side {
        for x in 0..side {
            let value = if !owned(x, y) {
                0
            } else if x == 0 || y == 0 {
                1
            } else {
                let left = table[y * side + x - 1];
                let up = table[(y - 1) * side + x];
                let diag = table[(y - 1) * side + x - 1];
                1 + left.min(up).min(diag)
            };
            table[y * side + x] = value;

            if value > best {
                best = value;
                best_x = x;
                best_y = y;
            }
        }
    }

    if best == 0 {
        return TerritoryScore::default();
    }

    let span = usize::from(best);
    let mut tie_break = 0u32;
    for y in (best_y + 1 - span)..best_y {
        for x in (best_x + 1 - span)..best_x {
            if owned(x, y) {
                tie_break += 1;
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    let bottom_right = Coord::new(best_x as u16, best_y as u16);
    TerritoryScore {
        side: best,
        tie_break,
        bottom_right: Some(bottom_right),
    }
}

/// Score every player in roster order.
#[must_use]
pub fn final_scores(board: &Board, players: &[Player]) -> Vec<TerritoryScore> {
    players
        .iter()
        .map(|p| compute_territory_score(board, p.id))
        .collect()
}

/// Index of the best score; the earliest index wins a full tie.
#[must_use]
pub fn determine_winner(scores: &[TerritoryScore]) -> Option<usize> {
    let mut winner: Option<usize> = None;
    for (idx, score) in scores.iter().enumerate() {
        match winner {
            Some(best) if scores[best].rank() >= score.rank() => {}
            _ => winner = Some(idx),
        }
    }
    winner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    fn fill(board: &mut Board, owner: PlayerId, x0: u16, y0: u16, w: u16, h: u16) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                board.set(Coord::new(x, y), Cell::grass(owner, '█'));
            }
        }
    }

    #[test]
    fn test_single_cell_scores_one() {
        let mut board = Board::empty(20);
        board.set(Coord::new(5, 5), Cell::grass(0, '█'));
        let score = compute_territory_score(&board, 0);
        assert_eq!((score.side, score.tie_break), (1, 0));
        assert_eq!(score.bottom_right, Some(Coord::new(5, 5)));
    }

    #[test]
    fn test_no_territory_scores_zero() {
        let board = Board::empty(20);
        assert_eq!(compute_territory_score(&board, 3), TerritoryScore::default());
    }

    #[test]
    fn test_square_and_tie_break_excludes_last_row_and_column() {
        let mut board = Board::empty(20);
        fill(&mut board, 0, 2, 2, 3, 3);
        let score = compute_territory_score(&board, 0);
        assert_eq!(score.side, 3);
        assert_eq!(score.bottom_right, Some(Coord::new(4, 4)));
        assert_eq!(score.tie_break, 4);
    }

    #[test]
    fn test_square_on_first_row_and_column() {
        let mut board = Board::empty(20);
        fill(&mut board, 1, 0, 0, 2, 2);
        let score = compute_territory_score(&board, 1);
        assert_eq!(score.side, 2);
        assert_eq!(score.tie_break, 1);
    }

    #[test]
    fn test_rectangle_scores_shorter_side() {
        let mut board = Board::empty(20);
        fill(&mut board, 0, 3, 3, 6, 2);
        assert_eq!(compute_territory_score(&board, 0).side, 2);
    }

    #[test]
    fn test_other_players_and_stones_do_not_count() {
        let mut board = Board::empty(20);
        fill(&mut board, 0, 0, 0, 4, 4);
        board.set(Coord::new(1, 1), Cell::grass(1, '█'));
        assert_eq!(compute_territory_score(&board, 0).side, 2);
        assert_eq!(compute_territory_score(&board, 1).side, 1);
        board.set(Coord::new(1, 1), Cell::stone());
        assert_eq!(compute_territory_score(&board, 0).side, 2);
        assert_eq!(compute_territory_score(&board, 1).side, 0);
    }

    #[test]
    fn test_enlarging_square_never_lowers_score() {
        let mut board = Board::empty(20);
        let mut previous = 0;
        for n in 1..=8 {
            fill(&mut board, 0, 4, 4, n, n);
            let side = compute_territory_score(&board, 0).side;
            assert!(side >= previous);
            assert_eq!(side, n);
            previous = side;
        }
    }

    #[test]
    fn test_score_ordering() {
        let small = TerritoryScore {
            side: 2,
            tie_break: 9,
            bottom_right: None,
        };
        let big = TerritoryScore {
            side: 3,
            tie_break: 0,
            bottom_right: None,
        };
        assert!(big.rank() > small.rank());
    }

    #[test]
    fn test_winner_lexicographic_then_earliest() {
        let score = |side, tie_break| TerritoryScore {
            side,
            tie_break,
            bottom_right: None,
        };
        assert_eq!(determine_winner(&[score(2, 1), score(3, 0), score(2, 4)]), Some(1));
        assert_eq!(determine_winner(&[score(3, 1), score(3, 4)]), Some(1));
        assert_eq!(determine_winner(&[score(3, 4), score(3, 4)]), Some(0));
        assert_eq!(determine_winner(&[]), None);
    }
}

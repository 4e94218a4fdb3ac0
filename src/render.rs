//! Plain-text rendering of the board, tiles and results.
//!
//! Every renderer returns a `String`; printing is left to the caller. Board
//! rows and columns are labelled with the same letters the interactive front
//! end accepts: `A`-`Z` for 0-25 and `a`-`z` for 26-51.

// Allow format! with push_str for readability - the allocation overhead is negligible for text rendering
#![allow(clippy::format_push_string)]

use crossterm::style::{Color, Stylize, style};

use crate::game::{Board, CellType, GameOutcome, Player, PlayerColor, Tile};

const EMPTY_GLYPH: &str = "・";
const FILLED_GLYPH: &str = "██";

/// Letter naming a row or column index, if it has one.
#[must_use]
pub fn coord_label(index: u16) -> Option<char> {
    let index = u8::try_from(index).ok()?;
    match index {
        0..=25 => Some(char::from(b'A' + index)),
        26..=51 => Some(char::from(b'a' + index - 26)),
        _ => None,
    }
}

/// Index named by a row or column letter.
#[must_use]
pub fn parse_coord_label(label: char) -> Option<u16> {
    match label {
        'A'..='Z' => u16::try_from(u32::from(label) - u32::from('A')).ok(),
        'a'..='z' => u16::try_from(u32::from(label) - u32::from('a') + 26).ok(),
        _ => None,
    }
}

/// Terminal colour for a player colour.
#[must_use]
pub const fn terminal_color(color: PlayerColor) -> Color {
    match color {
        PlayerColor::Purple => Color::DarkMagenta,
        PlayerColor::Red => Color::DarkRed,
        PlayerColor::Green => Color::DarkGreen,
        PlayerColor::Yellow => Color::DarkYellow,
        PlayerColor::Blue => Color::DarkBlue,
        PlayerColor::Magenta => Color::Magenta,
        PlayerColor::Cyan => Color::DarkCyan,
        PlayerColor::Turquoise => Color::AnsiValue(45),
        PlayerColor::Orange => Color::AnsiValue(208),
    }
}

fn paint(text: String, color: Color, colored: bool) -> String {
    if colored {
        style(text).with(color).to_string()
    } else {
        text
    }
}

/// Render the board with row and column labels.
///
/// Grass shows its owner's symbol, tinted with the owner's colour when
/// `colored` is set. Stones are grey blocks and bonuses their initials.
#[must_use]
pub fn render_board(board: &Board, players: &[Player], colored: bool) -> String {
    let side = board.side();
    let mut output = String::from("  ");
    for x in 0..side {
        output.push(coord_label(x).unwrap_or('?'));
        output.push(' ');
    }
    output.push('\n');

    let mut row = 0;
    output.push(coord_label(0).unwrap_or('?'));
    output.push(' ');
    for (coord, cell) in board.iter() {
        if coord.y != row {
            row = coord.y;
            output.push('\n');
            output.push(coord_label(row).unwrap_or('?'));
            output.push(' ');
        }

        let glyph = match cell.cell_type {
            CellType::Empty => EMPTY_GLYPH.to_string(),
            CellType::Grass => {
                let symbol = cell.symbol.unwrap_or('█');
                let text: String = [symbol, symbol].iter().collect();
                let color = cell
                    .owner
                    .and_then(|owner| players.iter().find(|p| p.id == owner))
                    .map_or(Color::White, |p| terminal_color(p.color));
                paint(text, color, colored)
            }
            CellType::Stone => paint(FILLED_GLYPH.to_string(), Color::Grey, colored),
            CellType::BonusExchange => "Ｅ".to_string(),
            CellType::BonusStone => "Ｓ".to_string(),
            CellType::BonusRobbery => "Ｒ".to_string(),
        };
        output.push_str(&glyph);
    }
    output.push('\n');
    output
}

/// One line per player: name, territory and what they hold.
#[must_use]
pub fn render_roster(board: &Board, players: &[Player], colored: bool) -> String {
    let mut output = String::new();
    for player in players {
        let name = paint(player.name.clone(), terminal_color(player.color), colored);
        output.push_str(&format!(
            "{name}: {} cells, {} coupons, {} stones, {} robberies\n",
            board.territory_size(player.id),
            player.coupons(),
            player.stone_bonus(),
            player.robbery_bonus()
        ));
    }
    output
}

fn tile_rows(tile: &Tile) -> Vec<String> {
    let mask = tile.effective_mask();
    (0..mask.rows())
        .map(|row| {
            (0..mask.cols())
                .map(|col| if mask.is_occupied(row, col) { FILLED_GLYPH } else { "  " })
                .collect()
        })
        .collect()
}

/// Render a tile in its current orientation.
#[must_use]
pub fn render_tile(tile: &Tile) -> String {
    let mut output = String::new();
    for row in tile_rows(tile) {
        output.push_str(row.trim_end());
        output.push('\n');
    }
    output
}

/// Render tiles side by side, each vertically centred and numbered from 0.
#[must_use]
pub fn render_upcoming(tiles: &[&Tile]) -> String {
    let blocks: Vec<Vec<String>> = tiles.iter().map(|t| tile_rows(t)).collect();
    let height = blocks.iter().map(Vec::len).max().unwrap_or(0);
    let mut output = String::new();

    for (idx, block) in blocks.iter().enumerate() {
        let width = block.first().map_or(0, |r| r.chars().count());
        output.push_str(&format!("{idx:<width$}  "));
    }
    output.push('\n');

    for line in 0..height {
        for block in &blocks {
            let width = block.first().map_or(0, |r| r.chars().count());
            let offset = (height - block.len()) / 2;
            match line.checked_sub(offset).and_then(|i| block.get(i)) {
                Some(row) => output.push_str(row),
                None => output.push_str(&" ".repeat(width)),
            }
            output.push_str("  ");
        }
        output.push('\n');
    }
    output
}

/// Final standings: each player's square and tie-break, then the winner.
#[must_use]
pub fn render_scores(players: &[Player], outcome: &GameOutcome) -> String {
    let mut output = String::from("=== FINAL SCORES ===\n");
    for (player, score) in players.iter().zip(&outcome.scores) {
        output.push_str(&format!(
            "{}: {}x{} square, tie-break {}\n",
            player.name, score.side, score.side, score.tie_break
        ));
    }
    match outcome.winner.and_then(|idx| players.get(idx)) {
        Some(winner) => output.push_str(&format!("Winner: {}\n", winner.name)),
        None => output.push_str("No winner\n"),
    }
    output
}

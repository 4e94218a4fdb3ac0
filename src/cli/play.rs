//! Play command implementation: an interactive game on the terminal.

use std::fmt;
use std::io::{self, BufRead, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use tracing::warn;
use turf::autoplay::RandomInput;
use turf::game::{CoordPurpose, Menu, TurnEvent};
use turf::render::{
    parse_coord_label, render_board, render_roster, render_scores, render_tile, render_upcoming,
};
use turf::{Board, Coord, GameConfig, GameObserver, GameState, InputSource, Player, PlayerId, Tile};

use super::CliError;

/// Why a line of input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputError {
    /// Wrong shape of input.
    Invalid,
    /// A coordinate token is not a letter.
    NotLetters,
    /// A menu token is not a number.
    NotANumber,
    /// Value outside the allowed range.
    OutOfRange,
    /// Trailing input after a complete answer.
    ExtraCharacters,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Invalid => write!(f, "Invalid input"),
            InputError::NotLetters => write!(f, "Coordinates must be letters (A-Z or a-z)"),
            InputError::NotANumber => write!(f, "Choice must be a number"),
            InputError::OutOfRange => write!(f, "Out of range"),
            InputError::ExtraCharacters => write!(f, "Extra characters detected"),
        }
    }
}

/// Parse `row column` as two letters, `A`-`Z` = 0-25 and `a`-`z` = 26-51.
pub(crate) fn parse_coordinates(line: &str, bound: u16) -> Result<Coord, InputError> {
    let mut tokens = line.split_whitespace();
    let (Some(row), Some(col)) = (tokens.next(), tokens.next()) else {
        return Err(InputError::Invalid);
    };
    if tokens.next().is_some() {
        return Err(InputError::ExtraCharacters);
    }

    let single = |token: &str| {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Ok(ch),
            _ => Err(InputError::Invalid),
        }
    };
    let y = parse_coord_label(single(row)?).ok_or(InputError::NotLetters)?;
    let x = parse_coord_label(single(col)?).ok_or(InputError::NotLetters)?;

    if x >= bound || y >= bound {
        return Err(InputError::OutOfRange);
    }
    Ok(Coord::new(x, y))
}

/// Parse a single number in `[min, max]`.
pub(crate) fn parse_menu_choice(line: &str, min: u32, max: u32) -> Result<u32, InputError> {
    let mut tokens = line.split_whitespace();
    let Some(token) = tokens.next() else {
        return Err(InputError::Invalid);
    };
    if tokens.next().is_some() {
        return Err(InputError::ExtraCharacters);
    }
    let choice: u32 = token.parse().map_err(|_| InputError::NotANumber)?;
    if !(min..=max).contains(&choice) {
        return Err(InputError::OutOfRange);
    }
    Ok(choice)
}

fn coord_prompt(purpose: CoordPurpose) -> &'static str {
    match purpose {
        CoordPurpose::StartingTile => "Starting location",
        CoordPurpose::PlaceTile => "Place tile (top-left corner)",
        CoordPurpose::PlaceStone => "Place stone",
        CoordPurpose::RemoveStone => "Remove stone",
        CoordPurpose::StealTile => "Tile to steal",
    }
}

fn menu_prompt(menu: Menu) -> &'static str {
    match menu {
        Menu::TileAcquisition => {
            "1 - Take tile\n2 - Exchange for an upcoming tile (coupon)\n3 - Remove a stone (coupon)\n"
        }
        Menu::ExchangeTile => "Which upcoming tile?\n",
        Menu::Orientation => "1 - Place tile\n2 - Rotate tile\n3 - Flip tile\n",
    }
}

/// Line-based input with re-prompting.
///
/// Once the input closes, the rest of the game is finished with random answers.
pub(crate) struct TerminalInput<R, W> {
    reader: R,
    writer: W,
    closed: bool,
    fallback: RandomInput,
}

impl<R: BufRead, W: Write> TerminalInput<R, W> {
    /// Create an input reading from `reader` and prompting on `writer`.
    pub(crate) fn new(reader: R, writer: W, seed: u64) -> Self {
        Self {
            reader,
            writer,
            closed: false,
            fallback: RandomInput::new(seed),
        }
    }

    fn say(&mut self, text: &str) {
        self.writer
            .write_all(text.as_bytes())
            .and_then(|()| self.writer.flush())
            .ok(); // Ignore a closed terminal
    }

    fn read_line(&mut self) -> Option<String> {
        if self.closed {
            return None;
        }
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) | Err(_) => {
                warn!("input closed, finishing the game with random moves");
                self.closed = true;
                None
            }
            Ok(_) => Some(line),
        }
    }
}

impl<R: BufRead, W: Write> InputSource for TerminalInput<R, W> {
    fn request_coordinates(&mut self, purpose: CoordPurpose, bound: u16) -> Coord {
        loop {
            self.say(&format!("{} - enter coordinates (row column): ", coord_prompt(purpose)));
            let Some(line) = self.read_line() else {
                return self.fallback.request_coordinates(purpose, bound);
            };
            match parse_coordinates(&line, bound) {
                Ok(coord) => return coord,
                Err(e) => self.say(&format!("{e}. Try again.\n\n")),
            }
        }
    }

    fn request_menu_choice(&mut self, menu: Menu, min: u32, max: u32) -> u32 {
        loop {
            self.say(&format!("{}Choice ({min}-{max}): ", menu_prompt(menu)));
            let Some(line) = self.read_line() else {
                return self.fallback.request_menu_choice(menu, min, max);
            };
            match parse_menu_choice(&line, min, max) {
                Ok(choice) => return choice,
                Err(e) => self.say(&format!("{e}. Try again.\n\n")),
            }
        }
    }
}

/// Observer that redraws the terminal and reports events in plain words.
pub(crate) struct TerminalObserver<W> {
    out: W,
    names: Vec<String>,
    colored: bool,
    round: u32,
    current: Option<PlayerId>,
}

impl<W: Write> TerminalObserver<W> {
    /// Create an observer for the given roster.
    pub(crate) fn new(out: W, players: &[Player], colored: bool) -> Self {
        Self {
            out,
            names: players.iter().map(|p| p.name.clone()).collect(),
            colored,
            round: 0,
            current: None,
        }
    }

    fn name(&self, player: PlayerId) -> &str {
        self.names
            .get(usize::from(player))
            .map_or("Unknown", String::as_str)
    }

    fn emit(&mut self, text: &str) {
        self.out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush())
            .ok(); // Ignore a closed terminal
    }

    fn message(&self, event: &TurnEvent) -> Option<String> {
        let text = match event {
            TurnEvent::RoundStarted { .. }
            | TurnEvent::TurnStarted { .. }
            | TurnEvent::TilePlaced { .. } => return None,
            TurnEvent::InvalidPlacement => "Cannot place there. Try again.".to_string(),
            TurnEvent::OrientationBlocked => {
                "That orientation fits nowhere. Rotate or flip the tile.".to_string()
            }
            TurnEvent::CouponActionUnavailable => {
                "That action is not available. Continuing with the first tile in the queue."
                    .to_string()
            }
            TurnEvent::NotAStone => "There is no stone there. Try again.".to_string(),
            TurnEvent::NotEmpty => "That cell is not empty. Try again.".to_string(),
            TurnEvent::NothingToSteal => "No tile to steal there. Try again.".to_string(),
            TurnEvent::BonusAbsorbed { player, bonus } => {
                format!("{} picked up {bonus:?}.", self.name(*player))
            }
            TurnEvent::StonePlaced { .. } => "Stone placed.".to_string(),
            TurnEvent::StoneRemoved { .. } => "Stone removed.".to_string(),
            TurnEvent::StoneSkipped { player } => {
                format!("{} has no empty cell for a stone.", self.name(*player))
            }
            TurnEvent::TileStolen { thief, victim } => {
                format!("{} stole a tile from {}.", self.name(*thief), self.name(*victim))
            }
            TurnEvent::StolenTileRestored { victim } => {
                format!("The stolen tile fits nowhere and goes back to {}.", self.name(*victim))
            }
            TurnEvent::RobberyWasted { player } => {
                format!("{} has nothing to steal.", self.name(*player))
            }
            TurnEvent::Stalled { player } => {
                format!("{} cannot place the tile anywhere. It is discarded.", self.name(*player))
            }
            TurnEvent::SupplyExhausted { player } => {
                format!("No tiles left for {}.", self.name(*player))
            }
            TurnEvent::CouponsForfeited { player, coupons } => {
                format!("{} has no room and forfeits {coupons} coupon(s).", self.name(*player))
            }
        };
        Some(text)
    }
}

impl<W: Write> GameObserver for TerminalObserver<W> {
    fn render_board(&mut self, board: &Board, players: &[Player]) {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0)).ok();
        let heading = match self.current {
            Some(player) if self.round == 0 => format!("{} - Starting location\n\n", self.name(player)),
            Some(player) => format!("{} - Round {}\n\n", self.name(player), self.round),
            None => String::new(),
        };
        let text = format!(
            "{heading}{}\n{}\n",
            render_board(board, players, self.colored),
            render_roster(board, players, self.colored)
        );
        self.emit(&text);
    }

    fn render_tile(&mut self, tile: &Tile) {
        let text = format!("Current tile:\n{}\n", render_tile(tile));
        self.emit(&text);
    }

    fn render_upcoming(&mut self, tiles: &[&Tile]) {
        let text = format!("Next tiles:\n{}\n", render_upcoming(tiles));
        self.emit(&text);
    }

    fn notify(&mut self, event: &TurnEvent) {
        match event {
            TurnEvent::RoundStarted { round } => self.round = *round,
            TurnEvent::TurnStarted { player } => self.current = Some(*player),
            _ => {}
        }
        if let Some(text) = self.message(event) {
            self.emit(&format!("{text}\n"));
        }
    }
}

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the game cannot be set up.
pub(crate) fn execute(config: GameConfig, colored: bool) -> Result<(), CliError> {
    let mut state = GameState::new(config)?;

    let stdin = io::stdin();
    let mut input = TerminalInput::new(stdin.lock(), io::stdout(), state.seed());
    let mut observer = TerminalObserver::new(io::stdout(), &state.players, colored);

    println!("Welcome to Turf!");
    let outcome = state.play(&mut input, &mut observer)?;

    println!();
    print!("{}", render_scores(&state.players, &outcome));
    println!("Seed: {}", outcome.seed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(parse_coordinates("C b\n", 30), Ok(Coord::new(27, 2)));
        assert_eq!(parse_coordinates("  A   A ", 20), Ok(Coord::new(0, 0)));
        assert_eq!(parse_coordinates("A", 20), Err(InputError::Invalid));
        assert_eq!(parse_coordinates("AB C", 20), Err(InputError::Invalid));
        assert_eq!(parse_coordinates("1 2", 20), Err(InputError::NotLetters));
        assert_eq!(parse_coordinates("a A", 20), Err(InputError::OutOfRange));
        assert_eq!(parse_coordinates("A B C", 20), Err(InputError::ExtraCharacters));
    }

    #[test]
    fn test_parse_menu_choice() {
        assert_eq!(parse_menu_choice("2\n", 1, 3), Ok(2));
        assert_eq!(parse_menu_choice("4", 1, 3), Err(InputError::OutOfRange));
        assert_eq!(parse_menu_choice("x", 1, 3), Err(InputError::NotANumber));
        assert_eq!(parse_menu_choice("1 2", 1, 3), Err(InputError::ExtraCharacters));
        assert_eq!(parse_menu_choice("", 1, 3), Err(InputError::Invalid));
    }

    #[test]
    fn test_terminal_input_reprompts() {
        let reader = io::Cursor::new("zz\nB C\n7\n3\n");
        let mut prompts = Vec::new();
        let mut input = TerminalInput::new(reader, &mut prompts, 0);

        assert_eq!(
            input.request_coordinates(CoordPurpose::PlaceTile, 20),
            Coord::new(2, 1)
        );
        assert_eq!(input.request_menu_choice(Menu::Orientation, 1, 3), 3);

        let text = String::from_utf8(prompts).unwrap();
        assert_eq!(text.matches("Try again").count(), 2);
    }

    #[test]
    fn test_terminal_input_falls_back_when_closed() {
        let mut input = TerminalInput::new(io::Cursor::new(""), io::sink(), 4);
        let coord = input.request_coordinates(CoordPurpose::PlaceStone, 20);
        assert!(coord.x < 20 && coord.y < 20);
        let choice = input.request_menu_choice(Menu::TileAcquisition, 1, 3);
        assert!((1..=3).contains(&choice));
    }

    #[test]
    fn test_observer_names_players() {
        let players = Player::roster(2);
        let mut out = Vec::new();
        let mut observer = TerminalObserver::new(&mut out, &players, false);
        observer.notify(&TurnEvent::TileStolen { thief: 1, victim: 0 });
        observer.notify(&TurnEvent::InvalidPlacement);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Player 2 stole a tile from Player 1."));
        assert!(text.contains("Cannot place there."));
    }
}

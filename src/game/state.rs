//! Game session: board, supply and roster driven round by round.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{info, instrument};

use crate::config::GameConfig;
use crate::error::GameResult;
use crate::game::{
    Board, GameObserver, InputSource, Player, TerritoryScore, TileSupply, TurnEvent,
    TurnResolver, determine_winner, final_scores,
};

/// Result of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    /// Seed the session was built from.
    pub seed: u64,
    /// Tile rounds played after the starting placement.
    pub rounds: u32,
    /// Roster index of the winner.
    pub winner: Option<usize>,
    /// Final score per player, in roster order.
    pub scores: Vec<TerritoryScore>,
    /// Grass cells owned per player, in roster order.
    pub territory: Vec<usize>,
}

/// Complete game state.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Settings the session was created with.
    pub config: GameConfig,
    /// The board.
    pub board: Board,
    /// Tiles left to draw.
    pub supply: TileSupply,
    /// All players, in turn order.
    pub players: Vec<Player>,
    /// Next round to play (0 is the starting placement).
    pub round: u32,
    seed: u64,
}

impl GameState {
    /// Validate `config`, then seed the board and shuffle the supply.
    ///
    /// Without a fixed seed one is drawn from entropy and reported in the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GameError::InvalidPlayerCount`] before touching the
    /// random source, or a setup error from the board or the catalogue.
    pub fn new(config: GameConfig) -> GameResult<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let board = Board::new(config.players, &mut rng)?;
        let supply = TileSupply::new(config.players, &mut rng)?;

        info!(
            players = config.players,
            rounds = config.rounds,
            seed,
            side = board.side(),
            tiles = supply.len(),
            "new game"
        );

        Ok(Self {
            config,
            board,
            supply,
            players: Player::roster(config.players),
            round: 0,
            seed,
        })
    }

    /// Seed the session was built from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether every round has been played.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.round > self.config.rounds
    }

    /// Play one round: the starting placement in round 0, a regular turn afterwards.
    ///
    /// # Errors
    ///
    /// Propagates supply errors from a turn.
    #[instrument(skip_all, fields(round = self.round))]
    pub fn play_round<I, O>(&mut self, input: &mut I, observer: &mut O) -> GameResult<()>
    where
        I: InputSource + ?Sized,
        O: GameObserver + ?Sized,
    {
        info!("round start");
        observer.notify(&TurnEvent::RoundStarted { round: self.round });

        for seat in 0..self.players.len() {
            let id = self.players[seat].id;
            let mut resolver = TurnResolver::new(
                &mut self.board,
                &mut self.supply,
                &mut self.players,
                input,
                observer,
            );
            if self.round == 0 {
                resolver.starting_placement(id);
            } else {
                resolver.play_turn(id)?;
            }
        }

        self.round += 1;
        Ok(())
    }

    /// Spend leftover coupons on forced placements and score the board.
    pub fn finish<I, O>(&mut self, input: &mut I, observer: &mut O) -> GameOutcome
    where
        I: InputSource + ?Sized,
        O: GameObserver + ?Sized,
    {
        for seat in 0..self.players.len() {
            let id = self.players[seat].id;
            TurnResolver::new(
                &mut self.board,
                &mut self.supply,
                &mut self.players,
                input,
                observer,
            )
            .forced_placements(id);
        }
        observer.render_board(&self.board, &self.players);

        let outcome = self.outcome();
        info!(winner = ?outcome.winner, seed = self.seed, "game over");
        outcome
    }

    /// Scores and winner for the board as it stands.
    #[must_use]
    pub fn outcome(&self) -> GameOutcome {
        let scores = final_scores(&self.board, &self.players);
        GameOutcome {
            seed: self.seed,
            rounds: self.config.rounds,
            winner: determine_winner(&scores),
            territory: self
                .players
                .iter()
                .map(|p| self.board.territory_size(p.id))
                .collect(),
            scores,
        }
    }

    /// Play every remaining round, then finish the game.
    ///
    /// # Errors
    ///
    /// Propagates supply errors from a turn.
    pub fn play<I, O>(&mut self, input: &mut I, observer: &mut O) -> GameResult<GameOutcome>
    where
        I: InputSource + ?Sized,
        O: GameObserver + ?Sized,
    {
        while !self.is_game_over() {
            self.play_round(input, observer)?;
        }
        Ok(self.finish(input, observer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autoplay::RandomInput;
    use crate::config::supply_size;
    use crate::error::GameError;
    use crate::game::NullObserver;

    #[test]
    fn test_player_count_validated() {
        assert_eq!(
            GameState::new(GameConfig::new(1)).unwrap_err(),
            GameError::InvalidPlayerCount(1)
        );
        assert_eq!(
            GameState::new(GameConfig::new(10)).unwrap_err(),
            GameError::InvalidPlayerCount(10)
        );
    }

    #[test]
    fn test_new_game_setup() {
        let state = GameState::new(GameConfig::new(5).with_seed(11)).unwrap();
        assert_eq!(state.board.side(), 30);
        assert_eq!(state.supply.len(), supply_size(5));
        assert_eq!(state.players.len(), 5);
        assert_eq!(state.round, 0);
        assert_eq!(state.seed(), 11);
        assert!(state.board.placed_tiles().is_empty());
    }

    #[test]
    fn test_round_zero_places_starting_tiles() {
        let mut state = GameState::new(GameConfig::new(3).with_seed(2)).unwrap();
        let mut input = RandomInput::new(2);
        state.play_round(&mut input, &mut NullObserver).unwrap();

        assert_eq!(state.round, 1);
        assert_eq!(state.board.placed_tiles().len(), 3);
        for player in &state.players {
            let starts = state
                .board
                .placed_tiles()
                .iter()
                .filter(|p| p.owner == player.id && !p.stealable)
                .count();
            assert_eq!(starts, 1);
        }
    }

    #[test]
    fn test_full_game_completes() {
        let mut state = GameState::new(GameConfig::new(2).with_seed(3)).unwrap();
        let mut input = RandomInput::new(3);
        let outcome = state.play(&mut input, &mut NullObserver).unwrap();

        assert!(state.is_game_over());
        assert_eq!(state.round, 10);
        assert!(outcome.winner.is_some());
        assert_eq!(outcome.scores.len(), 2);
        assert!(state.players.iter().all(|p| p.coupons() == 0));
        assert!(state.players.iter().all(|p| p.stone_bonus() == 0));
        assert!(state.players.iter().all(|p| p.robbery_bonus() == 0));
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let run = || {
            let mut state = GameState::new(GameConfig::new(4).with_seed(77)).unwrap();
            state
                .play(&mut RandomInput::new(5), &mut NullObserver)
                .unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_entropy_seed_is_reported() {
        let state = GameState::new(GameConfig::new(2)).unwrap();
        let replay = GameState::new(GameConfig::new(2).with_seed(state.seed())).unwrap();
        assert_eq!(
            state.supply.peek(state.supply.len()),
            replay.supply.peek(replay.supply.len())
        );
    }
}

#![no_main]

//! Full game fuzzer.
//!
//! Plays a short game whose answers come from the fuzzer first and from a
//! seeded random source once the script runs out. This exercises every turn
//! phase, including re-prompts after illegal answers, and checks the game
//! invariants after every round.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use turf::autoplay::ScriptedInput;
use turf::game::{NullObserver, check_invariants};
use turf::{Coord, GameConfig, GameState};

/// Structured input for full game fuzzing.
#[derive(Arbitrary, Debug)]
struct GameInput {
    /// Player count (mapped onto 2-9).
    players: u8,
    /// Tile rounds (capped).
    rounds: u8,
    /// Seed for setup and for answers past the script.
    seed: u64,
    /// Scripted coordinate answers.
    coords: Vec<(u8, u8)>,
    /// Scripted menu answers.
    choices: Vec<u8>,
}

fuzz_target!(|input: GameInput| {
    let players = 2 + usize::from(input.players % 8);
    let config = GameConfig::new(players)
        .with_seed(input.seed)
        .with_rounds(u32::from(input.rounds % 6));
    let Ok(mut state) = GameState::new(config) else {
        return;
    };
    let side = state.board.side();

    // Out-of-range answers are the input source's job to prevent.
    let mut script = ScriptedInput::new(input.seed)
        .with_coords(input.coords.iter().take(500).map(|(x, y)| {
            Coord::new(u16::from(*x) % side, u16::from(*y) % side)
        }))
        .with_choices(input.choices.iter().take(500).map(|c| 1 + u32::from(c % 3)));

    while !state.is_game_over() {
        if state.play_round(&mut script, &mut NullObserver).is_err() {
            return;
        }
        let violations = check_invariants(&state);
        assert!(violations.is_empty(), "{violations:?}");
    }
    state.finish(&mut script, &mut NullObserver);
    assert!(check_invariants(&state).is_empty());
});

//! Non-interactive input sources.
//!
//! [`RandomInput`] answers every request uniformly at random from its own
//! seeded generator; it is what batch simulations, benchmarks and property
//! tests play with. [`ScriptedInput`] replays fixed answers first and falls
//! back to random ones once the script runs out.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game::{Coord, CoordPurpose, InputSource, Menu};

/// Uniformly random answers from a seeded generator.
#[derive(Debug, Clone)]
pub struct RandomInput {
    rng: StdRng,
}

impl RandomInput {
    /// Create a random input source with a fixed seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl InputSource for RandomInput {
    fn request_coordinates(&mut self, _purpose: CoordPurpose, bound: u16) -> Coord {
        if bound == 0 {
            return Coord::new(0, 0);
        }
        Coord::new(self.rng.gen_range(0..bound), self.rng.gen_range(0..bound))
    }

    fn request_menu_choice(&mut self, _menu: Menu, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}

/// Fixed answers replayed in order, then random ones.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    coords: VecDeque<Coord>,
    choices: VecDeque<u32>,
    fallback: RandomInput,
}

impl ScriptedInput {
    /// Create an empty script whose fallback uses `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            coords: VecDeque::new(),
            choices: VecDeque::new(),
            fallback: RandomInput::new(seed),
        }
    }

    /// Queue coordinate answers.
    #[must_use]
    pub fn with_coords(mut self, coords: impl IntoIterator<Item = Coord>) -> Self {
        self.coords.extend(coords);
        self
    }

    /// Queue menu answers.
    #[must_use]
    pub fn with_choices(mut self, choices: impl IntoIterator<Item = u32>) -> Self {
        self.choices.extend(choices);
        self
    }

    /// Scripted answers not yet consumed, as `(coords, choices)`.
    #[must_use]
    pub fn remaining(&self) -> (usize, usize) {
        (self.coords.len(), self.choices.len())
    }
}

impl InputSource for ScriptedInput {
    fn request_coordinates(&mut self, purpose: CoordPurpose, bound: u16) -> Coord {
        match self.coords.pop_front() {
            Some(coord) => coord,
            None => self.fallback.request_coordinates(purpose, bound),
        }
    }

    fn request_menu_choice(&mut self, menu: Menu, min: u32, max: u32) -> u32 {
        match self.choices.pop_front() {
            Some(choice) => choice,
            None => self.fallback.request_menu_choice(menu, min, max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_input_stays_in_bounds() {
        let mut input = RandomInput::new(7);
        for _ in 0..500 {
            let coord = input.request_coordinates(CoordPurpose::PlaceTile, 20);
            assert!(coord.x < 20 && coord.y < 20);
            let choice = input.request_menu_choice(Menu::Orientation, 1, 3);
            assert!((1..=3).contains(&choice));
        }
        assert_eq!(input.request_menu_choice(Menu::ExchangeTile, 1, 1), 1);
        assert_eq!(
            input.request_coordinates(CoordPurpose::PlaceStone, 0),
            Coord::new(0, 0)
        );
    }

    #[test]
    fn test_random_input_is_reproducible() {
        let mut a = RandomInput::new(42);
        let mut b = RandomInput::new(42);
        for _ in 0..50 {
            assert_eq!(
                a.request_coordinates(CoordPurpose::StealTile, 30),
                b.request_coordinates(CoordPurpose::StealTile, 30)
            );
        }
    }

    #[test]
    fn test_scripted_input_replays_then_falls_back() {
        let mut input = ScriptedInput::new(1)
            .with_coords([Coord::new(3, 4)])
            .with_choices([2]);
        assert_eq!(input.remaining(), (1, 1));
        assert_eq!(
            input.request_coordinates(CoordPurpose::PlaceTile, 20),
            Coord::new(3, 4)
        );
        assert_eq!(input.request_menu_choice(Menu::TileAcquisition, 1, 3), 2);
        assert_eq!(input.remaining(), (0, 0));

        let coord = input.request_coordinates(CoordPurpose::PlaceTile, 5);
        assert!(coord.x < 5 && coord.y < 5);
    }
}

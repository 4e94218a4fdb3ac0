//! Player state management.

use serde::Serialize;

use crate::config::STARTING_COUPONS;

/// Roster index of a player (0-based, also the tie-break order).
pub type PlayerId = u8;

/// Cosmetic player colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlayerColor {
    /// Purple.
    Purple,
    /// Red.
    Red,
    /// Green.
    Green,
    /// Yellow.
    Yellow,
    /// Blue.
    Blue,
    /// Magenta.
    Magenta,
    /// Cyan.
    Cyan,
    /// Turquoise.
    Turquoise,
    /// Orange.
    Orange,
}

impl PlayerColor {
    /// Colours in seat order.
    pub const ALL: [PlayerColor; 9] = [
        PlayerColor::Purple,
        PlayerColor::Red,
        PlayerColor::Green,
        PlayerColor::Yellow,
        PlayerColor::Blue,
        PlayerColor::Magenta,
        PlayerColor::Cyan,
        PlayerColor::Turquoise,
        PlayerColor::Orange,
    ];

    /// Colour for a seat, cycling if there are more seats than colours.
    #[must_use]
    pub const fn for_seat(seat: usize) -> Self {
        Self::ALL[seat % Self::ALL.len()]
    }
}

/// State for a single player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Roster index.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Display colour.
    pub color: PlayerColor,
    coupons: u32,
    stone_bonus: u32,
    robbery_bonus: u32,
}

impl Player {
    /// Create a player holding the starting coupon and no pending bonuses.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, color: PlayerColor) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            coupons: STARTING_COUPONS,
            stone_bonus: 0,
            robbery_bonus: 0,
        }
    }

    /// Build the default roster: "Player 1".."Player N" with seat colours.
    #[must_use]
    pub fn roster(count: usize) -> Vec<Self> {
        (0..count)
            .map(|seat| {
                #[allow(clippy::cast_possible_truncation)]
                let id = seat as PlayerId;
                Self::new(id, format!("Player {}", seat + 1), PlayerColor::for_seat(seat))
            })
            .collect()
    }

    /// Exchange coupons held.
    #[must_use]
    pub const fn coupons(&self) -> u32 {
        self.coupons
    }

    /// Stones waiting to be placed.
    #[must_use]
    pub const fn stone_bonus(&self) -> u32 {
        self.stone_bonus
    }

    /// Robberies waiting to be attempted.
    #[must_use]
    pub const fn robbery_bonus(&self) -> u32 {
        self.robbery_bonus
    }

    pub(crate) fn add_coupon(&mut self) {
        self.coupons += 1;
    }

    pub(crate) fn add_stone_bonus(&mut self) {
        self.stone_bonus += 1;
    }

    pub(crate) fn add_robbery_bonus(&mut self) {
        self.robbery_bonus += 1;
    }

    /// Spend a coupon. Returns `false` (and changes nothing) if none are held.
    pub fn use_coupon(&mut self) -> bool {
        take_one(&mut self.coupons)
    }

    /// Consume a pending stone. Returns `false` if none are pending.
    pub fn use_stone_bonus(&mut self) -> bool {
        take_one(&mut self.stone_bonus)
    }

    /// Consume a pending robbery. Returns `false` if none are pending.
    pub fn use_robbery_bonus(&mut self) -> bool {
        take_one(&mut self.robbery_bonus)
    }
}

fn take_one(counter: &mut u32) -> bool {
    if *counter == 0 {
        return false;
    }
    *counter -= 1;
    true
}

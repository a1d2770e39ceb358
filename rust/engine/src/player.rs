use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two seats in a match. Player one moves first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// First connection of a pair, first to act
    One,
    /// Second connection of a pair
    Two,
}

impl Player {
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Upper-case label used in frame messages.
    pub fn label(self) -> &'static str {
        match self {
            Player::One => "PLAYER 1",
            Player::Two => "PLAYER 2",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the three throws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

/// Raised when a collaborator hands over text that is not a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid move '{0}' (expected rock, paper or scissors)")]
pub struct ParseMoveError(pub String);

impl Move {
    /// All moves in tie-break priority order.
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// The move that beats `self`.
    pub fn counter(self) -> Move {
        match self {
            Move::Rock => Move::Paper,
            Move::Paper => Move::Scissors,
            Move::Scissors => Move::Rock,
        }
    }

    /// True if `self` beats `other`.
    pub fn beats(self, other: Move) -> bool {
        other.counter() == self
    }

    /// Position in [`Move::ALL`], used to index fixed-size count arrays.
    pub fn index(self) -> usize {
        match self {
            Move::Rock => 0,
            Move::Paper => 1,
            Move::Scissors => 2,
        }
    }

    /// Lowercase name, matching the persisted file format.
    pub fn name(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }
}

/// `counter_of(predicted)` as a free function for call sites that read better that way.
pub fn counter_of(predicted: Move) -> Move {
    predicted.counter()
}

/// Render a history slot, writing the sentinel as `none`.
pub fn slot_name(slot: Option<Move>) -> &'static str {
    slot.map_or("none", Move::name)
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rock" | "r" => Ok(Move::Rock),
            "paper" | "p" => Ok(Move::Paper),
            "scissors" | "s" => Ok(Move::Scissors),
            _ => Err(ParseMoveError(s.to_string())),
        }
    }
}

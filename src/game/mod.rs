//! Rock-Paper-Scissors rules: the three moves, the counter-move cycle, and
//! round scoring.

mod moves;
mod round;

pub use moves::{counter_of, slot_name, Move, ParseMoveError};
pub use round::{reward_for, Outcome};

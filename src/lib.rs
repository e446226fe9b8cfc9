//! # Adaptive RPS
//!
//! A Rock-Paper-Scissors opponent that learns a player's habits. Three
//! predictors (pattern, frequency, transition) vote on the player's next
//! move, an epsilon-greedy gate decides between exploiting that guess and
//! playing at random, and the learned tables carry over between sessions in a
//! JSON file.
//!
//! ## Modules
//!
//! - [`game`]: Moves, the counter-move cycle, round scoring
//! - [`ai`]: Move history, count tables, predictors, exploration, the agent
//! - [`session`]: Outcome stats, save-on-exit guard, simulator
//! - [`persistence`]: Learning file format and load/merge
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod persistence;
pub mod session;

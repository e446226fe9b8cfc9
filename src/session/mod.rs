//! Session plumbing around the agent: outcome statistics, the save-on-exit
//! guard and its shutdown flag, rolling round metrics, and the headless
//! simulator.

mod guard;
pub mod metrics;
mod shutdown;
pub mod simulation;
mod stats;

pub use guard::{RoundReport, Session};
pub use shutdown::ShutdownFlag;
pub use simulation::{SimulationConfig, SimulationSummary, Simulator};
pub use stats::{format_timestamp, now_timestamp, SessionStats};

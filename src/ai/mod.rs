mod agent;
mod exploration;
pub mod history;
pub mod opponents;
pub mod predictors;
mod tables;

pub use agent::{AdaptiveAgent, Agent, AgentConfig, LearningStatus};
pub use exploration::ExplorationController;
pub use history::{MoveHistory, RoundHistory, HISTORY_LEN};
pub use predictors::{EnsemblePredictor, Predictor};
pub use tables::{
    LearningTables, MoveCounts, ParsePatternError, PatternKey, PatternTable, TransitionTable,
};

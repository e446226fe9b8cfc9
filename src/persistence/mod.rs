//! Learned-state persistence: the on-disk JSON document and the manager that
//! writes it and merges it back into a running agent.

mod document;
mod manager;

pub use document::LearningDocument;
pub use manager::{LoadOutcome, PersistenceConfig, PersistenceManager};

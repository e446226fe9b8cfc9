use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::exploration::ExplorationController;
use super::history::RoundHistory;
use super::predictors::{random_move, EnsemblePredictor};
use super::tables::{LearningTables, PatternKey};
use crate::error::PersistenceError;
use crate::game::{Move, Outcome};
use crate::persistence::{LearningDocument, LoadOutcome, PersistenceConfig, PersistenceManager};
use crate::session::SessionStats;

/// Anything that can throw a move each round.
pub trait Agent {
    /// Pick this round's move.
    fn select_action(&mut self) -> Move;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// See how the round went: `mine` is what this agent threw, `theirs` the
    /// other side's move.
    fn observe(&mut self, _mine: Move, _theirs: Move) {}
}

/// Adaptive agent hyperparameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Accepted and persisted, not read by the decision path.
    pub learning_rate: f64,
    /// Accepted and persisted, not read by the decision path.
    pub discount_factor: f64,
    /// Starting exploration rate. Clamped into `[min_epsilon, 1.0]` when the
    /// agent is built.
    pub epsilon: f64,
    pub min_epsilon: f64,
    pub epsilon_decay: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            learning_rate: 0.1,
            discount_factor: 0.95,
            epsilon: 0.1,
            min_epsilon: 0.01,
            epsilon_decay: 0.995,
            seed: None,
        }
    }
}

/// Snapshot for the "learning" report.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningStatus {
    pub epsilon: f64,
    pub patterns_learned: usize,
    pub move_shares: [(Move, f64); 3],
}

/// Opponent that predicts the player's next move and throws its counter.
pub struct AdaptiveAgent {
    config: AgentConfig,
    history: RoundHistory,
    tables: LearningTables,
    stats: SessionStats,
    exploration: ExplorationController,
    ensemble: EnsemblePredictor,
    persistence: PersistenceManager,
    rng: StdRng,
}

impl AdaptiveAgent {
    /// Build an agent with empty tables. Nothing is read from disk.
    pub fn new(config: AgentConfig, persistence: PersistenceConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        AdaptiveAgent {
            exploration: ExplorationController::from_config(&config),
            config,
            history: RoundHistory::default(),
            tables: LearningTables::default(),
            stats: SessionStats::new(),
            ensemble: EnsemblePredictor::new(),
            persistence: PersistenceManager::new(persistence),
            rng,
        }
    }

    /// Build an agent and merge in whatever the learning file holds.
    pub fn open(
        config: AgentConfig,
        persistence: PersistenceConfig,
    ) -> Result<(Self, LoadOutcome), PersistenceError> {
        let mut agent = Self::new(config, persistence);
        let outcome = agent.load()?;
        Ok((agent, outcome))
    }

    /// Epsilon-greedy move choice: random with probability epsilon, else the
    /// counter of the ensemble prediction.
    pub fn choose_action(&mut self) -> Move {
        if self.exploration.should_explore(&mut self.rng) {
            let m = random_move(&mut self.rng);
            debug!(action = %m, epsilon = self.exploration.epsilon(), "exploring");
            return m;
        }
        let predicted = self.predict_next_move();
        let action = predicted.counter();
        debug!(predicted = %predicted, action = %action, "exploiting");
        action
    }

    /// Ensemble guess at the player's next move.
    pub fn predict_next_move(&mut self) -> Move {
        self.ensemble
            .predict(&self.tables, &self.history.player, &mut self.rng)
    }

    pub fn update_history(&mut self, player: Move, agent: Move) {
        self.history.append(player, agent);
    }

    /// Update the tables from the newest history slots and decay epsilon on a
    /// positive reward. Call after [`update_history`](Self::update_history).
    pub fn learn(&mut self, player: Move, agent: Move, reward: i32) {
        let Some(last) = self.history.player.last() else {
            warn!("learn called before any move was recorded");
            return;
        };

        // keyed on the pattern that ends with `last`, counting `last` itself
        let key = PatternKey(self.history.player.last_three());
        self.tables.patterns.record(key, last);

        self.tables.frequencies.increment(last);

        if let Some(prev) = self.history.player.back(1) {
            self.tables.transitions.record(prev, last);
        }

        if reward > 0 {
            self.exploration.on_win();
        }
        debug!(player = %player, agent = %agent, reward, pattern = %key, "learned");
    }

    /// Score the round into the session stats.
    pub fn update_stats(&mut self, player: Move, agent: Move) -> Outcome {
        let key = PatternKey(self.history.player.last_three());
        self.stats.record(player, agent, key)
    }

    /// Diagnostic state string; see [`RoundHistory::encode_state`].
    pub fn get_state(&self) -> String {
        let most_frequent = self.tables.frequencies.argmax().unwrap_or(Move::Rock);
        self.history.encode_state(most_frequent)
    }

    /// Snapshot of everything that gets persisted.
    pub fn to_document(&self) -> LearningDocument {
        LearningDocument {
            tables: self.tables.clone(),
            stats: self.stats.clone(),
        }
    }

    /// Write learned state to the learning file.
    pub fn save(&self) -> Result<(), PersistenceError> {
        self.persistence.write(&self.to_document())
    }

    /// Merge the learning file into this agent.
    ///
    /// Tables are replaced and stats are summed. A corrupt file is skipped
    /// with a warning unless the persistence config says otherwise.
    pub fn load(&mut self) -> Result<LoadOutcome, PersistenceError> {
        match self.persistence.read() {
            Ok(None) => {
                info!(path = %self.persistence.path().display(), "no learning file, starting fresh");
                Ok(LoadOutcome::Missing)
            }
            Ok(Some(doc)) => {
                doc.merge_into(&mut self.tables, &mut self.stats);
                info!(
                    path = %self.persistence.path().display(),
                    games = self.stats.games_played(),
                    patterns = self.tables.patterns.len(),
                    "loaded learning state"
                );
                Ok(LoadOutcome::Loaded)
            }
            Err(e @ PersistenceError::Parse { .. }) if self.persistence.reset_on_corrupt() => {
                warn!(error = %e, "learning file is corrupt, starting with empty tables");
                Ok(LoadOutcome::ResetCorrupt)
            }
            Err(e) => Err(e),
        }
    }

    pub fn learning_status(&self) -> LearningStatus {
        LearningStatus {
            epsilon: self.exploration.epsilon(),
            patterns_learned: self.tables.patterns.len(),
            move_shares: self.tables.frequencies.shares(),
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.exploration.epsilon()
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn history(&self) -> &RoundHistory {
        &self.history
    }

    pub fn tables(&self) -> &LearningTables {
        &self.tables
    }

    #[cfg(test)]
    pub(crate) fn tables_mut(&mut self) -> &mut LearningTables {
        &mut self.tables
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn persistence(&self) -> &PersistenceManager {
        &self.persistence
    }
}

impl Agent for AdaptiveAgent {
    fn select_action(&mut self) -> Move {
        self.choose_action()
    }

    fn name(&self) -> &str {
        "Adaptive"
    }

    fn observe(&mut self, mine: Move, theirs: Move) {
        self.update_history(theirs, mine);
        self.learn(theirs, mine, crate::game::reward_for(theirs, mine));
        self.update_stats(theirs, mine);
    }
}

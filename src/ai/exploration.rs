use rand::Rng;
use tracing::{debug, warn};

use super::agent::AgentConfig;

/// Epsilon-greedy gate with multiplicative decay on won rounds.
#[derive(Debug, Clone)]
pub struct ExplorationController {
    epsilon: f64,
    min_epsilon: f64,
    decay: f64,
}

impl ExplorationController {
    /// `epsilon` is clamped into `[min_epsilon, 1.0]`, with a warning when
    /// that changes the value.
    pub fn new(epsilon: f64, min_epsilon: f64, decay: f64) -> Self {
        let clamped = epsilon.max(min_epsilon).min(1.0);
        if clamped != epsilon {
            warn!(
                configured = epsilon,
                used = clamped,
                "epsilon outside [min_epsilon, 1.0], clamping"
            );
        }
        ExplorationController {
            epsilon: clamped,
            min_epsilon,
            decay,
        }
    }

    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(config.epsilon, config.min_epsilon, config.epsilon_decay)
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn min_epsilon(&self) -> f64 {
        self.min_epsilon
    }

    /// Draw once from [0, 1); true means play a random move this round.
    pub fn should_explore<R: Rng>(&self, rng: &mut R) -> bool {
        rng.random_range(0.0..1.0) < self.epsilon
    }

    /// Apply one decay step, never dropping below the floor.
    pub fn on_win(&mut self) {
        self.epsilon = (self.epsilon * self.decay).max(self.min_epsilon);
        debug!(epsilon = self.epsilon, "epsilon decayed");
    }
}

impl Default for ExplorationController {
    fn default() -> Self {
        Self::from_config(&AgentConfig::default())
    }
}

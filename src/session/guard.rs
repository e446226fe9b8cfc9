use tracing::{debug, error};

use crate::ai::AdaptiveAgent;
use crate::error::PersistenceError;
use crate::game::{reward_for, Move, Outcome};

/// What happened in one round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundReport {
    pub player: Move,
    pub agent: Move,
    pub outcome: Outcome,
    pub epsilon: f64,
}

/// Owns the agent for the length of a play session and saves its learned
/// state exactly once when the session ends.
///
/// [`finish`](Session::finish) saves and reports errors. If the session is
/// dropped without it (early return, `?`, panic unwinding) the drop saves
/// instead and logs any failure.
pub struct Session {
    agent: AdaptiveAgent,
    saved: bool,
}

impl Session {
    pub fn new(agent: AdaptiveAgent) -> Self {
        Session {
            agent,
            saved: false,
        }
    }

    /// Run one round against the player's move.
    pub fn play_round(&mut self, player: Move) -> RoundReport {
        debug!(state = %self.agent.get_state(), "round start");
        let agent_move = self.agent.choose_action();
        self.agent.update_history(player, agent_move);
        let reward = reward_for(player, agent_move);
        self.agent.learn(player, agent_move, reward);
        let outcome = self.agent.update_stats(player, agent_move);
        RoundReport {
            player,
            agent: agent_move,
            outcome,
            epsilon: self.agent.epsilon(),
        }
    }

    pub fn agent(&self) -> &AdaptiveAgent {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut AdaptiveAgent {
        &mut self.agent
    }

    /// Save and end the session.
    pub fn finish(mut self) -> Result<(), PersistenceError> {
        self.saved = true;
        self.agent.save()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.saved {
            return;
        }
        self.saved = true;
        if let Err(e) = self.agent.save() {
            error!(error = %e, "failed to save learning state at session end");
        }
    }
}

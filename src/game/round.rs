use super::Move;

/// Result of a single exchange, from the agent's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// Score `agent` against `player`.
    pub fn classify(player: Move, agent: Move) -> Outcome {
        if player == agent {
            Outcome::Draw
        } else if agent == player.counter() {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }

    /// Message shown to the human after a round.
    pub fn verdict(self) -> &'static str {
        match self {
            Outcome::Win => "AI wins!",
            Outcome::Loss => "You win!",
            Outcome::Draw => "It's a draw!",
        }
    }
}

/// Reward fed to the learner: +1 when the agent won, -1 otherwise (draws included).
pub fn reward_for(player: Move, agent: Move) -> i32 {
    if agent == player.counter() {
        1
    } else {
        -1
    }
}

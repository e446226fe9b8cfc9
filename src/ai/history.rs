use std::collections::VecDeque;

use crate::game::{slot_name, Move};

/// Number of slots kept per side.
pub const HISTORY_LEN: usize = 5;

/// Fixed-length ring buffer of recent moves. Unplayed slots hold `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveHistory {
    slots: VecDeque<Option<Move>>,
}

impl MoveHistory {
    pub fn new() -> Self {
        MoveHistory {
            slots: std::iter::repeat(None).take(HISTORY_LEN).collect(),
        }
    }

    /// Append a move, evicting the oldest slot.
    pub fn push(&mut self, m: Move) {
        self.slots.pop_front();
        self.slots.push_back(Some(m));
    }

    /// Most recent slot.
    pub fn last(&self) -> Option<Move> {
        self.slots.back().copied().flatten()
    }

    /// Slot `n` positions back from the newest (0 = newest).
    pub fn back(&self, n: usize) -> Option<Move> {
        if n >= self.slots.len() {
            return None;
        }
        self.slots[self.slots.len() - 1 - n]
    }

    /// The three newest slots, oldest first.
    pub fn last_three(&self) -> [Option<Move>; 3] {
        [self.back(2), self.back(1), self.back(0)]
    }

    /// Count of slots holding a real move.
    pub fn real_moves(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<Move>> + '_ {
        self.slots.iter().copied()
    }

    /// Comma-joined slot names, oldest first.
    pub fn encode(&self) -> String {
        self.iter().map(slot_name).collect::<Vec<_>>().join(",")
    }
}

impl Default for MoveHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// Paired player and agent histories, appended together each round.
#[derive(Debug, Clone, Default)]
pub struct RoundHistory {
    pub player: MoveHistory,
    pub agent: MoveHistory,
}

impl RoundHistory {
    pub fn append(&mut self, player: Move, agent: Move) {
        self.player.push(player);
        self.agent.push(agent);
    }

    /// Diagnostic encoding: `<player slots>|<agent slots>|<most frequent move>`.
    pub fn encode_state(&self, most_frequent: Move) -> String {
        format!(
            "{}|{}|{}",
            self.player.encode(),
            self.agent.encode(),
            most_frequent
        )
    }
}

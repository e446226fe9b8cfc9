use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::game::{slot_name, Move};

/// Per-move counters, serialized as `{"rock": n, "paper": n, "scissors": n}`.
/// Absent keys read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveCounts {
    pub rock: u64,
    pub paper: u64,
    pub scissors: u64,
}

impl MoveCounts {
    pub fn get(&self, m: Move) -> u64 {
        match m {
            Move::Rock => self.rock,
            Move::Paper => self.paper,
            Move::Scissors => self.scissors,
        }
    }

    fn slot_mut(&mut self, m: Move) -> &mut u64 {
        match m {
            Move::Rock => &mut self.rock,
            Move::Paper => &mut self.paper,
            Move::Scissors => &mut self.scissors,
        }
    }

    pub fn increment(&mut self, m: Move) {
        *self.slot_mut(m) += 1;
    }

    pub fn add(&mut self, m: Move, n: u64) {
        *self.slot_mut(m) += n;
    }

    pub fn total(&self) -> u64 {
        self.rock + self.paper + self.scissors
    }

    /// Move with the highest count, or `None` when every count is zero.
    /// Ties resolve to the earliest move in [`Move::ALL`].
    pub fn argmax(&self) -> Option<Move> {
        let mut best: Option<(Move, u64)> = None;
        for m in Move::ALL {
            let count = self.get(m);
            if count == 0 {
                continue;
            }
            match best {
                Some((_, best_count)) if best_count >= count => {}
                _ => best = Some((m, count)),
            }
        }
        best.map(|(m, _)| m)
    }

    /// Share of each move, in [`Move::ALL`] order. An empty table divides by one.
    pub fn shares(&self) -> [(Move, f64); 3] {
        let total = self.total().max(1) as f64;
        Move::ALL.map(|m| (m, self.get(m) as f64 / total))
    }

    /// Element-wise sum.
    pub fn merge(&mut self, other: &MoveCounts) {
        for m in Move::ALL {
            self.add(m, other.get(m));
        }
    }
}

/// Counts of "previous player move → next player move".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionTable {
    pub rock: MoveCounts,
    pub paper: MoveCounts,
    pub scissors: MoveCounts,
}

impl TransitionTable {
    pub fn row(&self, from: Move) -> &MoveCounts {
        match from {
            Move::Rock => &self.rock,
            Move::Paper => &self.paper,
            Move::Scissors => &self.scissors,
        }
    }

    pub fn row_mut(&mut self, from: Move) -> &mut MoveCounts {
        match from {
            Move::Rock => &mut self.rock,
            Move::Paper => &mut self.paper,
            Move::Scissors => &mut self.scissors,
        }
    }

    pub fn record(&mut self, from: Move, to: Move) {
        self.row_mut(from).increment(to);
    }
}

/// Three consecutive player slots, oldest first. Serialized as `"rock,none,paper"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PatternKey(pub [Option<Move>; 3]);

impl PatternKey {
    /// True when every slot holds a real move.
    pub fn is_complete(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    /// Final (newest) slot.
    pub fn last(&self) -> Option<Move> {
        self.0[2]
    }
}

impl fmt::Display for PatternKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{},{},{}", slot_name(a), slot_name(b), slot_name(c))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid pattern key '{0}'")]
pub struct ParsePatternError(pub String);

impl FromStr for PatternKey {
    type Err = ParsePatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 3 {
            return Err(ParsePatternError(s.to_string()));
        }
        let mut slots = [None; 3];
        for (slot, part) in slots.iter_mut().zip(parts) {
            *slot = match part.trim() {
                "none" => None,
                other => Some(
                    other
                        .parse::<Move>()
                        .map_err(|_| ParsePatternError(s.to_string()))?,
                ),
            };
        }
        Ok(PatternKey(slots))
    }
}

impl From<PatternKey> for String {
    fn from(key: PatternKey) -> String {
        key.to_string()
    }
}

impl TryFrom<String> for PatternKey {
    type Error = ParsePatternError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Pattern key → counts of moves observed under it. Entries are created on
/// the first [`record`](PatternTable::record) for a key; lookups never insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternTable {
    entries: BTreeMap<PatternKey, MoveCounts>,
}

impl PatternTable {
    pub fn get(&self, key: &PatternKey) -> Option<&MoveCounts> {
        self.entries.get(key)
    }

    pub fn record(&mut self, key: PatternKey, m: Move) {
        self.entries.entry(key).or_default().increment(m);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PatternKey, &MoveCounts)> {
        self.entries.iter()
    }
}

/// The three learned tables, laid out with their persisted field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningTables {
    #[serde(rename = "move_frequencies", default)]
    pub frequencies: MoveCounts,
    #[serde(rename = "pattern_frequencies", default)]
    pub patterns: PatternTable,
    #[serde(rename = "transition_matrix", default)]
    pub transitions: TransitionTable,
}

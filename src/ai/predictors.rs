use rand::Rng;
use tracing::debug;

use super::history::MoveHistory;
use super::tables::{LearningTables, PatternKey};
use crate::game::Move;

/// A heuristic that may hold an opinion about the player's next move.
pub trait Predictor {
    fn name(&self) -> &str;

    /// `None` means no opinion. Must not mutate anything.
    fn predict(&self, tables: &LearningTables, history: &MoveHistory) -> Option<Move>;
}

/// Most frequent move overall.
pub struct FrequencyPredictor;

impl Predictor for FrequencyPredictor {
    fn name(&self) -> &str {
        "frequency"
    }

    fn predict(&self, tables: &LearningTables, _history: &MoveHistory) -> Option<Move> {
        tables.frequencies.argmax()
    }
}

/// Most frequent follow-up to the player's last move.
pub struct TransitionPredictor;

impl Predictor for TransitionPredictor {
    fn name(&self) -> &str {
        "transition"
    }

    fn predict(&self, tables: &LearningTables, history: &MoveHistory) -> Option<Move> {
        let last = history.last()?;
        tables.transitions.row(last).argmax()
    }
}

/// Most frequent move recorded under the current 3-move pattern.
///
/// The table is updated with the pattern's own final move as the counted
/// value, so a lookup here favors repeating the newest move of the pattern.
/// That self-inclusive keying is kept as observed.
pub struct PatternPredictor;

impl Predictor for PatternPredictor {
    fn name(&self) -> &str {
        "pattern"
    }

    fn predict(&self, tables: &LearningTables, history: &MoveHistory) -> Option<Move> {
        let key = PatternKey(history.last_three());
        if !key.is_complete() {
            return None;
        }
        tables.patterns.get(&key)?.argmax()
    }
}

/// Majority vote over the pattern, frequency and transition predictors.
pub struct EnsemblePredictor {
    members: Vec<Box<dyn Predictor>>,
}

impl EnsemblePredictor {
    pub fn new() -> Self {
        EnsemblePredictor {
            members: vec![
                Box::new(PatternPredictor),
                Box::new(FrequencyPredictor),
                Box::new(TransitionPredictor),
            ],
        }
    }

    /// Ballots in evaluation order, skipping members without an opinion.
    pub fn ballots(&self, tables: &LearningTables, history: &MoveHistory) -> Vec<Move> {
        self.members
            .iter()
            .filter_map(|p| {
                let vote = p.predict(tables, history);
                debug!(predictor = p.name(), vote = ?vote, "predictor ballot");
                vote
            })
            .collect()
    }

    /// Resolve one predicted player move.
    ///
    /// A sentinel as the newest history slot, or an empty ballot box, yields a
    /// uniformly random move.
    pub fn predict<R: Rng>(
        &self,
        tables: &LearningTables,
        history: &MoveHistory,
        rng: &mut R,
    ) -> Move {
        if history.last().is_none() {
            return random_move(rng);
        }
        majority(&self.ballots(tables, history)).unwrap_or_else(|| random_move(rng))
    }
}

impl Default for EnsemblePredictor {
    fn default() -> Self {
        Self::new()
    }
}

/// Most common ballot; ties go to whichever tied move was cast first.
pub fn majority(ballots: &[Move]) -> Option<Move> {
    let mut votes = [0usize; 3];
    for m in ballots {
        votes[m.index()] += 1;
    }
    let mut winner: Option<Move> = None;
    for &m in ballots {
        match winner {
            Some(w) if votes[w.index()] >= votes[m.index()] => {}
            _ => winner = Some(m),
        }
    }
    winner
}

pub fn random_move<R: Rng>(rng: &mut R) -> Move {
    Move::ALL[rng.random_range(0..Move::ALL.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn history_of(moves: &[Move]) -> MoveHistory {
        let mut h = MoveHistory::new();
        for &m in moves {
            h.push(m);
        }
        h
    }

    #[test]
    fn test_no_opinion_on_empty_tables() {
        let tables = LearningTables::default();
        let h = history_of(&[Move::Rock, Move::Rock, Move::Rock]);
        assert_eq!(FrequencyPredictor.predict(&tables, &h), None);
        assert_eq!(TransitionPredictor.predict(&tables, &h), None);
        assert_eq!(PatternPredictor.predict(&tables, &h), None);
    }

    #[test]
    fn test_transition_scenario() {
        let mut tables = LearningTables::default();
        for _ in 0..5 {
            tables.transitions.record(Move::Paper, Move::Scissors);
        }
        let h = history_of(&[Move::Paper]);
        assert_eq!(TransitionPredictor.predict(&tables, &h), Some(Move::Scissors));

        let mut rng = StdRng::seed_from_u64(7);
        let ensemble = EnsemblePredictor::new();
        assert_eq!(ensemble.ballots(&tables, &h), vec![Move::Scissors]);
        assert_eq!(ensemble.predict(&tables, &h, &mut rng), Move::Scissors);
        assert_eq!(ensemble.predict(&tables, &h, &mut rng).counter(), Move::Rock);
    }

    #[test]
    fn test_transition_ignores_sentinel() {
        let mut tables = LearningTables::default();
        tables.transitions.record(Move::Rock, Move::Rock);
        assert_eq!(TransitionPredictor.predict(&tables, &MoveHistory::new()), None);
    }

    #[test]
    fn test_pattern_needs_three_real_moves() {
        let mut tables = LearningTables::default();
        tables
            .patterns
            .record(PatternKey([None, Some(Move::Rock), Some(Move::Rock)]), Move::Rock);
        let h = history_of(&[Move::Rock, Move::Rock]);
        assert_eq!(PatternPredictor.predict(&tables, &h), None);

        tables
            .patterns
            .record(PatternKey([Some(Move::Rock); 3]), Move::Rock);
        let h = history_of(&[Move::Rock, Move::Rock, Move::Rock]);
        assert_eq!(PatternPredictor.predict(&tables, &h), Some(Move::Rock));
    }

    #[test]
    fn test_majority_is_stable() {
        assert_eq!(majority(&[]), None);
        assert_eq!(majority(&[Move::Scissors]), Some(Move::Scissors));
        assert_eq!(
            majority(&[Move::Paper, Move::Rock, Move::Scissors]),
            Some(Move::Paper)
        );
        assert_eq!(
            majority(&[Move::Scissors, Move::Rock, Move::Rock]),
            Some(Move::Rock)
        );
        assert_eq!(majority(&[Move::Scissors, Move::Rock]), Some(Move::Scissors));
    }

    #[test]
    fn test_three_way_split_follows_member_order() {
        let mut tables = LearningTables::default();
        tables
            .patterns
            .record(PatternKey([Some(Move::Paper); 3]), Move::Rock);
        tables.frequencies.add(Move::Paper, 5);
        tables.transitions.record(Move::Paper, Move::Scissors);
        let h = history_of(&[Move::Paper, Move::Paper, Move::Paper]);

        let ensemble = EnsemblePredictor::new();
        assert_eq!(
            ensemble.ballots(&tables, &h),
            vec![Move::Rock, Move::Paper, Move::Scissors]
        );
        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(ensemble.predict(&tables, &h, &mut rng), Move::Rock);
    }

    #[test]
    fn test_ensemble_on_sentinel_history_is_random_but_valid() {
        let mut tables = LearningTables::default();
        tables.frequencies.add(Move::Rock, 10);
        let ensemble = EnsemblePredictor::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let m = ensemble.predict(&tables, &MoveHistory::new(), &mut rng);
            seen[m.index()] = true;
        }
        assert!(seen.iter().all(|s| *s), "sentinel history should not follow the tables");
    }
}

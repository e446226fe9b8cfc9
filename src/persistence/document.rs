use serde::{Deserialize, Serialize};

use crate::ai::LearningTables;
use crate::session::SessionStats;

/// Everything written to the learning file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningDocument {
    #[serde(flatten)]
    pub tables: LearningTables,
    #[serde(default)]
    pub stats: SessionStats,
}

impl LearningDocument {
    /// Fold a loaded document into live state.
    ///
    /// The three tables are replaced outright. Stats counters are summed,
    /// and the live `session_start` is kept.
    pub fn merge_into(self, tables: &mut LearningTables, stats: &mut SessionStats) {
        *tables = self.tables;
        stats.accumulate(&self.stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::PatternKey;
    use crate::game::Move;

    const SAMPLE: &str = r#"{
        "move_frequencies": {"rock": 3, "paper": 1, "scissors": 0},
        "pattern_frequencies": {
            "none,none,rock": {"rock": 1, "paper": 0, "scissors": 0},
            "rock,rock,paper": {"rock": 0, "paper": 1, "scissors": 0}
        },
        "transition_matrix": {
            "rock": {"rock": 2, "paper": 1, "scissors": 0},
            "paper": {"rock": 0, "paper": 0, "scissors": 0},
            "scissors": {"rock": 0, "paper": 0, "scissors": 0}
        },
        "stats": {
            "wins": 2, "losses": 1, "draws": 1,
            "player_patterns": {"none,none,rock": 1, "rock,rock,paper": 1},
            "winning_moves": {"paper": 2},
            "session_start": "2024-01-01 10:00:00"
        }
    }"#;

    #[test]
    fn test_parses_original_layout() {
        let doc: LearningDocument = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(doc.tables.frequencies.get(Move::Rock), 3);
        assert_eq!(doc.tables.transitions.row(Move::Rock).get(Move::Rock), 2);
        let key: PatternKey = "rock,rock,paper".parse().unwrap();
        assert_eq!(doc.tables.patterns.get(&key).unwrap().get(Move::Paper), 1);
        assert_eq!(doc.stats.wins, 2);
        assert_eq!(doc.stats.winning_moves.get(Move::Paper), 2);
        assert_eq!(doc.stats.winning_moves.get(Move::Rock), 0);
    }

    #[test]
    fn test_serialized_top_level_keys() {
        let json = serde_json::to_value(LearningDocument::default()).unwrap();
        let obj = json.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec!["move_frequencies", "pattern_frequencies", "stats", "transition_matrix"]
        );
    }

    #[test]
    fn test_merge_replaces_tables_and_sums_stats() {
        let doc: LearningDocument = serde_json::from_str(SAMPLE).unwrap();

        let mut tables = LearningTables::default();
        tables.frequencies.add(Move::Scissors, 9);
        let mut stats = SessionStats::new();
        stats.session_start = "2025-06-01 08:00:00".to_string();
        stats.wins = 1;
        stats.winning_moves.add(Move::Paper, 1);

        doc.merge_into(&mut tables, &mut stats);

        assert_eq!(tables.frequencies.get(Move::Scissors), 0);
        assert_eq!(tables.frequencies.get(Move::Rock), 3);
        assert_eq!(tables.patterns.len(), 2);
        assert_eq!(stats.wins, 3);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.winning_moves.get(Move::Paper), 3);
        assert_eq!(stats.player_patterns.len(), 2);
        assert_eq!(stats.session_start, "2025-06-01 08:00:00");
    }

    #[test]
    fn test_partial_document_defaults() {
        let doc: LearningDocument =
            serde_json::from_str(r#"{"move_frequencies": {"rock": 1}}"#).unwrap();
        assert_eq!(doc.tables.frequencies.total(), 1);
        assert!(doc.tables.patterns.is_empty());
        assert_eq!(doc.stats.games_played(), 0);
    }
}

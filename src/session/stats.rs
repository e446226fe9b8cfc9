use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::ai::{MoveCounts, PatternKey};
use crate::game::{Move, Outcome};

/// Outcome counters and reporting tallies, persisted under `"stats"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionStats {
    pub wins: u64,
    pub losses: u64,
    pub draws: u64,
    pub player_patterns: BTreeMap<PatternKey, u64>,
    pub winning_moves: MoveCounts,
    pub session_start: String,
}

impl SessionStats {
    /// Fresh counters stamped with the current time.
    pub fn new() -> Self {
        SessionStats {
            wins: 0,
            losses: 0,
            draws: 0,
            player_patterns: BTreeMap::new(),
            winning_moves: MoveCounts::default(),
            session_start: now_timestamp(),
        }
    }

    /// Score one exchange and bump the occurrence count of `pattern`.
    pub fn record(&mut self, player: Move, agent: Move, pattern: PatternKey) -> Outcome {
        let outcome = Outcome::classify(player, agent);
        match outcome {
            Outcome::Win => {
                self.wins += 1;
                self.winning_moves.increment(agent);
            }
            Outcome::Loss => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
        *self.player_patterns.entry(pattern).or_insert(0) += 1;
        outcome
    }

    /// Add another session's counters into these. `session_start` is left alone.
    pub fn accumulate(&mut self, other: &SessionStats) {
        self.wins += other.wins;
        self.losses += other.losses;
        self.draws += other.draws;
        self.winning_moves.merge(&other.winning_moves);
        for (key, count) in &other.player_patterns {
            *self.player_patterns.entry(*key).or_insert(0) += count;
        }
    }

    pub fn games_played(&self) -> u64 {
        self.wins + self.losses + self.draws
    }

    /// Up to `n` moves the agent won with, most wins first. Moves with no wins
    /// are skipped.
    pub fn top_winning_moves(&self, n: usize) -> Vec<(Move, u64)> {
        let mut moves: Vec<(Move, u64)> = Move::ALL
            .iter()
            .map(|&m| (m, self.winning_moves.get(m)))
            .filter(|(_, c)| *c > 0)
            .collect();
        // stable sort keeps Rock/Paper/Scissors order among equals
        moves.sort_by(|a, b| b.1.cmp(&a.1));
        moves.truncate(n);
        moves
    }

    /// Up to `n` most frequent player patterns.
    pub fn top_patterns(&self, n: usize) -> Vec<(PatternKey, u64)> {
        let mut patterns: Vec<(PatternKey, u64)> =
            self.player_patterns.iter().map(|(k, c)| (*k, *c)).collect();
        patterns.sort_by(|a, b| b.1.cmp(&a.1));
        patterns.truncate(n);
        patterns
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Current UTC time as `YYYY-MM-DD HH:MM:SS`.
pub fn now_timestamp() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format_timestamp(secs)
}

/// Format seconds since the Unix epoch as `YYYY-MM-DD HH:MM:SS` (UTC).
pub fn format_timestamp(secs: u64) -> String {
    // u64::MAX / 86_400 fits in i64, so the conversion cannot fail
    let days = i64::try_from(secs / 86_400).unwrap_or(i64::MAX);
    let rem = secs % 86_400;
    let (year, month, day) = civil_from_days(days);
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        year,
        month,
        day,
        rem / 3600,
        (rem % 3600) / 60,
        rem % 60
    )
}

// Howard Hinnant's days-to-civil conversion.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month, day)
}

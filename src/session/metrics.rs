use std::collections::VecDeque;

use crate::game::Outcome;

/// Rolling window of round outcomes.
pub struct RoundMetrics {
    outcomes: VecDeque<Outcome>,
    capacity: usize,
    total_rounds: usize, // lifetime count, never capped
}

impl RoundMetrics {
    pub fn with_capacity(capacity: usize) -> Self {
        RoundMetrics {
            outcomes: VecDeque::with_capacity(capacity),
            capacity,
            total_rounds: 0,
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn record(&mut self, outcome: Outcome) {
        self.total_rounds += 1;
        self.outcomes.push_back(outcome);
        if self.outcomes.len() > self.capacity {
            self.outcomes.pop_front();
        }
    }

    fn rate(&self, last_n: usize, want: Outcome) -> f32 {
        let n = self.outcomes.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let hits = self
            .outcomes
            .iter()
            .rev()
            .take(n)
            .filter(|o| **o == want)
            .count();
        hits as f32 / n as f32
    }

    /// Agent win rate over the last N rounds.
    pub fn win_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, Outcome::Win)
    }

    pub fn loss_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, Outcome::Loss)
    }

    pub fn draw_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, Outcome::Draw)
    }

    pub fn total_rounds(&self) -> usize {
        self.total_rounds
    }
}

impl Default for RoundMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rates() {
        let m = RoundMetrics::new();
        assert_eq!(m.win_rate(10), 0.0);
        assert_eq!(m.total_rounds(), 0);
    }

    #[test]
    fn test_rates_over_window() {
        let mut m = RoundMetrics::with_capacity(4);
        for o in [Outcome::Loss, Outcome::Loss, Outcome::Win, Outcome::Win, Outcome::Draw, Outcome::Win] {
            m.record(o);
        }
        assert_eq!(m.total_rounds(), 6);
        // window keeps Win, Win, Draw, Win
        assert!((m.win_rate(100) - 0.75).abs() < 1e-6);
        assert!((m.draw_rate(2) - 0.5).abs() < 1e-6);
        assert_eq!(m.loss_rate(4), 0.0);
    }
}

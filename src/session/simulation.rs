use crate::ai::{AdaptiveAgent, Agent};
use crate::game::Outcome;
use crate::session::metrics::RoundMetrics;
use crate::session::ShutdownFlag;

/// Simulation settings.
pub struct SimulationConfig {
    pub rounds: usize,
    pub log_interval: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            rounds: 1000,
            log_interval: 100,
        }
    }
}

/// Totals from one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSummary {
    pub rounds: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub final_epsilon: f64,
    /// The run stopped on a shutdown request before `rounds` were played.
    pub interrupted: bool,
}

impl SimulationSummary {
    pub fn win_rate(&self) -> f32 {
        if self.rounds == 0 {
            return 0.0;
        }
        self.wins as f32 / self.rounds as f32
    }
}

/// Plays the adaptive agent against a scripted opponent.
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Self {
        Simulator { config }
    }

    /// Run every round, printing a progress line each `log_interval` rounds
    /// when `verbose` is set.
    pub fn run(
        &self,
        agent: &mut AdaptiveAgent,
        opponent: &mut dyn Agent,
        verbose: bool,
    ) -> SimulationSummary {
        self.run_until(agent, opponent, verbose, &ShutdownFlag::new())
    }

    /// Like [`run`](Simulator::run), but stops before the next round once
    /// `stop` is set.
    pub fn run_until(
        &self,
        agent: &mut AdaptiveAgent,
        opponent: &mut dyn Agent,
        verbose: bool,
        stop: &ShutdownFlag,
    ) -> SimulationSummary {
        let mut metrics = RoundMetrics::with_capacity(self.config.log_interval.max(1));
        let mut summary = SimulationSummary {
            rounds: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            final_epsilon: agent.epsilon(),
            interrupted: false,
        };

        if verbose {
            println!(
                "Simulating {} rounds: {} vs {}",
                self.config.rounds,
                agent.name(),
                opponent.name()
            );
            println!("-------------------------------------------");
        }

        for round in 1..=self.config.rounds {
            if stop.is_set() {
                summary.interrupted = true;
                break;
            }
            let agent_move = agent.select_action();
            let player_move = opponent.select_action();
            agent.observe(agent_move, player_move);
            opponent.observe(player_move, agent_move);

            let outcome = Outcome::classify(player_move, agent_move);
            metrics.record(outcome);
            summary.rounds += 1;
            match outcome {
                Outcome::Win => summary.wins += 1,
                Outcome::Loss => summary.losses += 1,
                Outcome::Draw => summary.draws += 1,
            }

            if verbose && self.config.log_interval > 0 && round % self.config.log_interval == 0 {
                let window = self.config.log_interval;
                println!(
                    "Round {}/{} | eps: {:.3} | win({}): {:.1}% | loss: {:.1}% | draw: {:.1}%",
                    round,
                    self.config.rounds,
                    agent.epsilon(),
                    window,
                    metrics.win_rate(window) * 100.0,
                    metrics.loss_rate(window) * 100.0,
                    metrics.draw_rate(window) * 100.0,
                );
            }
        }

        summary.final_epsilon = agent.epsilon();
        if verbose {
            println!("-------------------------------------------");
            if summary.interrupted {
                println!("Stopped early after {} rounds.", summary.rounds);
            }
            println!(
                "Done. {} rounds | AI wins {} | player wins {} | draws {} | win rate {:.1}%",
                summary.rounds,
                summary.wins,
                summary.losses,
                summary.draws,
                summary.win_rate() * 100.0
            );
        }
        summary
    }
}

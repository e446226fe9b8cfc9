//! Scripted players used to exercise the adaptive agent without a human.

use std::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::agent::Agent;
use super::predictors::random_move;
use crate::game::Move;

/// Always throws the same move.
pub struct ConstantAgent {
    throw: Move,
}

impl ConstantAgent {
    pub fn new(throw: Move) -> Self {
        ConstantAgent { throw }
    }
}

impl Agent for ConstantAgent {
    fn select_action(&mut self) -> Move {
        self.throw
    }

    fn name(&self) -> &str {
        "Constant"
    }
}

/// Rock, paper, scissors, rock, ...
pub struct CycleAgent {
    next: usize,
}

impl CycleAgent {
    pub fn new() -> Self {
        CycleAgent { next: 0 }
    }
}

impl Default for CycleAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for CycleAgent {
    fn select_action(&mut self) -> Move {
        let m = Move::ALL[self.next];
        self.next = (self.next + 1) % Move::ALL.len();
        m
    }

    fn name(&self) -> &str {
        "Cycle"
    }
}

/// Uniformly random throws.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self) -> Move {
        random_move(&mut self.rng)
    }

    fn name(&self) -> &str {
        "Random"
    }
}

/// Copies whatever the other side threw last round. Opens with rock.
pub struct MirrorAgent {
    last_seen: Move,
}

impl MirrorAgent {
    pub fn new() -> Self {
        MirrorAgent {
            last_seen: Move::Rock,
        }
    }
}

impl Default for MirrorAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for MirrorAgent {
    fn select_action(&mut self) -> Move {
        self.last_seen
    }

    fn name(&self) -> &str {
        "Mirror"
    }

    fn observe(&mut self, _mine: Move, theirs: Move) {
        self.last_seen = theirs;
    }
}

/// Which scripted opponent to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpponentKind {
    Constant(Move),
    Cycle,
    Random,
    Mirror,
}

impl OpponentKind {
    pub fn build(self, seed: Option<u64>) -> Box<dyn Agent> {
        match self {
            OpponentKind::Constant(m) => Box::new(ConstantAgent::new(m)),
            OpponentKind::Cycle => Box::new(CycleAgent::new()),
            OpponentKind::Random => match seed {
                Some(seed) => Box::new(RandomAgent::seeded(seed)),
                None => Box::new(RandomAgent::new()),
            },
            OpponentKind::Mirror => Box::new(MirrorAgent::new()),
        }
    }
}

impl FromStr for OpponentKind {
    type Err = String;

    /// `constant` (rock), `constant:<move>`, `cycle`, `random` or `mirror`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.split_once(':') {
            Some(("constant", m)) => m
                .parse::<Move>()
                .map(OpponentKind::Constant)
                .map_err(|e| e.to_string()),
            Some(_) => Err(format!("unknown opponent '{s}'")),
            None => match s.as_str() {
                "constant" => Ok(OpponentKind::Constant(Move::Rock)),
                "cycle" => Ok(OpponentKind::Cycle),
                "random" => Ok(OpponentKind::Random),
                "mirror" => Ok(OpponentKind::Mirror),
                _ => Err(format!(
                    "unknown opponent '{s}' (expected constant, cycle, random or mirror)"
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_agent_order() {
        let mut agent = CycleAgent::new();
        let moves: Vec<Move> = (0..4).map(|_| agent.select_action()).collect();
        assert_eq!(moves, vec![Move::Rock, Move::Paper, Move::Scissors, Move::Rock]);
    }

    #[test]
    fn test_mirror_agent_copies() {
        let mut agent = MirrorAgent::new();
        assert_eq!(agent.select_action(), Move::Rock);
        agent.observe(Move::Rock, Move::Scissors);
        assert_eq!(agent.select_action(), Move::Scissors);
    }

    #[test]
    fn test_random_agent_covers_all_moves() {
        let mut agent = RandomAgent::seeded(9);
        let mut seen = [false; 3];
        for _ in 0..100 {
            seen[agent.select_action().index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_parse_opponent_kind() {
        assert_eq!("cycle".parse::<OpponentKind>().unwrap(), OpponentKind::Cycle);
        assert_eq!(
            "constant:paper".parse::<OpponentKind>().unwrap(),
            OpponentKind::Constant(Move::Paper)
        );
        assert_eq!(
            "Constant".parse::<OpponentKind>().unwrap(),
            OpponentKind::Constant(Move::Rock)
        );
        assert!("lizard".parse::<OpponentKind>().is_err());
        assert!("constant:lizard".parse::<OpponentKind>().is_err());
    }

    #[test]
    fn test_build_names() {
        assert_eq!(OpponentKind::Mirror.build(None).name(), "Mirror");
        assert_eq!(OpponentKind::Random.build(Some(1)).name(), "Random");
    }
}

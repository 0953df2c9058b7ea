//! Priority functions handed to the search driver.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::HeuristicError;
use crate::heuristic::HeuristicEngine;
use crate::state::State;

pub const DEFAULT_WEIGHT: u32 = 5;

/// Orders states for a best-first search; lower is expanded first.
/// `Display` gives the label the driver logs.
pub trait Evaluation: fmt::Display + Send + Sync {
    fn engine(&self) -> &HeuristicEngine;

    fn f(&self, state: &State) -> u64;

    fn h(&self, state: &State) -> u64 {
        self.engine().h(state)
    }
}

/// `g + h`
pub struct AStar {
    engine: Arc<HeuristicEngine>,
}

impl AStar {
    pub fn new(engine: Arc<HeuristicEngine>) -> Self {
        AStar { engine }
    }
}

impl Evaluation for AStar {
    fn engine(&self) -> &HeuristicEngine {
        &self.engine
    }

    fn f(&self, state: &State) -> u64 {
        state.g().saturating_add(self.h(state))
    }
}

impl fmt::Display for AStar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A* evaluation")
    }
}

/// `g + w * h`
pub struct WeightedAStar {
    engine: Arc<HeuristicEngine>,
    w: u32,
}

impl WeightedAStar {
    pub fn new(engine: Arc<HeuristicEngine>, w: u32) -> Self {
        WeightedAStar { engine, w }
    }

    pub fn weight(&self) -> u32 {
        self.w
    }
}

impl Evaluation for WeightedAStar {
    fn engine(&self) -> &HeuristicEngine {
        &self.engine
    }

    fn f(&self, state: &State) -> u64 {
        let weighted = self.h(state).saturating_mul(self.w as u64);
        state.g().saturating_add(weighted)
    }
}

impl fmt::Display for WeightedAStar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WA*({}) evaluation", self.w)
    }
}

/// `h` alone; path cost is ignored.
pub struct Greedy {
    engine: Arc<HeuristicEngine>,
}

impl Greedy {
    pub fn new(engine: Arc<HeuristicEngine>) -> Self {
        Greedy { engine }
    }
}

impl Evaluation for Greedy {
    fn engine(&self) -> &HeuristicEngine {
        &self.engine
    }

    fn f(&self, state: &State) -> u64 {
        self.h(state)
    }
}

impl fmt::Display for Greedy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Greedy evaluation")
    }
}

/// Strategy choice as it appears in configuration.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Strategy {
    #[default]
    AStar,
    WeightedAStar(u32),
    Greedy,
}

impl Strategy {
    pub fn build(self, engine: Arc<HeuristicEngine>) -> Box<dyn Evaluation> {
        match self {
            Strategy::AStar => Box::new(AStar::new(engine)),
            Strategy::WeightedAStar(w) => Box::new(WeightedAStar::new(engine, w)),
            Strategy::Greedy => Box::new(Greedy::new(engine)),
        }
    }
}

impl FromStr for Strategy {
    type Err = HeuristicError;

    /// Accepts `astar`, `greedy`, `wastar` and `wastar:<weight>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let (name, weight) = match lower.split_once(':') {
            Some((name, weight)) => (name, Some(weight)),
            None => (lower.as_str(), None),
        };

        match (name, weight) {
            ("astar", None) => Ok(Strategy::AStar),
            ("greedy", None) => Ok(Strategy::Greedy),
            ("wastar", None) => Ok(Strategy::WeightedAStar(DEFAULT_WEIGHT)),
            ("wastar", Some(w)) => w
                .parse::<u32>()
                .map(Strategy::WeightedAStar)
                .map_err(|_| HeuristicError::InvalidArgument(format!("bad weight {w:?}"))),
            _ => Err(HeuristicError::InvalidArgument(format!(
                "unknown strategy {s:?}"
            ))),
        }
    }
}

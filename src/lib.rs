//! Heuristic engine for typed box-pushing puzzles.
//!
//! The engine precomputes walking distances over the static grid and an
//! index of goals by letter, then scores search states by greedily matching
//! boxes to goals of their letter. [`evaluation`] wraps the score into the
//! priorities a best-first search driver sorts on.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use box_heuristic::{parse_level, HeuristicEngine, Strategy};
//!
//! let level = parse_level(text)?;
//! let engine = Arc::new(HeuristicEngine::new(level.grid)?);
//! let evaluator = Strategy::WeightedAStar(5).build(engine);
//! println!("{}: f = {}", evaluator, evaluator.f(&level.initial));
//! ```

pub mod config;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod goals;
pub mod grid;
pub mod heuristic;
pub mod level;
pub mod state;

pub use distance::{DistanceMap, MAX_OPEN_CELLS, UNREACHABLE};
pub use error::{HeuristicError, Result};
pub use evaluation::{AStar, Evaluation, Greedy, Strategy, WeightedAStar};
pub use goals::{Goal, GoalId, GoalIndex};
pub use grid::{Grid, Point};
pub use heuristic::{AssignedPair, Assignment, EngineOptions, HeuristicEngine, UNREACHABLE_COST};
pub use level::{load_level, parse_level, Level};
pub use state::{BoxPlacement, State};

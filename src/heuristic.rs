//! Remaining-cost estimate for a state.
//!
//! Boxes are matched greedily to free goals of their letter: the globally
//! closest box/goal pair is committed first, both ends are retired, and the
//! next closest surviving pair follows until none remain. The estimate is the
//! sum of squared matched distances plus the walk from the agent to the
//! nearest matched box.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use smallvec::{smallvec, SmallVec};
use tracing::{info, trace};

use crate::distance::{DistanceMap, UNREACHABLE};
use crate::error::Result;
use crate::goals::{GoalId, GoalIndex};
use crate::grid::{type_letter, Grid, Point};
use crate::state::State;

/// Estimate returned when a committed pair (or the agent) cannot reach its target.
/// Finite estimates saturate one below it.
pub const UNREACHABLE_COST: u64 = u64::MAX;

#[derive(Clone, Copy, Debug)]
pub struct EngineOptions {
    /// Fill the distance table on the rayon pool.
    pub parallel: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions { parallel: true }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AssignedPair {
    pub box_cell: Point,
    pub goal: GoalId,
    pub goal_cell: Point,
    pub distance: u32,
}

/// Committed pairs of one evaluation, in commit order.
#[derive(Clone, Debug, Default)]
pub struct Assignment {
    pairs: SmallVec<[AssignedPair; 20]>,
    agent_distance: Option<u32>,
}

impl Assignment {
    pub fn pairs(&self) -> &[AssignedPair] {
        &self.pairs
    }

    /// Distance from the agent to the nearest matched box, `None` when nothing was matched.
    pub fn agent_distance(&self) -> Option<u32> {
        self.agent_distance
    }

    pub fn cost(&self) -> u64 {
        let mut total: u64 = 0;
        for pair in &self.pairs {
            if pair.distance == UNREACHABLE {
                return UNREACHABLE_COST;
            }
            let d = pair.distance as u64;
            total = total.saturating_add(d * d);
        }

        match self.agent_distance {
            Some(UNREACHABLE) => return UNREACHABLE_COST,
            Some(d) => total = total.saturating_add(d as u64),
            None => {}
        }

        total.min(UNREACHABLE_COST - 1)
    }
}

#[derive(Clone, Copy)]
struct Candidate {
    distance: u32,
    box_idx: u32,
    goal_idx: u32,
}

/// Precomputed grid data shared read-only by every evaluation.
#[derive(Debug)]
pub struct HeuristicEngine {
    grid: Grid,
    distances: DistanceMap,
    goals: GoalIndex,
    // Diagnostics only; never feeds into an estimate.
    evaluations: AtomicU64,
}

impl HeuristicEngine {
    pub fn new(grid: Grid) -> Result<Self> {
        Self::with_options(grid, EngineOptions::default())
    }

    pub fn with_options(grid: Grid, options: EngineOptions) -> Result<Self> {
        let start = Instant::now();
        let distances = DistanceMap::build(&grid, options.parallel)?;
        let goals = GoalIndex::build(&grid);

        info!(
            height = grid.height(),
            width = grid.width(),
            open_cells = distances.open_cells(),
            goals = goals.len(),
            letters = goals.letters().len(),
            parallel = options.parallel,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "heuristic engine ready"
        );

        Ok(HeuristicEngine {
            grid,
            distances,
            goals,
            evaluations: AtomicU64::new(0),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn distances(&self) -> &DistanceMap {
        &self.distances
    }

    pub fn goals(&self) -> &GoalIndex {
        &self.goals
    }

    /// Number of states evaluated so far.
    pub fn evaluations(&self) -> u64 {
        self.evaluations.load(Ordering::Relaxed)
    }

    /// Heuristic value of `state`; 0 exactly when no box still needs a goal.
    #[inline]
    pub fn h(&self, state: &State) -> u64 {
        self.assign(state).cost()
    }

    /// Runs the greedy box/goal matching for `state`.
    pub fn assign(&self, state: &State) -> Assignment {
        self.evaluations.fetch_add(1, Ordering::Relaxed);

        let boxes = state.boxes();
        let mut goal_taken: SmallVec<[bool; 32]> = smallvec![false; self.goals.len()];
        let mut box_done: SmallVec<[bool; 20]> = smallvec![false; boxes.len()];

        // A box resting on a goal of its own letter settles both.
        for (i, b) in boxes.iter().enumerate() {
            if let Some(g) = self.goals.index_at(b.cell) {
                let goal = &self.goals.goals()[g];
                if type_letter(b.letter) == Some(goal.id.letter() as u8) {
                    box_done[i] = true;
                    goal_taken[g] = true;
                }
            }
        }

        let mut candidates: SmallVec<[Candidate; 64]> = SmallVec::new();
        for (i, b) in boxes.iter().enumerate() {
            if box_done[i] {
                continue;
            }
            let Some(letter) = type_letter(b.letter) else {
                continue;
            };
            for &g in self.goals.indices_for(letter) {
                if goal_taken[g as usize] {
                    continue;
                }
                let goal = &self.goals.goals()[g as usize];
                candidates.push(Candidate {
                    distance: self.distances.distance(b.cell, goal.cell),
                    box_idx: i as u32,
                    goal_idx: g,
                });
            }
        }

        // Stable sort: equal distances keep box-then-goal scan order.
        candidates.sort_by_key(|c| c.distance);

        let mut assignment = Assignment::default();
        for c in &candidates {
            let (b, g) = (c.box_idx as usize, c.goal_idx as usize);
            if box_done[b] || goal_taken[g] {
                continue;
            }
            box_done[b] = true;
            goal_taken[g] = true;

            let goal = &self.goals.goals()[g];
            assignment.pairs.push(AssignedPair {
                box_cell: boxes[b].cell,
                goal: goal.id,
                goal_cell: goal.cell,
                distance: c.distance,
            });
        }

        assignment.agent_distance = assignment
            .pairs
            .iter()
            .map(|p| self.distances.distance(state.agent(), p.box_cell))
            .min();

        trace!(
            boxes = boxes.len(),
            candidates = candidates.len(),
            matched = assignment.pairs.len(),
            "assignment"
        );

        assignment
    }
}

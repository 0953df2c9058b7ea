//! Goal cells indexed by type letter.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::error::HeuristicError;
use crate::grid::{type_letter, Grid, Point};

/// Letter plus ordinal within that letter, displayed as `a0`, `a1`, ...
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct GoalId {
    letter: u8,
    ordinal: u32,
}

impl GoalId {
    pub fn new(letter: char, ordinal: u32) -> Option<Self> {
        type_letter(letter).map(|letter| GoalId { letter, ordinal })
    }

    #[inline]
    pub fn letter(&self) -> char {
        self.letter as char
    }

    #[inline]
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter as char, self.ordinal)
    }
}

impl FromStr for GoalId {
    type Err = HeuristicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || HeuristicError::InvalidArgument(format!("bad goal identifier {s:?}"));
        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(invalid)?;
        let ordinal = chars.as_str().parse::<u32>().map_err(|_| invalid())?;
        GoalId::new(letter, ordinal).ok_or_else(invalid)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Goal {
    pub id: GoalId,
    pub cell: Point,
}

/// Bidirectional goal lookup built once from the grid.
///
/// Goals are numbered densely in row-major scan order; that dense index is
/// what the evaluator uses to track which goals are taken.
#[derive(Debug)]
pub struct GoalIndex {
    goals: Vec<Goal>,
    by_cell: FxHashMap<Point, u32>,
    by_id: FxHashMap<GoalId, u32>,
    by_letter: FxHashMap<u8, SmallVec<[u32; 4]>>,
}

impl GoalIndex {
    pub fn build(grid: &Grid) -> Self {
        let mut counters: FxHashMap<u8, u32> = FxHashMap::default();
        let mut goals = Vec::new();
        let mut by_cell = FxHashMap::default();
        let mut by_id = FxHashMap::default();
        let mut by_letter: FxHashMap<u8, SmallVec<[u32; 4]>> = FxHashMap::default();

        for (cell, letter) in grid.goal_cells() {
            let counter = counters.entry(letter).or_insert(0);
            let id = GoalId {
                letter,
                ordinal: *counter,
            };
            *counter += 1;

            let dense = goals.len() as u32;
            goals.push(Goal { id, cell });
            by_cell.insert(cell, dense);
            by_id.insert(id, dense);
            by_letter.entry(letter).or_default().push(dense);
        }

        for (letter, members) in &by_letter {
            debug!(letter = %(*letter as char), goals = members.len(), "goal group");
        }

        GoalIndex {
            goals,
            by_cell,
            by_id,
            by_letter,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// All goals in scan order.
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn goal_at(&self, cell: Point) -> Option<&Goal> {
        self.index_at(cell).map(|i| &self.goals[i])
    }

    pub fn get(&self, id: GoalId) -> Option<&Goal> {
        self.by_id.get(&id).map(|&i| &self.goals[i as usize])
    }

    pub fn cell_of(&self, id: GoalId) -> Option<Point> {
        self.get(id).map(|g| g.cell)
    }

    /// Identifiers of every goal with `letter`, in scan order.
    pub fn ids_for(&self, letter: char) -> impl Iterator<Item = GoalId> + '_ {
        let members = type_letter(letter)
            .and_then(|l| self.by_letter.get(&l))
            .map(|m| m.as_slice())
            .unwrap_or(&[]);
        members.iter().map(move |&i| self.goals[i as usize].id)
    }

    /// Distinct goal letters, sorted.
    pub fn letters(&self) -> Vec<char> {
        let mut letters: Vec<char> = self.by_letter.keys().map(|&l| l as char).collect();
        letters.sort_unstable();
        letters
    }

    #[inline]
    pub(crate) fn index_at(&self, cell: Point) -> Option<usize> {
        self.by_cell.get(&cell).map(|&i| i as usize)
    }

    /// Dense indices of the goals for a normalized letter.
    #[inline]
    pub(crate) fn indices_for(&self, letter: u8) -> &[u32] {
        self.by_letter.get(&letter).map(|m| m.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> Grid {
        // a . b
        // . a .
        // A . b    (upper-case goal letters are normalized)
        let mut grid = Grid::open(3, 3).unwrap();
        grid.set_goal(Point::new(0, 0), 'a').unwrap();
        grid.set_goal(Point::new(0, 2), 'b').unwrap();
        grid.set_goal(Point::new(1, 1), 'a').unwrap();
        grid.set_goal(Point::new(2, 0), 'A').unwrap();
        grid.set_goal(Point::new(2, 2), 'b').unwrap();
        grid
    }

    #[test]
    fn ordinals_follow_row_major_scan() {
        let index = GoalIndex::build(&sample_grid());

        let a: Vec<String> = index.ids_for('a').map(|id| id.to_string()).collect();
        let b: Vec<String> = index.ids_for('b').map(|id| id.to_string()).collect();
        assert_eq!(a, ["a0", "a1", "a2"]);
        assert_eq!(b, ["b0", "b1"]);

        assert_eq!(index.cell_of("a1".parse().unwrap()), Some(Point::new(1, 1)));
        assert_eq!(index.cell_of("a2".parse().unwrap()), Some(Point::new(2, 0)));
        assert_eq!(index.cell_of("b1".parse().unwrap()), Some(Point::new(2, 2)));
        assert_eq!(index.letters(), vec!['a', 'b']);
    }

    #[test]
    fn cell_and_id_lookups_are_inverse() {
        let grid = sample_grid();
        let index = GoalIndex::build(&grid);

        assert_eq!(index.len(), grid.goal_cells().count());
        for goal in index.goals() {
            assert_eq!(index.goal_at(goal.cell), Some(goal));
            assert_eq!(index.get(goal.id).map(|g| g.cell), Some(goal.cell));
        }
        assert!(index.goal_at(Point::new(0, 1)).is_none());
        assert!(index.get(GoalId::new('c', 0).unwrap()).is_none());
        assert_eq!(index.ids_for('z').count(), 0);
    }

    #[test]
    fn goal_id_parsing() {
        let id: GoalId = "c12".parse().unwrap();
        assert_eq!(id.letter(), 'c');
        assert_eq!(id.ordinal(), 12);
        assert_eq!("C3".parse::<GoalId>().unwrap().to_string(), "c3");

        assert!("".parse::<GoalId>().is_err());
        assert!("a".parse::<GoalId>().is_err());
        assert!("7x".parse::<GoalId>().is_err());
        assert!("a-1".parse::<GoalId>().is_err());
    }

    #[test]
    fn empty_grid_has_no_goals() {
        let index = GoalIndex::build(&Grid::open(2, 2).unwrap());
        assert!(index.is_empty());
        assert!(index.letters().is_empty());
    }
}

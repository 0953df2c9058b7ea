//! Static grid topology: walls and typed goal cells.

use crate::error::{HeuristicError, Result};

pub const DIR_OFFSETS: [(i16, i16); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const FLOOR: u8 = 0;
const WALL: u8 = 1;
const NO_GOAL: u8 = 0;

// Compact point using i16 for better cache performance
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(C)]
pub struct Point {
    pub row: i16,
    pub col: i16,
}

impl Point {
    #[inline(always)]
    pub const fn new(row: i16, col: i16) -> Self {
        Point { row, col }
    }

    #[inline(always)]
    pub fn neighbor(self, (drow, dcol): (i16, i16)) -> Self {
        Point::new(self.row.wrapping_add(drow), self.col.wrapping_add(dcol))
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Normalizes a goal or box letter to the lowercase byte used for matching.
#[inline]
pub fn type_letter(ch: char) -> Option<u8> {
    if ch.is_ascii_alphabetic() {
        Some(ch.to_ascii_lowercase() as u8)
    } else {
        None
    }
}

/// Wall bitmap and goal letters for a fixed `height x width` grid.
///
/// Cells are stored row-major. The grid is mutable only while it is being
/// assembled; the engine takes it by value and never changes it afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: i16,
    height: i16,
    map: Vec<u8>,
    goals: Vec<u8>,
}

impl Grid {
    /// A grid with every cell open and no goals.
    pub fn open(height: usize, width: usize) -> Result<Self> {
        let too_large = || HeuristicError::GridTooLarge { height, width };
        let h = i16::try_from(height).map_err(|_| too_large())?;
        let w = i16::try_from(width).map_err(|_| too_large())?;
        let size = height * width;

        Ok(Grid {
            width: w,
            height: h,
            map: vec![FLOOR; size],
            goals: vec![NO_GOAL; size],
        })
    }

    /// Builds a grid from a row-major wall bitmap and per-cell goal letters.
    pub fn from_cells(
        height: usize,
        width: usize,
        walls: &[bool],
        goals: &[Option<char>],
    ) -> Result<Self> {
        let mut grid = Grid::open(height, width)?;
        let size = grid.map.len();
        for actual in [walls.len(), goals.len()] {
            if actual != size {
                return Err(HeuristicError::DimensionMismatch {
                    expected: size,
                    actual,
                });
            }
        }

        for (idx, &wall) in walls.iter().enumerate() {
            if wall {
                grid.map[idx] = WALL;
            }
        }
        for (idx, goal) in goals.iter().enumerate() {
            if let Some(letter) = *goal {
                let p = grid.point_of(idx);
                grid.set_goal(p, letter)?;
            }
        }

        Ok(grid)
    }

    pub fn set_wall(&mut self, p: Point) -> Result<()> {
        let idx = self.checked_idx(p)?;
        if self.goals[idx] != NO_GOAL {
            return Err(HeuristicError::GoalOnWall {
                row: p.row,
                col: p.col,
            });
        }
        self.map[idx] = WALL;
        Ok(())
    }

    pub fn set_goal(&mut self, p: Point, letter: char) -> Result<()> {
        let idx = self.checked_idx(p)?;
        let letter = type_letter(letter).ok_or(HeuristicError::InvalidGoalLetter(letter))?;
        if self.map[idx] == WALL {
            return Err(HeuristicError::GoalOnWall {
                row: p.row,
                col: p.col,
            });
        }
        self.goals[idx] = letter;
        Ok(())
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height as usize
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width as usize
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.map.len()
    }

    #[inline(always)]
    pub fn is_valid(&self, p: Point) -> bool {
        p.row >= 0 && p.row < self.height && p.col >= 0 && p.col < self.width
    }

    #[inline(always)]
    pub fn to_idx(&self, p: Point) -> usize {
        p.row as usize * self.width as usize + p.col as usize
    }

    #[inline(always)]
    pub fn point_of(&self, idx: usize) -> Point {
        let width = self.width as usize;
        Point::new((idx / width) as i16, (idx % width) as i16)
    }

    /// Out-of-bounds cells count as walls.
    #[inline(always)]
    pub fn is_wall(&self, p: Point) -> bool {
        !self.is_valid(p) || self.map[self.to_idx(p)] == WALL
    }

    /// Lowercase goal letter at `p`, if any.
    #[inline(always)]
    pub fn goal_letter(&self, p: Point) -> Option<u8> {
        if !self.is_valid(p) {
            return None;
        }
        match self.goals[self.to_idx(p)] {
            NO_GOAL => None,
            letter => Some(letter),
        }
    }

    /// Open cells in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.map
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell != WALL)
            .map(move |(idx, _)| self.point_of(idx))
    }

    /// Goal cells and their letters in row-major order.
    pub fn goal_cells(&self) -> impl Iterator<Item = (Point, u8)> + '_ {
        self.goals
            .iter()
            .enumerate()
            .filter(|&(_, &letter)| letter != NO_GOAL)
            .map(move |(idx, &letter)| (self.point_of(idx), letter))
    }

    fn checked_idx(&self, p: Point) -> Result<usize> {
        if self.is_valid(p) {
            Ok(self.to_idx(p))
        } else {
            Err(HeuristicError::OutOfBounds {
                row: p.row as i32,
                col: p.col as i32,
                height: self.height(),
                width: self.width(),
            })
        }
    }
}

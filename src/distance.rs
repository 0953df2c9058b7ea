//! All-pairs shortest walking distances over the open cells of a grid.
//!
//! Every open cell is flood-filled once (4-directional, walls impassable,
//! boxes ignored) and the discovery depths are stored in a dense `n x n`
//! table. Pairs with no connecting path hold [`UNREACHABLE`].

use std::collections::VecDeque;
use std::time::Instant;

use arrayvec::ArrayVec;
use rayon::prelude::*;
use tracing::debug;

use crate::error::{HeuristicError, Result};
use crate::grid::{Grid, Point, DIR_OFFSETS};

/// Distance reported for pairs of cells with no path between them.
pub const UNREACHABLE: u32 = u32::MAX;

/// Largest number of open cells the `n x n` table is built for (256 MiB of `u32`).
pub const MAX_OPEN_CELLS: usize = 8192;

const NOT_OPEN: u32 = u32::MAX;

type Neighbors = ArrayVec<u32, 4>;

#[derive(Debug)]
pub struct DistanceMap {
    width: i16,
    height: i16,
    /// Grid index -> dense open-cell index, `NOT_OPEN` for walls.
    cell_index: Vec<u32>,
    cells: Vec<Point>,
    table: Vec<u32>,
}

impl DistanceMap {
    /// Runs one flood fill per open cell. With `parallel` set the sources are
    /// spread over the rayon pool; the resulting table is the same either way.
    pub fn build(grid: &Grid, parallel: bool) -> Result<Self> {
        let start = Instant::now();

        let mut cell_index = vec![NOT_OPEN; grid.size()];
        let mut cells = Vec::new();
        for p in grid.open_cells() {
            cell_index[grid.to_idx(p)] = cells.len() as u32;
            cells.push(p);
        }

        let n = cells.len();
        if n > MAX_OPEN_CELLS {
            return Err(HeuristicError::GridTooLarge {
                height: grid.height(),
                width: grid.width(),
            });
        }
        let entries = n * n;

        let neighbors: Vec<Neighbors> = cells
            .iter()
            .map(|&p| {
                DIR_OFFSETS
                    .iter()
                    .map(|&dir| p.neighbor(dir))
                    .filter(|&next| !grid.is_wall(next))
                    .map(|next| cell_index[grid.to_idx(next)])
                    .collect()
            })
            .collect();

        let mut table = vec![UNREACHABLE; entries];
        if n > 0 {
            if parallel {
                table.par_chunks_mut(n).enumerate().for_each_init(
                    || VecDeque::with_capacity(n),
                    |queue, (source, row)| flood_fill(source, &neighbors, row, queue),
                );
            } else {
                let mut queue = VecDeque::with_capacity(n);
                for (source, row) in table.chunks_mut(n).enumerate() {
                    flood_fill(source, &neighbors, row, &mut queue);
                }
            }
        }

        debug!(
            open_cells = n,
            entries,
            parallel,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "distance table built"
        );

        Ok(DistanceMap {
            width: grid.width() as i16,
            height: grid.height() as i16,
            cell_index,
            cells,
            table,
        })
    }

    /// Walking distance between two cells, [`UNREACHABLE`] if either cell is a
    /// wall, lies outside the grid, or no path connects them.
    #[inline(always)]
    pub fn distance(&self, from: Point, to: Point) -> u32 {
        match (self.dense(from), self.dense(to)) {
            (Some(a), Some(b)) => self.table[a * self.cells.len() + b],
            _ => UNREACHABLE,
        }
    }

    #[inline]
    pub fn is_reachable(&self, from: Point, to: Point) -> bool {
        self.distance(from, to) != UNREACHABLE
    }

    pub fn open_cells(&self) -> usize {
        self.cells.len()
    }

    /// Number of cells (including `from` itself) with a finite distance from `from`.
    pub fn reachable_from(&self, from: Point) -> usize {
        let n = self.cells.len();
        match self.dense(from) {
            Some(a) => self.table[a * n..(a + 1) * n]
                .iter()
                .filter(|&&d| d != UNREACHABLE)
                .count(),
            None => 0,
        }
    }

    #[inline(always)]
    fn dense(&self, p: Point) -> Option<usize> {
        if p.row < 0 || p.row >= self.height || p.col < 0 || p.col >= self.width {
            return None;
        }
        let idx = p.row as usize * self.width as usize + p.col as usize;
        match self.cell_index[idx] {
            NOT_OPEN => None,
            dense => Some(dense as usize),
        }
    }
}

/// Breadth-first fill from `source`; `row` must start out as all `UNREACHABLE`
/// and doubles as the visited set.
fn flood_fill(source: usize, neighbors: &[Neighbors], row: &mut [u32], queue: &mut VecDeque<u32>) {
    queue.clear();
    row[source] = 0;
    queue.push_back(source as u32);

    while let Some(current) = queue.pop_front() {
        let depth = row[current as usize] + 1;
        for &next in &neighbors[current as usize] {
            if row[next as usize] == UNREACHABLE {
                row[next as usize] = depth;
                queue.push_back(next);
            }
        }
    }
}

use smallvec::SmallVec;

use crate::grid::Point;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct BoxPlacement {
    pub cell: Point,
    /// Lowercase type letter; matched against goal letters.
    pub letter: char,
}

pub type BoxVec = SmallVec<[BoxPlacement; 20]>;

/// Snapshot owned by the search driver. Boxes are kept sorted row-major
/// with at most one box per cell.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct State {
    agent: Point,
    boxes: BoxVec,
    g: u64,
}

impl State {
    pub fn new(agent: Point, g: u64) -> Self {
        State {
            agent,
            boxes: BoxVec::new(),
            g,
        }
    }

    /// Later entries for the same cell replace earlier ones.
    pub fn with_boxes<I>(agent: Point, boxes: I, g: u64) -> Self
    where
        I: IntoIterator<Item = (Point, char)>,
    {
        let mut state = State::new(agent, g);
        for (cell, letter) in boxes {
            state.place_box(cell, letter);
        }
        state
    }

    #[inline(always)]
    pub fn agent(&self) -> Point {
        self.agent
    }

    #[inline(always)]
    pub fn g(&self) -> u64 {
        self.g
    }

    pub fn set_agent(&mut self, agent: Point) {
        self.agent = agent;
    }

    pub fn set_g(&mut self, g: u64) {
        self.g = g;
    }

    /// Places a box, returning the letter of the box it displaced.
    pub fn place_box(&mut self, cell: Point, letter: char) -> Option<char> {
        let letter = letter.to_ascii_lowercase();
        match self.boxes.binary_search_by_key(&cell, |b| b.cell) {
            Ok(i) => Some(std::mem::replace(&mut self.boxes[i].letter, letter)),
            Err(i) => {
                self.boxes.insert(i, BoxPlacement { cell, letter });
                None
            }
        }
    }

    pub fn remove_box(&mut self, cell: Point) -> Option<char> {
        self.boxes
            .binary_search_by_key(&cell, |b| b.cell)
            .ok()
            .map(|i| self.boxes.remove(i).letter)
    }

    pub fn box_at(&self, cell: Point) -> Option<char> {
        self.boxes
            .binary_search_by_key(&cell, |b| b.cell)
            .ok()
            .map(|i| self.boxes[i].letter)
    }

    /// Boxes in row-major order.
    #[inline]
    pub fn boxes(&self) -> &[BoxPlacement] {
        &self.boxes
    }
}

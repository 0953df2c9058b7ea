//! Text level loader.
//!
//! One line per grid row: `+` or `#` wall, `a`-`z` goal, `A`-`Z` box,
//! `0`-`9` the agent, space or `.` floor. Short rows are padded with walls.

use std::fs;
use std::path::Path;

use memchr::memchr_iter;
use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::error::{HeuristicError, Result};
use crate::grid::{Grid, Point};
use crate::state::State;

#[derive(Clone, Debug)]
pub struct Level {
    pub grid: Grid,
    pub initial: State,
}

pub fn load_level(path: &Path) -> Result<Level> {
    let text = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = text.len(), "read level file");
    parse_level(&text)
}

pub fn parse_level(text: &str) -> Result<Level> {
    let mut lines = split_lines(text);
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    let height = lines.len();
    let width = lines.iter().map(|l| l.len()).max().unwrap_or(0);
    let mut grid = Grid::open(height, width)?;
    let mut agent: Option<Point> = None;
    let mut boxes = Vec::new();

    for (row, line) in lines.iter().enumerate() {
        let level_err = |message: String| HeuristicError::Level {
            line: row + 1,
            message,
        };

        for col in 0..width {
            let p = Point::new(row as i16, col as i16);
            let Some(&ch) = line.get(col) else {
                grid.set_wall(p)?;
                continue;
            };

            match ch {
                b'+' | b'#' => grid.set_wall(p)?,
                b'a'..=b'z' => grid.set_goal(p, ch as char)?,
                b'A'..=b'Z' => boxes.push((p, ch as char)),
                b'0'..=b'9' => {
                    if let Some(first) = agent {
                        return Err(level_err(format!(
                            "second agent at column {col}, first at {first}"
                        )));
                    }
                    agent = Some(p);
                }
                b' ' | b'.' => {}
                _ => {
                    return Err(level_err(format!(
                        "unexpected character {:?} at column {col}",
                        ch as char
                    )))
                }
            }
        }
    }

    let agent = agent.ok_or_else(|| HeuristicError::Level {
        line: height,
        message: "level has no agent".to_string(),
    })?;

    let goal_letters: FxHashSet<u8> = grid.goal_cells().map(|(_, l)| l).collect();
    for &(p, letter) in &boxes {
        if !goal_letters.contains(&(letter.to_ascii_lowercase() as u8)) {
            warn!(cell = %p, letter = %letter, "box has no goal of its letter");
        }
    }

    debug!(height, width, boxes = boxes.len(), "parsed level");

    Ok(Level {
        grid,
        initial: State::with_boxes(agent, boxes, 0),
    })
}

fn split_lines(text: &str) -> Vec<&[u8]> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    for end in memchr_iter(b'\n', bytes).chain(std::iter::once(bytes.len())) {
        let mut line = &bytes[start..end];
        if let [rest @ .., b'\r'] = line {
            line = rest;
        }
        lines.push(line);
        start = end + 1;
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_walls_goals_boxes_and_agent() {
        let level = parse_level("+++++\n+0A a+\n++b+\n").unwrap();
        let grid = &level.grid;

        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 6);
        assert!(grid.is_wall(Point::new(0, 0)));
        assert!(!grid.is_wall(Point::new(1, 1)));
        assert_eq!(grid.goal_letter(Point::new(1, 4)), Some(b'a'));
        assert_eq!(grid.goal_letter(Point::new(2, 2)), Some(b'b'));
        // Padding beyond the short rows.
        assert!(grid.is_wall(Point::new(0, 5)));
        assert!(grid.is_wall(Point::new(2, 4)));

        assert_eq!(level.initial.agent(), Point::new(1, 1));
        assert_eq!(level.initial.box_at(Point::new(1, 2)), Some('a'));
        assert_eq!(level.initial.g(), 0);
    }

    #[test]
    fn handles_crlf_and_trailing_blank_lines() {
        let level = parse_level("###\r\n#0#\r\n###\r\n\r\n\n").unwrap();
        assert_eq!(level.grid.height(), 3);
        assert_eq!(level.grid.width(), 3);
        assert_eq!(level.grid.open_cells().count(), 1);
    }

    #[test]
    fn rejects_missing_or_extra_agents() {
        assert!(matches!(
            parse_level("+++\n+ +\n+++"),
            Err(HeuristicError::Level { .. })
        ));
        assert!(matches!(
            parse_level("+++++\n+0 1+\n+++++"),
            Err(HeuristicError::Level { line: 2, .. })
        ));
    }

    #[test]
    fn rejects_unknown_characters() {
        let err = parse_level("+++\n+0*\n+++").unwrap_err();
        assert!(matches!(err, HeuristicError::Level { line: 2, .. }));
        assert!(err.to_string().contains("'*'"));
    }
}

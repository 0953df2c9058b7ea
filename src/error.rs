use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeuristicError {
    #[error("cell ({row}, {col}) is outside the {height}x{width} grid")]
    OutOfBounds {
        row: i32,
        col: i32,
        height: usize,
        width: usize,
    },

    #[error("expected {expected} cells, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("goal letter {0:?} is not an ASCII letter")]
    InvalidGoalLetter(char),

    #[error("goal at ({row}, {col}) is placed on a wall")]
    GoalOnWall { row: i16, col: i16 },

    #[error("grid of {height}x{width} cells is too large")]
    GridTooLarge { height: usize, width: usize },

    #[error("level line {line}: {message}")]
    Level { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, HeuristicError>;

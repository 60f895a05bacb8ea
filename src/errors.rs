use crate::point::Point;

/// Errors raised by the board core.
///
/// `InvalidMove` is an expected outcome that callers routinely handle; the
/// remaining variants indicate a broken caller contract and are raised at
/// the point of detection. An illegal move discovered during validation is
/// reported as a `legal = false` result, never as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    InvalidMove { source: Point, target: Point },

    NonePiece(Point),

    InvalidPlayer(String),

    EmptyHistory,

    InvalidPosition(String),

    InvalidSquareNotation(String),

    DivisionByZero,
}

impl std::fmt::Display for ChessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChessError::InvalidMove { source, target } => {
                write!(f, "move {source} -> {target} is not legal")
            }
            ChessError::NonePiece(p) => write!(f, "no piece to move at {p}"),
            ChessError::InvalidPlayer(s) => write!(f, "invalid player: {s}"),
            ChessError::EmptyHistory => write!(f, "history is empty, nothing to undo"),
            ChessError::InvalidPosition(s) => write!(f, "invalid board description: {s}"),
            ChessError::InvalidSquareNotation(s) => write!(f, "invalid square notation: {s:?}"),
            ChessError::DivisionByZero => write!(f, "division by zero"),
        }
    }
}

impl std::error::Error for ChessError {}

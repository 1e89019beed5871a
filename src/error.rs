use crate::types::{Move, Player};

/// Errors raised while decoding boundary values or running matches.
///
/// Rule violations inside the core are not errors: an illegal move is simply
/// rejected and reported as `false`.
#[derive(Debug, thiserror::Error)]
pub enum ReversiError {
    #[error("invalid cell value: {0} (expected 0, 1 or -1)")]
    InvalidCell(i8),

    #[error("invalid player value: {0} (expected 1 or -1)")]
    InvalidPlayer(i8),

    #[error("square index out of range: {0}")]
    SquareOutOfRange(i32),

    #[error("{player:?} selector proposed illegal move {mv}")]
    IllegalSelection { player: Player, mv: Move },

    #[error("{0:?} selector passed while holding a legal move")]
    UnforcedPass(Player),

    #[error("invalid match config: {0}")]
    InvalidConfig(String),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to parse a board diagram.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("unexpected character {0:?} in board diagram")]
    UnexpectedChar(char),

    #[error("board diagram has {0} squares, expected 64")]
    WrongSquareCount(usize),
}

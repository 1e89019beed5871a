use std::fmt;

use serde::Serialize;

use crate::error::ReversiError;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// Contents of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

impl Cell {
    /// Owner of the disc, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Self::Empty => None,
            Self::Black => Some(Player::Black),
            Self::White => Some(Player::White),
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Move {
    pub row: u8,
    pub col: u8,
}

impl Move {
    /// Builds a move, or `None` when the coordinate lies off the board.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Row-major square index (`row * 8 + col`).
    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index < NUM_SQUARES {
            Self::new(index / BOARD_SIZE, index % BOARD_SIZE)
        } else {
            None
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Outcome of a game, derived from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GameResult {
    Ongoing,
    BlackWins,
    WhiteWins,
    Draw,
}

impl GameResult {
    pub fn is_over(self) -> bool {
        self != Self::Ongoing
    }
}

// Integer encodings shared by the wasm and C boundaries:
// cells Empty=0, Black=1, White=-1; players Black=1, White=-1;
// results Ongoing=0, BlackWins=1, WhiteWins=-1, Draw=2.

impl From<Cell> for i8 {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => 0,
            Cell::Black => 1,
            Cell::White => -1,
        }
    }
}

impl TryFrom<i8> for Cell {
    type Error = ReversiError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Empty),
            1 => Ok(Self::Black),
            -1 => Ok(Self::White),
            other => Err(ReversiError::InvalidCell(other)),
        }
    }
}

impl From<Player> for i8 {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => 1,
            Player::White => -1,
        }
    }
}

impl TryFrom<i8> for Player {
    type Error = ReversiError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Black),
            -1 => Ok(Self::White),
            other => Err(ReversiError::InvalidPlayer(other)),
        }
    }
}

impl From<GameResult> for i8 {
    fn from(result: GameResult) -> Self {
        match result {
            GameResult::Ongoing => 0,
            GameResult::BlackWins => 1,
            GameResult::WhiteWins => -1,
            GameResult::Draw => 2,
        }
    }
}

impl TryFrom<i32> for Move {
    type Error = ReversiError;

    /// Decodes `row * 8 + col`.
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(Self::from_index)
            .ok_or(ReversiError::SquareOutOfRange(value))
    }
}

/// Encodes an optional move as `row * 8 + col`, or -1 for "no move".
pub fn encode_move(mv: Option<Move>) -> i32 {
    mv.map_or(-1, |mv| mv.index() as i32)
}

/// Converts signed boundary coordinates. Negative values map to an off-board
/// square so the legality check rejects them.
pub(crate) fn boundary_coords(row: i32, col: i32) -> (usize, usize) {
    let convert = |v: i32| usize::try_from(v).unwrap_or(usize::MAX);
    (convert(row), convert(col))
}

/// Boundary depths below 1 are searched at depth 1.
pub(crate) fn boundary_depth(depth: i32) -> u32 {
    depth.max(1) as u32
}

/// Public session state handed to front-ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// 64 cells, row-major, encoded Empty=0, Black=1, White=-1.
    pub board: Vec<i8>,
    pub current_player: i8,
    pub black_count: u8,
    pub white_count: u8,
    pub result: i8,
    /// `true` when the previous action was a pass by a side with no move.
    pub previous_player_passed: bool,
    /// Squares flipped by the last move. Empty after a pass or reset.
    pub flipped: Vec<u8>,
}

use serde::Serialize;

use crate::board::Board;
use crate::types::{BOARD_SIZE, Cell, Move, Player};

const CORNER_BONUS: i32 = 25;
const C_SQUARE_PENALTY: i32 = -6;
const X_SQUARE_PENALTY: i32 = -12;
const GAIN_WEIGHT: i32 = 3;

/// Coarse quality label shown to players after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveGrade {
    Excellent,
    Good,
    Decent,
    Okay,
    Risky,
    Bad,
}

impl MoveGrade {
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 25 => Self::Excellent,
            s if s >= 12 => Self::Good,
            s if s >= 5 => Self::Decent,
            s if s >= 1 => Self::Okay,
            s if s >= -6 => Self::Risky,
            _ => Self::Bad,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveReview {
    pub mv: Move,
    /// Discs that became `player`'s, the placed disc included.
    pub gained: u32,
    pub score: i32,
    pub grade: MoveGrade,
}

/// Grades `mv` played by `player` on `before`. Returns `None` for an illegal
/// move.
///
/// The score rewards captured discs and corners, penalises the squares next
/// to corners and discs left exposed to empty neighbours.
pub fn review_move(before: &Board, player: Player, mv: Move) -> Option<MoveReview> {
    let mut after = *before;
    let flips = after.place(player, mv.row as usize, mv.col as usize);
    if flips == 0 {
        return None;
    }

    let gained = flips.count_ones() + 1;
    let (row, col) = (mv.row as usize, mv.col as usize);
    let last = BOARD_SIZE - 1;
    let edge = |i: usize| i == 0 || i == last;
    let next_to_edge = |i: usize| i == 1 || i == last - 1;

    let square_bonus = if edge(row) && edge(col) {
        CORNER_BONUS
    } else if (edge(row) && next_to_edge(col)) || (next_to_edge(row) && edge(col)) {
        C_SQUARE_PENALTY
    } else if next_to_edge(row) && next_to_edge(col) {
        X_SQUARE_PENALTY
    } else {
        0
    };

    let empty_neighbours = empty_neighbours(&after, row, col);
    // Rounded towards negative infinity.
    let frontier_penalty = (-empty_neighbours).div_euclid(3);

    let score = GAIN_WEIGHT * gained as i32 + square_bonus + frontier_penalty;

    Some(MoveReview {
        mv,
        gained,
        score,
        grade: MoveGrade::from_score(score),
    })
}

fn empty_neighbours(board: &Board, row: usize, col: usize) -> i32 {
    let mut count = 0;
    for dr in -1i32..=1 {
        for dc in -1i32..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let (r, c) = (row as i32 + dr, col as i32 + dc);
            if r < 0 || c < 0 || r >= BOARD_SIZE as i32 || c >= BOARD_SIZE as i32 {
                continue;
            }
            if board.get_cell(r as usize, c as usize) == Cell::Empty {
                count += 1;
            }
        }
    }
    count
}

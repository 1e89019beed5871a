use crate::board::Board;
use crate::types::{BOARD_SIZE, Cell, NUM_SQUARES, Player};

/// Top-left quadrant of the positional table. The full table is its mirror
/// image across both centre lines, and the quadrant is its own transpose.
const QUADRANT: [[i32; 4]; 4] = [
    [120, -20, 20, 5],
    [-20, -40, -5, -5],
    [20, -5, 15, 3],
    [5, -5, 3, 3],
];

/// Score per legal move of difference in mobility.
pub const MOBILITY_WEIGHT: i32 = 5;

/// Shared positional weights, built at compile time.
pub static POSITION_WEIGHTS: PositionWeights = PositionWeights::from_quadrant(&QUADRANT);

/// Maps a row or column index into the top-left quadrant.
const fn fold(i: usize) -> usize {
    if i < BOARD_SIZE / 2 {
        i
    } else {
        BOARD_SIZE - 1 - i
    }
}

/// Read-only 8x8 table of per-square values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionWeights {
    table: [i32; NUM_SQUARES],
}

impl PositionWeights {
    const fn from_quadrant(quadrant: &[[i32; 4]; 4]) -> Self {
        let mut table = [0i32; NUM_SQUARES];
        let mut pos = 0;
        while pos < NUM_SQUARES {
            let (row, col) = (pos / BOARD_SIZE, pos % BOARD_SIZE);
            table[pos] = quadrant[fold(row)][fold(col)];
            pos += 1;
        }
        Self { table }
    }

    /// Weight of a square, or `None` off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<i32> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(self.table[row * BOARD_SIZE + col])
        } else {
            None
        }
    }

    pub fn as_array(&self) -> &[i32; NUM_SQUARES] {
        &self.table
    }
}

/// Static evaluation of `board` from `player`'s point of view: positional
/// weights of own discs minus those of opponent discs, plus the mobility
/// differential.
pub fn evaluate(board: &Board, player: Player) -> i32 {
    let weights = POSITION_WEIGHTS.as_array();

    let positional: i32 = board
        .to_array()
        .iter()
        .zip(weights)
        .map(|(&cell, &weight)| match cell.owner() {
            None => 0,
            Some(owner) if owner == player => weight,
            Some(_) => -weight,
        })
        .sum();

    let mobility = board.mobility(player) as i32 - board.mobility(player.opponent()) as i32;

    positional + MOBILITY_WEIGHT * mobility
}

use std::fmt;
use std::str::FromStr;

use crate::error::ParseBoardError;
use crate::types::{BOARD_SIZE, Cell, Move, NUM_SQUARES, Player};

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Reversi board state represented by two bitboards.
///
/// Bit `row * 8 + col` is set in `black` or `white` when that side owns the
/// square; the two masks never overlap. Ascending bit order is row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates the initial board:
    /// d4=white, e4=black, d5=black, e5=white.
    pub fn new() -> Self {
        Self {
            black: bit(28) | bit(35),
            white: bit(27) | bit(36),
        }
    }

    /// Builds a board from raw occupancy masks. Squares claimed by both masks
    /// are kept black.
    pub fn from_bitboards(black: u64, white: u64) -> Self {
        Self {
            black,
            white: white & !black,
        }
    }

    /// Builds a board from 64 cells in row-major order.
    pub fn from_cells(cells: &[Cell; NUM_SQUARES]) -> Self {
        let mut board = Self::from_bitboards(0, 0);
        for (pos, cell) in cells.iter().enumerate() {
            board.set_square(pos, *cell);
        }
        board
    }

    /// Restores the opening position.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns the contents of a square. Off-board coordinates read as empty.
    pub fn get_cell(&self, row: usize, col: usize) -> Cell {
        match Move::new(row, col) {
            Some(mv) => self.square(mv.index()),
            None => Cell::Empty,
        }
    }

    /// Overwrites a square without applying any rule. Off-board coordinates
    /// are ignored.
    pub fn set_cell(&mut self, row: usize, col: usize, value: Cell) {
        if let Some(mv) = Move::new(row, col) {
            self.set_square(mv.index(), value);
        }
    }

    /// Returns legal move mask for the given side.
    pub fn legal_moves(&self, player: Player) -> u64 {
        let (me, opp) = self.sides(player);
        let empty = !(me | opp);
        let mut legal = 0u64;

        for pos in 0..NUM_SQUARES {
            let move_bit = bit(pos);
            if (empty & move_bit) == 0 {
                continue;
            }
            if Self::collect_flips(pos, me, opp) != 0 {
                legal |= move_bit;
            }
        }

        legal
    }

    /// All legal moves for `player` in row-major order.
    pub fn valid_moves(&self, player: Player) -> Vec<Move> {
        mask_to_moves(self.legal_moves(player))
    }

    /// Number of legal moves for `player`.
    pub fn mobility(&self, player: Player) -> u32 {
        self.legal_moves(player).count_ones()
    }

    pub fn is_valid_move(&self, player: Player, row: usize, col: usize) -> bool {
        let Some(mv) = Move::new(row, col) else {
            return false;
        };
        let (me, opp) = self.sides(player);
        Self::collect_flips(mv.index(), me, opp) != 0
    }

    /// Stops at the first legal move instead of building the full mask.
    pub fn has_any_valid_move(&self, player: Player) -> bool {
        let (me, opp) = self.sides(player);
        let occupied = me | opp;
        (0..NUM_SQUARES)
            .filter(|&pos| (occupied & bit(pos)) == 0)
            .any(|pos| Self::collect_flips(pos, me, opp) != 0)
    }

    /// Places one stone and flips captured stones.
    /// Returns flipped bit mask. Returns 0 when move is illegal.
    pub fn place(&mut self, player: Player, row: usize, col: usize) -> u64 {
        let Some(mv) = Move::new(row, col) else {
            return 0;
        };
        let pos = mv.index();
        let (me, opp) = self.sides(player);

        let flips = Self::collect_flips(pos, me, opp);
        if flips == 0 {
            return 0;
        }

        let next_me = me | bit(pos) | flips;
        let next_opp = opp & !flips;

        match player {
            Player::Black => {
                self.black = next_me;
                self.white = next_opp;
            }
            Player::White => {
                self.white = next_me;
                self.black = next_opp;
            }
        }

        flips
    }

    /// Applies a move for `player`. Returns `false` and leaves the board
    /// untouched when the move is illegal.
    pub fn apply_move(&mut self, player: Player, row: usize, col: usize) -> bool {
        self.place(player, row, col) != 0
    }

    /// Returns `(black_count, white_count)`.
    pub fn score(&self) -> (u8, u8) {
        (self.black.count_ones() as u8, self.white.count_ones() as u8)
    }

    /// Number of discs owned by `player`.
    pub fn count(&self, player: Player) -> u8 {
        let (me, _) = self.sides(player);
        me.count_ones() as u8
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        let (black_count, white_count) = self.score();
        NUM_SQUARES as u8 - black_count - white_count
    }

    /// All 64 cells in row-major order.
    pub fn to_array(&self) -> [Cell; NUM_SQUARES] {
        let mut board = [Cell::Empty; NUM_SQUARES];
        for (pos, cell) in board.iter_mut().enumerate() {
            *cell = self.square(pos);
        }
        board
    }

    fn square(&self, pos: usize) -> Cell {
        let square = bit(pos);
        if (self.black & square) != 0 {
            Cell::Black
        } else if (self.white & square) != 0 {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    fn set_square(&mut self, pos: usize, value: Cell) {
        let square = bit(pos);
        self.black &= !square;
        self.white &= !square;
        match value {
            Cell::Black => self.black |= square,
            Cell::White => self.white |= square,
            Cell::Empty => {}
        }
    }

    fn sides(&self, player: Player) -> (u64, u64) {
        match player {
            Player::Black => (self.black, self.white),
            Player::White => (self.white, self.black),
        }
    }

    fn collect_flips(pos: usize, me: u64, opp: u64) -> u64 {
        if pos >= NUM_SQUARES {
            return 0;
        }

        let move_bit = bit(pos);
        if ((me | opp) & move_bit) != 0 {
            return 0;
        }

        let (row, col) = pos_to_row_col(pos);
        let mut flips = 0u64;

        for (dr, dc) in DIRECTIONS {
            let mut r = row + dr;
            let mut c = col + dc;
            let mut line = 0u64;

            while in_bounds(r, c) {
                let square = bit((r as usize) * BOARD_SIZE + c as usize);
                if (opp & square) != 0 {
                    line |= square;
                } else {
                    // An own disc closes the bracket; an empty square voids it.
                    if (me & square) != 0 {
                        flips |= line;
                    }
                    break;
                }

                r += dr;
                c += dc;
            }
        }

        flips
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders eight rows of `B`, `W` and `.`.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let symbol = match self.get_cell(row, col) {
                    Cell::Empty => '.',
                    Cell::Black => 'B',
                    Cell::White => 'W',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses a row-major diagram. `B`/`X` mark black, `W`/`O` white and
/// `.`/`-` empty squares; whitespace is ignored.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [Cell::Empty; NUM_SQUARES];
        let mut count = 0usize;

        for ch in s.chars().filter(|ch| !ch.is_whitespace()) {
            let cell = match ch {
                'B' | 'X' => Cell::Black,
                'W' | 'O' => Cell::White,
                '.' | '-' => Cell::Empty,
                other => return Err(ParseBoardError::UnexpectedChar(other)),
            };
            if count < NUM_SQUARES {
                cells[count] = cell;
            }
            count += 1;
        }

        if count != NUM_SQUARES {
            return Err(ParseBoardError::WrongSquareCount(count));
        }
        Ok(Self::from_cells(&cells))
    }
}

/// Converts a move mask into moves, lowest bit (row-major first) first.
pub fn mask_to_moves(mask: u64) -> Vec<Move> {
    let mut bits = mask;
    let mut out = Vec::with_capacity(bits.count_ones() as usize);

    while bits != 0 {
        if let Some(mv) = Move::from_index(bits.trailing_zeros() as usize) {
            out.push(mv);
        }
        bits &= bits - 1;
    }

    out
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

fn pos_to_row_col(pos: usize) -> (i32, i32) {
    ((pos / BOARD_SIZE) as i32, (pos % BOARD_SIZE) as i32)
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

use tracing::trace;

use crate::ai;
use crate::board::{Board, mask_to_moves};
use crate::types::{GameResult, GameSnapshot, Move, Player};

/// One match: a board plus the side to move.
///
/// Terminal status is never stored. [`Game::result`] recomputes it from the
/// board on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    player_to_move: Player,
    previous_player_passed: bool,
    last_flipped: Vec<Move>,
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Board::new(), Player::Black)
    }

    /// Resumes play from an arbitrary position.
    pub fn from_position(board: Board, player_to_move: Player) -> Self {
        Self {
            board,
            player_to_move,
            previous_player_passed: false,
            last_flipped: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.player_to_move
    }

    /// Whether the last action was a pass by a side that had no legal move.
    /// Diagnostic only; it plays no part in terminal detection.
    pub fn previous_player_passed(&self) -> bool {
        self.previous_player_passed
    }

    /// Squares flipped by the most recent move.
    pub fn last_flipped(&self) -> &[Move] {
        &self.last_flipped
    }

    pub fn valid_moves(&self) -> Vec<Move> {
        self.board.valid_moves(self.player_to_move)
    }

    /// Returns `(black_count, white_count)`.
    pub fn score(&self) -> (u8, u8) {
        self.board.score()
    }

    /// Plays a move for the side to move. On an illegal move nothing changes
    /// and the turn does not advance.
    pub fn make_move(&mut self, row: usize, col: usize) -> bool {
        let player = self.player_to_move;
        let flips = self.board.place(player, row, col);
        if flips == 0 {
            return false;
        }

        trace!(?player, row, col, flipped = flips.count_ones(), "move applied");
        self.previous_player_passed = false;
        self.last_flipped = mask_to_moves(flips);
        self.player_to_move = player.opponent();
        true
    }

    /// Hands the turn to the opponent. Callers should only pass when the side
    /// to move has no legal move; this is recorded but not enforced.
    pub fn pass_turn(&mut self) {
        let player = self.player_to_move;
        self.previous_player_passed = !self.board.has_any_valid_move(player);
        self.last_flipped.clear();
        self.player_to_move = player.opponent();
        trace!(?player, forced = self.previous_player_passed, "turn passed");
    }

    /// Ongoing while either side can move; otherwise decided by disc count.
    pub fn result(&self) -> GameResult {
        if self.board.has_any_valid_move(Player::Black)
            || self.board.has_any_valid_move(Player::White)
        {
            return GameResult::Ongoing;
        }

        let (black, white) = self.board.score();
        if black > white {
            GameResult::BlackWins
        } else if white > black {
            GameResult::WhiteWins
        } else {
            GameResult::Draw
        }
    }

    pub fn reset(&mut self) {
        self.board.reset();
        self.player_to_move = Player::Black;
        self.previous_player_passed = false;
        self.last_flipped.clear();
    }

    /// AI recommendation for the side to move. Does not touch the game.
    pub fn best_move(&self, depth: u32) -> Option<Move> {
        ai::best_move(&self.board, self.player_to_move, depth)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let (black_count, white_count) = self.board.score();
        GameSnapshot {
            board: self.board.to_array().iter().map(|&c| i8::from(c)).collect(),
            current_player: i8::from(self.player_to_move),
            black_count,
            white_count,
            result: i8::from(self.result()),
            previous_player_passed: self.previous_player_passed,
            flipped: self.last_flipped.iter().map(|mv| mv.index() as u8).collect(),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    const FULL_BOARD: u64 = u64::MAX;

    fn bit(row: usize, col: usize) -> u64 {
        1u64 << (row * 8 + col)
    }

    #[test]
    fn initial_state_is_correct() {
        let game = Game::new();
        let state = game.snapshot();

        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(state.black_count, 2);
        assert_eq!(state.white_count, 2);
        assert_eq!(state.result, 0);
        assert!(!state.previous_player_passed);
        assert!(state.flipped.is_empty());
        assert_eq!(game.valid_moves().len(), 4);
        assert_eq!(game.result(), GameResult::Ongoing);
    }

    #[test]
    fn t02_illegal_move_changes_nothing() {
        let mut game = Game::new();
        let before = game.clone();

        assert!(!game.make_move(0, 0));
        assert!(!game.make_move(3, 3));
        assert!(!game.make_move(12, 1));

        assert_eq!(game, before);
    }

    #[test]
    fn legal_move_switches_turn_and_records_flips() {
        let mut game = Game::new();

        assert!(game.make_move(2, 3));

        assert_eq!(game.current_player(), Player::White);
        assert_eq!(game.score(), (4, 1));
        assert_eq!(game.last_flipped(), &[Move { row: 3, col: 3 }]);
        assert_eq!(game.snapshot().flipped, vec![27]);
    }

    #[test]
    fn t03_pass_occurrence_switches_turn() {
        let black = bit(0, 1);
        let white = FULL_BOARD ^ bit(0, 0) ^ black;
        let mut game = Game::from_position(Board::from_bitboards(black, white), Player::Black);

        assert!(game.valid_moves().is_empty());
        game.pass_turn();

        assert_eq!(game.current_player(), Player::White);
        assert!(game.previous_player_passed());
        assert!(game.last_flipped().is_empty());
        assert_eq!(game.result(), GameResult::Ongoing);
        assert!(!game.valid_moves().is_empty());
    }

    fn after_forced_pass() -> Game {
        let black = bit(0, 1);
        let white = FULL_BOARD ^ bit(0, 0) ^ black;
        let mut game = Game::from_position(Board::from_bitboards(black, white), Player::Black);
        game.pass_turn();
        assert!(game.previous_player_passed());
        game
    }

    #[test]
    fn move_after_forced_pass_clears_pass_flag() {
        let mut game = after_forced_pass();

        assert!(game.make_move(0, 0));

        assert!(!game.previous_player_passed());
        assert!(!game.snapshot().previous_player_passed);
    }

    #[test]
    fn illegal_move_keeps_pass_flag() {
        let mut game = after_forced_pass();

        assert!(!game.make_move(3, 3));

        assert!(game.previous_player_passed());
        assert_eq!(game.current_player(), Player::White);
    }

    #[test]
    fn reset_after_forced_pass_clears_pass_flag() {
        let mut game = after_forced_pass();

        game.reset();

        assert!(!game.previous_player_passed());
        assert_eq!(game, Game::new());
    }

    #[test]
    fn voluntary_pass_is_not_flagged() {
        let mut game = Game::new();

        game.pass_turn();

        assert_eq!(game.current_player(), Player::White);
        assert!(!game.previous_player_passed());
    }

    #[test]
    fn t04_result_is_decided_when_neither_side_can_move() {
        let black_wins = Game::from_position(
            Board::from_bitboards(FULL_BOARD ^ bit(0, 0), 0),
            Player::Black,
        );
        assert_eq!(black_wins.result(), GameResult::BlackWins);

        let white_wins = Game::from_position(
            Board::from_bitboards(bit(0, 0), bit(7, 6) | bit(7, 7)),
            Player::Black,
        );
        assert_eq!(white_wins.result(), GameResult::WhiteWins);

        let mut board = Board::from_bitboards(0, 0);
        board.set_cell(0, 0, Cell::Black);
        board.set_cell(7, 7, Cell::White);
        assert_eq!(
            Game::from_position(board, Player::White).result(),
            GameResult::Draw
        );
    }

    #[test]
    fn t05_full_board_after_move_ends_game() {
        let black = bit(0, 1);
        let white = FULL_BOARD ^ bit(0, 0) ^ black;
        let mut game = Game::from_position(Board::from_bitboards(black, white), Player::White);

        assert!(game.make_move(0, 0));

        assert_eq!(game.result(), GameResult::WhiteWins);
        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.score(), (0, 64));
        assert_eq!(game.snapshot().flipped, vec![1]);
    }

    #[test]
    fn reset_restores_opening() {
        let mut game = Game::new();
        assert!(game.make_move(2, 3));
        game.pass_turn();

        game.reset();

        assert_eq!(game, Game::new());
    }

    #[test]
    fn best_move_does_not_mutate_game() {
        let game = Game::new();
        let before = game.clone();

        assert_eq!(game.best_move(2), game.best_move(2));
        assert_eq!(game, before);
    }
}

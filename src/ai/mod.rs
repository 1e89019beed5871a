//! Move search and position assessment.

pub mod review;
pub mod search;
pub mod weights;

use crate::board::Board;
use crate::types::{Move, Player};

pub use review::{MoveGrade, MoveReview, review_move};
pub use search::{MinimaxSelector, SearchOutcome, Searcher, best_move};
pub use weights::evaluate;

/// Picks a move for `player`, or `None` when it has no legal move.
pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board, player: Player, depth: u32) -> Option<Move>;
}

/// Always plays the row-major first legal move. Baseline opponent for
/// matches.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&self, board: &Board, player: Player, _depth: u32) -> Option<Move> {
        let legal = board.legal_moves(player);
        if legal == 0 {
            None
        } else {
            Move::from_index(legal.trailing_zeros() as usize)
        }
    }
}

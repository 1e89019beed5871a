use tracing::debug;

use crate::ai::MoveSelector;
use crate::ai::weights::evaluate;
use crate::board::Board;
use crate::types::{Move, Player};

/// Magnitude of a decided game. Larger than any static evaluation, so a
/// proven win always beats a heuristic advantage.
pub const WIN_SCORE: i32 = 10_000;
const MIN_SCORE: i32 = i32::MIN;
const MAX_SCORE: i32 = i32::MAX;

/// Result of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_move: Move,
    pub score: i32,
    /// Positions visited below the root.
    pub nodes: u64,
}

/// Fixed-depth minimax with alpha-beta pruning.
///
/// Every node works on its own copy of the board. Candidates are visited in
/// row-major order and a later move only replaces the incumbent on a strictly
/// better score, so results are reproducible for a given board, player and
/// depth.
pub struct Searcher {
    max_depth: u32,
    nodes: u64,
}

impl Searcher {
    /// A depth of 0 is searched as depth 1.
    pub fn new(max_depth: u32) -> Self {
        Self {
            max_depth: max_depth.max(1),
            nodes: 0,
        }
    }

    /// Searches the best move for `player`, or `None` without legal moves.
    pub fn search(&mut self, board: &Board, player: Player) -> Option<SearchOutcome> {
        self.nodes = 0;

        let moves = board.valid_moves(player);
        let mut best_move = *moves.first()?;
        let mut best_score = MIN_SCORE;
        let mut alpha = MIN_SCORE;
        let beta = MAX_SCORE;

        for mv in moves {
            let mut next = *board;
            next.apply_move(player, mv.row as usize, mv.col as usize);
            let score = self.minimax(
                &next,
                self.max_depth - 1,
                alpha,
                beta,
                player,
                player.opponent(),
            );

            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            alpha = alpha.max(best_score);
            if beta <= alpha {
                break;
            }
        }

        debug!(
            ?player,
            depth = self.max_depth,
            %best_move,
            score = best_score,
            nodes = self.nodes,
            "search finished"
        );

        Some(SearchOutcome {
            best_move,
            score: best_score,
            nodes: self.nodes,
        })
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    fn minimax(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        root: Player,
        acting: Player,
    ) -> i32 {
        self.nodes += 1;

        if depth == 0 {
            return evaluate(board, root);
        }

        let moves = board.valid_moves(acting);
        if moves.is_empty() {
            if !board.has_any_valid_move(acting.opponent()) {
                return terminal_score(board, root);
            }
            // Forced pass: the opponent moves at the same depth.
            return self.minimax(board, depth, alpha, beta, root, acting.opponent());
        }

        let maximizing = acting == root;
        let mut best = if maximizing { MIN_SCORE } else { MAX_SCORE };

        for mv in moves {
            let mut next = *board;
            next.apply_move(acting, mv.row as usize, mv.col as usize);
            let score = self.minimax(&next, depth - 1, alpha, beta, root, acting.opponent());

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }

        best
    }
}

/// Score of a finished game for `root`: dominated by the winner, refined by
/// the disc margin. A draw scores exactly zero.
pub fn terminal_score(board: &Board, root: Player) -> i32 {
    let diff = board.count(root) as i32 - board.count(root.opponent()) as i32;
    if diff > 0 {
        WIN_SCORE + diff
    } else if diff < 0 {
        -WIN_SCORE + diff
    } else {
        0
    }
}

/// Recommended move for `player` searching `depth` plies.
pub fn best_move(board: &Board, player: Player, depth: u32) -> Option<Move> {
    Searcher::new(depth)
        .search(board, player)
        .map(|outcome| outcome.best_move)
}

/// The alpha-beta search as a [`MoveSelector`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MinimaxSelector;

impl MoveSelector for MinimaxSelector {
    fn select_move(&self, board: &Board, player: Player, depth: u32) -> Option<Move> {
        best_move(board, player, depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::weights::{MOBILITY_WEIGHT, POSITION_WEIGHTS};

    fn mv(row: u8, col: u8) -> Move {
        Move { row, col }
    }

    /// Plain minimax without pruning, used as the reference.
    fn full_minimax(board: &Board, depth: u32, root: Player, acting: Player) -> i32 {
        if depth == 0 {
            return evaluate(board, root);
        }
        let moves = board.valid_moves(acting);
        if moves.is_empty() {
            if !board.has_any_valid_move(acting.opponent()) {
                return terminal_score(board, root);
            }
            return full_minimax(board, depth, root, acting.opponent());
        }
        let scores = moves.iter().map(|m| {
            let mut next = *board;
            next.apply_move(acting, m.row as usize, m.col as usize);
            full_minimax(&next, depth - 1, root, acting.opponent())
        });
        if acting == root {
            scores.max().unwrap()
        } else {
            scores.min().unwrap()
        }
    }

    fn full_search(board: &Board, player: Player, depth: u32) -> Option<(Move, i32)> {
        let mut best: Option<(Move, i32)> = None;
        for m in board.valid_moves(player) {
            let mut next = *board;
            next.apply_move(player, m.row as usize, m.col as usize);
            let score = full_minimax(&next, depth - 1, player, player.opponent());
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((m, score));
            }
        }
        best
    }

    /// Deterministic pseudo-random playout, passing when forced.
    fn playout(seed: u64, plies: usize) -> (Board, Player) {
        let mut board = Board::new();
        let mut player = Player::Black;
        let mut state = seed;
        for _ in 0..plies {
            let moves = board.valid_moves(player);
            if moves.is_empty() {
                if !board.has_any_valid_move(player.opponent()) {
                    break;
                }
                player = player.opponent();
                continue;
            }
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let pick = moves[(state >> 33) as usize % moves.len()];
            assert!(board.apply_move(player, pick.row as usize, pick.col as usize));
            player = player.opponent();
        }
        (board, player)
    }

    #[test]
    fn depth_one_opening_picks_first_of_tied_moves() {
        assert_eq!(best_move(&Board::new(), Player::Black, 1), Some(mv(2, 3)));
    }

    #[test]
    fn search_is_deterministic() {
        let (board, player) = playout(7, 14);

        let first = Searcher::new(3).search(&board, player);
        let second = Searcher::new(3).search(&board, player);

        assert_eq!(first, second);
    }

    #[test]
    fn no_legal_move_yields_none() {
        let board: Board = "
            BW......
            ........
            ........
            ........
            ........
            ........
            ........
            ........"
            .parse()
            .unwrap();

        assert_eq!(best_move(&board, Player::White, 3), None);
        assert_eq!(best_move(&board, Player::Black, 3), Some(mv(0, 2)));
    }

    #[test]
    fn forced_pass_does_not_consume_a_ply() {
        let board: Board = "
            BW......
            ........
            ........
            ........
            ........
            ........
            ........
            ........"
            .parse()
            .unwrap();
        let mut after = board;
        assert!(after.apply_move(Player::Black, 0, 2));

        let mut searcher = Searcher::new(1);
        let score = searcher.minimax(
            &board,
            1,
            MIN_SCORE,
            MAX_SCORE,
            Player::Black,
            Player::White,
        );

        assert_eq!(score, evaluate(&after, Player::Black));
    }

    #[test]
    fn decided_games_outscore_any_heuristic() {
        let board: Board = "
            BW......
            ........
            ........
            ........
            ........
            ........
            ........
            ........"
            .parse()
            .unwrap();

        let outcome = Searcher::new(2).search(&board, Player::Black).unwrap();
        assert_eq!(outcome.best_move, mv(0, 2));
        assert_eq!(outcome.score, WIN_SCORE + 3);

        let positional: i32 = POSITION_WEIGHTS.as_array().iter().map(|w| w.abs()).sum();
        let heuristic_bound = positional + 2 * MOBILITY_WEIGHT * 64;
        assert!(heuristic_bound < WIN_SCORE);
    }

    #[test]
    fn terminal_score_signs_follow_the_root_player() {
        let black_wins = Board::from_bitboards(0b111, 0b1000);
        let drawn = Board::from_bitboards(0b11, 0b1100);

        assert_eq!(terminal_score(&black_wins, Player::Black), WIN_SCORE + 2);
        assert_eq!(terminal_score(&black_wins, Player::White), -WIN_SCORE - 2);
        assert_eq!(terminal_score(&drawn, Player::White), 0);
    }

    #[test]
    fn pruned_search_matches_unpruned_minimax() {
        for seed in 0..6u64 {
            for plies in [0, 5, 12, 20] {
                let (board, player) = playout(seed, plies);
                for depth in 1..=3 {
                    let pruned = Searcher::new(depth)
                        .search(&board, player)
                        .map(|o| (o.best_move, o.score));
                    assert_eq!(
                        pruned,
                        full_search(&board, player, depth),
                        "seed {seed}, plies {plies}, depth {depth}"
                    );
                }
            }
        }
    }

    #[test]
    fn pruned_search_matches_unpruned_minimax_near_the_end() {
        for seed in 0..4u64 {
            let (board, player) = playout(seed, 54);
            let pruned = Searcher::new(5)
                .search(&board, player)
                .map(|o| (o.best_move, o.score));
            assert_eq!(pruned, full_search(&board, player, 5), "seed {seed}");
        }
    }

    #[test]
    fn pruning_visits_fewer_nodes_than_full_tree() {
        let (board, player) = playout(3, 10);
        let mut searcher = Searcher::new(4);
        searcher.search(&board, player).unwrap();

        fn count_nodes(board: &Board, depth: u32, acting: Player) -> u64 {
            if depth == 0 {
                return 1;
            }
            let moves = board.valid_moves(acting);
            if moves.is_empty() {
                if !board.has_any_valid_move(acting.opponent()) {
                    return 1;
                }
                return 1 + count_nodes(board, depth, acting.opponent());
            }
            1 + moves
                .iter()
                .map(|m| {
                    let mut next = *board;
                    next.apply_move(acting, m.row as usize, m.col as usize);
                    count_nodes(&next, depth - 1, acting.opponent())
                })
                .sum::<u64>()
        }

        let full: u64 = board
            .valid_moves(player)
            .iter()
            .map(|m| {
                let mut next = board;
                next.apply_move(player, m.row as usize, m.col as usize);
                count_nodes(&next, 3, player.opponent())
            })
            .sum();

        assert!(searcher.nodes() <= full);
    }

    #[test]
    fn zero_depth_is_searched_as_one_ply() {
        let board = Board::new();

        assert_eq!(
            best_move(&board, Player::Black, 0),
            best_move(&board, Player::Black, 1)
        );
    }

    #[test]
    fn selector_never_returns_an_illegal_move() {
        for seed in 0..5u64 {
            for plies in [3, 17, 31, 45] {
                let (board, player) = playout(seed, plies);
                if let Some(m) = MinimaxSelector.select_move(&board, player, 2) {
                    assert!(board.is_valid_move(player, m.row as usize, m.col as usize));
                }
            }
        }
    }
}

//! JavaScript bindings.

use wasm_bindgen::prelude::*;

use crate::ai;
use crate::game::Game;
use crate::types::{BOARD_SIZE, Move, boundary_coords, boundary_depth, encode_move};

#[wasm_bindgen(js_name = boardSize)]
pub fn board_size() -> usize {
    BOARD_SIZE
}

/// One game session owned by the host.
///
/// Cells are encoded Empty=0, Black=1, White=-1; players Black=1, White=-1;
/// results Ongoing=0, BlackWins=1, WhiteWins=-1, Draw=2; moves `row * 8 + col`.
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct ReversiSession {
    game: Game,
}

#[wasm_bindgen]
impl ReversiSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { game: Game::new() }
    }

    #[wasm_bindgen(js_name = getCell)]
    pub fn get_cell(&self, row: i32, col: i32) -> i8 {
        let (row, col) = boundary_coords(row, col);
        i8::from(self.game.board().get_cell(row, col))
    }

    /// All 64 cells in row-major order, as an `Int8Array`.
    pub fn board(&self) -> Vec<i8> {
        self.game
            .board()
            .to_array()
            .iter()
            .map(|&cell| i8::from(cell))
            .collect()
    }

    #[wasm_bindgen(js_name = currentPlayer)]
    pub fn current_player(&self) -> i8 {
        i8::from(self.game.current_player())
    }

    /// Copies up to `out.length` legal moves into `out` and returns how many
    /// legal moves exist.
    #[wasm_bindgen(js_name = validMoves)]
    pub fn valid_moves(&self, out: &mut [i32]) -> usize {
        let moves = self.game.valid_moves();
        for (slot, mv) in out.iter_mut().zip(&moves) {
            *slot = mv.index() as i32;
        }
        moves.len()
    }

    #[wasm_bindgen(js_name = makeMove)]
    pub fn make_move(&mut self, row: i32, col: i32) -> bool {
        let (row, col) = boundary_coords(row, col);
        self.game.make_move(row, col)
    }

    #[wasm_bindgen(js_name = passTurn)]
    pub fn pass_turn(&mut self) {
        self.game.pass_turn();
    }

    /// `[black_count, white_count]`.
    pub fn score(&self) -> Vec<u8> {
        let (black, white) = self.game.score();
        vec![black, white]
    }

    pub fn result(&self) -> i8 {
        i8::from(self.game.result())
    }

    pub fn reset(&mut self) {
        self.game.reset();
    }

    /// Recommended move as `row * 8 + col`, or -1 when the side to move has
    /// no legal move.
    #[wasm_bindgen(js_name = bestMove)]
    pub fn best_move(&self, depth: i32) -> i32 {
        encode_move(self.game.best_move(boundary_depth(depth)))
    }

    /// Serialized [`crate::types::GameSnapshot`].
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.game.snapshot())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Grades a candidate move for the side to move. Returns `null` for an
    /// illegal move.
    #[wasm_bindgen(js_name = reviewMove)]
    pub fn review_move(&self, row: i32, col: i32) -> Result<JsValue, JsValue> {
        let (row, col) = boundary_coords(row, col);
        let Some(mv) = Move::new(row, col) else {
            return Ok(JsValue::NULL);
        };
        match ai::review_move(self.game.board(), self.game.current_player(), mv) {
            Some(review) => serde_wasm_bindgen::to_value(&review)
                .map_err(|e| JsValue::from_str(&e.to_string())),
            None => Ok(JsValue::NULL),
        }
    }
}

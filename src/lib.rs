//! Reversi rules engine and alpha-beta move search for an 8x8 board.
//!
//! [`Board`] owns the grid and the flip rules, [`Game`] sequences turns and
//! passes, and [`ai`] recommends moves by fixed-depth minimax. Hosts embed the
//! engine through the [`wasm`] session class or the C ABI in [`ffi`].

pub mod ai;
pub mod arena;
pub mod board;
pub mod error;
pub mod ffi;
pub mod game;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use error::{ParseBoardError, ReversiError};
pub use game::Game;
pub use types::{BOARD_SIZE, Cell, GameResult, GameSnapshot, Move, Player};

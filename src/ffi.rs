//! C ABI for hosts that load the library dynamically (see
//! `include/reversi_core.h`).
//!
//! Every exported symbol carries the `reversi_` prefix. Handles are opaque
//! pointers produced by [`reversi_create_game`] and released by
//! [`reversi_destroy_game`]. A null handle is tolerated everywhere and yields
//! the neutral value of the call.

use std::os::raw::c_int;

use crate::game::Game;
use crate::types::{BOARD_SIZE, NUM_SQUARES, boundary_coords, boundary_depth, encode_move};

/// Opaque session handle.
pub type ReversiHandle = *mut Game;

unsafe fn game_ref<'a>(handle: ReversiHandle) -> Option<&'a Game> {
    // SAFETY: the caller passes null or a live handle from `reversi_create_game`.
    unsafe { handle.as_ref() }
}

unsafe fn game_mut<'a>(handle: ReversiHandle) -> Option<&'a mut Game> {
    // SAFETY: as above, and the host does not share the handle across threads.
    unsafe { handle.as_mut() }
}

#[unsafe(no_mangle)]
pub extern "C" fn reversi_create_game() -> ReversiHandle {
    Box::into_raw(Box::new(Game::new()))
}

/// # Safety
/// `handle` must be null or a handle from [`reversi_create_game`] not yet destroyed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reversi_destroy_game(handle: ReversiHandle) {
    if !handle.is_null() {
        // SAFETY: ownership returns to Rust exactly once.
        drop(unsafe { Box::from_raw(handle) });
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn reversi_get_board_size() -> c_int {
    BOARD_SIZE as c_int
}

/// # Safety
/// `handle` must be null or live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reversi_get_cell(
    handle: ReversiHandle,
    row: c_int,
    col: c_int,
) -> c_int {
    let Some(game) = (unsafe { game_ref(handle) }) else {
        return 0;
    };
    let (row, col) = boundary_coords(row, col);
    i8::from(game.board().get_cell(row, col)) as c_int
}

/// Writes 64 cells in row-major order.
///
/// # Safety
/// `handle` must be null or live; `out64` must be null or valid for 64 writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reversi_get_board(handle: ReversiHandle, out64: *mut i8) {
    let Some(game) = (unsafe { game_ref(handle) }) else {
        return;
    };
    if out64.is_null() {
        return;
    }
    // SAFETY: checked non-null; the caller guarantees room for 64 cells.
    let out = unsafe { std::slice::from_raw_parts_mut(out64, NUM_SQUARES) };
    for (slot, cell) in out.iter_mut().zip(game.board().to_array()) {
        *slot = i8::from(cell);
    }
}

/// # Safety
/// `handle` must be null or live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reversi_current_player(handle: ReversiHandle) -> c_int {
    match unsafe { game_ref(handle) } {
        Some(game) => i8::from(game.current_player()) as c_int,
        None => 1,
    }
}

/// Copies at most `max_moves` legal moves (`row * 8 + col`) and returns the
/// total number of legal moves.
///
/// # Safety
/// `handle` must be null or live; `out_moves` must be null or valid for
/// `max_moves` writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reversi_get_valid_moves(
    handle: ReversiHandle,
    out_moves: *mut c_int,
    max_moves: c_int,
) -> c_int {
    let Some(game) = (unsafe { game_ref(handle) }) else {
        return 0;
    };
    let moves = game.valid_moves();
    let capacity = usize::try_from(max_moves).unwrap_or(0);
    if !out_moves.is_null() && capacity > 0 {
        let len = capacity.min(moves.len());
        // SAFETY: checked non-null; `len` never exceeds the caller's capacity.
        let out = unsafe { std::slice::from_raw_parts_mut(out_moves, len) };
        for (slot, mv) in out.iter_mut().zip(&moves) {
            *slot = mv.index() as c_int;
        }
    }
    moves.len() as c_int
}

/// Returns 1 when the move was made, 0 otherwise.
///
/// # Safety
/// `handle` must be null or live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reversi_make_move(
    handle: ReversiHandle,
    row: c_int,
    col: c_int,
) -> c_int {
    let Some(game) = (unsafe { game_mut(handle) }) else {
        return 0;
    };
    let (row, col) = boundary_coords(row, col);
    game.make_move(row, col) as c_int
}

/// # Safety
/// `handle` must be null or live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reversi_pass_turn(handle: ReversiHandle) {
    if let Some(game) = unsafe { game_mut(handle) } {
        game.pass_turn();
    }
}

/// # Safety
/// `handle` must be null or live; each output pointer must be null or valid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reversi_get_score(
    handle: ReversiHandle,
    out_black: *mut c_int,
    out_white: *mut c_int,
) {
    let (black, white) = match unsafe { game_ref(handle) } {
        Some(game) => game.score(),
        None => (0, 0),
    };
    // SAFETY: null pointers are skipped; others are valid per the contract.
    unsafe {
        if let Some(out) = out_black.as_mut() {
            *out = black as c_int;
        }
        if let Some(out) = out_white.as_mut() {
            *out = white as c_int;
        }
    }
}

/// # Safety
/// `handle` must be null or live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reversi_get_result(handle: ReversiHandle) -> c_int {
    match unsafe { game_ref(handle) } {
        Some(game) => i8::from(game.result()) as c_int,
        None => 0,
    }
}

/// # Safety
/// `handle` must be null or live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reversi_reset_game(handle: ReversiHandle) {
    if let Some(game) = unsafe { game_mut(handle) } {
        game.reset();
    }
}

/// Returns `row * 8 + col`, or -1 when no legal move exists.
///
/// # Safety
/// `handle` must be null or live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn reversi_get_best_move(handle: ReversiHandle, depth: c_int) -> c_int {
    match unsafe { game_ref(handle) } {
        Some(game) => encode_move(game.best_move(boundary_depth(depth))) as c_int,
        None => -1,
    }
}

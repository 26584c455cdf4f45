//! Core Othello/Reversi engine: board representation, move generation,
//! evaluation, and search.

pub mod bitboard;
pub mod board;
mod constants;
mod count_last_flip;
pub mod diagnostics;
pub mod disc;
mod empty_list;
pub mod engine;
pub mod error;
pub mod eval;
mod flip;
pub mod game_state;
pub mod level;
pub mod move_list;
pub mod perft;
pub mod perturbation;
pub mod probcut;
pub mod search;
pub mod square;
mod stability;
mod transposition_table;
pub mod types;
pub mod util;
mod zobrist;

/// Initializes process-wide lookup tables shared by the probcut and stability modules.
///
/// Must be called once before running a search. [`search::Search::new`] calls this
/// internally, so most callers never need to invoke it directly.
pub fn init() {
    probcut::init();
    stability::init();
}

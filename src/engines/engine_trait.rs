//! Engine abstraction for automated move suppliers.
//!
//! An engine is handed the current board and answers with one legal move.
//! Drivers check for mate and draws before asking; an engine that finds no
//! move reports `NoLegalMoves`.

use crate::chess_errors::ChessResult;
use crate::game_state::board::Board;
use crate::moves::move_descriptions::Move;

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Pick a move for the side to move. The board is not modified.
    fn choose_move(&mut self, board: &Board) -> ChessResult<Move>;
}

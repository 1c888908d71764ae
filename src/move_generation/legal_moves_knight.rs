use crate::chess_errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::Direction;
use crate::game_state::piece::Piece;
use crate::move_generation::legal_move_apply::is_check_safe;
use crate::move_generation::legal_move_shared::pseudo_legal_steps;
use crate::moves::move_descriptions::Move;

pub fn legal_knight_moves(board: &mut Board, knight: &Piece) -> ChessResult<Vec<Move>> {
    let candidates = pseudo_legal_steps(board, knight, &Direction::KNIGHT_LEAPS, 1);
    let mut legal = Vec::with_capacity(candidates.len());
    for mv in candidates {
        if is_check_safe(board, &mv)? {
            legal.push(mv);
        }
    }
    Ok(legal)
}

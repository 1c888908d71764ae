//! Successor ordering for alpha-beta.
//!
//! Pieces are visited most valuable first, and each piece's moves are sorted
//! promotions, captures, castling, then the rest.

use crate::chess_errors::ChessResult;
use crate::game_state::board::Board;
use crate::move_generation::legal_move_generator::{legal_moves_of, pieces_by_value};
use crate::moves::move_descriptions::{Move, MoveType};

/// Promotion 3, capture 2, castling 1, summed.
#[inline]
pub fn ordering_score(board: &Board, mv: &Move) -> u8 {
    let mut score = 0;
    if mv.move_type == MoveType::Promotion {
        score += 3;
    }
    if mv.is_capturing_piece(board) {
        score += 2;
    }
    if mv.move_type.is_castling() {
        score += 1;
    }
    score
}

/// Legal moves for the side to move in search order.
pub fn ordered_moves(board: &mut Board) -> ChessResult<Vec<Move>> {
    let mut ordered = Vec::with_capacity(48);
    for piece in pieces_by_value(board, board.turn()) {
        let mut moves = legal_moves_of(board, &piece)?;
        // Stable, so equal scores keep generation order.
        moves.sort_by_key(|mv| std::cmp::Reverse(ordering_score(board, mv)));
        ordered.extend(moves);
    }
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::{ordered_moves, ordering_score};
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::PieceKind;

    #[test]
    fn captures_lead_within_a_piece() {
        let mut board = Board::from_fen("4k3/8/8/3p4/8/8/8/3QK3 w - - 0 1").expect("valid FEN");
        let moves = ordered_moves(&mut board).expect("generation succeeds");
        assert_eq!(moves[0].piece.kind, PieceKind::Queen);
        assert_eq!(moves[0].to.to_string(), "d5");
        assert_eq!(ordering_score(&board, &moves[0]), 2);
        assert_eq!(moves.last().map(|m| m.piece.kind), Some(PieceKind::King));
    }

    #[test]
    fn capturing_promotion_scores_highest() {
        let mut board = Board::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("valid FEN");
        let moves = ordered_moves(&mut board).expect("generation succeeds");
        let pawn_moves: Vec<_> = moves
            .iter()
            .filter(|m| m.piece.kind == PieceKind::Pawn)
            .collect();
        assert_eq!(pawn_moves[0].to.to_string(), "b8");
        assert_eq!(ordering_score(&board, pawn_moves[0]), 5);
        assert_eq!(ordering_score(&board, pawn_moves[1]), 3);
    }

    #[test]
    fn castling_before_quiet_king_steps() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").expect("valid FEN");
        let moves = ordered_moves(&mut board).expect("generation succeeds");
        let first_king = moves
            .iter()
            .find(|m| m.piece.kind == PieceKind::King)
            .expect("king has moves");
        assert!(first_king.move_type.is_castling());
    }
}

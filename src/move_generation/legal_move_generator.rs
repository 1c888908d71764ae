//! Full legal move generation pipeline.
//!
//! Dispatches on the piece kind to the per-piece generators. Non-king moves
//! are filtered by simulate-and-revert; king moves exclude attacked squares
//! directly.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, Position};
use crate::game_state::piece::Piece;
use crate::move_generation::legal_moves_king::legal_king_moves;
use crate::move_generation::legal_moves_knight::legal_knight_moves;
use crate::move_generation::legal_moves_pawn::legal_pawn_moves;
use crate::move_generation::legal_moves_sliding::legal_sliding_moves;
use crate::moves::move_descriptions::Move;

/// Legal moves of one piece.
pub fn legal_moves_of(board: &mut Board, piece: &Piece) -> ChessResult<Vec<Move>> {
    match piece.kind {
        PieceKind::Pawn => legal_pawn_moves(board, piece),
        PieceKind::Knight => legal_knight_moves(board, piece),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => legal_sliding_moves(board, piece),
        PieceKind::King => Ok(legal_king_moves(board, piece)),
    }
}

/// Legal moves of the piece standing on `pos`.
pub fn legal_moves_for_piece(board: &mut Board, pos: Position) -> ChessResult<Vec<Move>> {
    let piece = *board.piece_at(pos).ok_or(ChessError::NoPieceAt(pos))?;
    legal_moves_of(board, &piece)
}

/// Pieces of `color`, most valuable first.
pub fn pieces_by_value(board: &Board, color: Color) -> Vec<Piece> {
    let mut pieces = board.pieces_of(color);
    pieces.sort_by(|a, b| b.value().cmp(&a.value()));
    pieces
}

/// Every legal move for the side to move, grouped by piece in descending
/// material order.
pub fn generate_legal_moves(board: &mut Board) -> ChessResult<Vec<Move>> {
    let color = board.turn();
    generate_legal_moves_for(board, color)
}

pub fn generate_legal_moves_for(board: &mut Board, color: Color) -> ChessResult<Vec<Move>> {
    let mut moves = Vec::with_capacity(48);
    for piece in pieces_by_value(board, color) {
        moves.extend(legal_moves_of(board, &piece)?);
    }
    Ok(moves)
}

/// Whether `color` has at least one legal move. Stops at the first one.
pub fn has_any_legal_move(board: &mut Board, color: Color) -> ChessResult<bool> {
    let mut pieces = board.pieces_of(color);
    pieces.sort_by_key(|p| p.kind != PieceKind::King);
    for piece in pieces {
        if !legal_moves_of(board, &piece)?.is_empty() {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::{generate_legal_moves, has_any_legal_move, pieces_by_value};
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{Color, PieceKind};

    #[test]
    fn start_position_has_twenty_moves() {
        let mut board = Board::standard();
        let before = board.clone();
        let moves = generate_legal_moves(&mut board).expect("generation succeeds");
        assert_eq!(moves.len(), 20);
        assert_eq!(moves.iter().filter(|m| m.piece.kind == PieceKind::Knight).count(), 4);
        assert_eq!(board, before);
    }

    #[test]
    fn pieces_come_out_most_valuable_first() {
        let board = Board::standard();
        let pieces = pieces_by_value(&board, Color::White);
        assert_eq!(pieces[0].kind, PieceKind::Queen);
        assert_eq!(pieces.last().map(|p| p.kind), Some(PieceKind::King));
    }

    #[test]
    fn mated_side_has_no_move() {
        let mut board =
            Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .expect("valid FEN");
        assert!(!has_any_legal_move(&mut board, Color::White).expect("generation succeeds"));
        assert!(has_any_legal_move(&mut board, Color::Black).expect("generation succeeds"));
    }
}

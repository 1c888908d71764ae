//! Reversible move execution.
//!
//! `apply_move` mutates the board in place, flips the turn and pushes the
//! move (with its filled undo packet) onto the history. `revert_last_move`
//! is its exact inverse. Together they back both canonical play and the
//! simulate-and-revert legality test.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{
    KING_SIDE_ROOK_FILE, KING_SIDE_ROOK_TARGET_FILE, QUEEN_SIDE_ROOK_FILE,
    QUEEN_SIDE_ROOK_TARGET_FILE,
};
use crate::game_state::chess_types::{PieceKind, Position};
use crate::game_state::piece::Piece;
use crate::moves::move_descriptions::{AutoQueen, Move, MoveType, PromotionPolicy, UndoPacket};

/// Rook origin and destination for a castling move on `rank`.
fn castling_rook_squares(move_type: MoveType, rank: i8) -> Option<(Position, Position)> {
    match move_type {
        MoveType::CastlingKingSide => Some((
            Position::new(KING_SIDE_ROOK_FILE, rank),
            Position::new(KING_SIDE_ROOK_TARGET_FILE, rank),
        )),
        MoveType::CastlingQueenSide => Some((
            Position::new(QUEEN_SIDE_ROOK_FILE, rank),
            Position::new(QUEEN_SIDE_ROOK_TARGET_FILE, rank),
        )),
        _ => None,
    }
}

/// Execute `mv` on `board` and append it to the history.
///
/// The promotion piece is taken from, in order: an earlier execution of the
/// same move (redo), the move's preselected choice, then `policy`. Anything
/// that is not a valid promotion target becomes a queen.
pub fn apply_move(board: &mut Board, mut mv: Move, policy: &dyn PromotionPolicy) -> ChessResult<()> {
    let mover = *board
        .piece_at(mv.from)
        .ok_or(ChessError::NoPieceAt(mv.from))?;
    let mut captured = None;
    let mut promoted_to = None;

    match mv.move_type {
        MoveType::CastlingKingSide | MoveType::CastlingQueenSide => {
            let (rook_from, rook_to) = castling_rook_squares(mv.move_type, mv.from.rank)
                .ok_or_else(|| ChessError::IllegalMove(format!("{} castling", mv.from)))?;
            board.move_piece(mv.from, mv.to)?;
            board.move_piece(rook_from, rook_to)?;
        }
        MoveType::EnPassant => {
            // The victim sits beside the mover, behind the destination.
            captured = board.take_piece(Position::new(mv.to.file, mv.from.rank));
            board.move_piece(mv.from, mv.to)?;
        }
        MoveType::Promotion => {
            captured = board.move_piece(mv.from, mv.to)?;
            let kind = mv
                .promoted_to()
                .or(mv.promotion_choice)
                .or_else(|| policy.choose_promotion(mover.color, mv.to.file))
                .filter(|kind| kind.is_valid_promotion())
                .unwrap_or(PieceKind::Queen);
            let mut promoted = Piece::new(kind, mover.color, mv.to);
            promoted.has_moved = true;
            board.set_piece(mv.to, Some(promoted))?;
            promoted_to = Some(kind);
        }
        MoveType::ThreatensKing => {
            return Err(ChessError::IllegalMove(format!(
                "attack marker {}{} cannot be executed",
                mv.from, mv.to
            )));
        }
        MoveType::Normal | MoveType::NoHit | MoveType::OnlyHit => {
            captured = board.move_piece(mv.from, mv.to)?;
        }
    }

    board.change_turn();
    mv.set_undo_packet(UndoPacket {
        captured,
        mover_had_moved: mover.has_moved,
        promoted_to,
        position_key: 0,
        check_marker: None,
    });
    board.history_mut().push(mv);

    // The key depends on the en-passant target, which reads the history.
    let key = board.position_key();
    if let Some(packet) = board
        .history_mut()
        .last_move_mut()
        .and_then(Move::undo_packet_mut)
    {
        packet.position_key = key;
    }
    Ok(())
}

/// Pop the last move from the history and restore the board to the state
/// before it. Returns the reverted move, packet intact.
pub fn revert_last_move(board: &mut Board) -> ChessResult<Move> {
    let mv = board.history_mut().pop().ok_or(ChessError::EmptyHistory)?;
    let packet = *mv.undo_packet().ok_or(ChessError::MoveNotExecuted)?;

    match mv.move_type {
        MoveType::CastlingKingSide | MoveType::CastlingQueenSide => {
            let (rook_from, rook_to) = castling_rook_squares(mv.move_type, mv.from.rank)
                .ok_or_else(|| ChessError::IllegalMove(format!("{} castling", mv.from)))?;
            restore_mover(board, &mv, packet.mover_had_moved)?;
            let mut rook = board.take_piece(rook_to).ok_or(ChessError::NoPieceAt(rook_to))?;
            // Castling requires an unmoved rook.
            rook.has_moved = false;
            board.set_piece(rook_from, Some(rook))?;
        }
        MoveType::EnPassant => {
            restore_mover(board, &mv, packet.mover_had_moved)?;
            if let Some(victim) = packet.captured {
                board.set_piece(victim.position, Some(victim))?;
            }
        }
        MoveType::Promotion => {
            board.take_piece(mv.to).ok_or(ChessError::NoPieceAt(mv.to))?;
            let pawn = Piece {
                has_moved: packet.mover_had_moved,
                ..mv.piece
            };
            board.set_piece(mv.from, Some(pawn))?;
            board.set_piece(mv.to, packet.captured)?;
        }
        _ => {
            restore_mover(board, &mv, packet.mover_had_moved)?;
            board.set_piece(mv.to, packet.captured)?;
        }
    }

    board.change_turn();
    Ok(mv)
}

fn restore_mover(board: &mut Board, mv: &Move, had_moved: bool) -> ChessResult<()> {
    let mut piece = board.take_piece(mv.to).ok_or(ChessError::NoPieceAt(mv.to))?;
    piece.has_moved = had_moved;
    board.set_piece(mv.from, Some(piece))
}

/// Execute, test whether the mover's own king is attacked, revert. The
/// board is left exactly as it was.
pub fn is_check_safe(board: &mut Board, mv: &Move) -> ChessResult<bool> {
    let color = mv.piece.color;
    apply_move(board, mv.clone(), &AutoQueen)?;
    let safe = !board.is_check(color);
    revert_last_move(board)?;
    Ok(safe)
}

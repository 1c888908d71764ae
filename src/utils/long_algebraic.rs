//! Coordinate move notation (`e2e4`, `a7a8n`).
//!
//! Parsing reads the origin and destination squares and infers the move
//! type from the piece on the origin, the distance travelled and the
//! destination rank. The result is not checked for legality; drivers
//! compare it against the generated moves.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::PieceKind;
use crate::moves::move_descriptions::{Move, MoveType};
use crate::utils::algebraic::{algebraic_to_position, position_to_algebraic};

pub fn move_to_long_algebraic(mv: &Move) -> ChessResult<String> {
    let mut out = String::with_capacity(5);
    out.push_str(&position_to_algebraic(mv.from)?);
    out.push_str(&position_to_algebraic(mv.to)?);

    if mv.move_type == MoveType::Promotion {
        if let Some(kind) = mv.promoted_to().or(mv.promotion_choice) {
            out.push(promotion_to_char(kind)?);
        }
    }

    Ok(out)
}

pub fn parse_long_algebraic(long_algebraic: &str, board: &Board) -> ChessResult<Move> {
    let text = long_algebraic.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessError::InvalidAlgebraic(long_algebraic.to_owned()));
    }

    let from = algebraic_to_position(&text[0..2])?;
    let to = algebraic_to_position(&text[2..4])?;
    let piece = *board.piece_at(from).ok_or(ChessError::NoPieceAt(from))?;

    let file_delta = to.file - from.file;
    let move_type = match piece.kind {
        PieceKind::King if file_delta.abs() == 2 && from.rank == to.rank => {
            if file_delta > 0 {
                MoveType::CastlingKingSide
            } else {
                MoveType::CastlingQueenSide
            }
        }
        PieceKind::Pawn if to.rank == piece.color.promotion_rank() => MoveType::Promotion,
        PieceKind::Pawn if file_delta != 0 && !board.is_occupied(to) => MoveType::EnPassant,
        PieceKind::Pawn if file_delta != 0 => MoveType::OnlyHit,
        PieceKind::Pawn => MoveType::NoHit,
        _ => MoveType::Normal,
    };

    let mv = Move::new(piece, to, move_type);
    match text.chars().nth(4) {
        None => Ok(mv),
        Some(ch) if move_type == MoveType::Promotion => Ok(mv.with_promotion(char_to_promotion(ch)?)),
        Some(_) => Err(ChessError::InvalidAlgebraic(long_algebraic.to_owned())),
    }
}

fn promotion_to_char(kind: PieceKind) -> ChessResult<char> {
    if kind.is_valid_promotion() {
        Ok(kind.glyph().to_ascii_lowercase())
    } else {
        Err(ChessError::InvalidAlgebraic(format!("promotion to {kind:?}")))
    }
}

fn char_to_promotion(ch: char) -> ChessResult<PieceKind> {
    PieceKind::from_glyph(ch)
        .filter(|kind| kind.is_valid_promotion())
        .ok_or_else(|| ChessError::InvalidAlgebraic(format!("promotion piece {ch}")))
}

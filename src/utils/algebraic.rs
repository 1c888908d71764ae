//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and `Position`
//! values reused by the FEN, PGN and move-input components.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Position;

/// Convert algebraic notation (for example: "e4") to a position.
#[inline]
pub fn algebraic_to_position(square: &str) -> ChessResult<Position> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidAlgebraic(square.to_owned()));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidAlgebraic(square.to_owned()));
    }

    Ok(Position::new((file - b'a') as i8, (rank - b'1') as i8))
}

/// Convert a position to algebraic notation (for example: "e4").
#[inline]
pub fn position_to_algebraic(position: Position) -> ChessResult<String> {
    if !position.is_on_board() {
        return Err(ChessError::InvalidSquare {
            file: position.file,
            rank: position.rank,
        });
    }
    Ok(position.to_string())
}

/// Build a position from raw indices, rejecting anything off the board.
#[inline]
pub fn checked_position(file: i8, rank: i8) -> ChessResult<Position> {
    let position = Position::new(file, rank);
    if position.is_on_board() {
        Ok(position)
    } else {
        Err(ChessError::InvalidSquare { file, rank })
    }
}

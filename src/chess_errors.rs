//! Errors used throughout the chess engine.
//!
//! `ChessError` is the single error type returned by board mutation, move
//! execution, notation parsing and search. Two families exist:
//!
//! - Contract violations (`EmptyHistory`, `NoPieceAt`, `MoveNotExecuted`,
//!   `NoLegalMoves`) mean the legality filter or caller discipline was
//!   bypassed. Callers should stop the current game or search operation.
//! - Malformed input (`InvalidAlgebraic`, `InvalidSquare`, `InvalidFen`,
//!   `IllegalMove`, `WrongTurn`) is recoverable and suitable for showing to
//!   a user.

use thiserror::Error;

use crate::game_state::chess_types::Position;

/// Unified error type for the chess engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// The last executed move was requested but the history is empty.
    #[error("move history is empty")]
    EmptyHistory,

    /// A redo was requested but no undone move is available.
    #[error("no undone move to redo")]
    NothingToRedo,

    /// A move or query referenced a square that holds no piece.
    #[error("no piece at {0}")]
    NoPieceAt(Position),

    /// A move was reverted without ever being executed.
    #[error("move was reverted before it was executed")]
    MoveNotExecuted,

    /// A move was requested from a position where the side to move has none.
    #[error("no legal move available for the side to move")]
    NoLegalMoves,

    /// A submitted move is not among the legal moves of its piece.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// The piece on the given square does not belong to the side to move.
    #[error("piece at {0} does not belong to the side to move")]
    WrongTurn(Position),

    /// File or rank outside `0..=7`.
    #[error("square ({file}, {rank}) is outside the board")]
    InvalidSquare { file: i8, rank: i8 },

    /// A coordinate or move string could not be parsed.
    #[error("invalid algebraic notation: {0}")]
    InvalidAlgebraic(String),

    /// A FEN string could not be parsed.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),
}

/// Result type alias for chess engine operations.
pub type ChessResult<T> = Result<T, ChessError>;

#[cfg(test)]
mod tests {
    use super::ChessError;
    use crate::game_state::chess_types::Position;

    #[test]
    fn messages_name_the_offending_square() {
        let err = ChessError::NoPieceAt(Position::new(4, 3));
        assert_eq!(err.to_string(), "no piece at e4");

        let err = ChessError::InvalidSquare { file: 8, rank: 0 };
        assert_eq!(err.to_string(), "square (8, 0) is outside the board");
    }
}

//! Canonical chess-rule constants.
//!
//! Static literals used to set up the initial position and to evaluate the
//! draw rules.

use crate::game_state::chess_types::PieceKind;

/// Standard starting position as exported by a freshly initialized board.
///
/// The full-move field counts completed move pairs, so it starts at zero.
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0";

/// Back-rank order from the a-file to the h-file.
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Half-moves without capture or pawn move that end the game in a draw.
pub const FIFTY_MOVE_RULE_PLIES: u32 = 100;

/// Occurrences of one position that end the game in a draw.
pub const REPETITION_LIMIT: usize = 3;

/// Files of the king and rooks before and after castling.
pub const KING_START_FILE: i8 = 4;
pub const KING_SIDE_ROOK_FILE: i8 = 7;
pub const QUEEN_SIDE_ROOK_FILE: i8 = 0;
pub const KING_SIDE_KING_TARGET_FILE: i8 = 6;
pub const KING_SIDE_ROOK_TARGET_FILE: i8 = 5;
pub const QUEEN_SIDE_KING_TARGET_FILE: i8 = 2;
pub const QUEEN_SIDE_ROOK_TARGET_FILE: i8 = 3;

//! Positional bonus tables, one per piece kind plus an endgame king table.
//!
//! Row 0 is the far rank from White's point of view: White reads
//! `table[7 - rank][file]`, Black reads `table[rank][file]`.

use crate::game_state::chess_types::{Color, PieceKind, Position};

pub type PieceSquareTable = [[i32; 8]; 8];

pub const PAWN_TABLE: PieceSquareTable = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [50, 50, 50, 50, 50, 50, 50, 50],
    [10, 10, 20, 30, 30, 20, 10, 10],
    [0, 0, 10, 20, 20, 10, 0, 0],
    [0, 0, 0, 20, 20, 0, 0, 0],
    [0, 0, -10, 0, 0, -10, 0, 0],
    [0, 10, 10, -20, -20, 10, 10, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

pub const KNIGHT_TABLE: PieceSquareTable = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20, 0, 0, 0, 0, -20, -40],
    [-30, 0, 10, 20, 20, 10, 0, -30],
    [-30, 10, 20, 20, 20, 20, 10, -30],
    [-30, 0, 20, 20, 20, 20, 0, -30],
    [-30, 10, 10, 20, 20, 10, 10, -30],
    [-40, -20, 0, 10, 10, 0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

pub const BISHOP_TABLE: PieceSquareTable = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 0, 10, 10, 0, 0, -10],
    [-10, 10, 10, 10, 10, 10, 10, -10],
    [-10, 0, 10, 10, 10, 10, 0, -10],
    [-10, 10, 10, 10, 10, 10, 10, -10],
    [-10, 10, 0, 0, 0, 0, 10, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

pub const ROOK_TABLE: PieceSquareTable = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [50, 100, 100, 100, 100, 100, 100, 50],
    [-50, 0, 0, 0, 0, 0, 0, -50],
    [-50, 0, 0, 0, 0, 0, 0, -50],
    [-50, 0, 0, 0, 0, 0, 0, -50],
    [-50, 0, 0, 0, 0, 0, 0, -50],
    [-50, 0, 0, 0, 0, 0, 0, -50],
    [0, 0, 0, 50, 50, 0, 0, 0],
];

pub const QUEEN_TABLE: PieceSquareTable = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 10, 10, 10, 10, 0, -10],
    [-10, 0, 10, 10, 10, 10, 0, -10],
    [0, 0, 10, 10, 10, 10, 0, -10],
    [-10, 10, 10, 10, 10, 10, 0, -10],
    [-10, 0, 10, 0, 0, 0, 0, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

pub const KING_TABLE: PieceSquareTable = [
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [20, 20, 0, 0, 20, 20, 20, 20],
    [20, 30, 10, 0, 0, 10, 30, 20],
];

pub const KING_ENDGAME_TABLE: PieceSquareTable = [
    [-50, -40, -30, -20, -20, -30, -40, -50],
    [-30, -20, -10, 0, 0, -10, -20, -30],
    [-30, -10, 20, 30, 30, 20, -10, -30],
    [-30, -10, 30, 40, 40, 30, -10, -30],
    [-30, -10, 30, 40, 40, 30, -10, -30],
    [-30, -10, 20, 30, 30, 20, -10, -30],
    [-30, -30, 0, 0, 0, 0, -30, -30],
    [-50, -30, -30, -30, -30, -30, -30, -50],
];

#[inline]
pub const fn table_for(kind: PieceKind, endgame: bool) -> &'static PieceSquareTable {
    match kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King if endgame => &KING_ENDGAME_TABLE,
        PieceKind::King => &KING_TABLE,
    }
}

/// Unsigned bonus for a piece of `color` standing on `pos`.
#[inline]
pub fn square_bonus(kind: PieceKind, color: Color, pos: Position, endgame: bool) -> i32 {
    let row = match color {
        Color::White => 7 - pos.rank,
        Color::Black => pos.rank,
    };
    table_for(kind, endgame)[row as usize][pos.file as usize]
}

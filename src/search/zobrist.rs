//! Zobrist hashing for position identity and repetition tracking.
//!
//! The keys are generated from a fixed seed so hashes are deterministic across
//! runs, which is useful for testing and debugging.

use std::sync::OnceLock;

use crate::game_state::board::Board;
use crate::game_state::chess_types::{CastlingRights, Color, PieceKind, Position};

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for sq in piece {
                *sq = next_random_u64(&mut seed);
            }
        }
    }

    let side_to_move = next_random_u64(&mut seed);

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = next_random_u64(&mut seed);
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = next_random_u64(&mut seed);
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

#[inline]
fn next_random_u64(state: &mut u64) -> u64 {
    // splitmix64
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Key for a `(color, piece, square)` occupancy term.
#[inline]
pub fn piece_square_key(color: Color, piece: PieceKind, square: Position) -> u64 {
    let index = (square.rank as usize) * 8 + square.file as usize;
    tables().piece_square[color.index()][piece.index()][index]
}

#[inline]
pub fn castling_key(rights: CastlingRights) -> u64 {
    tables().castling[rights.bits() as usize]
}

#[inline]
pub fn en_passant_file_key(file: i8) -> u64 {
    tables().en_passant_file[file as usize & 7]
}

/// Xor'd in when Black is to move.
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// Full key from placement, side to move, castling rights and en-passant
/// file.
pub fn compute_position_key(board: &Board) -> u64 {
    let mut key = board
        .all_pieces()
        .iter()
        .fold(0u64, |acc, p| acc ^ piece_square_key(p.color, p.kind, p.position));

    if board.turn() == Color::Black {
        key ^= side_to_move_key();
    }

    key ^= castling_key(board.castling_rights());

    if let Some(target) = board.en_passant_target() {
        key ^= en_passant_file_key(target.file);
    }

    key
}

//! FEN-to-Board parser.
//!
//! Builds a board from a Forsyth-Edwards Notation string. FEN carries no
//! per-piece move flags, so `has_moved` is derived: pawns off their start
//! rank count as moved, and kings and rooks stay unmoved only where the
//! castling field grants the matching corner. The en-passant square and
//! both counters seed the history origin so the board exports the same FEN.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{KING_SIDE_ROOK_FILE, KING_START_FILE, QUEEN_SIDE_ROOK_FILE};
use crate::game_state::chess_types::{CastlingRights, Color, PieceKind, Position};
use crate::game_state::history::HistoryOrigin;
use crate::game_state::piece::Piece;
use crate::utils::algebraic::algebraic_to_position;

pub fn parse_fen(fen: &str) -> ChessResult<Board> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| invalid("missing halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| invalid("missing fullmove number"))?;

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let castling = parse_castling_rights(castling_part)?;
    let mut board = Board::new();
    for piece in parse_board(board_part)? {
        board.set_piece(piece.position, Some(with_derived_move_flag(piece, castling)))?;
    }

    let first_turn = parse_side_to_move(side_part)?;
    board.set_turn(first_turn);

    let en_passant = parse_en_passant_square(en_passant_part)?;
    let halfmove_clock = halfmove_part
        .parse::<u32>()
        .map_err(|_| invalid(&format!("halfmove clock {halfmove_part}")))?;
    let fullmove_number = fullmove_part
        .parse::<u32>()
        .map_err(|_| invalid(&format!("fullmove number {fullmove_part}")))?;

    board.reset_history(HistoryOrigin {
        first_turn,
        halfmove_clock,
        fullmove_number,
        en_passant,
        position_key: 0,
    });
    Ok(board)
}

fn invalid(reason: &str) -> ChessError {
    ChessError::InvalidFen(reason.to_owned())
}

fn parse_board(board_part: &str) -> ChessResult<Vec<Piece>> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    let mut pieces = Vec::with_capacity(32);
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as i8;
        let mut file = 0i8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(&format!("empty-square count '{ch}'")));
                }
                file += empty_count as i8;
                if file > 8 {
                    return Err(invalid(&format!("rank {} has too many files", rank + 1)));
                }
                continue;
            }

            if file >= 8 {
                return Err(invalid(&format!("rank {} has too many files", rank + 1)));
            }
            let piece = Piece::from_fen_char(ch, Position::new(file, rank))
                .ok_or_else(|| invalid(&format!("piece character '{ch}'")))?;
            pieces.push(piece);
            file += 1;
        }

        if file != 8 {
            return Err(invalid(&format!("rank {} does not sum to 8 files", rank + 1)));
        }
    }

    Ok(pieces)
}

fn with_derived_move_flag(mut piece: Piece, castling: CastlingRights) -> Piece {
    let home = piece.color.home_rank();
    let (king_side, queen_side) = match piece.color {
        Color::White => (castling.white_king_side, castling.white_queen_side),
        Color::Black => (castling.black_king_side, castling.black_queen_side),
    };
    let at = |file: i8| piece.position == Position::new(file, home);

    piece.has_moved = match piece.kind {
        PieceKind::Pawn => piece.position.rank != piece.color.pawn_start_rank(),
        PieceKind::King => !(at(KING_START_FILE) && (king_side || queen_side)),
        PieceKind::Rook => {
            !((at(KING_SIDE_ROOK_FILE) && king_side) || (at(QUEEN_SIDE_ROOK_FILE) && queen_side))
        }
        PieceKind::Knight | PieceKind::Bishop | PieceKind::Queen => false,
    };
    piece
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(&format!("side-to-move field {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    let mut rights = CastlingRights::default();
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights.white_king_side = true,
            'Q' => rights.white_queen_side = true,
            'k' => rights.black_king_side = true,
            'q' => rights.black_queen_side = true,
            _ => return Err(invalid(&format!("castling rights character {ch}"))),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Position>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    algebraic_to_position(en_passant_part)
        .map(Some)
        .map_err(|_| invalid(&format!("en-passant square {en_passant_part}")))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::chess_errors::ChessError;
    use crate::game_state::board::Board;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{Color, Position};

    #[test]
    fn starting_fen_matches_standard_board() {
        let board = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(board, Board::standard());
        assert_eq!(board.turn(), Color::White);
        assert_eq!(board.fullmove_number(), 0);
        assert_eq!(board.halfmove_clock(), 0);
    }

    #[test]
    fn move_flags_follow_castling_field() {
        let board = parse_fen("r3k2r/8/8/8/8/8/4P3/R3K2R w Kq - 0 1").expect("FEN should parse");
        let flag = |sq: Position| board.piece_at(sq).map(|p| p.has_moved);

        assert_eq!(flag(Position::new(4, 0)), Some(false));
        assert_eq!(flag(Position::new(7, 0)), Some(false));
        assert_eq!(flag(Position::new(0, 0)), Some(true));
        assert_eq!(flag(Position::new(0, 7)), Some(false));
        assert_eq!(flag(Position::new(7, 7)), Some(true));
        assert_eq!(flag(Position::new(4, 1)), Some(false));

        let rights = board.castling_rights();
        assert!(rights.white_king_side && !rights.white_queen_side);
        assert!(!rights.black_king_side && rights.black_queen_side);
    }

    #[test]
    fn advanced_pawn_counts_as_moved() {
        let board = parse_fen("4k3/8/8/8/4P3/8/8/4K3 b - - 0 1").expect("FEN should parse");
        assert_eq!(board.piece_at(Position::new(4, 3)).map(|p| p.has_moved), Some(true));
        assert_eq!(board.turn(), Color::Black);
    }

    #[test]
    fn malformed_fen_is_rejected() {
        for fen in [
            "",
            "8/8/8/8/8/8/8 w - - 0 1",
            "9/8/8/8/8/8/8/8 w - - 0 1",
            "8/8/8/8/8/8/8/7X w - - 0 1",
            "8/8/8/8/8/8/8/8 x - - 0 1",
            "8/8/8/8/8/8/8/8 w Z - 0 1",
            "8/8/8/8/8/8/8/8 w - z9 0 1",
            "8/8/8/8/8/8/8/8 w - - a 1",
            "8/8/8/8/8/8/8/8 w - - 0 1 extra",
        ] {
            assert!(
                matches!(parse_fen(fen), Err(ChessError::InvalidFen(_))),
                "expected rejection of {fen:?}"
            );
        }
    }
}

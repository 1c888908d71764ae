use crate::game_state::board::Board;
use crate::game_state::chess_types::{CastlingRights, Color, Position};

pub fn generate_fen(board: &Board) -> String {
    let placement = generate_board_field(board);
    let side_to_move = match board.turn() {
        Color::White => "w",
        Color::Black => "b",
    };
    let castling = generate_castling_field(board.castling_rights());
    let en_passant = generate_en_passant_field(board.en_passant_target());

    format!(
        "{} {} {} {} {} {}",
        placement,
        side_to_move,
        castling,
        en_passant,
        board.halfmove_clock(),
        board.fullmove_number()
    )
}

fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for rank in (0..8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8 {
            if let Some(piece) = board.piece_at(Position::new(file, rank)) {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece.fen_char());
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let mut out = String::new();

    if rights.white_king_side {
        out.push('K');
    }
    if rights.white_queen_side {
        out.push('Q');
    }
    if rights.black_king_side {
        out.push('k');
    }
    if rights.black_queen_side {
        out.push('q');
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

fn generate_en_passant_field(square: Option<Position>) -> String {
    square.map_or_else(|| "-".to_owned(), |sq| sq.to_string())
}

#[cfg(test)]
mod tests {
    use super::generate_fen;
    use crate::game_state::board::Board;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::moves::move_descriptions::AutoQueen;
    use crate::utils::fen_parser::parse_fen;
    use crate::utils::long_algebraic::parse_long_algebraic;

    #[test]
    fn standard_board_exports_start_fen() {
        assert_eq!(generate_fen(&Board::standard()), STARTING_POSITION_FEN);
    }

    #[test]
    fn round_trip_custom_position_fen() {
        let fen = "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 b kq - 4 6";
        let parsed = parse_fen(fen).expect("custom FEN should parse");
        assert_eq!(generate_fen(&parsed), fen);
    }

    #[test]
    fn round_trip_en_passant_field() {
        let fen = "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3";
        let parsed = parse_fen(fen).expect("FEN should parse");
        assert_eq!(generate_fen(&parsed), fen);
    }

    #[test]
    fn moving_a_rook_drops_only_its_corner() {
        let mut board = Board::standard();
        for lan in ["h2h4", "a7a6", "h1h3"] {
            let mv = parse_long_algebraic(lan, &board).expect("move should parse");
            board.execute_move(mv, &AutoQueen).expect("move should execute");
        }
        assert_eq!(
            generate_fen(&board),
            "rnbqkbnr/1ppppppp/p7/8/7P/7R/PPPPPPP1/RNBQKBN1 b Qkq - 1 1"
        );
    }
}

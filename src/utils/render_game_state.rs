//! Terminal-oriented Unicode board renderer.
//!
//! Creates a human-readable board view for the console driver, tests and
//! diagnostics in text environments.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Position};

/// Render the board to a Unicode string, rank 8 at the top.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8).rev() {
        out.push(char::from(b'1' + rank as u8));
        out.push(' ');

        for file in 0..8 {
            match board.piece_at(Position::new(file, rank)) {
                Some(piece) => out.push(piece.unicode()),
                None => out.push('·'),
            }

            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank as u8));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

/// Board plus a status line naming the side to move.
pub fn render_with_status(board: &Board) -> String {
    let mover = match board.turn() {
        Color::White => "White",
        Color::Black => "Black",
    };
    let check = if board.is_check(board.turn()) { " (in check)" } else { "" };
    format!(
        "{}\n{} to move{} | {}",
        render_board(board),
        mover,
        check,
        board.fen()
    )
}

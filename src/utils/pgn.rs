//! PGN export: short algebraic movetext plus the seven-tag header roster.
//!
//! Moves are written without disambiguation. Pawn captures carry the origin
//! file (`exd6`), promotions a `=Q` suffix, and moves committed to the game
//! line the `+`/`#` marker recorded when they were executed.

use chrono::Local;

use crate::chess_errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::move_generation::legal_move_apply::revert_last_move;
use crate::moves::move_descriptions::{Move, MoveType};

/// Player names and result for `write_pgn`.
#[derive(Debug, Clone)]
pub struct PgnHeaders {
    pub event: String,
    pub site: String,
    pub round: String,
    pub white: String,
    pub black: String,
    pub result: String,
}

impl Default for PgnHeaders {
    fn default() -> Self {
        Self {
            event: "Casual Game".to_owned(),
            site: "Local".to_owned(),
            round: "-".to_owned(),
            white: "White".to_owned(),
            black: "Black".to_owned(),
            result: "*".to_owned(),
        }
    }
}

/// Short algebraic text of one executed move.
pub fn short_algebraic(mv: &Move) -> String {
    let mut out = match mv.move_type {
        MoveType::CastlingKingSide => "O-O".to_owned(),
        MoveType::CastlingQueenSide => "O-O-O".to_owned(),
        _ => {
            let capture = mv.has_captured_piece() || mv.move_type == MoveType::EnPassant;
            let mut text = String::with_capacity(6);
            if mv.piece.kind == PieceKind::Pawn {
                if capture {
                    text.push(char::from(b'a' + mv.from.file as u8));
                }
            } else {
                text.push(mv.piece.kind.glyph());
            }
            if capture {
                text.push('x');
            }
            text.push_str(&mv.to.to_string());
            if mv.move_type == MoveType::Promotion {
                let kind = mv
                    .promoted_to()
                    .or(mv.promotion_choice)
                    .unwrap_or(PieceKind::Queen);
                text.push('=');
                text.push(kind.glyph());
            }
            text
        }
    };

    if let Some(marker) = mv.check_marker() {
        out.push(marker.suffix());
    }
    out
}

/// Numbered movetext of the board's history, e.g. `1. e4 e5 2. Nf3`.
pub fn movetext(board: &Board) -> String {
    let origin = board.history().origin();
    let black_first = origin.first_turn == Color::Black;
    let offset = usize::from(black_first);
    let base = origin.fullmove_number.max(1) as usize;

    let mut parts = Vec::with_capacity(board.history().len() * 3 / 2);
    for (ply, mv) in board.history().moves().iter().enumerate() {
        let number = base + (ply + offset) / 2;
        if (ply + offset) % 2 == 0 {
            parts.push(format!("{number}."));
        } else if ply == 0 {
            parts.push(format!("{number}..."));
        }
        parts.push(short_algebraic(mv));
    }
    parts.join(" ")
}

/// Full PGN document for the game on `board`.
pub fn write_pgn(board: &Board, headers: &PgnHeaders) -> ChessResult<String> {
    let result = normalize_result(&headers.result);
    let date = Local::now().format("%Y.%m.%d").to_string();

    let mut tags = vec![
        ("Event", headers.event.clone()),
        ("Site", headers.site.clone()),
        ("Date", date),
        ("Round", headers.round.clone()),
        ("White", headers.white.clone()),
        ("Black", headers.black.clone()),
        ("Result", result.to_owned()),
    ];

    let initial_fen = initial_fen(board)?;
    if initial_fen != STARTING_POSITION_FEN {
        tags.push(("SetUp", "1".to_owned()));
        tags.push(("FEN", initial_fen));
    }

    let mut out = String::new();
    for (key, value) in tags {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(&value)));
    }
    out.push('\n');

    let moves = movetext(board);
    if !moves.is_empty() {
        out.push_str(&moves);
        out.push(' ');
    }
    out.push_str(result);
    out.push('\n');
    Ok(out)
}

/// FEN of the position the history starts from.
fn initial_fen(board: &Board) -> ChessResult<String> {
    let mut start = board.copy();
    while !start.history().is_empty() {
        revert_last_move(&mut start)?;
    }
    Ok(start.fen())
}

fn normalize_result(result: &str) -> &str {
    match result {
        "1-0" | "0-1" | "1/2-1/2" | "*" => result,
        _ => "*",
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}

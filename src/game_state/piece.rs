//! Per-square occupant.
//!
//! A `Piece` is a plain value owned by exactly one board slot. Copying a board
//! copies its pieces, so no piece is ever shared between two boards.

use crate::game_state::chess_types::{Color, PieceKind, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub position: Position,
    /// Set by the first executed move; only a revert restores it.
    pub has_moved: bool,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color, position: Position) -> Self {
        Self {
            kind,
            color,
            position,
            has_moved: false,
        }
    }

    /// Relocate and mark as moved.
    #[inline]
    pub fn move_to(&mut self, to: Position) {
        self.position = to;
        self.has_moved = true;
    }

    #[inline]
    pub const fn value(&self) -> i32 {
        self.kind.value()
    }

    /// Material value signed by owner: positive for White.
    #[inline]
    pub const fn signed_value(&self) -> i32 {
        match self.color {
            Color::White => self.kind.value(),
            Color::Black => -self.kind.value(),
        }
    }

    /// FEN letter, upper case for White.
    #[inline]
    pub fn fen_char(&self) -> char {
        let glyph = self.kind.glyph();
        match self.color {
            Color::White => glyph,
            Color::Black => glyph.to_ascii_lowercase(),
        }
    }

    /// Build an unmoved piece from a FEN letter.
    pub fn from_fen_char(ch: char, position: Position) -> Option<Self> {
        let kind = PieceKind::from_glyph(ch)?;
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Self::new(kind, color, position))
    }

    pub fn unicode(&self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::King) => '♔',
            (Color::Black, PieceKind::Pawn) => '♟',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::King) => '♚',
        }
    }
}

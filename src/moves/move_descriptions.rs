//! Move values and the metadata needed to reverse them.
//!
//! A `Move` describes a transition of one piece. Executing it fills an
//! `UndoPacket` with everything the board loses during the transition
//! (captured piece, the mover's prior `has_moved` flag, the promotion piece),
//! so reverting never has to diff boards.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, Position};
use crate::game_state::piece::Piece;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveType {
    /// Quiet move or capture.
    Normal,
    /// Quiet move only (pawn pushes).
    NoHit,
    /// Capture only (pawn diagonal).
    OnlyHit,
    CastlingKingSide,
    CastlingQueenSide,
    EnPassant,
    Promotion,
    /// Attack-pattern marker produced by threat detection. Never executed.
    ThreatensKing,
}

impl MoveType {
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveType::CastlingKingSide | MoveType::CastlingQueenSide)
    }

    #[inline]
    pub const fn can_hit(self) -> bool {
        matches!(
            self,
            MoveType::Normal | MoveType::OnlyHit | MoveType::EnPassant | MoveType::Promotion
        )
    }

    #[inline]
    pub const fn can_move_quietly(self) -> bool {
        matches!(
            self,
            MoveType::Normal | MoveType::NoHit | MoveType::Promotion | MoveType::ThreatensKing
        )
    }
}

/// Check annotation recorded for moves committed to the game line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckMarker {
    Check,
    Checkmate,
}

impl CheckMarker {
    #[inline]
    pub const fn suffix(self) -> char {
        match self {
            CheckMarker::Check => '+',
            CheckMarker::Checkmate => '#',
        }
    }
}

/// Snapshot taken at execute time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UndoPacket {
    pub captured: Option<Piece>,
    pub mover_had_moved: bool,
    pub promoted_to: Option<PieceKind>,
    /// Position key of the board right after the move.
    pub position_key: u64,
    pub check_marker: Option<CheckMarker>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    /// The mover as it stood when the move was generated.
    pub piece: Piece,
    pub from: Position,
    pub to: Position,
    pub move_type: MoveType,
    /// Preselected promotion piece; the promotion policy is asked otherwise.
    pub promotion_choice: Option<PieceKind>,
    undo: Option<UndoPacket>,
}

impl Move {
    pub fn new(piece: Piece, to: Position, move_type: MoveType) -> Self {
        Self {
            piece,
            from: piece.position,
            to,
            move_type,
            promotion_choice: None,
            undo: None,
        }
    }

    pub fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.promotion_choice = Some(kind);
        self
    }

    #[inline]
    pub fn undo_packet(&self) -> Option<&UndoPacket> {
        self.undo.as_ref()
    }

    #[inline]
    pub(crate) fn set_undo_packet(&mut self, packet: UndoPacket) {
        self.undo = Some(packet);
    }

    #[inline]
    pub(crate) fn undo_packet_mut(&mut self) -> Option<&mut UndoPacket> {
        self.undo.as_mut()
    }

    #[inline]
    pub fn is_executed(&self) -> bool {
        self.undo.is_some()
    }

    /// Whether execution captured a piece. False before execution.
    #[inline]
    pub fn has_captured_piece(&self) -> bool {
        self.captured_piece().is_some()
    }

    #[inline]
    pub fn captured_piece(&self) -> Option<&Piece> {
        self.undo.as_ref().and_then(|u| u.captured.as_ref())
    }

    #[inline]
    pub fn promoted_to(&self) -> Option<PieceKind> {
        self.undo.as_ref().and_then(|u| u.promoted_to)
    }

    #[inline]
    pub fn check_marker(&self) -> Option<CheckMarker> {
        self.undo.as_ref().and_then(|u| u.check_marker)
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.piece.color
    }

    #[inline]
    pub fn is_pawn_move(&self) -> bool {
        self.piece.kind == PieceKind::Pawn
    }

    #[inline]
    pub fn is_double_pawn_push(&self) -> bool {
        self.is_pawn_move() && (self.to.rank - self.from.rank).abs() == 2
    }

    /// Whether executing the move on `board` would capture. Usable before
    /// execution, unlike `has_captured_piece`.
    pub fn is_capturing_piece(&self, board: &Board) -> bool {
        if self.move_type == MoveType::EnPassant {
            return true;
        }
        board.is_occupied_by(self.to, self.piece.color.opposite())
    }

    /// Same piece, squares and move type, ignoring execution state.
    #[inline]
    pub fn same_transition(&self, other: &Move) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.move_type == other.move_type
            && self.piece.kind == other.piece.kind
            && self.piece.color == other.piece.color
    }
}

/// Chooses the piece a pawn promotes to.
///
/// Invoked with the promoting color and the destination file. Returning
/// `None` or a non-promotable kind falls back to a queen.
pub trait PromotionPolicy {
    fn choose_promotion(&self, color: Color, file: i8) -> Option<PieceKind>;
}

impl<F> PromotionPolicy for F
where
    F: Fn(Color, i8) -> Option<PieceKind>,
{
    fn choose_promotion(&self, color: Color, file: i8) -> Option<PieceKind> {
        self(color, file)
    }
}

/// Always promotes to a queen. Used by search and automated players.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoQueen;

impl PromotionPolicy for AutoQueen {
    fn choose_promotion(&self, _color: Color, _file: i8) -> Option<PieceKind> {
        Some(PieceKind::Queen)
    }
}

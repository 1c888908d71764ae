//! Mailbox board: an 8x8 grid of optional pieces, the side to move and the
//! executed-move history.
//!
//! Mutation primitives here (`set_piece`, `take_piece`, `move_piece`) perform
//! no rule checking. Rule-aware execution lives in
//! `move_generation::legal_move_apply`; `execute_move` below is the canonical
//! commit used by drivers.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{
    BACK_RANK, FIFTY_MOVE_RULE_PLIES, KING_SIDE_ROOK_FILE, KING_START_FILE, QUEEN_SIDE_ROOK_FILE,
    REPETITION_LIMIT,
};
use crate::game_state::chess_types::{CastlingRights, Color, PieceKind, Position};
use crate::game_state::history::{History, HistoryOrigin};
use crate::game_state::piece::Piece;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_generator::{
    generate_legal_moves, has_any_legal_move, legal_moves_for_piece,
};
use crate::moves::move_descriptions::{CheckMarker, Move, PromotionPolicy};
use crate::search::zobrist::compute_position_key;
use crate::utils::{fen_generator, fen_parser, pgn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Indexed `[file][rank]`.
    squares: [[Option<Piece>; 8]; 8],
    turn: Color,
    history: History,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty board, White to move.
    pub fn new() -> Self {
        Self {
            squares: [[None; 8]; 8],
            turn: Color::White,
            history: History::default(),
        }
    }

    /// Board holding the standard starting position.
    pub fn standard() -> Self {
        let mut board = Self::new();
        board.initialize_board();
        board
    }

    /// Reset to the standard starting position with an empty history.
    pub fn initialize_board(&mut self) {
        self.squares = [[None; 8]; 8];
        for color in [Color::White, Color::Black] {
            let home = color.home_rank();
            let pawns = color.pawn_start_rank();
            for (file, kind) in BACK_RANK.iter().enumerate() {
                let file = file as i8;
                self.squares[file as usize][home as usize] =
                    Some(Piece::new(*kind, color, Position::new(file, home)));
                self.squares[file as usize][pawns as usize] =
                    Some(Piece::new(PieceKind::Pawn, color, Position::new(file, pawns)));
            }
        }
        self.turn = Color::White;
        self.reset_history(HistoryOrigin::default());
    }

    /// Replace the history with an empty one starting from `origin`. The
    /// origin key is recomputed from the current placement.
    pub(crate) fn reset_history(&mut self, origin: HistoryOrigin) {
        self.history = History::new(origin);
        let position_key = self.position_key();
        self.history = History::new(HistoryOrigin {
            position_key,
            ..origin
        });
    }

    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        if !pos.is_on_board() {
            return None;
        }
        self.squares[pos.file as usize][pos.rank as usize].as_ref()
    }

    fn slot_mut(&mut self, pos: Position) -> ChessResult<&mut Option<Piece>> {
        if !pos.is_on_board() {
            return Err(ChessError::InvalidSquare {
                file: pos.file,
                rank: pos.rank,
            });
        }
        Ok(&mut self.squares[pos.file as usize][pos.rank as usize])
    }

    /// Place (or clear) a square. The piece's stored position is rebound to
    /// `pos`; its `has_moved` flag is kept as given.
    pub fn set_piece(&mut self, pos: Position, piece: Option<Piece>) -> ChessResult<()> {
        let slot = self.slot_mut(pos)?;
        *slot = piece.map(|mut p| {
            p.position = pos;
            p
        });
        Ok(())
    }

    /// Remove and return the occupant of `pos`.
    pub fn take_piece(&mut self, pos: Position) -> Option<Piece> {
        self.slot_mut(pos).ok().and_then(Option::take)
    }

    /// Relocate the occupant of `from` to `to`, marking it moved. Returns
    /// whatever stood on `to` before.
    pub fn move_piece(&mut self, from: Position, to: Position) -> ChessResult<Option<Piece>> {
        let mut piece = self.take_piece(from).ok_or(ChessError::NoPieceAt(from))?;
        piece.move_to(to);
        let slot = self.slot_mut(to)?;
        Ok(slot.replace(piece))
    }

    #[inline]
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.piece_at(pos).is_some()
    }

    #[inline]
    pub fn is_occupied_by(&self, pos: Position, color: Color) -> bool {
        self.piece_at(pos).is_some_and(|p| p.color == color)
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Called exactly once per executed or reverted move.
    #[inline]
    pub(crate) fn change_turn(&mut self) {
        self.turn = self.turn.opposite();
    }

    /// Used by the FEN parser only.
    #[inline]
    pub(crate) fn set_turn(&mut self, color: Color) {
        self.turn = color;
    }

    /// Every piece on the board, a1..h8 order.
    pub fn all_pieces(&self) -> Vec<Piece> {
        self.squares
            .iter()
            .flat_map(|file| file.iter().flatten().copied())
            .collect()
    }

    pub fn pieces_of(&self, color: Color) -> Vec<Piece> {
        self.squares
            .iter()
            .flat_map(|file| file.iter().flatten())
            .filter(|p| p.color == color)
            .copied()
            .collect()
    }

    /// Sum of material values for one side, kings excluded.
    pub fn material(&self, color: Color) -> i32 {
        self.pieces_of(color).iter().map(Piece::value).sum()
    }

    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.squares
            .iter()
            .flat_map(|file| file.iter().flatten())
            .find(|p| p.color == color && p.kind == PieceKind::King)
            .map(|p| p.position)
    }

    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[inline]
    pub(crate) fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Whether `color`'s king is attacked. A board without that king is
    /// never in check.
    pub fn is_check(&self, color: Color) -> bool {
        self.king_position(color)
            .is_some_and(|king| is_square_attacked(self, king, color.opposite()))
    }

    /// Checkmate for the side to move.
    pub fn is_checkmate(&mut self) -> ChessResult<bool> {
        self.is_checkmate_for(self.turn)
    }

    pub fn is_checkmate_for(&mut self, color: Color) -> ChessResult<bool> {
        Ok(self.is_check(color) && !has_any_legal_move(self, color)?)
    }

    /// Stalemate for the side to move.
    pub fn is_stalemate(&mut self) -> ChessResult<bool> {
        self.is_stalemate_for(self.turn)
    }

    pub fn is_stalemate_for(&mut self, color: Color) -> ChessResult<bool> {
        Ok(!self.is_check(color) && !has_any_legal_move(self, color)?)
    }

    /// Stalemate, insufficient material, fifty-move rule or threefold
    /// repetition.
    pub fn is_draw(&mut self) -> ChessResult<bool> {
        if self.is_insufficient_material()
            || self.is_fifty_move_rule()
            || self.is_threefold_repetition()
        {
            return Ok(true);
        }
        self.is_stalemate()
    }

    /// K v K, K v K + one minor, or K+B v K+B with bishops on same-colored
    /// squares. Everything else is treated as sufficient.
    pub fn is_insufficient_material(&self) -> bool {
        let others: Vec<Piece> = self
            .all_pieces()
            .into_iter()
            .filter(|p| p.kind != PieceKind::King)
            .collect();

        match others.as_slice() {
            [] => true,
            [single] => matches!(single.kind, PieceKind::Knight | PieceKind::Bishop),
            [a, b] => {
                a.kind == PieceKind::Bishop
                    && b.kind == PieceKind::Bishop
                    && a.color != b.color
                    && a.position.is_light_square() == b.position.is_light_square()
            }
            _ => false,
        }
    }

    /// Half-moves since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u32 {
        let moves = self.history.moves();
        let quiet = moves
            .iter()
            .rev()
            .take_while(|mv| !mv.is_pawn_move() && !mv.has_captured_piece())
            .count() as u32;
        if quiet as usize == moves.len() {
            quiet + self.history.origin().halfmove_clock
        } else {
            quiet
        }
    }

    pub fn is_fifty_move_rule(&self) -> bool {
        self.halfmove_clock() >= FIFTY_MOVE_RULE_PLIES
    }

    /// Number of completed move pairs, offset by the origin's counter.
    pub fn fullmove_number(&self) -> u32 {
        let origin = self.history.origin();
        let offset = usize::from(origin.first_turn == Color::Black);
        origin.fullmove_number + ((self.history.len() + offset) / 2) as u32
    }

    /// Zobrist key of the current position.
    #[inline]
    pub fn position_key(&self) -> u64 {
        compute_position_key(self)
    }

    /// True once the current position has occurred three times.
    pub fn is_threefold_repetition(&self) -> bool {
        let current = self.position_key();
        let origin = usize::from(self.history.origin().position_key == current);
        let repeats = self
            .history
            .moves()
            .iter()
            .filter_map(Move::undo_packet)
            .filter(|packet| packet.position_key == current)
            .count();
        origin + repeats >= REPETITION_LIMIT
    }

    /// Per-corner castling availability from king and rook `has_moved` flags.
    pub fn castling_rights(&self) -> CastlingRights {
        let corner = |color: Color, rook_file: i8| -> bool {
            let home = color.home_rank();
            let king_ready = self
                .piece_at(Position::new(KING_START_FILE, home))
                .is_some_and(|p| p.kind == PieceKind::King && p.color == color && !p.has_moved);
            let rook_ready = self
                .piece_at(Position::new(rook_file, home))
                .is_some_and(|p| p.kind == PieceKind::Rook && p.color == color && !p.has_moved);
            king_ready && rook_ready
        };

        CastlingRights {
            white_king_side: corner(Color::White, KING_SIDE_ROOK_FILE),
            white_queen_side: corner(Color::White, QUEEN_SIDE_ROOK_FILE),
            black_king_side: corner(Color::Black, KING_SIDE_ROOK_FILE),
            black_queen_side: corner(Color::Black, QUEEN_SIDE_ROOK_FILE),
        }
    }

    /// Square passed over by a two-square pawn push made on the previous
    /// move, or the imported target when no move has been made yet.
    pub fn en_passant_target(&self) -> Option<Position> {
        match self.history.last_move() {
            Some(last) if last.is_double_pawn_push() => Some(Position::new(
                last.from.file,
                (last.from.rank + last.to.rank) / 2,
            )),
            Some(_) => None,
            None => self.history.origin().en_passant,
        }
    }

    pub fn fen(&self) -> String {
        fen_generator::generate_fen(self)
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        fen_parser::parse_fen(fen)
    }

    /// Short algebraic movetext of the game so far.
    pub fn pgn_string(&self) -> String {
        pgn::movetext(self)
    }

    /// Independent clone: same placement, turn and executed moves, empty
    /// redo stack, cursor on the main line.
    pub fn copy(&self) -> Self {
        Self {
            squares: self.squares,
            turn: self.turn,
            history: self.history.copy(),
        }
    }

    /// Legal moves for the side to move.
    pub fn legal_moves(&mut self) -> ChessResult<Vec<Move>> {
        generate_legal_moves(self)
    }

    /// Legal moves of the piece on `pos`.
    pub fn valid_moves(&mut self, pos: Position) -> ChessResult<Vec<Move>> {
        legal_moves_for_piece(self, pos)
    }

    /// Whether `mv` matches one of its piece's legal moves.
    pub fn is_valid_move(&mut self, mv: &Move) -> ChessResult<bool> {
        if !self.is_occupied(mv.from) {
            return Ok(false);
        }
        Ok(legal_moves_for_piece(self, mv.from)?
            .iter()
            .any(|candidate| candidate.same_transition(mv)))
    }

    /// Commit a move to the game line: execute it, drop the redo stack,
    /// reset navigation and record the check marker.
    pub fn execute_move(&mut self, mv: Move, policy: &dyn PromotionPolicy) -> ChessResult<()> {
        let piece = *self.piece_at(mv.from).ok_or(ChessError::NoPieceAt(mv.from))?;
        if piece.color != self.turn {
            return Err(ChessError::WrongTurn(mv.from));
        }

        apply_move(self, mv, policy)?;
        self.history.clear_undone();
        self.history.reset_cursor();

        let opponent = self.turn;
        let marker = if self.is_check(opponent) {
            if has_any_legal_move(self, opponent)? {
                Some(CheckMarker::Check)
            } else {
                Some(CheckMarker::Checkmate)
            }
        } else {
            None
        };

        let last = self
            .history
            .last_move_mut()
            .ok_or(ChessError::EmptyHistory)?;
        if let Some(packet) = last.undo_packet_mut() {
            packet.check_marker = marker;
        }
        tracing::debug!(from = %last.from, to = %last.to, kind = ?last.move_type, "move executed");
        Ok(())
    }
}

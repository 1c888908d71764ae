//! Executed-move log with undo/redo and read-only branch navigation.
//!
//! The canonical board owns one `History`. Executing a move appends to it,
//! undo pops into the `undone` stack and redo re-executes from there. A new
//! move committed after undos truncates the `undone` stack.
//!
//! Navigation lets a viewer step through earlier positions without touching
//! the canonical line: the first backward step clones the canonical board
//! into `NavigationCursor::DivergedAt`, later steps mutate only that clone,
//! and returning to the live tip collapses the cursor to `OnMainLine`.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Position};
use crate::move_generation::legal_move_apply::{apply_move, revert_last_move};
use crate::moves::move_descriptions::{AutoQueen, Move};

/// State the log starts from (initial position or an imported FEN).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryOrigin {
    pub first_turn: Color,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub en_passant: Option<Position>,
    pub position_key: u64,
}

impl Default for HistoryOrigin {
    fn default() -> Self {
        Self {
            first_turn: Color::White,
            halfmove_clock: 0,
            fullmove_number: 0,
            en_passant: None,
            position_key: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NavigationCursor {
    #[default]
    OnMainLine,
    /// `board` shows the position after the first `index` moves.
    DivergedAt { index: usize, board: Box<Board> },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct History {
    moves: Vec<Move>,
    undone: Vec<Move>,
    origin: HistoryOrigin,
    cursor: NavigationCursor,
}

impl History {
    pub fn new(origin: HistoryOrigin) -> Self {
        Self {
            origin,
            ..Self::default()
        }
    }

    /// Same moves and origin, empty `undone` stack, cursor on the main line.
    pub fn copy(&self) -> Self {
        Self {
            moves: self.moves.clone(),
            undone: Vec::new(),
            origin: self.origin,
            cursor: NavigationCursor::OnMainLine,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn last_move(&self) -> Option<&Move> {
        self.moves.last()
    }

    /// Like `last_move`, for callers that require one.
    pub fn require_last_move(&self) -> ChessResult<&Move> {
        self.moves.last().ok_or(ChessError::EmptyHistory)
    }

    /// The most recent `count` moves (fewer if the log is shorter).
    pub fn last_moves(&self, count: usize) -> &[Move] {
        let start = self.moves.len().saturating_sub(count);
        &self.moves[start..]
    }

    /// Completed move pairs.
    #[inline]
    pub fn full_move_count(&self) -> usize {
        self.moves.len() / 2
    }

    #[inline]
    pub fn undone(&self) -> &[Move] {
        &self.undone
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    #[inline]
    pub fn origin(&self) -> &HistoryOrigin {
        &self.origin
    }

    #[inline]
    pub fn cursor(&self) -> &NavigationCursor {
        &self.cursor
    }

    #[inline]
    pub(crate) fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Option<Move> {
        self.moves.pop()
    }

    #[inline]
    pub(crate) fn last_move_mut(&mut self) -> Option<&mut Move> {
        self.moves.last_mut()
    }

    #[inline]
    pub(crate) fn push_undone(&mut self, mv: Move) {
        self.undone.push(mv);
    }

    #[inline]
    pub(crate) fn pop_undone(&mut self) -> Option<Move> {
        self.undone.pop()
    }

    #[inline]
    pub(crate) fn clear_undone(&mut self) {
        self.undone.clear();
    }

    #[inline]
    pub(crate) fn reset_cursor(&mut self) {
        self.cursor = NavigationCursor::OnMainLine;
    }
}

impl Board {
    /// Undo the last canonical move and keep it for redo.
    pub fn undo_last_move(&mut self) -> ChessResult<Move> {
        let mv = revert_last_move(self)?;
        self.history_mut().push_undone(mv.clone());
        self.history_mut().reset_cursor();
        tracing::debug!(from = %mv.from, to = %mv.to, "undo");
        Ok(mv)
    }

    /// Re-execute the most recently undone canonical move.
    pub fn redo_move(&mut self) -> ChessResult<()> {
        let mv = self
            .history_mut()
            .pop_undone()
            .ok_or(ChessError::NothingToRedo)?;
        tracing::debug!(from = %mv.from, to = %mv.to, "redo");
        let marker = mv.check_marker();
        // The promotion piece recorded on first execution is reused.
        apply_move(self, mv, &AutoQueen)?;
        if let Some(packet) = self
            .history_mut()
            .last_move_mut()
            .and_then(Move::undo_packet_mut)
        {
            packet.check_marker = marker;
        }
        self.history_mut().reset_cursor();
        Ok(())
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.history().is_empty()
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        self.history().can_redo()
    }

    /// Board shown by the navigation cursor: the canonical board itself or
    /// the diverged clone.
    pub fn navigated_board(&self) -> &Board {
        match self.history().cursor() {
            NavigationCursor::OnMainLine => self,
            NavigationCursor::DivergedAt { board, .. } => board,
        }
    }

    /// Number of canonical moves visible at the cursor.
    pub fn navigated_index(&self) -> usize {
        match self.history().cursor() {
            NavigationCursor::OnMainLine => self.history().len(),
            NavigationCursor::DivergedAt { index, .. } => *index,
        }
    }

    #[inline]
    pub fn is_navigated_away(&self) -> bool {
        self.navigated_index() != self.history().len()
    }

    /// Step the cursor one move back. No-op at the start of the game.
    pub fn navigate_backward(&mut self) -> ChessResult<()> {
        let cursor = std::mem::take(&mut self.history_mut().cursor);
        let mut view = match cursor {
            NavigationCursor::OnMainLine => {
                if self.history().is_empty() {
                    return Ok(());
                }
                Box::new(self.copy())
            }
            NavigationCursor::DivergedAt { board, .. } => board,
        };

        if !view.history().is_empty() {
            revert_last_move(&mut view)?;
        }
        let index = view.history().len();
        self.history_mut().cursor = NavigationCursor::DivergedAt { index, board: view };
        Ok(())
    }

    /// Step the cursor one move forward, collapsing back onto the main line
    /// when it reaches the live tip.
    pub fn navigate_forward(&mut self) -> ChessResult<()> {
        let cursor = std::mem::take(&mut self.history_mut().cursor);
        let NavigationCursor::DivergedAt { index, board: mut view } = cursor else {
            return Ok(());
        };

        let Some(next) = self.history().moves().get(index).cloned() else {
            return Ok(());
        };
        apply_move(&mut view, next, &AutoQueen)?;

        let index = index + 1;
        if index < self.history().len() {
            self.history_mut().cursor = NavigationCursor::DivergedAt { index, board: view };
        }
        Ok(())
    }

    /// Jump the cursor back to the live tip.
    pub fn navigate_to_latest(&mut self) {
        self.history_mut().reset_cursor();
    }
}

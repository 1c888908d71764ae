use std::fmt;

use crate::game_state::chess_types::Color;

/// Lifecycle of a game, from setup to its terminal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Initial,
    Running,
    Checkmate,
    Stalemate,
    FiftyMoveRuleDraw,
    ThreefoldRepetitionDraw,
    InsufficientMaterialDraw,
}

impl GameStatus {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Initial | GameStatus::Running)
    }

    #[inline]
    pub const fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate
                | GameStatus::FiftyMoveRuleDraw
                | GameStatus::ThreefoldRepetitionDraw
                | GameStatus::InsufficientMaterialDraw
        )
    }

    /// PGN result tag. On checkmate the side to move is the loser.
    pub const fn result_tag(self, side_to_move: Color) -> &'static str {
        match self {
            GameStatus::Checkmate => match side_to_move {
                Color::White => "0-1",
                Color::Black => "1-0",
            },
            GameStatus::Initial | GameStatus::Running => "*",
            _ => "1/2-1/2",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameStatus::Initial => "not started",
            GameStatus::Running => "running",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::FiftyMoveRuleDraw => "draw by the fifty-move rule",
            GameStatus::ThreefoldRepetitionDraw => "draw by threefold repetition",
            GameStatus::InsufficientMaterialDraw => "draw by insufficient material",
        };
        f.write_str(text)
    }
}

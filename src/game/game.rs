//! Game driver: owns the canonical board, validates submitted moves, tracks
//! the game status and notifies registered listeners.

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::Engine;
use crate::game::game_listener::GameListener;
use crate::game::game_status::GameStatus;
use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::moves::move_descriptions::{AutoQueen, Move, MoveType, PromotionPolicy};
use crate::utils::long_algebraic::move_to_long_algebraic;

/// Handle returned by `add_listener`, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

pub struct Game {
    board: Board,
    status: GameStatus,
    listeners: Vec<(ListenerId, Box<dyn GameListener>)>,
    next_listener: usize,
    promotion_white: Box<dyn PromotionPolicy>,
    promotion_black: Box<dyn PromotionPolicy>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Game from the standard starting position.
    pub fn new() -> Self {
        Self::from_board(Board::standard())
    }

    /// Game continuing from an arbitrary position, e.g. one built from FEN.
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            status: GameStatus::Initial,
            listeners: Vec::new(),
            next_listener: 0,
            promotion_white: Box::new(AutoQueen),
            promotion_black: Box::new(AutoQueen),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// PGN result tag for the current status.
    pub fn result_tag(&self) -> &'static str {
        self.status.result_tag(self.board.turn())
    }

    pub fn add_listener(&mut self, listener: Box<dyn GameListener>) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Policy asked when a pawn of `color` promotes without a preselected
    /// piece.
    pub fn set_promotion_policy(&mut self, color: Color, policy: Box<dyn PromotionPolicy>) {
        match color {
            Color::White => self.promotion_white = policy,
            Color::Black => self.promotion_black = policy,
        }
    }

    /// Move from `Initial` to `Running`, or straight to a terminal status
    /// when the position is already decided.
    pub fn start(&mut self) -> ChessResult<()> {
        if self.status == GameStatus::Initial {
            self.set_status(GameStatus::Running);
            self.refresh_status()?;
        }
        Ok(())
    }

    /// Validate `mv` against the legal moves of its piece and commit it.
    pub fn execute_move(&mut self, mv: Move) -> ChessResult<()> {
        self.start()?;
        if self.status.is_terminal() {
            return Err(ChessError::IllegalMove(format!("game is over ({})", self.status)));
        }

        let piece = *self.board.piece_at(mv.from).ok_or(ChessError::NoPieceAt(mv.from))?;
        if piece.color != self.board.turn() {
            return Err(ChessError::WrongTurn(mv.from));
        }

        let legal = self
            .board
            .valid_moves(mv.from)?
            .into_iter()
            .find(|candidate| candidate.same_transition(&mv))
            .ok_or_else(|| ChessError::IllegalMove(describe(&mv)))?;
        let legal = match mv.promotion_choice {
            Some(kind) if legal.move_type == MoveType::Promotion => legal.with_promotion(kind),
            _ => legal,
        };

        let policy: &dyn PromotionPolicy = match piece.color {
            Color::White => self.promotion_white.as_ref(),
            Color::Black => self.promotion_black.as_ref(),
        };
        self.board.execute_move(legal, policy)?;

        let executed = self.board.history().require_last_move()?.clone();
        for (_, listener) in &mut self.listeners {
            listener.on_move_executed(&executed, &self.board);
        }
        self.refresh_status()
    }

    /// Ask `engine` for a move and commit it. Returns the executed move.
    pub fn play_turn(&mut self, engine: &mut dyn Engine) -> ChessResult<Move> {
        self.start()?;
        if self.status.is_terminal() {
            return Err(ChessError::IllegalMove(format!("game is over ({})", self.status)));
        }
        let mv = engine.choose_move(&self.board)?;
        self.execute_move(mv)?;
        Ok(self.board.history().require_last_move()?.clone())
    }

    pub fn undo(&mut self) -> ChessResult<Move> {
        let mv = self.board.undo_last_move()?;
        self.refresh_status()?;
        Ok(mv)
    }

    pub fn redo(&mut self) -> ChessResult<()> {
        self.board.redo_move()?;
        self.refresh_status()
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        self.board.can_undo()
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        self.board.can_redo()
    }

    /// Board shown by the navigation cursor.
    #[inline]
    pub fn navigated_board(&self) -> &Board {
        self.board.navigated_board()
    }

    pub fn navigate_backward(&mut self) -> ChessResult<()> {
        self.board.navigate_backward()
    }

    pub fn navigate_forward(&mut self) -> ChessResult<()> {
        self.board.navigate_forward()
    }

    pub fn navigate_to_latest(&mut self) {
        self.board.navigate_to_latest();
    }

    /// Re-derive the status from the board once the game has started.
    fn refresh_status(&mut self) -> ChessResult<()> {
        if self.status == GameStatus::Initial {
            return Ok(());
        }
        let status = classify(&mut self.board)?;
        self.set_status(status);
        Ok(())
    }

    fn set_status(&mut self, status: GameStatus) {
        if status == self.status {
            return;
        }
        tracing::info!(from = %self.status, to = %status, "game status changed");
        self.status = status;
        for (_, listener) in &mut self.listeners {
            listener.on_game_state_changed(status);
        }
    }
}

fn classify(board: &mut Board) -> ChessResult<GameStatus> {
    let status = if board.is_checkmate()? {
        GameStatus::Checkmate
    } else if board.is_stalemate()? {
        GameStatus::Stalemate
    } else if board.is_insufficient_material() {
        GameStatus::InsufficientMaterialDraw
    } else if board.is_threefold_repetition() {
        GameStatus::ThreefoldRepetitionDraw
    } else if board.is_fifty_move_rule() {
        GameStatus::FiftyMoveRuleDraw
    } else {
        GameStatus::Running
    };
    Ok(status)
}

fn describe(mv: &Move) -> String {
    move_to_long_algebraic(mv).unwrap_or_else(|_| format!("{:?} -> {:?}", mv.from, mv.to))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::Game;
    use crate::chess_errors::ChessError;
    use crate::engines::engine_random::RandomEngine;
    use crate::game::game_listener::GameListener;
    use crate::game::game_status::GameStatus;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{Color, PieceKind, Position};
    use crate::moves::move_descriptions::Move;
    use crate::utils::long_algebraic::parse_long_algebraic;

    #[derive(Default)]
    struct Recorder {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl GameListener for Recorder {
        fn on_move_executed(&mut self, mv: &Move, _board: &Board) {
            self.events
                .lock()
                .expect("recorder lock")
                .push(format!("move {}{}", mv.from, mv.to));
        }

        fn on_game_state_changed(&mut self, status: GameStatus) {
            self.events
                .lock()
                .expect("recorder lock")
                .push(format!("status {status:?}"));
        }
    }

    fn play(game: &mut Game, moves: &[&str]) {
        for lan in moves {
            let mv = parse_long_algebraic(lan, game.board()).expect("move should parse");
            game.execute_move(mv).expect("move should be legal");
        }
    }

    #[test]
    fn fools_mate_notifies_listeners_and_ends_the_game() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut game = Game::new();
        game.add_listener(Box::new(Recorder {
            events: Arc::clone(&events),
        }));

        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert_eq!(game.status(), GameStatus::Checkmate);
        assert_eq!(game.result_tag(), "0-1");

        let log = events.lock().expect("recorder lock").clone();
        assert_eq!(log.first().map(String::as_str), Some("status Running"));
        assert_eq!(log.last().map(String::as_str), Some("status Checkmate"));
        assert_eq!(log.iter().filter(|e| e.starts_with("move")).count(), 4);

        let late = parse_long_algebraic("a2a3", game.board()).expect("parses");
        assert!(matches!(game.execute_move(late), Err(ChessError::IllegalMove(_))));
    }

    #[test]
    fn rejects_illegal_and_out_of_turn_moves() {
        let mut game = Game::new();
        let jump = parse_long_algebraic("e2e5", game.board()).expect("parses");
        assert!(matches!(game.execute_move(jump), Err(ChessError::IllegalMove(_))));

        let black = parse_long_algebraic("e7e5", game.board()).expect("parses");
        assert_eq!(game.execute_move(black), Err(ChessError::WrongTurn(Position::new(4, 6))));
        assert!(game.board().history().is_empty());
    }

    #[test]
    fn undo_after_mate_resumes_the_game() {
        let mut game = Game::new();
        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        game.undo().expect("undo succeeds");
        assert_eq!(game.status(), GameStatus::Running);
        assert!(game.can_redo());
        game.redo().expect("redo succeeds");
        assert_eq!(game.status(), GameStatus::Checkmate);
    }

    #[test]
    fn capturing_the_last_piece_is_a_draw() {
        let board = Board::from_fen("4k3/8/8/8/8/8/3q4/4K3 w - - 0 1").expect("valid FEN");
        let mut game = Game::from_board(board);
        play(&mut game, &["e1d2"]);
        assert_eq!(game.status(), GameStatus::InsufficientMaterialDraw);
        assert_eq!(game.result_tag(), "1/2-1/2");
    }

    #[test]
    fn per_color_promotion_policy() {
        let board = Board::from_fen("8/P7/4k3/8/8/8/7p/4K3 w - - 0 1").expect("valid FEN");
        let mut game = Game::from_board(board);
        game.set_promotion_policy(
            Color::Black,
            Box::new(|_color: Color, _file: i8| Some(PieceKind::Rook)),
        );
        play(&mut game, &["a7a8", "h2h1"]);
        assert_eq!(game.board().piece_at(Position::new(0, 7)).map(|p| p.kind), Some(PieceKind::Queen));
        assert_eq!(game.board().piece_at(Position::new(7, 0)).map(|p| p.kind), Some(PieceKind::Rook));
    }

    #[test]
    fn random_self_play_stays_consistent() {
        let mut game = Game::new();
        let mut white = RandomEngine::seeded(11);
        let mut black = RandomEngine::seeded(12);
        for _ in 0..60 {
            if game.status().is_terminal() {
                break;
            }
            let engine = match game.board().turn() {
                Color::White => &mut white,
                Color::Black => &mut black,
            };
            game.play_turn(engine).expect("engine move is legal");
        }
        let replayed = Board::from_fen(&game.board().fen()).expect("exported FEN parses");
        assert_eq!(replayed.fen(), game.board().fen());
    }
}

//! Random-move engine.
//!
//! Selects uniformly from legal moves and is primarily used for diagnostics,
//! integration testing, and low-strength gameplay.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::Engine;
use crate::game_state::board::Board;
use crate::moves::move_descriptions::Move;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    /// Engine seeded from the thread-local generator.
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Deterministic engine for reproducible games and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Random"
    }

    fn choose_move(&mut self, board: &Board) -> ChessResult<Move> {
        let mut work = board.copy();
        let legal_moves = work.legal_moves()?;
        tracing::trace!(legal_moves = legal_moves.len(), "random engine choosing");

        legal_moves
            .choose(&mut self.rng)
            .cloned()
            .ok_or(ChessError::NoLegalMoves)
    }
}

#[cfg(test)]
mod tests {
    use super::RandomEngine;
    use crate::chess_errors::ChessError;
    use crate::engines::engine_trait::Engine;
    use crate::game_state::board::Board;

    #[test]
    fn picks_a_legal_move() {
        let mut board = Board::standard();
        let mut engine = RandomEngine::seeded(7);
        let mv = engine.choose_move(&board).expect("start position has moves");
        assert!(board.is_valid_move(&mv).expect("validation runs"));
    }

    #[test]
    fn same_seed_same_choices() {
        let board = Board::standard();
        let mut a = RandomEngine::seeded(42);
        let mut b = RandomEngine::seeded(42);
        for _ in 0..5 {
            let left = a.choose_move(&board).expect("move");
            let right = b.choose_move(&board).expect("move");
            assert!(left.same_transition(&right));
        }
    }

    #[test]
    fn no_moves_is_reported() {
        let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("stalemate FEN");
        let mut engine = RandomEngine::seeded(1);
        assert_eq!(
            engine.choose_move(&board).map(|mv| mv.to).err(),
            Some(ChessError::NoLegalMoves)
        );
    }
}

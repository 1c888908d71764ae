//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Search stays modular by delegating static position scoring to this trait,
//! so alternate heuristics can be swapped in without touching search code.
//! Scores are from White's point of view: positive favours White.

use crate::chess_errors::ChessResult;
use crate::engines::engine_parameters::EngineParameters;
use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::search::piece_square_tables::square_bonus;

pub trait BoardScorer: Send + Sync {
    /// Static evaluation. Takes the board mutably because mate detection
    /// simulates moves; the board is left unchanged.
    fn score(&self, board: &mut Board) -> ChessResult<i32>;
}

/// Both sides hold at most `threshold` material (kings excluded).
pub fn is_endgame(board: &Board, threshold: i32) -> bool {
    board.material(Color::White) <= threshold && board.material(Color::Black) <= threshold
}

/// Plain material balance.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &mut Board) -> ChessResult<i32> {
        Ok(board.all_pieces().iter().map(|p| p.signed_value()).sum())
    }
}

/// Material plus piece-square bonuses, with fixed rewards for mating or
/// checking the opponent.
#[derive(Debug, Clone, Copy)]
pub struct PieceSquareScorer {
    pub piece_value_weight: i32,
    pub checkmate_weight: i32,
    pub check_weight: i32,
    pub endgame_max_material: i32,
}

impl Default for PieceSquareScorer {
    fn default() -> Self {
        Self::from_parameters(&EngineParameters::default())
    }
}

impl PieceSquareScorer {
    pub fn from_parameters(parameters: &EngineParameters) -> Self {
        Self {
            piece_value_weight: parameters.piece_value_weight,
            checkmate_weight: parameters.checkmate_weight,
            check_weight: parameters.check_weight,
            endgame_max_material: parameters.endgame_max_material,
        }
    }

    /// Weighted material and positional sum, no check terms.
    pub fn positional_score(&self, board: &Board) -> i32 {
        let endgame = is_endgame(board, self.endgame_max_material);
        let sum: i32 = board
            .all_pieces()
            .iter()
            .map(|p| {
                let term = p.value() + square_bonus(p.kind, p.color, p.position, endgame);
                match p.color {
                    Color::White => term,
                    Color::Black => -term,
                }
            })
            .sum();
        self.piece_value_weight * sum
    }
}

impl BoardScorer for PieceSquareScorer {
    fn score(&self, board: &mut Board) -> ChessResult<i32> {
        let mut score = self.positional_score(board);

        if board.is_checkmate_for(Color::Black)? {
            score += self.checkmate_weight;
        } else if board.is_checkmate_for(Color::White)? {
            score -= self.checkmate_weight;
        }

        if board.is_check(Color::Black) {
            score += self.check_weight;
        } else if board.is_check(Color::White) {
            score -= self.check_weight;
        }

        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::{is_endgame, BoardScorer, MaterialScorer, PieceSquareScorer};
    use crate::game_state::board::Board;

    #[test]
    fn start_position_is_balanced() {
        let mut board = Board::standard();
        assert_eq!(PieceSquareScorer::default().score(&mut board).expect("score"), 0);
        assert_eq!(MaterialScorer.score(&mut board).expect("score"), 0);
        assert!(!is_endgame(&board, 1300));
    }

    #[test]
    fn extra_queen_favours_its_owner() {
        let mut white_up = Board::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").expect("valid FEN");
        let mut black_up = Board::from_fen("3qk3/8/8/8/8/8/8/4K3 w - - 0 1").expect("valid FEN");
        let scorer = PieceSquareScorer::default();
        let white_score = scorer.score(&mut white_up).expect("score");
        let black_score = scorer.score(&mut black_up).expect("score");
        assert!(white_score > 800);
        assert_eq!(white_score, -black_score);
    }

    #[test]
    fn checkmate_dominates_material() {
        // Black is mated despite an extra queen.
        let mut board =
            Board::from_fen("R5k1/5ppp/8/7q/8/8/5PPP/6K1 b - - 0 1").expect("valid FEN");
        let scorer = PieceSquareScorer::default();
        let before = board.clone();
        let score = scorer.score(&mut board).expect("score");
        assert!(score > scorer.checkmate_weight / 2);
        assert_eq!(board, before);
    }
}

//! Depth-limited alpha-beta minimax.
//!
//! White maximizes and Black minimizes a White-relative evaluation. The
//! search runs on a private copy of the board and walks the
//! generate / apply / recurse / revert cycle depth-first on one thread.
//! A wall-clock deadline is checked at every node; once it passes, nodes
//! evaluate statically and the search unwinds with the best move so far.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::move_generation::legal_move_apply::{apply_move, revert_last_move};
use crate::moves::move_descriptions::{AutoQueen, Move};
use crate::search::board_scoring::BoardScorer;
use crate::search::move_ordering::ordered_moves;

/// Added per remaining ply when a mate is found above the horizon, so
/// shorter mates outrank longer ones.
pub const MATE_DISTANCE_BONUS: i32 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Total plies, the root move included. Zero is treated as one.
    pub depth: u8,
    pub max_time: Duration,
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
    pub elapsed: Duration,
    pub timed_out: bool,
}

struct SearchContext<'a> {
    scorer: &'a dyn BoardScorer,
    deadline: Instant,
    nodes: &'a AtomicU64,
    timed_out: bool,
}

impl SearchContext<'_> {
    fn out_of_time(&mut self) -> bool {
        if !self.timed_out && Instant::now() >= self.deadline {
            self.timed_out = true;
        }
        self.timed_out
    }
}

/// Pick the best move for the side to move on `board`.
///
/// `nodes` is incremented once per visited node and may be polled from
/// another thread. Fails with `NoLegalMoves` when the side to move has no
/// move; callers check for mate or stalemate first.
pub fn search_best_move(
    board: &Board,
    scorer: &dyn BoardScorer,
    limits: SearchLimits,
    nodes: &AtomicU64,
) -> ChessResult<SearchResult> {
    let started = Instant::now();
    let depth = limits.depth.max(1);
    let mut work = board.copy();
    let mut context = SearchContext {
        scorer,
        deadline: started + limits.max_time,
        nodes,
        timed_out: false,
    };

    let start_nodes = nodes.load(Ordering::Relaxed);
    let maximizing = work.turn() == Color::White;
    let moves = ordered_moves(&mut work)?;

    let mut alpha = i32::MIN;
    let mut beta = i32::MAX;
    let mut best: Option<(Move, i32)> = None;

    for mv in moves {
        apply_move(&mut work, mv.clone(), &AutoQueen)?;
        let value = alpha_beta(&mut work, &mut context, depth - 1, alpha, beta, !maximizing)?;
        revert_last_move(&mut work)?;

        // A subtree cut short by the deadline only scored its leaves statically.
        if context.timed_out && best.is_some() {
            break;
        }

        let improves = match &best {
            None => true,
            Some((_, current)) if maximizing => value > *current,
            Some((_, current)) => value < *current,
        };
        if improves {
            best = Some((mv, value));
        }
        if maximizing {
            alpha = alpha.max(value);
        } else {
            beta = beta.min(value);
        }
        if context.timed_out {
            break;
        }
    }

    let (best_move, score) = best.ok_or(ChessError::NoLegalMoves)?;
    let result = SearchResult {
        best_move,
        score,
        depth,
        nodes: nodes.load(Ordering::Relaxed).saturating_sub(start_nodes),
        elapsed: started.elapsed(),
        timed_out: context.timed_out,
    };
    let best = format!("{}{}", result.best_move.from, result.best_move.to);
    tracing::debug!(
        best = %best,
        score = result.score,
        depth = result.depth,
        nodes = result.nodes,
        elapsed_ms = result.elapsed.as_millis() as u64,
        timed_out = result.timed_out,
        "search finished"
    );
    Ok(result)
}

fn alpha_beta(
    board: &mut Board,
    context: &mut SearchContext<'_>,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
) -> ChessResult<i32> {
    context.nodes.fetch_add(1, Ordering::Relaxed);

    if context.out_of_time()
        || depth == 0
        || board.is_insufficient_material()
        || board.is_fifty_move_rule()
        || board.is_threefold_repetition()
    {
        return context.scorer.score(board);
    }

    let moves = ordered_moves(board)?;
    if moves.is_empty() {
        // Checkmate or stalemate.
        let score = context.scorer.score(board)?;
        let side = board.turn();
        if board.is_check(side) {
            let bonus = MATE_DISTANCE_BONUS * i32::from(depth);
            return Ok(match side {
                Color::Black => score + bonus,
                Color::White => score - bonus,
            });
        }
        return Ok(score);
    }

    if maximizing {
        let mut value = i32::MIN;
        for mv in moves {
            apply_move(board, mv, &AutoQueen)?;
            let child = alpha_beta(board, context, depth - 1, alpha, beta, false);
            revert_last_move(board)?;
            value = value.max(child?);
            alpha = alpha.max(value);
            if value >= beta {
                break;
            }
        }
        Ok(value)
    } else {
        let mut value = i32::MAX;
        for mv in moves {
            apply_move(board, mv, &AutoQueen)?;
            let child = alpha_beta(board, context, depth - 1, alpha, beta, true);
            revert_last_move(board)?;
            value = value.min(child?);
            beta = beta.min(value);
            if value <= alpha {
                break;
            }
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    use super::{search_best_move, SearchLimits};
    use crate::chess_errors::{ChessError, ChessResult};
    use crate::game_state::board::Board;
    use crate::search::board_scoring::{BoardScorer, MaterialScorer, PieceSquareScorer};
    use crate::search::move_ordering::ordered_moves;

    fn limits(depth: u8) -> SearchLimits {
        SearchLimits {
            depth,
            max_time: Duration::from_secs(60),
        }
    }

    fn best(fen: &str, depth: u8) -> String {
        let board = Board::from_fen(fen).expect("valid FEN");
        let nodes = AtomicU64::new(0);
        let result = search_best_move(&board, &PieceSquareScorer::default(), limits(depth), &nodes)
            .expect("search succeeds");
        format!("{}{}", result.best_move.from, result.best_move.to)
    }

    #[test]
    fn finds_back_rank_mate_at_any_depth() {
        let fen = "6k1/8/6K1/8/8/8/8/R7 w - - 0 1";
        assert_eq!(best(fen, 1), "a1a8");
        assert_eq!(best(fen, 2), "a1a8");
        assert_eq!(best(fen, 3), "a1a8");
    }

    #[test]
    fn black_finds_mate_too() {
        let fen = "r7/8/8/8/8/6k1/8/6K1 b - - 0 1";
        assert_eq!(best(fen, 1), "a8a1");
        assert_eq!(best(fen, 3), "a8a1");
    }

    #[test]
    fn takes_a_free_queen() {
        let fen = "4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1";
        assert_eq!(best(fen, 2), "d1d5");
    }

    #[test]
    fn search_leaves_the_input_board_untouched() {
        let board = Board::standard();
        let before = board.clone();
        let nodes = AtomicU64::new(0);
        let result = search_best_move(&board, &MaterialScorer, limits(2), &nodes).expect("search");
        assert_eq!(board, before);
        assert!(result.nodes > 20);
        assert!(!result.timed_out);
    }

    #[test]
    fn expired_deadline_still_returns_a_move() {
        let board = Board::standard();
        let nodes = AtomicU64::new(0);
        let result = search_best_move(
            &board,
            &PieceSquareScorer::default(),
            SearchLimits {
                depth: 6,
                max_time: Duration::ZERO,
            },
            &nodes,
        )
        .expect("search");
        assert!(result.timed_out);
    }

    /// Stalls on its first call, then rates every position as winning for
    /// White.
    struct StallingScorer {
        calls: AtomicUsize,
    }

    impl BoardScorer for StallingScorer {
        fn score(&self, _board: &mut Board) -> ChessResult<i32> {
            if self.calls.fetch_add(1, Ordering::Relaxed) == 0 {
                thread::sleep(Duration::from_millis(300));
                return Ok(0);
            }
            Ok(1_000_000)
        }
    }

    #[test]
    fn root_move_cut_off_by_the_deadline_is_not_chosen() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").expect("valid FEN");
        let first = ordered_moves(&mut board.copy()).expect("ordering")[0].clone();
        let scorer = StallingScorer {
            calls: AtomicUsize::new(0),
        };
        let nodes = AtomicU64::new(0);
        let result = search_best_move(
            &board,
            &scorer,
            SearchLimits {
                depth: 1,
                max_time: Duration::from_millis(100),
            },
            &nodes,
        )
        .expect("search");

        assert!(result.timed_out);
        assert_eq!(result.score, 0);
        assert!(result.best_move.same_transition(&first));
    }

    #[test]
    fn no_moves_is_an_error() {
        let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("stalemate FEN");
        let nodes = AtomicU64::new(0);
        let result = search_best_move(&board, &MaterialScorer, limits(2), &nodes);
        assert_eq!(result.map(|r| r.score).err(), Some(ChessError::NoLegalMoves));
    }
}

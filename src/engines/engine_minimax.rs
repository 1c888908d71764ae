//! Alpha-beta engine.
//!
//! Wraps `search_best_move` with depth selection (deeper once the position
//! is an endgame), a per-move deadline, an optional nodes-per-second
//! reporter thread and a helper that runs the whole search off the caller's
//! thread.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::chess_errors::ChessResult;
use crate::engines::engine_parameters::EngineParameters;
use crate::engines::engine_trait::Engine;
use crate::game_state::board::Board;
use crate::moves::move_descriptions::Move;
use crate::search::alpha_beta::{search_best_move, SearchLimits, SearchResult};
use crate::search::board_scoring::{is_endgame, BoardScorer, PieceSquareScorer};

pub struct MinimaxEngine {
    parameters: EngineParameters,
    scorer: Arc<dyn BoardScorer>,
    nodes: Arc<AtomicU64>,
    last_result: Option<SearchResult>,
}

impl MinimaxEngine {
    pub fn new(parameters: EngineParameters) -> Self {
        let scorer = Arc::new(PieceSquareScorer::from_parameters(&parameters));
        Self::with_scorer(parameters, scorer)
    }

    /// Engine evaluating with a custom scorer. The weight fields of
    /// `parameters` are then unused.
    pub fn with_scorer(parameters: EngineParameters, scorer: Arc<dyn BoardScorer>) -> Self {
        tracing::debug!(
            max_depth = parameters.max_depth,
            max_depth_endgame = parameters.max_depth_endgame,
            max_time_ms = parameters.max_time.as_millis() as u64,
            piece_value_weight = parameters.piece_value_weight,
            checkmate_weight = parameters.checkmate_weight,
            check_weight = parameters.check_weight,
            endgame_max_material = parameters.endgame_max_material,
            "minimax engine configured"
        );
        Self {
            parameters,
            scorer,
            nodes: Arc::new(AtomicU64::new(0)),
            last_result: None,
        }
    }

    #[inline]
    pub fn parameters(&self) -> &EngineParameters {
        &self.parameters
    }

    /// Search depth for `board`, in plies.
    pub fn depth_for(&self, board: &Board) -> u8 {
        search_depth(&self.parameters, board)
    }

    /// Run a blocking search on a copy of `board`.
    pub fn search(&mut self, board: &Board) -> ChessResult<SearchResult> {
        let result = run_search(&self.parameters, self.scorer.as_ref(), board, &self.nodes)?;
        self.last_result = Some(result.clone());
        Ok(result)
    }

    /// Search a copy of `board` on a worker thread so the caller's loop is
    /// not blocked. Node counts still accumulate into this engine.
    pub fn spawn_search(&self, board: &Board) -> JoinHandle<ChessResult<SearchResult>> {
        let parameters = self.parameters;
        let scorer = Arc::clone(&self.scorer);
        let nodes = Arc::clone(&self.nodes);
        let board = board.copy();
        thread::spawn(move || run_search(&parameters, scorer.as_ref(), &board, &nodes))
    }

    pub fn last_result(&self) -> Option<&SearchResult> {
        self.last_result.as_ref()
    }

    /// Nodes visited across every search this engine has run.
    pub fn total_nodes(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(EngineParameters::default())
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "Minimax"
    }

    fn new_game(&mut self) {
        self.last_result = None;
    }

    fn choose_move(&mut self, board: &Board) -> ChessResult<Move> {
        self.search(board).map(|result| result.best_move)
    }
}

fn search_depth(parameters: &EngineParameters, board: &Board) -> u8 {
    if is_endgame(board, parameters.endgame_max_material) {
        parameters.max_depth_endgame
    } else {
        parameters.max_depth
    }
}

fn run_search(
    parameters: &EngineParameters,
    scorer: &dyn BoardScorer,
    board: &Board,
    nodes: &Arc<AtomicU64>,
) -> ChessResult<SearchResult> {
    let limits = SearchLimits {
        depth: search_depth(parameters, board),
        max_time: parameters.max_time,
    };

    let reporter = parameters
        .report_interval
        .map(|interval| NpsReporter::start(Arc::clone(nodes), interval));
    let result = search_best_move(board, scorer, limits, nodes);
    if let Some(reporter) = reporter {
        reporter.stop();
    }
    result
}

/// Background thread logging search throughput until stopped.
struct NpsReporter {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl NpsReporter {
    fn start(nodes: Arc<AtomicU64>, interval: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            let started = Instant::now();
            let base = nodes.load(Ordering::Relaxed);
            loop {
                thread::park_timeout(interval);
                if stop_flag.load(Ordering::Relaxed) {
                    break;
                }
                let searched = nodes.load(Ordering::Relaxed).saturating_sub(base);
                let secs = started.elapsed().as_secs_f64();
                let nps = if secs > 0.0 { (searched as f64 / secs) as u64 } else { 0 };
                tracing::info!(nodes = searched, nps, "search progress");
            }
        });
        Self { stop, handle }
    }

    fn stop(self) {
        self.stop.store(true, Ordering::Relaxed);
        self.handle.thread().unpark();
        if self.handle.join().is_err() {
            tracing::warn!("nps reporter thread panicked");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::MinimaxEngine;
    use crate::engines::engine_parameters::EngineParameters;
    use crate::engines::engine_trait::Engine;
    use crate::game_state::board::Board;
    use crate::search::board_scoring::MaterialScorer;

    fn shallow() -> EngineParameters {
        EngineParameters {
            max_depth: 2,
            max_depth_endgame: 2,
            ..EngineParameters::default()
        }
    }

    #[test]
    fn finds_mate_in_one() {
        let board = Board::from_fen("6k1/8/6K1/8/8/8/8/R7 w - - 0 1").expect("valid FEN");
        let mut engine = MinimaxEngine::new(shallow());
        let mv = engine.choose_move(&board).expect("a move is found");
        assert_eq!(format!("{}{}", mv.from, mv.to), "a1a8");
        assert!(engine.total_nodes() > 0);
        assert!(engine.last_result().is_some());
    }

    #[test]
    fn endgame_uses_endgame_depth() {
        let engine = MinimaxEngine::new(EngineParameters {
            max_depth: 3,
            max_depth_endgame: 5,
            ..EngineParameters::default()
        });
        let endgame = Board::from_fen("6k1/8/6K1/8/8/8/8/R7 w - - 0 1").expect("valid FEN");
        assert_eq!(engine.depth_for(&endgame), 5);
        assert_eq!(engine.depth_for(&Board::standard()), 3);
    }

    #[test]
    fn worker_thread_matches_blocking_search() {
        let board = Board::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").expect("valid FEN");
        let mut engine = MinimaxEngine::new(shallow());
        let blocking = engine.search(&board).expect("blocking search");
        let threaded = engine
            .spawn_search(&board)
            .join()
            .expect("worker thread finishes")
            .expect("threaded search");
        assert!(blocking.best_move.same_transition(&threaded.best_move));
    }

    #[test]
    fn reporter_does_not_change_the_result() {
        let board = Board::standard();
        let quiet = MinimaxEngine::with_scorer(shallow(), Arc::new(MaterialScorer))
            .search(&board)
            .expect("search");
        let reported = MinimaxEngine::with_scorer(
            EngineParameters {
                report_interval: Some(Duration::from_millis(1)),
                ..shallow()
            },
            Arc::new(MaterialScorer),
        )
        .search(&board)
        .expect("search");
        assert!(quiet.best_move.same_transition(&reported.best_move));
        assert_eq!(quiet.score, reported.score);
    }
}

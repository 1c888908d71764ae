//! Perft: exhaustive leaf counting over the legal move generator.
//!
//! Promotions are generated once per promoting move (the piece is chosen at
//! execute time), so node counts diverge from reference tables in positions
//! where a promotion is reachable within the searched depth.

use std::thread;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::move_generation::legal_move_apply::{apply_move, revert_last_move};
use crate::move_generation::legal_move_generator::{generate_legal_moves, has_any_legal_move};
use crate::moves::move_descriptions::{AutoQueen, MoveType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft(board: &Board, depth: u8) -> ChessResult<PerftCounts> {
    let mut scratch = board.copy();
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return Ok(total);
    }
    perft_recurse(&mut scratch, depth, &mut total)?;
    Ok(total)
}

/// One worker thread per root move, each on its own board copy.
pub fn perft_multi_threaded(board: &Board, depth: u8) -> ChessResult<PerftCounts> {
    if depth <= 1 {
        return perft(board, depth);
    }

    let mut root = board.copy();
    let root_moves = generate_legal_moves(&mut root)?;
    let mut handles = Vec::with_capacity(root_moves.len());

    for mv in root_moves {
        let mut local_board = root.copy();
        handles.push(thread::spawn(move || -> ChessResult<PerftCounts> {
            let mut local = PerftCounts::default();
            apply_move(&mut local_board, mv, &AutoQueen)?;
            perft_recurse(&mut local_board, depth - 1, &mut local)?;
            Ok(local)
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let local = handle
            .join()
            .map_err(|_| ChessError::IllegalMove("perft worker thread panicked".to_owned()))??;
        total.merge(local);
    }
    Ok(total)
}

fn perft_recurse(board: &mut Board, depth: u8, counts: &mut PerftCounts) -> ChessResult<()> {
    let moves = generate_legal_moves(board)?;
    for mv in moves {
        apply_move(board, mv, &AutoQueen)?;
        if depth == 1 {
            count_leaf(board, counts)?;
        } else {
            perft_recurse(board, depth - 1, counts)?;
        }
        revert_last_move(board)?;
    }
    Ok(())
}

fn count_leaf(board: &mut Board, counts: &mut PerftCounts) -> ChessResult<()> {
    counts.nodes += 1;
    let Some(mv) = board.history().last_move() else {
        return Ok(());
    };
    if mv.has_captured_piece() {
        counts.captures += 1;
    }
    match mv.move_type {
        MoveType::EnPassant => counts.en_passant += 1,
        MoveType::CastlingKingSide | MoveType::CastlingQueenSide => counts.castles += 1,
        MoveType::Promotion => counts.promotions += 1,
        _ => {}
    }

    let side = board.turn();
    if board.is_check(side) {
        counts.checks += 1;
        if !has_any_legal_move(board, side)? {
            counts.checkmates += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{perft, perft_multi_threaded};
    use crate::game_state::board::Board;

    #[test]
    fn start_position_counts() {
        let board = Board::standard();
        assert_eq!(perft(&board, 1).expect("perft").nodes, 20);
        assert_eq!(perft(&board, 2).expect("perft").nodes, 400);

        let depth3 = perft(&board, 3).expect("perft");
        assert_eq!(depth3.nodes, 8902);
        assert_eq!(depth3.captures, 34);
        assert_eq!(depth3.checks, 12);
        assert_eq!(depth3.checkmates, 0);
    }

    #[test]
    fn kiwipete_counts() {
        let board = Board::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0",
        )
        .expect("valid FEN");
        let depth1 = perft(&board, 1).expect("perft");
        assert_eq!(depth1.nodes, 48);
        assert_eq!(depth1.captures, 8);
        assert_eq!(depth1.castles, 2);

        let depth2 = perft(&board, 2).expect("perft");
        assert_eq!(depth2.nodes, 2039);
        assert_eq!(depth2.captures, 351);
        assert_eq!(depth2.en_passant, 1);
        assert_eq!(depth2.castles, 91);
        assert_eq!(depth2.checks, 3);
    }

    #[test]
    fn rook_endgame_counts() {
        let board = Board::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").expect("valid FEN");
        assert_eq!(perft(&board, 1).expect("perft").nodes, 14);
        let depth2 = perft(&board, 2).expect("perft");
        assert_eq!(depth2.nodes, 191);
        assert_eq!(depth2.captures, 14);
        assert_eq!(depth2.checks, 10);
    }

    #[test]
    fn threaded_matches_single_threaded() {
        let board = Board::standard();
        assert_eq!(
            perft_multi_threaded(&board, 3).expect("perft"),
            perft(&board, 3).expect("perft")
        );
    }
}

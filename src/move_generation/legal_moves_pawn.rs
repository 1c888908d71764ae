use crate::chess_errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Direction, PieceKind, Position};
use crate::game_state::piece::Piece;
use crate::move_generation::legal_move_apply::is_check_safe;
use crate::moves::move_descriptions::{Move, MoveType};

/// Pushes, captures and en passant, with any move onto the last rank
/// re-tagged as a promotion.
pub fn pseudo_legal_pawn_moves(board: &Board, pawn: &Piece) -> Vec<Move> {
    let mut moves = Vec::new();
    let from = pawn.position;
    let push = Direction::pawn_push(pawn.color);

    let one = from.offset(push);
    if one.is_on_board() && !board.is_occupied(one) {
        moves.push(Move::new(*pawn, one, MoveType::NoHit));

        let two = one.offset(push);
        if from.rank == pawn.color.pawn_start_rank() && two.is_on_board() && !board.is_occupied(two) {
            moves.push(Move::new(*pawn, two, MoveType::NoHit));
        }
    }

    for direction in Direction::pawn_captures(pawn.color) {
        let to = from.offset(direction);
        if board.is_occupied_by(to, pawn.color.opposite()) {
            moves.push(Move::new(*pawn, to, MoveType::OnlyHit));
        }
    }

    if let Some(target) = board.en_passant_target() {
        let beside = Position::new(target.file, from.rank);
        let reachable = target.rank == from.rank + pawn.color.forward()
            && (target.file - from.file).abs() == 1;
        let victim_present = board.piece_at(beside).is_some_and(|p| {
            p.kind == PieceKind::Pawn && p.color != pawn.color
        });
        if reachable && victim_present && !board.is_occupied(target) {
            moves.push(Move::new(*pawn, target, MoveType::EnPassant));
        }
    }

    for mv in &mut moves {
        if mv.to.rank == pawn.color.promotion_rank() {
            mv.move_type = MoveType::Promotion;
        }
    }
    moves
}

pub fn legal_pawn_moves(board: &mut Board, pawn: &Piece) -> ChessResult<Vec<Move>> {
    let candidates = pseudo_legal_pawn_moves(board, pawn);
    let mut legal = Vec::with_capacity(candidates.len());
    for mv in candidates {
        if is_check_safe(board, &mv)? {
            legal.push(mv);
        }
    }
    Ok(legal)
}

#[cfg(test)]
mod tests {
    use super::legal_pawn_moves;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::Position;
    use crate::moves::move_descriptions::MoveType;

    fn moves_from(fen: &str, square: Position) -> Vec<(String, MoveType)> {
        let mut board = Board::from_fen(fen).expect("valid FEN");
        let pawn = *board.piece_at(square).expect("pawn on square");
        legal_pawn_moves(&mut board, &pawn)
            .expect("generation succeeds")
            .into_iter()
            .map(|m| (m.to.to_string(), m.move_type))
            .collect()
    }

    #[test]
    fn start_rank_pawn_pushes_once_or_twice() {
        let moves = moves_from(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0",
            Position::new(4, 1),
        );
        assert_eq!(
            moves,
            vec![("e3".to_string(), MoveType::NoHit), ("e4".to_string(), MoveType::NoHit)]
        );
    }

    #[test]
    fn blocked_pawn_cannot_jump() {
        let moves = moves_from("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", Position::new(4, 1));
        assert!(moves.is_empty());
    }

    #[test]
    fn captures_need_an_enemy() {
        let moves = moves_from("4k3/8/8/3p1P2/4P3/8/8/4K3 w - - 0 1", Position::new(4, 3));
        assert_eq!(
            moves,
            vec![("e5".to_string(), MoveType::NoHit), ("d5".to_string(), MoveType::OnlyHit)]
        );
    }

    #[test]
    fn last_rank_moves_become_promotions() {
        let moves = moves_from("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1", Position::new(0, 6));
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|(_, t)| *t == MoveType::Promotion));
    }

    #[test]
    fn en_passant_needs_the_previous_double_push() {
        let moves = moves_from("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", Position::new(4, 4));
        assert!(moves.contains(&("d6".to_string(), MoveType::EnPassant)));

        let moves = moves_from("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1", Position::new(4, 4));
        assert!(!moves.iter().any(|(_, t)| *t == MoveType::EnPassant));
    }
}

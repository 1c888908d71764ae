use crate::game_state::board::Board;
use crate::game_state::chess_rules::{
    KING_SIDE_KING_TARGET_FILE, KING_SIDE_ROOK_FILE, KING_START_FILE, QUEEN_SIDE_KING_TARGET_FILE,
    QUEEN_SIDE_ROOK_FILE,
};
use crate::game_state::chess_types::{Direction, PieceKind, Position};
use crate::game_state::piece::Piece;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::pseudo_legal_steps;
use crate::moves::move_descriptions::{Move, MoveType};

/// King steps onto unattacked squares plus any available castling move.
///
/// Attack detection lets sliders see through the king, so a step away from
/// a checking slider along its line is correctly rejected without
/// simulating the move.
pub fn legal_king_moves(board: &Board, king: &Piece) -> Vec<Move> {
    let enemy = king.color.opposite();
    let mut moves: Vec<Move> = pseudo_legal_steps(board, king, &Direction::NORMAL, 1)
        .into_iter()
        .filter(|mv| !is_square_attacked(board, mv.to, enemy))
        .collect();

    for (move_type, rook_file, target_file) in [
        (MoveType::CastlingKingSide, KING_SIDE_ROOK_FILE, KING_SIDE_KING_TARGET_FILE),
        (MoveType::CastlingQueenSide, QUEEN_SIDE_ROOK_FILE, QUEEN_SIDE_KING_TARGET_FILE),
    ] {
        if can_castle(board, king, rook_file, target_file) {
            let home = king.color.home_rank();
            moves.push(Move::new(*king, Position::new(target_file, home), move_type));
        }
    }
    moves
}

fn can_castle(board: &Board, king: &Piece, rook_file: i8, target_file: i8) -> bool {
    let home = king.color.home_rank();
    let enemy = king.color.opposite();
    if king.has_moved || king.position != Position::new(KING_START_FILE, home) {
        return false;
    }

    let rook_square = Position::new(rook_file, home);
    let rook_ready = board.piece_at(rook_square).is_some_and(|rook| {
        rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved
    });
    if !rook_ready {
        return false;
    }

    if king
        .position
        .positions_between(rook_square)
        .iter()
        .any(|&sq| board.is_occupied(sq))
    {
        return false;
    }

    // Origin, pass-through and destination must all be safe; the origin
    // check also rules out castling out of check.
    let step = (target_file - KING_START_FILE).signum();
    let mut file = KING_START_FILE;
    loop {
        if is_square_attacked(board, Position::new(file, home), enemy) {
            return false;
        }
        if file == target_file {
            return true;
        }
        file += step;
    }
}

#[cfg(test)]
mod tests {
    use super::legal_king_moves;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::Position;
    use crate::moves::move_descriptions::MoveType;

    fn castles(fen: &str) -> Vec<MoveType> {
        let board = Board::from_fen(fen).expect("valid FEN");
        let king_square = board.king_position(board.turn()).expect("king present");
        let king = *board.piece_at(king_square).expect("king on its square");
        legal_king_moves(&board, &king)
            .into_iter()
            .map(|m| m.move_type)
            .filter(|t| t.is_castling())
            .collect()
    }

    #[test]
    fn both_sides_available_on_clear_rank() {
        let found = castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert_eq!(found, vec![MoveType::CastlingKingSide, MoveType::CastlingQueenSide]);
    }

    #[test]
    fn no_castling_out_of_check() {
        assert!(castles("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").is_empty());
    }

    #[test]
    fn no_castling_through_attacked_square() {
        // Black rook on f8 covers f1.
        let found = castles("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert_eq!(found, vec![MoveType::CastlingQueenSide]);
    }

    #[test]
    fn queen_side_b_file_may_be_attacked_but_not_occupied() {
        // Black rook on b8 attacks b1, which the king never crosses.
        let found = castles("1r4k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert_eq!(found, vec![MoveType::CastlingKingSide, MoveType::CastlingQueenSide]);

        let found = castles("6k1/8/8/8/8/8/8/RN2K2R w KQ - 0 1");
        assert_eq!(found, vec![MoveType::CastlingKingSide]);
    }

    #[test]
    fn moved_rook_forfeits_its_side() {
        let found = castles("r3k2r/8/8/8/8/8/8/R3K2R w Q - 0 1");
        assert_eq!(found, vec![MoveType::CastlingQueenSide]);
    }

    #[test]
    fn king_does_not_step_into_attack() {
        let board = Board::from_fen("4k3/8/8/8/8/8/r7/4K3 w - - 0 1").expect("valid FEN");
        let king = *board.piece_at(Position::new(4, 0)).expect("king on e1");
        let targets: Vec<Position> = legal_king_moves(&board, &king).iter().map(|m| m.to).collect();
        assert_eq!(targets.len(), 2);
        assert!(targets.iter().all(|p| p.rank == 0));
    }
}

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Direction, PieceKind, Position};
use crate::game_state::piece::Piece;
use crate::move_generation::legal_move_shared::{attacked_squares, walk_rays};
use crate::moves::move_descriptions::{Move, MoveType};

/// Reverse lookup from `target`: call `found` with every piece of color `by`
/// that attacks it, stopping early once `found` returns `true`. Sliders see
/// through the defending king so a king stepping along a checking line is
/// still seen as attacked.
fn scan_attackers<F>(board: &Board, target: Position, by: Color, mut found: F) -> bool
where
    F: FnMut(&Piece) -> bool,
{
    let attacker = |pos: Position, kinds: &[PieceKind]| -> Option<Piece> {
        board
            .piece_at(pos)
            .filter(|p| p.color == by && kinds.contains(&p.kind))
            .copied()
    };

    // A pawn of `by` attacks `target` from where a defending pawn would capture.
    for direction in Direction::pawn_captures(by.opposite()) {
        if let Some(pawn) = attacker(target.offset(direction), &[PieceKind::Pawn]) {
            if found(&pawn) {
                return true;
            }
        }
    }

    for direction in Direction::KNIGHT_LEAPS {
        if let Some(knight) = attacker(target.offset(direction), &[PieceKind::Knight]) {
            if found(&knight) {
                return true;
            }
        }
    }

    for direction in Direction::NORMAL {
        if let Some(king) = attacker(target.offset(direction), &[PieceKind::King]) {
            if found(&king) {
                return true;
            }
        }
    }

    let rays: [(&[Direction], [PieceKind; 2]); 2] = [
        (Direction::ORTHOGONAL.as_slice(), [PieceKind::Rook, PieceKind::Queen]),
        (Direction::DIAGONAL.as_slice(), [PieceKind::Bishop, PieceKind::Queen]),
    ];
    let mut stopped = false;
    for (directions, kinds) in rays {
        walk_rays(board, target, directions, 7, |_, occupant| match occupant {
            None => true,
            Some(p) if p.kind == PieceKind::King && p.color != by => true,
            Some(p) => {
                if p.color == by && kinds.contains(&p.kind) && found(p) {
                    stopped = true;
                }
                false
            }
        });
        if stopped {
            return true;
        }
    }
    false
}

/// Whether any piece of color `by` attacks `target`.
pub fn is_square_attacked(board: &Board, target: Position, by: Color) -> bool {
    scan_attackers(board, target, by, |_| true)
}

/// Positions of all pieces of color `by` attacking `target`.
pub fn attackers_to_square(board: &Board, target: Position, by: Color) -> Vec<Position> {
    let mut attackers = Vec::new();
    scan_attackers(board, target, by, |p| {
        attackers.push(p.position);
        false
    });
    attackers
}

/// Attack-pattern markers of every piece of `color`: one `ThreatensKing`
/// move per attacked square, occupied or not. These are never executed.
pub fn threatened_positions(board: &Board, color: Color) -> Vec<Move> {
    board
        .pieces_of(color)
        .iter()
        .flat_map(|piece| {
            attacked_squares(board, piece)
                .into_iter()
                .map(move |to| Move::new(*piece, to, MoveType::ThreatensKing))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{attackers_to_square, is_square_attacked, threatened_positions};
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{Color, Position};
    use crate::moves::move_descriptions::MoveType;

    #[test]
    fn start_position_attacks() {
        let board = Board::standard();
        // f3 is covered by the e2/g2 pawns and the g1 knight.
        let f3 = Position::new(5, 2);
        assert!(is_square_attacked(&board, f3, Color::White));
        assert_eq!(attackers_to_square(&board, f3, Color::White).len(), 3);
        assert!(!is_square_attacked(&board, Position::new(4, 3), Color::White));
        assert!(!is_square_attacked(&board, f3, Color::Black));
    }

    #[test]
    fn king_cannot_hide_behind_itself() {
        // Rook on a1 checks the king on e1 along the rank; f1 stays attacked.
        let board = Board::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").expect("valid FEN");
        assert!(board.is_check(Color::White));
        assert!(is_square_attacked(&board, Position::new(5, 0), Color::Black));
    }

    #[test]
    fn pawn_threats_ignore_occupancy() {
        let board = Board::standard();
        let threats = threatened_positions(&board, Color::White);
        assert!(threats.iter().all(|m| m.move_type == MoveType::ThreatensKing));
        assert!(threats
            .iter()
            .any(|m| m.from == Position::new(0, 1) && m.to == Position::new(1, 2)));
    }
}

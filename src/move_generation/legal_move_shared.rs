use crate::game_state::board::Board;
use crate::game_state::chess_types::{Direction, PieceKind, Position};
use crate::game_state::piece::Piece;
use crate::moves::move_descriptions::{Move, MoveType};

/// Walk outward from `from` along each direction for at most `max_steps`
/// squares. `visit` receives each on-board square and its occupant and
/// returns whether the walk continues past that square.
pub fn walk_rays<F>(board: &Board, from: Position, directions: &[Direction], max_steps: i8, mut visit: F)
where
    F: FnMut(Position, Option<&Piece>) -> bool,
{
    for &direction in directions {
        let mut cursor = from;
        for _ in 0..max_steps {
            cursor = cursor.offset(direction);
            if !cursor.is_on_board() {
                break;
            }
            if !visit(cursor, board.piece_at(cursor)) {
                break;
            }
        }
    }
}

/// Pseudo-legal `Normal` moves along the piece's own pattern: empty
/// squares, plus the first enemy-occupied square on each ray.
pub fn pseudo_legal_steps(board: &Board, piece: &Piece, directions: &[Direction], max_steps: i8) -> Vec<Move> {
    let mut moves = Vec::new();
    walk_rays(board, piece.position, directions, max_steps, |to, occupant| match occupant {
        None => {
            moves.push(Move::new(*piece, to, MoveType::Normal));
            true
        }
        Some(other) => {
            if other.color != piece.color {
                moves.push(Move::new(*piece, to, MoveType::Normal));
            }
            false
        }
    });
    moves
}

/// Squares `piece` attacks, regardless of who stands there. Sliders stop at
/// the first occupied square except the enemy king, which they see through.
pub fn attacked_squares(board: &Board, piece: &Piece) -> Vec<Position> {
    if piece.kind == PieceKind::Pawn {
        return Direction::pawn_captures(piece.color)
            .iter()
            .map(|&d| piece.position.offset(d))
            .filter(|p| p.is_on_board())
            .collect();
    }

    let mut squares = Vec::new();
    walk_rays(
        board,
        piece.position,
        piece.kind.directions(),
        piece.kind.default_move_count(),
        |to, occupant| {
            squares.push(to);
            match occupant {
                None => true,
                Some(other) => {
                    other.kind == PieceKind::King
                        && other.color != piece.color
                }
            }
        },
    );
    squares
}

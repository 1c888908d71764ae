//! Primitive chess value types shared by every subsystem.
//!
//! Coordinates are `(file, rank)` pairs where `0..=7` lies on the board.
//! Off-board values stay representable so direction arithmetic can step past
//! an edge and be rejected afterwards with `Position::is_on_board`.

use std::fmt;

/// Side to move / piece owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of a single pawn push.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank holding this color's king and rooks in the initial setup.
    #[inline]
    pub const fn home_rank(self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    #[inline]
    pub const fn pawn_start_rank(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    #[inline]
    pub const fn promotion_rank(self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Piece kind (color is stored separately on `Piece`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Material value in centipawns. The king carries none since it is never
    /// traded.
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 300,
            PieceKind::Bishop => 300,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }

    /// Maximum number of steps along one direction. Sliders are bounded only
    /// by the board edge.
    #[inline]
    pub const fn default_move_count(self) -> i8 {
        match self {
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => 7,
            PieceKind::Pawn | PieceKind::Knight | PieceKind::King => 1,
        }
    }

    /// Step directions of the piece's movement pattern.
    ///
    /// Pawns move by color-relative rules and report no fixed set here.
    #[inline]
    pub const fn directions(self) -> &'static [Direction] {
        match self {
            PieceKind::Pawn => &[],
            PieceKind::Knight => &Direction::KNIGHT_LEAPS,
            PieceKind::Bishop => &Direction::DIAGONAL,
            PieceKind::Rook => &Direction::ORTHOGONAL,
            PieceKind::Queen | PieceKind::King => &Direction::NORMAL,
        }
    }

    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Single-letter notation glyph (upper case).
    #[inline]
    pub const fn glyph(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Inverse of `glyph`, accepting either case.
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_valid_promotion(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

/// Relative step vector: the eight one-step directions plus the eight knight
/// leaps. Names read from White's point of view (`Up` is towards rank 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
    UpUpRight,
    UpRightRight,
    DownRightRight,
    DownDownRight,
    DownDownLeft,
    DownLeftLeft,
    UpLeftLeft,
    UpUpLeft,
}

impl Direction {
    pub const NORMAL: [Direction; 8] = [
        Direction::Up,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::Left,
        Direction::UpLeft,
    ];

    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::UpRight,
        Direction::DownRight,
        Direction::DownLeft,
        Direction::UpLeft,
    ];

    pub const KNIGHT_LEAPS: [Direction; 8] = [
        Direction::UpUpRight,
        Direction::UpRightRight,
        Direction::DownRightRight,
        Direction::DownDownRight,
        Direction::DownDownLeft,
        Direction::DownLeftLeft,
        Direction::UpLeftLeft,
        Direction::UpUpLeft,
    ];

    /// `(file_delta, rank_delta)` of one step.
    #[inline]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, 1),
            Direction::UpRight => (1, 1),
            Direction::Right => (1, 0),
            Direction::DownRight => (1, -1),
            Direction::Down => (0, -1),
            Direction::DownLeft => (-1, -1),
            Direction::Left => (-1, 0),
            Direction::UpLeft => (-1, 1),
            Direction::UpUpRight => (1, 2),
            Direction::UpRightRight => (2, 1),
            Direction::DownRightRight => (2, -1),
            Direction::DownDownRight => (1, -2),
            Direction::DownDownLeft => (-1, -2),
            Direction::DownLeftLeft => (-2, -1),
            Direction::UpLeftLeft => (-2, 1),
            Direction::UpUpLeft => (-1, 2),
        }
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::UpRight | Direction::DownRight | Direction::DownLeft | Direction::UpLeft
        )
    }

    #[inline]
    pub const fn is_orthogonal(self) -> bool {
        matches!(
            self,
            Direction::Up | Direction::Right | Direction::Down | Direction::Left
        )
    }

    /// Forward push for a pawn of the given color.
    #[inline]
    pub const fn pawn_push(color: Color) -> Direction {
        match color {
            Color::White => Direction::Up,
            Color::Black => Direction::Down,
        }
    }

    /// The two forward diagonals a pawn of the given color attacks along.
    #[inline]
    pub const fn pawn_captures(color: Color) -> [Direction; 2] {
        match color {
            Color::White => [Direction::UpLeft, Direction::UpRight],
            Color::Black => [Direction::DownLeft, Direction::DownRight],
        }
    }
}

/// Board coordinate. `file` 0 is the a-file, `rank` 0 is the first rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub file: i8,
    pub rank: i8,
}

impl Position {
    #[inline]
    pub const fn new(file: i8, rank: i8) -> Self {
        Self { file, rank }
    }

    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.file >= 0 && self.file <= 7 && self.rank >= 0 && self.rank <= 7
    }

    #[inline]
    pub const fn offset(self, direction: Direction) -> Self {
        let (df, dr) = direction.delta();
        Self::new(self.file + df, self.rank + dr)
    }

    /// Chebyshev (king-move) distance.
    #[inline]
    pub fn distance_to(self, other: Position) -> i8 {
        (self.file - other.file)
            .abs()
            .max((self.rank - other.rank).abs())
    }

    /// True on light squares (h1 is light, a1 is dark).
    #[inline]
    pub const fn is_light_square(self) -> bool {
        (self.file + self.rank) % 2 == 1
    }

    /// Squares strictly between `self` and `other` along a rank, file or
    /// diagonal. Empty when the two are not aligned or are adjacent.
    pub fn positions_between(self, other: Position) -> Vec<Position> {
        let df = other.file - self.file;
        let dr = other.rank - self.rank;
        let aligned = df == 0 || dr == 0 || df.abs() == dr.abs();
        if !aligned || self == other {
            return Vec::new();
        }

        let step_f = df.signum();
        let step_r = dr.signum();
        let mut out = Vec::new();
        let mut cursor = Position::new(self.file + step_f, self.rank + step_r);
        while cursor != other {
            out.push(cursor);
            cursor = Position::new(cursor.file + step_f, cursor.rank + step_r);
        }
        out
    }

    /// Iterate all 64 on-board positions, a1..h1, a2..h8.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..8).flat_map(|rank| (0..8).map(move |file| Position::new(file, rank)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            let file = char::from(b'a' + self.file as u8);
            let rank = char::from(b'1' + self.rank as u8);
            write!(f, "{file}{rank}")
        } else {
            write!(f, "({}, {})", self.file, self.rank)
        }
    }
}

/// Per-corner castling availability, derived from king and rook move flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    /// Four-bit mask, `K=1 Q=2 k=4 q=8`.
    #[inline]
    pub const fn bits(self) -> u8 {
        (self.white_king_side as u8)
            | ((self.white_queen_side as u8) << 1)
            | ((self.black_king_side as u8) << 2)
            | ((self.black_queen_side as u8) << 3)
    }

    #[inline]
    pub const fn king_side(self, color: Color) -> bool {
        match color {
            Color::White => self.white_king_side,
            Color::Black => self.black_king_side,
        }
    }

    #[inline]
    pub const fn queen_side(self, color: Color) -> bool {
        match color {
            Color::White => self.white_queen_side,
            Color::Black => self.black_queen_side,
        }
    }
}

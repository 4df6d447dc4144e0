use std::ops::Not;

// checkers piece kind (pawn or crowned king)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Kind {
    Pawn,
    King,
}

impl Kind {
    #[inline]
    pub fn to_index(self) -> usize {
        self as usize
    }
}

// color: red (starts on row 0) or black (starts on row 7)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Row delta of a forward step for this color's pawns.
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Color::Red => 1,
            Color::Black => -1,
        }
    }

    /// The row this color's pawns start on (and defend).
    #[inline]
    pub fn home_row(self) -> u8 {
        match self {
            Color::Red => 0,
            Color::Black => 7,
        }
    }

    pub const ALL: [Color; 2] = [Color::Red, Color::Black];
}

impl Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

/// A colored piece standing on a square.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: Kind,
}

impl Piece {
    pub const RED_PAWN: Piece = Piece { color: Color::Red, kind: Kind::Pawn };
    pub const RED_KING: Piece = Piece { color: Color::Red, kind: Kind::King };
    pub const BLACK_PAWN: Piece = Piece { color: Color::Black, kind: Kind::Pawn };
    pub const BLACK_KING: Piece = Piece { color: Color::Black, kind: Kind::King };

    #[inline]
    pub fn new(color: Color, kind: Kind) -> Self {
        Piece { color, kind }
    }

    #[inline]
    pub fn is_king(self) -> bool {
        self.kind == Kind::King
    }

    pub fn to_char(self) -> char {
        match (self.color, self.kind) {
            (Color::Red, Kind::Pawn) => 'r',
            (Color::Red, Kind::King) => 'R',
            (Color::Black, Kind::Pawn) => 'b',
            (Color::Black, Kind::King) => 'B',
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'r' => Some(Piece::RED_PAWN),
            'R' => Some(Piece::RED_KING),
            'b' => Some(Piece::BLACK_PAWN),
            'B' => Some(Piece::BLACK_KING),
            _ => None,
        }
    }
}

/// Content of one board cell.
pub type Cell = Option<Piece>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_flip() {
        assert_eq!(!Color::Red, Color::Black);
        assert_eq!(!Color::Black, Color::Red);
    }

    #[test]
    fn test_forward_points_away_from_home() {
        assert_eq!(Color::Red.home_row(), 0);
        assert_eq!(Color::Red.forward(), 1);
        assert_eq!(Color::Black.home_row(), 7);
        assert_eq!(Color::Black.forward(), -1);
    }

    #[test]
    fn test_char_mapping() {
        for c in ['r', 'R', 'b', 'B'] {
            assert_eq!(Piece::from_char(c).map(Piece::to_char), Some(c));
        }
        assert_eq!(Piece::from_char('x'), None);
    }
}

// `Piece` and `Color` are `Copy`: a cell is two bytes, so evaluation can scan the board by value
// without borrowing anything from the position

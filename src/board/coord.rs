use std::fmt;

pub const BOARD_SIZE: u8 = 8;

/// a cell on the 8x8 board as (row, col), both 0..7. Row 0 is red's home row.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_SIZE && col < BOARD_SIZE);
        Coord { row, col }
    }

    #[inline]
    pub fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub fn col(self) -> u8 {
        self.col
    }

    #[inline]
    pub fn to_index(self) -> usize {
        (self.row * BOARD_SIZE + self.col) as usize
    }

    /// Dark squares: the only ones pieces ever stand on.
    #[inline]
    pub fn is_playable(self) -> bool {
        (self.row + self.col) % 2 == 0
    }

    /// Step by (d_row, d_col). Returns `None` when the target falls off the board.
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Coord> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            Some(Coord::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Euclidean distance between two cells.
    #[inline]
    pub fn distance(self, other: Coord) -> f64 {
        let dr = self.row as f64 - other.row as f64;
        let dc = self.col as f64 - other.col as f64;
        (dr * dr + dc * dc).sqrt()
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// the four diagonal directions as (d_row, d_col)
pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// all 32 playable squares, row-major from (0,0).
pub const PLAYABLE_SQUARES: [Coord; 32] = {
    let mut arr = [Coord { row: 0, col: 0 }; 32];
    let mut i = 0usize;
    let mut row = 0u8;
    while row < BOARD_SIZE {
        let mut col = row % 2;
        while col < BOARD_SIZE {
            arr[i] = Coord { row, col };
            i += 1;
            col += 2;
        }
        row += 1;
    }
    arr
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_off_board() {
        let corner = Coord::new(0, 0);
        assert_eq!(corner.offset(-1, -1), None);
        assert_eq!(corner.offset(1, -1), None);
        assert_eq!(corner.offset(1, 1), Some(Coord::new(1, 1)));
        assert_eq!(Coord::new(7, 7).offset(1, 1), None);
    }

    #[test]
    fn test_playable_squares() {
        assert_eq!(PLAYABLE_SQUARES.len(), 32);
        assert!(PLAYABLE_SQUARES.iter().all(|c| c.is_playable()));
        assert_eq!(PLAYABLE_SQUARES[0], Coord::new(0, 0));
        assert_eq!(PLAYABLE_SQUARES[4], Coord::new(1, 1));
        assert_eq!(PLAYABLE_SQUARES[31], Coord::new(7, 7));
    }

    #[test]
    fn test_distance() {
        assert_eq!(Coord::new(0, 0).distance(Coord::new(3, 4)), 5.0);
        assert_eq!(Coord::new(2, 2).distance(Coord::new(2, 2)), 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Coord::new(3, 5).to_string(), "(3,5)");
    }
}

// Coordinates are (row, col) rather than a packed index: the evaluator reasons about diagonal
// neighbors, and `offset` returning `Option` makes "off the board" an ordinary empty lookup

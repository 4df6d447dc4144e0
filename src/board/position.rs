use std::fmt;
use std::str::FromStr;

use super::coord::{Coord, BOARD_SIZE, PLAYABLE_SQUARES};
use super::moves::Move;
use super::piece::{Cell, Color, Piece};
use crate::error::ParseError;

/// A read-only snapshot of the game handed to the core by the rules engine.
///
/// Besides the occupant grid it carries the side to move, the no-capture counter used by the
/// draw rule, and the move that produced it (if the rules engine recorded one).
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    cells: [Cell; 64],
    side_to_move: Color,
    turns_since_capture: u32,
    last_move: Option<Move>,
}

impl Position {
    /// An empty board with `side_to_move` to play.
    pub fn empty(side_to_move: Color) -> Self {
        Position {
            cells: [None; 64],
            side_to_move,
            turns_since_capture: 0,
            last_move: None,
        }
    }

    /// Standard opening setup: three rows of pawns per side, red to move.
    pub fn initial() -> Self {
        let mut pos = Position::empty(Color::Red);
        for sq in PLAYABLE_SQUARES {
            if sq.row() < 3 {
                pos.set(sq, Some(Piece::RED_PAWN));
            } else if sq.row() > 4 {
                pos.set(sq, Some(Piece::BLACK_PAWN));
            }
        }
        pos
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn turns_since_capture(&self) -> u32 {
        self.turns_since_capture
    }

    #[inline]
    pub fn last_move(&self) -> Option<&Move> {
        self.last_move.as_ref()
    }

    #[inline]
    pub fn piece_on(&self, sq: Coord) -> Cell {
        self.cells[sq.to_index()]
    }

    /// Occupant of the square `(d_row, d_col)` away from `sq`; off-board counts as empty.
    #[inline]
    pub fn piece_at_offset(&self, sq: Coord, d_row: i8, d_col: i8) -> Cell {
        sq.offset(d_row, d_col).and_then(|c| self.piece_on(c))
    }

    /// True only for an on-board empty square.
    #[inline]
    pub fn is_empty_at_offset(&self, sq: Coord, d_row: i8, d_col: i8) -> bool {
        matches!(sq.offset(d_row, d_col), Some(c) if self.piece_on(c).is_none())
    }

    /// Occupied squares with their pieces, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| Coord::new(row, col)))
            .filter_map(|sq| self.piece_on(sq).map(|p| (sq, p)))
    }

    /// Squares holding a king of `color`.
    pub fn kings(&self, color: Color) -> impl Iterator<Item = Coord> + '_ {
        self.pieces()
            .filter(move |(_, p)| p.color == color && p.is_king())
            .map(|(sq, _)| sq)
    }

    // setters below are for rules engines and test fixtures building a snapshot

    pub fn set(&mut self, sq: Coord, cell: Cell) {
        self.cells[sq.to_index()] = cell;
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub fn set_turns_since_capture(&mut self, turns: u32) {
        self.turns_since_capture = turns;
    }

    pub fn set_last_move(&mut self, mv: Option<Move>) {
        self.last_move = mv;
    }

    /// Builder form of `set`.
    pub fn with(mut self, sq: Coord, piece: Piece) -> Self {
        self.set(sq, Some(piece));
        self
    }
}

impl FromStr for Position {
    type Err = ParseError;

    /// `<rows 7..0 separated by '/'> <r|b> [turns since capture]`
    fn from_str(text: &str) -> Result<Self, ParseError> {
        let parts: Vec<&str> = text.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(ParseError::FieldCount(parts.len()));
        }

        let side = match parts[1] {
            "r" => Color::Red,
            "b" => Color::Black,
            other => return Err(ParseError::SideToMove(other.to_string())),
        };
        let mut pos = Position::empty(side);

        let rows: Vec<&str> = parts[0].split('/').collect();
        if rows.len() != BOARD_SIZE as usize {
            return Err(ParseError::RowCount(rows.len()));
        }

        // first row of text is row 7
        for (i, row_text) in rows.iter().enumerate() {
            let row = BOARD_SIZE - 1 - i as u8;
            let mut col = 0u8;
            for ch in row_text.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    // a run is 1..=8 and may not carry the row past its last column
                    col = match skip {
                        1..=8 => col.checked_add(skip as u8).filter(|&c| c <= BOARD_SIZE),
                        _ => None,
                    }
                    .ok_or(ParseError::RowWidth(row))?;
                    continue;
                }
                let piece = Piece::from_char(ch).ok_or(ParseError::PieceChar(ch))?;
                if col >= BOARD_SIZE {
                    return Err(ParseError::RowWidth(row));
                }
                let sq = Coord::new(row, col);
                if !sq.is_playable() {
                    return Err(ParseError::LightSquare(sq));
                }
                pos.set(sq, Some(piece));
                col += 1;
            }
            if col != BOARD_SIZE {
                return Err(ParseError::RowWidth(row));
            }
        }

        if let Some(turns) = parts.get(2) {
            let turns = turns
                .parse::<u32>()
                .map_err(|_| ParseError::Counter(turns.to_string()))?;
            pos.set_turns_since_capture(turns);
        }

        Ok(pos)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..BOARD_SIZE).rev() {
            let mut empty_count = 0;
            for col in 0..BOARD_SIZE {
                match self.piece_on(Coord::new(row, col)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            write!(f, "{}", empty_count)?;
                            empty_count = 0;
                        }
                        write!(f, "{}", piece.to_char())?;
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                write!(f, "{}", empty_count)?;
            }
            if row > 0 {
                write!(f, "/")?;
            }
        }
        let side = match self.side_to_move {
            Color::Red => "r",
            Color::Black => "b",
        };
        write!(f, " {} {}", side, self.turns_since_capture)
    }
}


// The grid is a flat 64-cell array (row * 8 + col). Only the 32 dark squares are ever occupied,
// which `FromStr` enforces so fixtures cannot silently place pieces where no feature looks

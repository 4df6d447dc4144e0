mod coord;
mod moves;
mod piece;
mod position;
mod rules;

pub use coord::{Coord, BOARD_SIZE, DIAGONALS, PLAYABLE_SQUARES};
pub use moves::{Move, MAX_JUMPS};
pub use piece::{Cell, Color, Kind, Piece};
pub use position::Position;
pub use rules::Rules;

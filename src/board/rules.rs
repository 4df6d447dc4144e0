use super::moves::Move;
use super::position::Position;

/// The rules engine the core consumes. Move legality lives entirely behind this trait.
pub trait Rules {
    /// Legal moves for the side to move. An empty list means that side has lost.
    fn legal_moves(&self, position: &Position) -> Vec<Move>;

    /// The position after `mv`. Implementations should record `mv` as the new position's
    /// `last_move` so the endgame king heuristic can recover where a king came from.
    fn apply(&self, position: &Position, mv: &Move) -> Position;
}

impl<R: Rules + ?Sized> Rules for &R {
    fn legal_moves(&self, position: &Position) -> Vec<Move> {
        (**self).legal_moves(position)
    }

    fn apply(&self, position: &Position, mv: &Move) -> Position {
        (**self).apply(position, mv)
    }
}

#![allow(dead_code)]

use kingrow::board::{Color, Coord, Kind, Move, Piece, Position, Rules, DIAGONALS};

/// Small checkers rules engine for tests and benches: diagonal steps, mandatory captures with
/// multi-jump chains, promotion on the far row (which ends a chain).
pub struct MiniRules;

const RED_PAWN_DIRS: [(i8, i8); 2] = [(1, 1), (1, -1)];
const BLACK_PAWN_DIRS: [(i8, i8); 2] = [(-1, 1), (-1, -1)];

fn directions(piece: Piece) -> &'static [(i8, i8)] {
    match (piece.kind, piece.color) {
        (Kind::King, _) => &DIAGONALS,
        (Kind::Pawn, Color::Red) => &RED_PAWN_DIRS,
        (Kind::Pawn, Color::Black) => &BLACK_PAWN_DIRS,
    }
}

fn promotes(piece: Piece, sq: Coord) -> bool {
    piece.kind == Kind::Pawn && sq.row() == (!piece.color).home_row()
}

fn collect_jumps(
    position: &Position,
    origin: Coord,
    piece: Piece,
    at: Coord,
    landings: &mut Vec<Coord>,
    captured: &mut Vec<Coord>,
    out: &mut Vec<Move>,
) {
    let mut extended = false;
    let crowned = !landings.is_empty() && promotes(piece, at);
    if !crowned {
        for &(dr, dc) in directions(piece) {
            let (Some(over), Some(land)) = (at.offset(dr, dc), at.offset(2 * dr, 2 * dc)) else {
                continue;
            };
            let enemy = matches!(position.piece_on(over), Some(p) if p.color != piece.color);
            let free = position.piece_on(land).is_none() || land == origin;
            if enemy && free && !captured.contains(&over) {
                landings.push(land);
                captured.push(over);
                collect_jumps(position, origin, piece, land, landings, captured, out);
                landings.pop();
                captured.pop();
                extended = true;
            }
        }
    }
    if !extended && !landings.is_empty() {
        out.push(Move::jump(origin, landings, captured));
    }
}

impl Rules for MiniRules {
    fn legal_moves(&self, position: &Position) -> Vec<Move> {
        let side = position.side_to_move();
        let own: Vec<(Coord, Piece)> = position.pieces().filter(|(_, p)| p.color == side).collect();

        let mut jumps = Vec::new();
        for &(sq, piece) in &own {
            collect_jumps(position, sq, piece, sq, &mut Vec::new(), &mut Vec::new(), &mut jumps);
        }
        if !jumps.is_empty() {
            return jumps;
        }

        let mut steps = Vec::new();
        for &(sq, piece) in &own {
            for &(dr, dc) in directions(piece) {
                if let Some(to) = sq.offset(dr, dc) {
                    if position.piece_on(to).is_none() {
                        steps.push(Move::step(sq, to));
                    }
                }
            }
        }
        steps
    }

    fn apply(&self, position: &Position, mv: &Move) -> Position {
        let mut next = position.clone();
        let piece = position.piece_on(mv.origin()).expect("move from an empty square");
        next.set(mv.origin(), None);
        for &sq in mv.captured() {
            next.set(sq, None);
        }
        let dest = mv.destination();
        let landed = if promotes(piece, dest) { Piece::new(piece.color, Kind::King) } else { piece };
        next.set(dest, Some(landed));
        next.set_side_to_move(!position.side_to_move());
        next.set_turns_since_capture(if mv.is_capture() { 0 } else { position.turns_since_capture() + 1 });
        next.set_last_move(Some(mv.clone()));
        next
    }
}

pub fn pos(text: &str) -> Position {
    text.parse().expect("valid position text")
}

use crate::board::{Color, Coord, Kind, Piece, Position, Rules};
use crate::types::{Score, DEFAULT_DRAW_THRESHOLD, SCORE_DRAW, SCORE_LOSS, SCORE_WIN};
use crate::weights::{EndgamePolicy, Profile, TacticalPolicy};

/// Piece counts keyed by (color, kind).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PieceTally {
    counts: [[u32; 2]; 2],
}

impl PieceTally {
    pub fn of(position: &Position) -> Self {
        let mut tally = PieceTally::default();
        for (_, piece) in position.pieces() {
            tally.add(piece);
        }
        tally
    }

    #[inline]
    pub fn add(&mut self, piece: Piece) {
        self.counts[piece.color.to_index()][piece.kind.to_index()] += 1;
    }

    #[inline]
    pub fn get(&self, color: Color, kind: Kind) -> u32 {
        self.counts[color.to_index()][kind.to_index()]
    }

    #[inline]
    pub fn total(&self, color: Color) -> u32 {
        self.get(color, Kind::Pawn) + self.get(color, Kind::King)
    }

    /// Both sides have strictly more kings than pawns.
    pub fn mostly_kings(&self) -> bool {
        Color::ALL
            .iter()
            .all(|&c| self.get(c, Kind::Pawn) < self.get(c, Kind::King))
    }
}

/// One side's contribution to the score.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SideScore {
    pub material: f64,
    pub positional: f64,
}

impl SideScore {
    #[inline]
    pub fn total(&self) -> f64 {
        self.material + self.positional
    }
}

/// Per-side totals before they are combined into a single score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Breakdown {
    pub own: SideScore,
    pub opponent: SideScore,
    pub tally: PieceTally,
}

/// Static evaluator parameterized by a `Profile`.
#[derive(Clone, Debug)]
pub struct Evaluator {
    profile: Profile,
    draw_threshold: u32,
}

impl Evaluator {
    pub fn new(profile: Profile) -> Self {
        Self { profile, draw_threshold: DEFAULT_DRAW_THRESHOLD }
    }

    pub fn with_draw_threshold(mut self, turns: u32) -> Self {
        self.draw_threshold = turns;
        self
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn draw_threshold(&self) -> u32 {
        self.draw_threshold
    }

    /// Scores `position` from `for_color`'s point of view.
    ///
    /// `previous` is the position this agent last moved from; the endgame king term compares
    /// against it and is skipped when it is absent.
    pub fn score<R: Rules + ?Sized>(
        &self,
        rules: &R,
        position: &Position,
        for_color: Color,
        previous: Option<&Position>,
    ) -> Score {
        // side to move is stuck: it has lost
        if rules.legal_moves(position).is_empty() {
            return if position.side_to_move() != for_color { SCORE_WIN } else { SCORE_LOSS };
        }
        self.static_score(position, for_color, previous)
    }

    /// Everything `score` does except the terminal (no legal moves) check.
    pub fn static_score(&self, position: &Position, for_color: Color, previous: Option<&Position>) -> Score {
        if position.turns_since_capture() >= self.draw_threshold {
            return SCORE_DRAW;
        }

        let breakdown = self.breakdown(position, for_color, previous);

        let (own, opponent) = (breakdown.own.total(), breakdown.opponent.total());
        if own == 0.0 {
            return SCORE_LOSS;
        }
        if opponent == 0.0 {
            return SCORE_WIN;
        }
        own - opponent
    }

    /// Material and positional sums for both sides.
    pub fn breakdown(&self, position: &Position, for_color: Color, previous: Option<&Position>) -> Breakdown {
        let w = &self.profile.weights;
        let mut sides = [SideScore::default(); 2];
        let mut tally = PieceTally::default();
        let mut calm_kings: Vec<(Coord, Color)> = Vec::new();

        for (sq, piece) in position.pieces() {
            tally.add(piece);
            let (bonus, vulnerable) = self.piece_features(position, sq, piece);
            sides[piece.color.to_index()].positional += bonus;
            if piece.is_king() && !vulnerable {
                calm_kings.push((sq, piece.color));
            }
        }

        if self.profile.endgame != EndgamePolicy::Off && tally.mostly_kings() {
            if let Some(prev) = previous {
                for (sq, color) in calm_kings {
                    sides[color.to_index()].positional += self.king_mobility(position, prev, sq, color, &tally);
                }
            }
        }

        for color in Color::ALL {
            sides[color.to_index()].material = w.pawn * tally.get(color, Kind::Pawn) as f64
                + w.king * tally.get(color, Kind::King) as f64;
        }

        Breakdown {
            own: sides[for_color.to_index()],
            opponent: sides[(!for_color).to_index()],
            tally,
        }
    }

    /// Positional bonus of one piece for its own side, and whether it is capturable next turn.
    fn piece_features(&self, position: &Position, sq: Coord, piece: Piece) -> (f64, bool) {
        let w = &self.profile.weights;
        let mut bonus = 0.0;

        if self.profile.is_center(sq) {
            bonus += w.center;
        } else if piece.kind == Kind::Pawn && self.profile.is_back_line(sq, piece.color) {
            bonus += w.back_line;
        }

        let mut vulnerable = false;
        match self.profile.tactics {
            TacticalPolicy::Attacker => {
                let (hits_pawn, hits_king) = threats(position, sq, piece.color);
                if hits_pawn {
                    bonus += w.attack_pawn;
                }
                if hits_king {
                    bonus += w.attack_king;
                }
            }
            TacticalPolicy::Vulnerability => {
                vulnerable = is_vulnerable(position, sq, piece.color);
                if vulnerable {
                    bonus += w.vulnerable;
                }
            }
        }

        (bonus, vulnerable)
    }

    /// Endgame term for a king of `color` standing on `sq`.
    fn king_mobility(&self, position: &Position, previous: &Position, sq: Coord, color: Color, tally: &PieceTally) -> f64 {
        let w = &self.profile.weights;
        let from = origin_of(position, sq);

        match self.profile.endgame {
            EndgamePolicy::Off => 0.0,
            EndgamePolicy::NearestKing => {
                let before = nearest_king(previous, from, !color);
                let after = nearest_king(position, sq, !color);
                match (before, after) {
                    (Some(b), Some(a)) if a < b => w.king_push,
                    _ => 0.0,
                }
            }
            EndgamePolicy::KingMajority => {
                let before = king_distance_sum(previous, from, !color);
                let after = king_distance_sum(position, sq, !color);
                if after < before {
                    if tally.get(color, Kind::King) > tally.get(!color, Kind::King) {
                        w.king_push
                    } else {
                        w.run_away
                    }
                } else {
                    0.0
                }
            }
        }
    }
}

/// Where the piece now on `sq` stood before the move that produced `position`.
fn origin_of(position: &Position, sq: Coord) -> Coord {
    match position.last_move() {
        Some(mv) if mv.destination() == sq => mv.origin(),
        _ => sq,
    }
}

fn nearest_king(position: &Position, from: Coord, color: Color) -> Option<f64> {
    position
        .kings(color)
        .map(|k| from.distance(k))
        .min_by(|a, b| a.total_cmp(b))
}

fn king_distance_sum(position: &Position, from: Coord, color: Color) -> f64 {
    position.kings(color).map(|k| from.distance(k)).sum()
}

/// Whether a piece of `color` on `sq` can jump an enemy pawn / enemy king along its forward
/// diagonals, landing on an empty square.
fn threats(position: &Position, sq: Coord, color: Color) -> (bool, bool) {
    let f = color.forward();
    let mut hits = (false, false);
    for dc in [1, -1] {
        let Some(target) = position.piece_at_offset(sq, f, dc) else {
            continue;
        };
        if target.color == color || !position.is_empty_at_offset(sq, 2 * f, 2 * dc) {
            continue;
        }
        match target.kind {
            Kind::Pawn => hits.0 = true,
            Kind::King => hits.1 = true,
        }
    }
    hits
}

/// Whether an adjacent enemy can jump the piece of `color` on `sq` next turn.
/// Enemies in front may be any kind; from behind only a king can capture.
pub fn is_vulnerable(position: &Position, sq: Coord, color: Color) -> bool {
    let f = color.forward();
    for dc in [1, -1] {
        if let Some(front) = position.piece_at_offset(sq, f, dc) {
            if front.color != color && position.is_empty_at_offset(sq, -f, -dc) {
                return true;
            }
        }
        if let Some(rear) = position.piece_at_offset(sq, -f, dc) {
            if rear.color != color && rear.is_king() && position.is_empty_at_offset(sq, f, -dc) {
                return true;
            }
        }
    }
    false
}


// Evaluation runs in two passes: the first scans the board accumulating material and per-piece
// bonuses while collecting kings that are not under threat; the second applies the endgame king
// term, which needs the complete piece tally to decide who holds the king majority.
//
// A side whose total comes to exactly zero counts as wiped out. That covers an empty side, and
// also a side whose penalties cancel its material, such as a lone pawn about to be jumped.

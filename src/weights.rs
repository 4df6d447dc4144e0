use std::fmt;

use crate::board::{Color, Coord};
use crate::deepening::{DepthSchedule, PRESSER_SPLIT};

/// Named numeric coefficients of one evaluation personality.
///
/// Coefficients a profile does not use are left at zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureWeights {
    pub pawn: f64,
    pub king: f64,
    pub center: f64,
    pub back_line: f64,
    /// Bonus for threatening an adjacent enemy pawn.
    pub attack_pawn: f64,
    /// Bonus for threatening an adjacent enemy king.
    pub attack_king: f64,
    /// Added (negative) when a piece can be captured next turn.
    pub vulnerable: f64,
    /// Reward for a king closing in on enemy kings.
    pub king_push: f64,
    /// Added (negative) when the side with fewer kings closes in anyway.
    pub run_away: f64,
}

/// Which capture relation the per-piece tactical term looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TacticalPolicy {
    /// Reward pieces that can capture an adjacent enemy next move.
    Attacker,
    /// Penalize pieces an adjacent enemy can capture next move.
    Vulnerability,
}

/// Endgame king-mobility style. Runs only for kings that are not vulnerable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndgamePolicy {
    Off,
    /// Reward any king whose distance to the nearest enemy king shrank.
    NearestKing,
    /// Sum distances to all enemy kings; the king-majority side is rewarded for closing in,
    /// the minority side penalized for it.
    KingMajority,
}

/// A complete evaluation personality: weights, active rules, bonus squares and time split.
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    pub name: &'static str,
    pub weights: FeatureWeights,
    pub tactics: TacticalPolicy,
    pub endgame: EndgamePolicy,
    pub center: &'static [Coord],
    /// Red's back-line squares; black uses the 180 degree mirror.
    pub back_line: &'static [Coord],
    pub schedule: DepthSchedule,
}

impl Profile {
    #[inline]
    pub fn is_center(&self, sq: Coord) -> bool {
        self.center.contains(&sq)
    }

    #[inline]
    pub fn is_back_line(&self, sq: Coord, color: Color) -> bool {
        let red_view = match color {
            Color::Red => sq,
            Color::Black => mirror(sq),
        };
        self.back_line.contains(&red_view)
    }
}

#[inline]
fn mirror(sq: Coord) -> Coord {
    Coord::new(7 - sq.row(), 7 - sq.col())
}

pub const CENTER_SQUARES: [Coord; 4] = [
    Coord::new(3, 3),
    Coord::new(3, 5),
    Coord::new(4, 2),
    Coord::new(4, 4),
];

pub const BACK_LINE_FULL: [Coord; 3] = [Coord::new(0, 2), Coord::new(0, 4), Coord::new(0, 6)];
pub const BACK_LINE_FLANKS: [Coord; 2] = [Coord::new(0, 2), Coord::new(0, 6)];

pub const ATTACKER_WEIGHTS: FeatureWeights = FeatureWeights {
    pawn: 1.0,
    king: 1.5,
    center: 0.6,
    back_line: 0.7,
    attack_pawn: 0.5,
    attack_king: 1.5,
    vulnerable: 0.0,
    king_push: 0.0,
    run_away: 0.0,
};

pub const HUNTER_WEIGHTS: FeatureWeights = FeatureWeights {
    pawn: 2.0,
    king: 3.0,
    center: 0.7,
    back_line: 0.9,
    attack_pawn: 0.0,
    attack_king: 0.0,
    vulnerable: -2.0,
    king_push: 1.5,
    run_away: 0.0,
};

pub const PRESSER_WEIGHTS: FeatureWeights = FeatureWeights {
    pawn: 2.0,
    king: 3.0,
    center: 0.7,
    back_line: 0.9,
    attack_pawn: 0.0,
    attack_king: 0.0,
    vulnerable: -2.0,
    king_push: 4.0,
    run_away: -1.0,
};

/// The three shipped personalities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Material, center/back line, and capture threats.
    ///
    /// Shares the dark-square center with the other presets and rewards only the flank back-line
    /// squares, mirrored for black. It has no squares of its own: a light-square coordinate can
    /// never hold a piece and would never score.
    Attacker,
    /// Vulnerability penalty plus chasing the nearest enemy king in the endgame.
    Hunter,
    /// Vulnerability penalty plus pressing (or fleeing) by king majority in the endgame.
    Presser,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Attacker, Preset::Hunter, Preset::Presser];

    pub fn profile(self) -> Profile {
        match self {
            Preset::Attacker => Profile {
                name: "better_h",
                weights: ATTACKER_WEIGHTS,
                tactics: TacticalPolicy::Attacker,
                endgame: EndgamePolicy::Off,
                center: &CENTER_SQUARES,
                back_line: &BACK_LINE_FLANKS,
                schedule: DepthSchedule::Uniform,
            },
            Preset::Hunter => Profile {
                name: "hunter",
                weights: HUNTER_WEIGHTS,
                tactics: TacticalPolicy::Vulnerability,
                endgame: EndgamePolicy::NearestKing,
                center: &CENTER_SQUARES,
                back_line: &BACK_LINE_FULL,
                schedule: DepthSchedule::Weighted(PRESSER_SPLIT.to_vec()),
            },
            Preset::Presser => Profile {
                name: "improved_better_h",
                weights: PRESSER_WEIGHTS,
                tactics: TacticalPolicy::Vulnerability,
                endgame: EndgamePolicy::KingMajority,
                center: &CENTER_SQUARES,
                back_line: &BACK_LINE_FULL,
                schedule: DepthSchedule::Weighted(PRESSER_SPLIT.to_vec()),
            },
        }
    }

    pub fn schedule(self) -> DepthSchedule {
        self.profile().schedule
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.profile().name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bonus_squares_are_playable() {
        for preset in Preset::ALL {
            let profile = preset.profile();
            for &sq in profile.center.iter().chain(profile.back_line) {
                assert!(sq.is_playable(), "{} lists light square {}", profile.name, sq);
                assert!(mirror(sq).is_playable());
            }
        }
    }

    #[test]
    fn test_back_line_is_mirrored_for_black() {
        let profile = Preset::Presser.profile();
        assert!(profile.is_back_line(Coord::new(0, 4), Color::Red));
        assert!(!profile.is_back_line(Coord::new(0, 4), Color::Black));
        assert!(profile.is_back_line(Coord::new(7, 3), Color::Black));
        assert!(profile.is_back_line(Coord::new(7, 1), Color::Black));
        assert!(profile.is_back_line(Coord::new(7, 5), Color::Black));
        assert!(!profile.is_back_line(Coord::new(7, 3), Color::Red));
    }

    #[test]
    fn test_flanks_exclude_middle() {
        let profile = Preset::Attacker.profile();
        assert!(profile.is_back_line(Coord::new(0, 2), Color::Red));
        assert!(!profile.is_back_line(Coord::new(0, 4), Color::Red));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Preset::Attacker.to_string(), "better_h");
        assert_eq!(Preset::Presser.to_string(), "improved_better_h");
    }

    #[test]
    fn test_material_weights_positive() {
        for preset in Preset::ALL {
            let w = preset.profile().weights;
            assert!(w.pawn > 0.0 && w.king > w.pawn);
            assert!(w.vulnerable <= 0.0 && w.run_away <= 0.0);
        }
    }
}

// Every personality is data: adding one means adding a `Profile`, never a new evaluator

use std::fmt;

use arrayvec::ArrayVec;

use super::coord::Coord;

/// Longest capture chain representable in a single move.
pub const MAX_JUMPS: usize = 12;

/// A checkers move as produced by the rules engine.
///
/// The core only relies on `origin()`, `destination()` and equality; the capture list is
/// carried for rules engines that want it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Move {
    origin: Coord,
    path: ArrayVec<Coord, MAX_JUMPS>,
    captured: ArrayVec<Coord, MAX_JUMPS>,
}

impl Move {
    /// A single diagonal step with no capture.
    pub fn step(origin: Coord, dest: Coord) -> Self {
        let mut path = ArrayVec::new();
        path.push(dest);
        Move { origin, path, captured: ArrayVec::new() }
    }

    /// A capture chain. `landings` and `captured` are visited in order.
    /// Chains longer than `MAX_JUMPS` are truncated.
    pub fn jump(origin: Coord, landings: &[Coord], captured: &[Coord]) -> Self {
        Move {
            origin,
            path: landings.iter().copied().take(MAX_JUMPS).collect(),
            captured: captured.iter().copied().take(MAX_JUMPS).collect(),
        }
    }

    #[inline]
    pub fn origin(&self) -> Coord {
        self.origin
    }

    /// Final landing square. A move always has at least one landing.
    #[inline]
    pub fn destination(&self) -> Coord {
        self.path.last().copied().unwrap_or(self.origin)
    }

    #[inline]
    pub fn captured(&self) -> &[Coord] {
        &self.captured
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.origin)?;
        let sep = if self.is_capture() { 'x' } else { '-' };
        for landing in &self.path {
            write!(f, "{}{}", sep, landing)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step() {
        let mv = Move::step(Coord::new(2, 2), Coord::new(3, 3));
        assert_eq!(mv.origin(), Coord::new(2, 2));
        assert_eq!(mv.destination(), Coord::new(3, 3));
        assert!(!mv.is_capture());
        assert_eq!(mv.to_string(), "(2,2)-(3,3)");
    }

    #[test]
    fn test_double_jump() {
        let mv = Move::jump(
            Coord::new(2, 2),
            &[Coord::new(4, 4), Coord::new(6, 2)],
            &[Coord::new(3, 3), Coord::new(5, 3)],
        );
        assert_eq!(mv.destination(), Coord::new(6, 2));
        assert_eq!(mv.captured().len(), 2);
        assert_eq!(mv.to_string(), "(2,2)x(4,4)x(6,2)");
    }

    #[test]
    fn test_equality() {
        let a = Move::step(Coord::new(2, 2), Coord::new(3, 3));
        let b = Move::step(Coord::new(2, 2), Coord::new(3, 3));
        let c = Move::step(Coord::new(2, 2), Coord::new(3, 1));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}

use crate::board::{Color, Move, Position, Rules};
use crate::error::SearchFault;
use crate::types::{Score, MAX_PLY, SCORE_LOSS, SCORE_WIN};

/// Callbacks a search primitive runs with.
pub struct SearchHooks<'a> {
    /// The side the search maximizes for.
    pub color: Color,
    /// Static evaluation from `color`'s point of view.
    pub utility: &'a dyn Fn(&Position) -> Score,
    /// Polled at every node; once true the search must give up with `DeadlineExceeded`.
    pub out_of_time: &'a dyn Fn() -> bool,
    /// Leaves for which this returns true are searched one ply deeper.
    pub selective_deepening: &'a dyn Fn(&Position) -> bool,
}

/// A completed depth-bounded search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    pub score: Score,
    /// `None` only when the searched position itself has no legal moves.
    pub best_move: Option<Move>,
}

/// Depth-bounded adversarial search, consumed by the iterative deepening driver.
pub trait Search {
    fn search(
        &mut self,
        hooks: &SearchHooks<'_>,
        position: &Position,
        depth: u32,
        alpha: Score,
        beta: Score,
        maximizing: bool,
    ) -> Result<SearchOutcome, SearchFault>;
}

impl<S: Search + ?Sized> Search for &mut S {
    fn search(
        &mut self,
        hooks: &SearchHooks<'_>,
        position: &Position,
        depth: u32,
        alpha: Score,
        beta: Score,
        maximizing: bool,
    ) -> Result<SearchOutcome, SearchFault> {
        (**self).search(hooks, position, depth, alpha, beta, maximizing)
    }
}

/// Selective-deepening extensions allowed along one line.
pub const MAX_EXTENSIONS: u32 = 2;

/// Reference minimax with alpha-beta pruning over any `Rules`.
pub struct AlphaBeta<R> {
    rules: R,
    pub nodes: u64,
}

impl<R: Rules> AlphaBeta<R> {
    pub fn new(rules: R) -> Self {
        Self { rules, nodes: 0 }
    }

    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &mut self,
        hooks: &SearchHooks<'_>,
        position: &Position,
        mut depth: u32,
        ply: usize,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
        mut extensions: u32,
    ) -> Result<(Score, Option<Move>), SearchFault> {
        self.nodes += 1;
        if (hooks.out_of_time)() {
            return Err(SearchFault::DeadlineExceeded);
        }
        if ply >= MAX_PLY {
            return Err(SearchFault::ResourceExhausted);
        }

        if depth == 0 {
            if extensions > 0 && (hooks.selective_deepening)(position) {
                depth = 1;
                extensions -= 1;
            } else {
                return Ok(((hooks.utility)(position), None));
            }
        }

        let mut moves = self.rules.legal_moves(position);
        if moves.is_empty() {
            return Ok(((hooks.utility)(position), None));
        }
        // captures first: they tend to produce the cutoffs
        moves.sort_by_key(|mv| !mv.is_capture());

        let mut best_score = if maximizing { SCORE_LOSS } else { SCORE_WIN };
        let mut best_move: Option<Move> = None;

        for mv in moves {
            let child = self.rules.apply(position, &mv);
            let (score, _) =
                self.minimax(hooks, &child, depth - 1, ply + 1, alpha, beta, !maximizing, extensions)?;

            let improves = if maximizing { score > best_score } else { score < best_score };
            if improves || best_move.is_none() {
                best_score = score;
                best_move = Some(mv);
            }

            if maximizing {
                alpha = alpha.max(best_score);
            } else {
                beta = beta.min(best_score);
            }
            if alpha >= beta {
                break;
            }
        }

        Ok((best_score, best_move))
    }
}

impl<R: Rules> Search for AlphaBeta<R> {
    fn search(
        &mut self,
        hooks: &SearchHooks<'_>,
        position: &Position,
        depth: u32,
        alpha: Score,
        beta: Score,
        maximizing: bool,
    ) -> Result<SearchOutcome, SearchFault> {
        self.nodes = 0;
        let (score, best_move) =
            self.minimax(hooks, position, depth, 0, alpha, beta, maximizing, MAX_EXTENSIONS)?;
        Ok(SearchOutcome { score, best_move })
    }
}


// Minimax with an explicit `maximizing` flag rather than negamax: the utility is always scored for
// the agent's color, so a sign flip per ply would turn the win sentinel into the loss one for
// half the tree. Infinite sentinels pass through `max`/`min` untouched, and nothing here ever
// subtracts two scores, so no NaN can appear.

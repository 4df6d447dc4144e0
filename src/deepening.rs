use std::time::Duration;

use log::{debug, info};

use crate::board::{Color, Move, Position};
use crate::clock::Clock;
use crate::error::{AgentError, ConfigError, SearchFault};
use crate::search::{Search, SearchHooks};
use crate::time::Deadline;
use crate::types::{is_loss, is_win, Score, DEFAULT_MAX_DEPTH, SCORE_LOSS, SCORE_WIN};

/// Share of the move's allowance given to depths 1..=6. Deeper iterations get whatever is left.
pub const PRESSER_SPLIT: [f64; 6] = [0.05, 0.1, 0.15, 0.19, 0.25, 0.26];

/// How much of the move's time each depth may use.
#[derive(Clone, Debug, PartialEq)]
pub enum DepthSchedule {
    /// Every depth may use all the time left for the move.
    Uniform,
    /// Depth `d` gets `split[d - 1]` of the full allowance while the table lasts, then all that
    /// is left.
    Weighted(Vec<f64>),
}

impl DepthSchedule {
    /// Time slice for `depth` (1-based), never more than `remaining`.
    pub fn slice(&self, depth: u32, allowance: Duration, remaining: Duration) -> Duration {
        match self {
            DepthSchedule::Uniform => remaining,
            DepthSchedule::Weighted(split) => match depth.checked_sub(1).and_then(|i| split.get(i as usize)) {
                Some(&fraction) => allowance.mul_f64(fraction).min(remaining),
                None => remaining,
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let DepthSchedule::Weighted(split) = self {
            for (i, &fraction) in split.iter().enumerate() {
                if !(fraction > 0.0 && fraction <= 1.0) {
                    return Err(ConfigError::SplitFraction { depth: i + 1, fraction });
                }
            }
        }
        Ok(())
    }
}

/// Why deepening stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    ProvenWin,
    /// The search proved every move loses.
    ProvenLoss,
    DeadlineExceeded,
    ResourceExhausted,
    /// The driver's own clock check fired after a depth returned.
    OutOfTime,
    MaxDepth,
}

impl From<SearchFault> for StopReason {
    fn from(fault: SearchFault) -> Self {
        match fault {
            SearchFault::DeadlineExceeded => StopReason::DeadlineExceeded,
            SearchFault::ResourceExhausted => StopReason::ResourceExhausted,
        }
    }
}

/// Result of one deepening run.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchReport {
    pub best_move: Move,
    /// Score of the last completed depth; the loss sentinel if none completed.
    pub score: Score,
    /// Deepest fully completed depth, 0 if none.
    pub depth: u32,
    pub stop_reason: StopReason,
}

/// Anytime iterative deepening over a `Search` primitive.
#[derive(Clone, Debug)]
pub struct IterativeDeepening {
    schedule: DepthSchedule,
    max_depth: u32,
}

impl Default for IterativeDeepening {
    fn default() -> Self {
        Self { schedule: DepthSchedule::Uniform, max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl IterativeDeepening {
    /// Rejects a weighted table with any fraction outside (0, 1].
    pub fn new(schedule: DepthSchedule) -> Result<Self, ConfigError> {
        schedule.validate()?;
        Ok(Self { schedule, max_depth: DEFAULT_MAX_DEPTH })
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn schedule(&self) -> &DepthSchedule {
        &self.schedule
    }

    /// Deepen until the deadline, a proven result, a search fault or `max_depth`.
    ///
    /// Always returns one of `legal_moves`: the first one if no depth completes.
    #[allow(clippy::too_many_arguments)]
    pub fn choose_move<S, C>(
        &self,
        search: &mut S,
        clock: &C,
        deadline: Deadline,
        position: &Position,
        legal_moves: &[Move],
        color: Color,
        utility: &dyn Fn(&Position) -> Score,
    ) -> Result<SearchReport, AgentError>
    where
        S: Search + ?Sized,
        C: Clock + ?Sized,
    {
        let mut best_move = legal_moves.first().cloned().ok_or(AgentError::NoLegalMoves)?;
        let mut best_score = SCORE_LOSS;
        let mut completed = 0;
        let no_deepening = |_: &Position| false;

        let stop_reason = loop {
            let depth = completed + 1;
            if depth > self.max_depth {
                break StopReason::MaxDepth;
            }

            let now = clock.now();
            let slice = self.schedule.slice(depth, deadline.allowance(), deadline.remaining(now));
            let depth_deadline = Deadline::new(now, slice);
            debug!(
                "going to depth {}, remaining {:?}, slice {:?}, best score {}, best move {}",
                depth,
                deadline.remaining(now),
                slice,
                best_score,
                best_move
            );

            let out_of_time = || {
                let t = clock.now();
                deadline.expired(t) || depth_deadline.expired(t)
            };
            let hooks = SearchHooks {
                color,
                utility,
                out_of_time: &out_of_time,
                selective_deepening: &no_deepening,
            };

            let outcome = match search.search(&hooks, position, depth, SCORE_LOSS, SCORE_WIN, true) {
                Ok(outcome) => outcome,
                Err(fault) => {
                    info!("{}, achieved depth {}", fault, completed);
                    break fault.into();
                }
            };

            // a depth that finished past the deadline is not trusted
            if deadline.expired(clock.now()) {
                info!("no more time after depth {}", depth);
                break StopReason::OutOfTime;
            }

            if let Some(mv) = outcome.best_move {
                if !legal_moves.contains(&mv) {
                    return Err(AgentError::IllegalMove(mv));
                }
                best_move = mv;
            }
            best_score = outcome.score;
            completed = depth;

            if is_win(best_score) {
                info!("the move {} will guarantee victory", best_move);
                break StopReason::ProvenWin;
            }
            if is_loss(best_score) {
                info!("all is lost at depth {}", depth);
                break StopReason::ProvenLoss;
            }
        };

        Ok(SearchReport { best_move, score: best_score, depth: completed, stop_reason })
    }
}


// Each depth runs under two limits: the move's deadline and the depth's own slice. Early depths
// are cheap, so the weighted table gives them small slices and the deep iterations inherit the
// remainder.
//
// The proven-loss stop assumes the depth that produced it searched exactly. A shallow false loss
// read ends deepening early.

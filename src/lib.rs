//! Decision policy for a checkers agent: per-move time budgeting, anytime iterative deepening over
//! a pluggable alpha-beta search, and preset heuristic evaluators.

pub mod agent;
pub mod board;
pub mod clock;
pub mod deepening;
pub mod error;
pub mod evaluation;
pub mod search;
pub mod time;
pub mod types;
pub mod weights;

pub use agent::{Agent, Decision, Player, TurnState};
pub use deepening::{DepthSchedule, IterativeDeepening, SearchReport, StopReason};
pub use error::{AgentError, ConfigError, ParseError, SearchFault};
pub use evaluation::Evaluator;
pub use search::{AlphaBeta, Search, SearchHooks, SearchOutcome};
pub use time::{Deadline, RoundBudget};
pub use types::{AgentConfig, Score, SCORE_LOSS, SCORE_WIN};
pub use weights::{FeatureWeights, Preset, Profile};

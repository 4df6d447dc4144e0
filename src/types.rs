use std::time::Duration;

use crate::deepening::DepthSchedule;
use crate::error::ConfigError;
use crate::weights::Preset;

/// Evaluation score on the extended real line.
pub type Score = f64;

/// Proven win for the side being scored. Compares above every finite score and survives
/// `max`/`min` and negation unchanged.
pub const SCORE_WIN: Score = f64::INFINITY;
/// Proven loss for the side being scored.
pub const SCORE_LOSS: Score = f64::NEG_INFINITY;
pub const SCORE_DRAW: Score = 0.0;

/// Turns without a capture after which the game is a draw.
pub const DEFAULT_DRAW_THRESHOLD: u32 = 50;
pub const DEFAULT_SAFETY_MARGIN: Duration = Duration::from_millis(50);
pub const DEFAULT_TURNS_PER_ROUND: u32 = 5;
pub const DEFAULT_TIME_PER_ROUND: Duration = Duration::from_secs(10);
pub const DEFAULT_SETUP_TIME: Duration = Duration::from_secs(2);
pub const DEFAULT_MAX_DEPTH: u32 = 64;
/// Recursion cap for the reference search; deeper requests fault as resource exhaustion.
pub const MAX_PLY: usize = 128;

#[inline]
pub fn is_win(score: Score) -> bool {
    score == SCORE_WIN
}

#[inline]
pub fn is_loss(score: Score) -> bool {
    score == SCORE_LOSS
}

/// Externally supplied match parameters plus the agent's personality.
#[derive(Clone, Debug)]
pub struct AgentConfig {
    pub setup_time: Duration,
    pub time_per_k_turns: Duration,
    pub k: u32,
    pub safety_margin: Duration,
    pub preset: Preset,
    /// Overrides the preset's depth schedule when set.
    pub schedule: Option<DepthSchedule>,
    pub draw_threshold: u32,
    pub max_depth: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            setup_time: DEFAULT_SETUP_TIME,
            time_per_k_turns: DEFAULT_TIME_PER_ROUND,
            k: DEFAULT_TURNS_PER_ROUND,
            safety_margin: DEFAULT_SAFETY_MARGIN,
            preset: Preset::Presser,
            schedule: None,
            draw_threshold: DEFAULT_DRAW_THRESHOLD,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl AgentConfig {
    pub fn new(setup_time: Duration, time_per_k_turns: Duration, k: u32, preset: Preset) -> Self {
        Self {
            setup_time,
            time_per_k_turns,
            k,
            preset,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.k == 0 {
            return Err(ConfigError::ZeroTurnsPerRound);
        }
        if self.time_per_k_turns.is_zero() {
            return Err(ConfigError::NonPositiveRoundTime(self.time_per_k_turns));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroMaxDepth);
        }
        self.schedule().validate()
    }

    /// The depth schedule in force: the explicit override or the preset's own.
    pub fn schedule(&self) -> DepthSchedule {
        self.schedule.clone().unwrap_or_else(|| self.preset.schedule())
    }
}

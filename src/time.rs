use std::time::Duration;

use log::trace;

use crate::error::ConfigError;
use crate::types::AgentConfig;

/// Per-round time bookkeeping: `k` turns share one allotment, then the allotment resets.
///
/// The value is immutable; `end_turn` returns the budget for the next turn. Time remaining is
/// kept in signed seconds because an overrunning turn can push it below zero.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundBudget {
    k: u32,
    time_per_round: Duration,
    safety_margin: Duration,
    turns_remaining: u32,
    time_remaining: f64,
}

impl RoundBudget {
    pub fn new(time_per_round: Duration, k: u32, safety_margin: Duration) -> Result<Self, ConfigError> {
        if k == 0 {
            return Err(ConfigError::ZeroTurnsPerRound);
        }
        if time_per_round.is_zero() {
            return Err(ConfigError::NonPositiveRoundTime(time_per_round));
        }
        Ok(Self {
            k,
            time_per_round,
            safety_margin,
            turns_remaining: k,
            time_remaining: time_per_round.as_secs_f64(),
        })
    }

    pub fn from_config(config: &AgentConfig) -> Result<Self, ConfigError> {
        Self::new(config.time_per_k_turns, config.k, config.safety_margin)
    }

    #[inline]
    pub fn turns_remaining(&self) -> u32 {
        self.turns_remaining
    }

    /// Seconds left in the round; negative after an overrun.
    #[inline]
    pub fn time_remaining(&self) -> f64 {
        self.time_remaining
    }

    #[inline]
    pub fn turns_per_round(&self) -> u32 {
        self.k
    }

    /// This move's allowance: an even share of what is left in the round, minus the margin.
    /// Never negative.
    pub fn start_turn(&self) -> Duration {
        let share = self.time_remaining / self.turns_remaining as f64 - self.safety_margin.as_secs_f64();
        Duration::try_from_secs_f64(share.max(0.0)).unwrap_or(Duration::ZERO)
    }

    /// Budget for the next turn after spending `elapsed` on this one.
    pub fn end_turn(&self, elapsed: Duration) -> RoundBudget {
        let mut next = self.clone();
        if self.turns_remaining == 1 {
            // fresh round; last round's surplus or deficit is dropped
            next.turns_remaining = self.k;
            next.time_remaining = self.time_per_round.as_secs_f64();
        } else {
            next.turns_remaining -= 1;
            next.time_remaining -= elapsed.as_secs_f64();
        }
        trace!(
            "budget: {} turns, {:.3}s left in round (spent {:.3}s)",
            next.turns_remaining,
            next.time_remaining,
            elapsed.as_secs_f64()
        );
        next
    }
}

/// A per-move time limit anchored at the clock reading when the move started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deadline {
    start: Duration,
    allowance: Duration,
}

impl Deadline {
    pub fn new(start: Duration, allowance: Duration) -> Self {
        Self { start, allowance }
    }

    #[inline]
    pub fn start(&self) -> Duration {
        self.start
    }

    #[inline]
    pub fn allowance(&self) -> Duration {
        self.allowance
    }

    #[inline]
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.start)
    }

    #[inline]
    pub fn remaining(&self, now: Duration) -> Duration {
        self.allowance.saturating_sub(self.elapsed(now))
    }

    #[inline]
    pub fn expired(&self, now: Duration) -> bool {
        self.elapsed(now) >= self.allowance
    }
}


// Allocation: remaining / turns_left - margin. Simple, and it spreads time evenly when the cost
// of a move is unknown up front. Spending less early on does roll forward to later turns of the
// same round, but never across a round boundary.

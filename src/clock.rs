use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Single time source shared by the budget and the deadline checks.
pub trait Clock {
    /// Time since an arbitrary fixed origin. Must never go backwards.
    fn now(&self) -> Duration;
}

/// Wall-clock monotonic time via `Instant`.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock for deterministic tests and replays. Clones share one reading.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    reading: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.reading.set(self.reading.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.reading.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.reading.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

use std::cell::Cell;
use std::time::Instant;

/// Source of wall-clock time for the scheduler.
pub trait Clock {
    fn current_microseconds(&self) -> f64;
}

/// Monotonic host clock, counting from its own creation.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn current_microseconds(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1_000_000.0
    }
}

/// Clock that only moves when told to. Handy for deterministic tests and
/// for hosts that fast-forward emulation.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_us: f64) -> Self {
        Self {
            now: Cell::new(start_us),
        }
    }

    pub fn set(&self, us: f64) {
        self.now.set(us);
    }

    pub fn advance(&self, us: f64) {
        self.now.set(self.now.get() + us);
    }
}

impl Clock for ManualClock {
    fn current_microseconds(&self) -> f64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn current_microseconds(&self) -> f64 {
        (**self).current_microseconds()
    }
}

//! Simulation clock seam.
//!
//! The controller never reads a process-wide clock. It is handed a [`SimClock`]
//! at construction, so tests and the scheduler decide what "now" is.

use std::sync::atomic::{AtomicU64, Ordering};

/// Absolute simulated time in nanoseconds.
pub type SimTime = u64;

/// Monotonic simulated time source.
pub trait SimClock: Send + Sync {
    /// Returns the current simulated time.
    fn now(&self) -> SimTime;
}

/// Clock advanced explicitly by its owner.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Creates a clock at time zero.
    pub const fn new() -> Self {
        Self {
            now: AtomicU64::new(0),
        }
    }

    /// Jumps to an absolute time.
    pub fn set(&self, now: SimTime) {
        self.now.store(now, Ordering::Relaxed);
    }

    /// Moves time forward by `delta` and returns the new time.
    pub fn advance(&self, delta: SimTime) -> SimTime {
        self.now.fetch_add(delta, Ordering::Relaxed) + delta
    }
}

impl SimClock for ManualClock {
    fn now(&self) -> SimTime {
        self.now.load(Ordering::Relaxed)
    }
}

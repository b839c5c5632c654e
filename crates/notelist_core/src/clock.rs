//! Time sources for note lifecycle stamps.
//!
//! # Responsibility
//! - Provide the only way core code reads "now".
//! - Allow tests and scripted runs to control timestamps exactly.
//!
//! # Invariants
//! - Timestamps are Unix epoch milliseconds (`i64`).
//! - `SystemClock` never panics, even if the wall clock is before the epoch.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current time in epoch milliseconds.
pub trait Clock {
    fn now_epoch_ms(&self) -> i64;
}

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Plain functions and closures returning epoch milliseconds are clocks.
impl<F> Clock for F
where
    F: Fn() -> i64,
{
    fn now_epoch_ms(&self) -> i64 {
        self()
    }
}

/// Manually driven clock.
///
/// Clones share the same underlying time, so a test can hand one clone to a
/// collection and keep another to move time forward.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    /// Creates a clock frozen at `start_epoch_ms`.
    pub fn new(start_epoch_ms: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_epoch_ms)),
        }
    }

    /// Jumps to an absolute time. Going backwards is allowed.
    pub fn set(&self, epoch_ms: i64) {
        self.now.set(epoch_ms);
    }

    /// Moves time forward by `delta_ms` and returns the new time.
    pub fn advance(&self, delta_ms: i64) -> i64 {
        let next = self.now.get().saturating_add(delta_ms);
        self.now.set(next);
        next
    }
}

impl Clock for ManualClock {
    fn now_epoch_ms(&self) -> i64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, ManualClock, SystemClock};

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(1_000);
        let handle = clock.clone();

        assert_eq!(handle.advance(250), 1_250);
        assert_eq!(clock.now_epoch_ms(), 1_250);

        handle.set(10);
        assert_eq!(clock.now_epoch_ms(), 10);
    }

    #[test]
    fn closures_act_as_clocks() {
        let fixed = || 1_700_000_000_000_i64;
        assert_eq!(fixed.now_epoch_ms(), 1_700_000_000_000);
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_epoch_ms() > 1_577_836_800_000);
    }
}

//! Shared run state between the motion event handler and the display loop.
//!
//! The cell is a mutex-free single-producer/single-consumer holder: the
//! motion event handler (interrupt context) is the sole writer of the start
//! and end effects, and the display loop is the sole reader and clearer. All
//! fields are lock-free atomics from `portable-atomic`, which lowers to
//! plain critical sections on cores without native atomics.
//!
//! Known non-atomic update: a swing-start arriving before the previous run
//! has been cleared simply overwrites the interval (last writer wins). Two
//! starts without an intervening end of run are physically impossible under
//! normal swing motion, so no queueing is attempted.

use portable_atomic::{AtomicBool, AtomicU32, Ordering};

use crate::timing::Ticks;

/// Run state shared between interrupt and main contexts.
///
/// Lifecycle: idle at power-on; a swing-start arms it, the display loop runs
/// the sequence and calls [`RunTrigger::finish_run`], returning it to idle.
#[derive(Debug, Default)]
pub struct RunTrigger {
    running: AtomicBool,
    abort: AtomicBool,
    interval: AtomicU32,
}

impl RunTrigger {
    /// Creates an idle trigger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
            abort: AtomicBool::new(false),
            interval: AtomicU32::new(0),
        }
    }

    /// Writer side: arms a run with the computed per-column interval.
    ///
    /// Clears any abort request left by an end event that arrived while
    /// idle; the reversal that closes one swing always precedes the start of
    /// the next, so a stale request must not carry into the new run.
    /// Overwrites any interval a still-active run is holding; see the module
    /// docs for why that race is accepted.
    pub fn start(&self, interval: Ticks) {
        self.abort.store(false, Ordering::Relaxed);
        self.interval.store(interval, Ordering::Relaxed);
        self.running.store(true, Ordering::Release);
    }

    /// Writer side: forces the per-column interval to zero and requests an
    /// early finish of any in-progress run.
    pub fn end(&self) {
        self.interval.store(0, Ordering::Relaxed);
        self.abort.store(true, Ordering::Release);
    }

    /// Reader side: `true` when a run is armed or in progress.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Reader side: current per-column interval.
    ///
    /// Re-read at every column step so an end event lands on the run already
    /// in progress.
    #[must_use]
    pub fn interval(&self) -> Ticks {
        self.interval.load(Ordering::Acquire)
    }

    /// Reader side: `true` when an end event has requested early completion.
    #[must_use]
    pub fn abort_requested(&self) -> bool {
        self.abort.load(Ordering::Acquire)
    }

    /// Reader side: returns the run state to idle after a completed or
    /// aborted run.
    pub fn finish_run(&self) {
        self.abort.store(false, Ordering::Relaxed);
        self.interval.store(0, Ordering::Relaxed);
        self.running.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_at_construction() {
        let trigger = RunTrigger::new();
        assert!(!trigger.is_triggered());
        assert!(!trigger.abort_requested());
        assert_eq!(trigger.interval(), 0);
    }

    #[test]
    fn start_arms_run_with_interval() {
        let trigger = RunTrigger::new();
        trigger.start(200);
        assert!(trigger.is_triggered());
        assert_eq!(trigger.interval(), 200);
        assert!(!trigger.abort_requested());
    }

    #[test]
    fn end_zeroes_interval_and_requests_abort() {
        let trigger = RunTrigger::new();
        trigger.start(200);
        trigger.end();
        assert!(trigger.abort_requested());
        assert_eq!(trigger.interval(), 0);
        // An end never clears the running flag; only the display loop does.
        assert!(trigger.is_triggered());
    }

    #[test]
    fn finish_run_returns_to_idle() {
        let trigger = RunTrigger::new();
        trigger.start(150);
        trigger.end();
        trigger.finish_run();
        assert!(!trigger.is_triggered());
        assert!(!trigger.abort_requested());
        assert_eq!(trigger.interval(), 0);
    }

    #[test]
    fn start_clears_abort_left_by_an_idle_end() {
        let trigger = RunTrigger::new();
        // Reversal lands while no run is in progress.
        trigger.end();
        assert!(trigger.abort_requested());

        trigger.start(200);
        assert!(trigger.is_triggered());
        assert_eq!(trigger.interval(), 200);
        assert!(!trigger.abort_requested());
    }

    #[test]
    fn late_start_overwrites_interval() {
        let trigger = RunTrigger::new();
        trigger.start(200);
        trigger.start(120);
        assert_eq!(trigger.interval(), 120);
        assert!(trigger.is_triggered());
    }
}

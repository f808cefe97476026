//! Timing engine abstractions shared by firmware and host targets.
//!
//! Swing measurement and column pacing both run off one free-running tick
//! counter in the reference design. The traits here decouple the tick
//! semantics from any particular clock source so the detector and driver can
//! be exercised deterministically on the host while the firmware binds them
//! to a hardware monotonic timer.

/// Engine tick count. The binding crate decides how long one tick is; the
/// core only ever works with relative durations between events.
pub type Ticks = u32;

/// Settling pause after sensor power-up before motion events may be enabled.
pub const SENSOR_SETTLE_MILLIS: u32 = 1_000;

/// Free-running counter used to measure the duration between motion events.
///
/// `restart` must behave as stop-then-zero-then-restart, atomic with respect
/// to the event handler that owns the clock: a read racing a restart must
/// never observe a partially reset count.
pub trait SwingClock {
    /// Zeroes the counter and starts it running again.
    fn restart(&mut self);

    /// Reads the ticks elapsed since the last restart.
    fn elapsed(&mut self) -> Ticks;

    /// Reads the elapsed count and restarts the counter in one step.
    ///
    /// Called on every motion transition, accepted or rejected, so that
    /// consecutive noise transitions never accumulate stale durations.
    fn split_elapsed(&mut self) -> Ticks {
        let elapsed = self.elapsed();
        self.restart();
        elapsed
    }
}

/// Deterministic clock advanced by hand, for tests and the emulator.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Ticks,
}

impl ManualClock {
    /// Creates a clock with zero elapsed ticks.
    #[must_use]
    pub const fn new() -> Self {
        Self { now: 0 }
    }

    /// Advances the clock by the given number of ticks.
    pub fn advance(&mut self, ticks: Ticks) {
        self.now = self.now.saturating_add(ticks);
    }
}

impl SwingClock for ManualClock {
    fn restart(&mut self) {
        self.now = 0;
    }

    fn elapsed(&mut self) -> Ticks {
        self.now
    }
}

/// Blocking wait primitive the sequence driver composes into column holds.
///
/// The driver only ever waits one tick at a time and re-checks the shared run
/// state between units, which is what gives the abort mechanism its
/// observe-after-unit granularity.
pub trait ColumnPacer {
    /// Blocks for exactly one engine tick.
    fn wait_unit(&mut self);
}

/// Pacer that accumulates the number of ticks waited instead of sleeping.
#[derive(Debug, Default)]
pub struct CountingPacer {
    waited: u64,
}

impl CountingPacer {
    /// Creates a pacer with no ticks recorded.
    #[must_use]
    pub const fn new() -> Self {
        Self { waited: 0 }
    }

    /// Total ticks waited since construction or the last reset.
    #[must_use]
    pub const fn total_waited(&self) -> u64 {
        self.waited
    }

    /// Clears the accumulated tick count.
    pub fn reset(&mut self) {
        self.waited = 0;
    }
}

impl ColumnPacer for CountingPacer {
    fn wait_unit(&mut self) {
        self.waited += 1;
    }
}

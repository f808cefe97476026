//! Motion event detector: classifies comparator transitions into swing
//! events.
//!
//! The wand's accelerometer output is squared up by a comparator against a
//! fixed reference voltage, so the core only ever sees a binary direction
//! signal. Every polarity transition lands here together with the ticks
//! elapsed since the previous transition, and elapsed-time debouncing decides
//! whether it is a swing start, a swing end, or noise.
//!
//! Defined behavior, preserved from the reference design: the caller restarts
//! the swing clock on **every** transition, accepted or rejected, so
//! consecutive noise transitions never accumulate stale durations.
//! Classification always consumes the pre-restart elapsed value.

use crate::timing::Ticks;
use crate::trigger::RunTrigger;

/// Minimum ticks between a rightward stroke and the leftward stroke that
/// starts a new sequence. Short, because a start can follow a brief idle.
pub const START_DEBOUNCE_TICKS: Ticks = 1_500;

/// Minimum ticks a full swing takes; anything faster on a rightward
/// transition is noise.
pub const END_DEBOUNCE_TICKS: Ticks = 14_000;

/// Numerator and denominator of the display-fraction calibration constant:
/// the per-column interval is `elapsed / (2.4 × column count)`, rendered in
/// integer arithmetic as `elapsed × 10 / (24 × column count)`.
const DISPLAY_FRACTION_NUM: u64 = 10;
const DISPLAY_FRACTION_DEN: u64 = 24;

/// Direction of acceleration derived from the comparator output.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SwingDirection {
    /// Input below the reference voltage: the board accelerates leftward,
    /// beginning a new stroke.
    Left,
    /// Input above the reference voltage: the board reverses rightward,
    /// ending the stroke.
    Right,
}

/// Classification of one polarity transition. Transient; never retained.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SwingEvent {
    /// Legitimate swing start carrying the computed per-column interval.
    Start { interval: Ticks },
    /// Legitimate swing end: any in-progress run must finish early.
    End,
    /// Transition below the debounce threshold; no state changes.
    Noise,
}

/// Elapsed-time debouncer for the binary motion signal.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SwingDetector {
    start_debounce: Ticks,
    end_debounce: Ticks,
}

impl SwingDetector {
    /// Creates a detector with explicit debounce thresholds.
    #[must_use]
    pub const fn with_thresholds(start_debounce: Ticks, end_debounce: Ticks) -> Self {
        Self {
            start_debounce,
            end_debounce,
        }
    }

    /// Detector tuned with the reference-design thresholds.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_thresholds(START_DEBOUNCE_TICKS, END_DEBOUNCE_TICKS)
    }

    /// Classifies a single polarity transition.
    ///
    /// `elapsed` is the tick count accumulated since the previous transition
    /// (read before the clock restart); `column_count` is the length of the
    /// currently encoded sequence.
    #[must_use]
    pub fn classify(
        &self,
        direction: SwingDirection,
        elapsed: Ticks,
        column_count: usize,
    ) -> SwingEvent {
        match direction {
            SwingDirection::Right if elapsed >= self.end_debounce => SwingEvent::End,
            SwingDirection::Left if elapsed >= self.start_debounce => SwingEvent::Start {
                interval: column_interval(elapsed, column_count),
            },
            SwingDirection::Left | SwingDirection::Right => SwingEvent::Noise,
        }
    }

    /// Classifies a transition and applies the accepted event to the shared
    /// run state. Noise leaves the trigger untouched.
    ///
    /// Returns the classification so callers can record telemetry.
    pub fn observe(
        &self,
        direction: SwingDirection,
        elapsed: Ticks,
        column_count: usize,
        trigger: &RunTrigger,
    ) -> SwingEvent {
        let event = self.classify(direction, elapsed, column_count);
        match event {
            SwingEvent::Start { interval } => trigger.start(interval),
            SwingEvent::End => trigger.end(),
            SwingEvent::Noise => {}
        }
        event
    }
}

impl Default for SwingDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-column display interval for a measured swing duration.
///
/// A zero column count or a quotient that rounds to zero yields interval 0,
/// which the sequence driver treats as display-nothing-advance-immediately.
#[must_use]
pub fn column_interval(elapsed: Ticks, column_count: usize) -> Ticks {
    if column_count == 0 {
        return 0;
    }
    let scaled = u64::from(elapsed) * DISPLAY_FRACTION_NUM;
    let quotient = scaled / (DISPLAY_FRACTION_DEN * column_count as u64);
    Ticks::try_from(quotient).unwrap_or(Ticks::MAX)
}

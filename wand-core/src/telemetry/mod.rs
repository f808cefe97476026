//! Telemetry event catalog shared by firmware and host targets.
//!
//! The control path never depends on telemetry; events exist so the emulator
//! session and tests can see what the detector and driver decided. Kinds
//! serialize to compact numeric codes for transport over diagnostics
//! channels.

use core::fmt;

use heapless::HistoryBuf;

use crate::display::RunOutcome;
use crate::swing::{SwingDirection, SwingEvent};
use crate::timing::Ticks;

/// Events recorded per swing run, plus headroom for noise bursts.
pub const EVENT_LOG_DEPTH: usize = 32;

/// Discriminated telemetry events for the swing-sync control loop.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WandEventKind {
    /// A debounced leftward transition armed a run.
    SwingStarted { interval: Ticks },
    /// A debounced rightward transition requested early completion.
    SwingEnded,
    /// A transition below its debounce threshold was discarded.
    NoiseRejected { direction: SwingDirection },
    /// The sequence driver walked every column at full interval.
    RunCompleted,
    /// The sequence driver finished early after a swing end.
    RunAborted,
}

impl WandEventKind {
    /// Compact numeric code for diagnostics transports.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            WandEventKind::SwingStarted { .. } => 1,
            WandEventKind::SwingEnded => 2,
            WandEventKind::NoiseRejected { .. } => 3,
            WandEventKind::RunCompleted => 4,
            WandEventKind::RunAborted => 5,
        }
    }

    /// Maps a detector classification to its telemetry event.
    #[must_use]
    pub const fn from_swing_event(event: SwingEvent, direction: SwingDirection) -> Self {
        match event {
            SwingEvent::Start { interval } => WandEventKind::SwingStarted { interval },
            SwingEvent::End => WandEventKind::SwingEnded,
            SwingEvent::Noise => WandEventKind::NoiseRejected { direction },
        }
    }

    /// Maps a driver outcome to its telemetry event.
    #[must_use]
    pub const fn from_run_outcome(outcome: RunOutcome) -> Self {
        match outcome {
            RunOutcome::Completed => WandEventKind::RunCompleted,
            RunOutcome::Aborted => WandEventKind::RunAborted,
        }
    }
}

impl fmt::Display for WandEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WandEventKind::SwingStarted { interval } => {
                write!(f, "swing-started interval={interval}")
            }
            WandEventKind::SwingEnded => f.write_str("swing-ended"),
            WandEventKind::NoiseRejected { direction } => {
                let side = match direction {
                    SwingDirection::Left => "left",
                    SwingDirection::Right => "right",
                };
                write!(f, "noise-rejected {side}")
            }
            WandEventKind::RunCompleted => f.write_str("run-completed"),
            WandEventKind::RunAborted => f.write_str("run-aborted"),
        }
    }
}

/// Bounded log of recent telemetry events, oldest entries evicted first.
pub struct EventLog {
    entries: HistoryBuf<WandEventKind, EVENT_LOG_DEPTH>,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HistoryBuf::new(),
        }
    }

    /// Appends an event, evicting the oldest entry when full.
    pub fn record(&mut self, kind: WandEventKind) {
        self.entries.write(kind);
    }

    /// Number of retained events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no events are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates retained events, oldest first.
    pub fn iter_oldest_first(&self) -> impl Iterator<Item = &WandEventKind> {
        self.entries.oldest_ordered()
    }
}

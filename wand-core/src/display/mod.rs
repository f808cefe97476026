//! Sequence driver and the cooperative control-loop step.
//!
//! The driver walks the encoded column sequence exactly once, writing each
//! pattern to the output bus and holding it for the per-column interval the
//! run state carries. The interval is re-read at every column and the abort
//! flag between unit waits, so a swing-end event degrades the remaining holds
//! to zero and the walk completes almost immediately. The walk always reaches
//! the clearing step: the bus ends all-off whether the run completed or was
//! cut short.

use crate::font::ColumnPattern;
use crate::timing::ColumnPacer;
use crate::trigger::RunTrigger;

/// Abstraction over the parallel output bus driving the LEDs.
pub trait ColumnBus {
    /// Writes one full-width column pattern to the bus.
    fn write(&mut self, pattern: ColumnPattern);

    /// Drives every output to the all-off pattern.
    fn clear(&mut self) {
        self.write(crate::font::BLANK_COLUMN);
    }
}

/// Column bus that performs no hardware interaction.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopColumnBus;

impl NoopColumnBus {
    /// Creates a new no-op bus.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ColumnBus for NoopColumnBus {
    fn write(&mut self, _: ColumnPattern) {}
}

/// Display direction convention relative to encoding order.
///
/// The reference design walks the sequence last-encoded-first so the message
/// reads correctly to an observer facing the swing. Fixed per build; never
/// re-derived at run time.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ScanOrder {
    /// Last encoded column first (reverse index order).
    #[default]
    TrailingFirst,
    /// Encoding order, for boards wired the opposite way.
    LeadingFirst,
}

/// Outcome of one sequence run.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RunOutcome {
    /// Every column was held for its full interval.
    Completed,
    /// A swing-end event forced early completion.
    Aborted,
}

/// Walks encoded column sequences against the shared run state.
#[derive(Copy, Clone, Debug, Default)]
pub struct SequenceDriver {
    order: ScanOrder,
}

impl SequenceDriver {
    /// Creates a driver using the default scan order.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            order: ScanOrder::TrailingFirst,
        }
    }

    /// Creates a driver with an explicit scan order.
    #[must_use]
    pub const fn with_order(order: ScanOrder) -> Self {
        Self { order }
    }

    /// The configured scan order.
    #[must_use]
    pub const fn order(&self) -> ScanOrder {
        self.order
    }

    /// Iterates a column sequence in display order.
    ///
    /// Shared with async bindings that pace columns with their own waits but
    /// must preserve the display-direction convention.
    pub fn ordered<'a>(&self, columns: &'a [ColumnPattern]) -> OrderedColumns<'a> {
        let inner = match self.order {
            ScanOrder::TrailingFirst => OrderedInner::Trailing(columns.iter().rev()),
            ScanOrder::LeadingFirst => OrderedInner::Leading(columns.iter()),
        };
        OrderedColumns { inner }
    }

    /// Runs the sequence once and returns the run state to idle.
    ///
    /// Blocks until every column has been written; a zero interval (degenerate
    /// start or forced by an end event) advances through the remaining columns
    /// without waiting.
    pub fn run<B, P>(
        &self,
        columns: &[ColumnPattern],
        trigger: &RunTrigger,
        bus: &mut B,
        pacer: &mut P,
    ) -> RunOutcome
    where
        B: ColumnBus,
        P: ColumnPacer,
    {
        for pattern in self.ordered(columns) {
            hold_column(pattern, trigger, bus, pacer);
        }

        bus.clear();
        let outcome = if trigger.abort_requested() {
            RunOutcome::Aborted
        } else {
            RunOutcome::Completed
        };
        trigger.finish_run();
        outcome
    }
}

/// Column patterns yielded in display order. See [`SequenceDriver::ordered`].
pub struct OrderedColumns<'a> {
    inner: OrderedInner<'a>,
}

enum OrderedInner<'a> {
    Leading(core::slice::Iter<'a, ColumnPattern>),
    Trailing(core::iter::Rev<core::slice::Iter<'a, ColumnPattern>>),
}

impl Iterator for OrderedColumns<'_> {
    type Item = ColumnPattern;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            OrderedInner::Leading(iter) => iter.next().copied(),
            OrderedInner::Trailing(iter) => iter.next().copied(),
        }
    }
}

/// Writes one column and holds it, observing the abort flag after each unit.
fn hold_column<B, P>(pattern: ColumnPattern, trigger: &RunTrigger, bus: &mut B, pacer: &mut P)
where
    B: ColumnBus,
    P: ColumnPacer,
{
    bus.write(pattern);
    // Re-read per column: an end event zeroes the interval mid-run.
    let mut remaining = trigger.interval();
    while remaining > 0 {
        if trigger.abort_requested() {
            break;
        }
        pacer.wait_unit();
        remaining -= 1;
    }
}

/// One control-loop iteration: runs the sequence when a run is armed.
///
/// Returns `None` when the trigger is idle so callers can yield and poll
/// again.
pub fn poll_once<B, P>(
    driver: &SequenceDriver,
    columns: &[ColumnPattern],
    trigger: &RunTrigger,
    bus: &mut B,
    pacer: &mut P,
) -> Option<RunOutcome>
where
    B: ColumnBus,
    P: ColumnPacer,
{
    if trigger.is_triggered() {
        Some(driver.run(columns, trigger, bus, pacer))
    } else {
        None
    }
}

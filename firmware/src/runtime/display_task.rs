use embassy_futures::yield_now;
use embassy_time::Timer;

use wand_core::display::{ColumnBus, RunOutcome, SequenceDriver};
use wand_core::encoder::ColumnSequence;
use wand_core::trigger::RunTrigger;

use crate::config::TICK_MICROS;
use crate::hw::LedColumnBus;

/// Cooperative display loop: polls the run flag and walks the column
/// sequence when a swing start has armed it.
///
/// This is the async rendition of `SequenceDriver::run`: the walk order and
/// abort semantics come from the core, while the holds yield to the executor
/// so the swing task keeps servicing comparator edges mid-run.
#[embassy_executor::task]
pub async fn run(
    columns: &'static ColumnSequence,
    trigger: &'static RunTrigger,
    mut bus: LedColumnBus,
) -> ! {
    let driver = SequenceDriver::new();

    loop {
        if !trigger.is_triggered() {
            yield_now().await;
            continue;
        }

        for pattern in driver.ordered(columns) {
            bus.write(pattern);
            hold_column(trigger).await;
        }

        bus.clear();
        let outcome = if trigger.abort_requested() {
            RunOutcome::Aborted
        } else {
            RunOutcome::Completed
        };
        trigger.finish_run();

        match outcome {
            RunOutcome::Completed => defmt::info!("run completed"),
            RunOutcome::Aborted => defmt::info!("run aborted early"),
        }
    }
}

/// Holds the current column: one unit wait per engine tick, re-reading the
/// interval per column and observing the abort flag between units.
async fn hold_column(trigger: &RunTrigger) {
    let mut remaining = trigger.interval();
    while remaining > 0 {
        if trigger.abort_requested() {
            break;
        }
        Timer::after_micros(TICK_MICROS).await;
        remaining -= 1;
    }
}

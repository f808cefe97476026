use embassy_stm32::exti::ExtiInput;

use wand_core::swing::{SwingDetector, SwingDirection, SwingEvent};
use wand_core::timing::SwingClock;
use wand_core::trigger::RunTrigger;

use crate::hw::InstantSwingClock;

/// Services comparator transitions: measures the inter-event window,
/// debounces, and applies accepted events to the shared run state.
///
/// The comparator is wired so a high level means the input sits above the
/// reference voltage, i.e. the board is reversing rightward; low means a
/// leftward stroke is underway.
#[embassy_executor::task]
pub async fn run(
    mut motion: ExtiInput<'static>,
    trigger: &'static RunTrigger,
    column_count: usize,
) -> ! {
    let detector = SwingDetector::new();
    let mut clock = InstantSwingClock::new();

    loop {
        motion.wait_for_any_edge().await;

        // Classification consumes the pre-restart count; the clock restarts
        // on every transition, accepted or rejected.
        let elapsed = clock.split_elapsed();
        let direction = if motion.is_high() {
            SwingDirection::Right
        } else {
            SwingDirection::Left
        };

        match detector.observe(direction, elapsed, column_count, trigger) {
            SwingEvent::Start { interval } => {
                defmt::info!("swing start: {=u32} ticks/column", interval);
            }
            SwingEvent::End => {
                defmt::info!("swing end after {=u32} ticks", elapsed);
            }
            SwingEvent::Noise => {
                defmt::debug!("noise transition after {=u32} ticks", elapsed);
            }
        }
    }
}

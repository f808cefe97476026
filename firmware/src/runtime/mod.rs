use cortex_m::interrupt;
use cortex_m::register::primask;
use critical_section::{self, RawRestoreState};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_stm32 as hal;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Level, Output, Pull, Speed};
use embassy_time::Timer;
use static_cell::StaticCell;

use wand_core::encoder::{self, ColumnSequence, Message};
use wand_core::timing::SENSOR_SETTLE_MILLIS;
use wand_core::trigger::RunTrigger;

use crate::config::STARTUP_MESSAGE;
use crate::hw::LedColumnBus;

mod display_task;
mod swing_task;

critical_section::set_impl!(InterruptCriticalSection);

struct InterruptCriticalSection;

unsafe impl critical_section::Impl for InterruptCriticalSection {
    unsafe fn acquire() -> RawRestoreState {
        let primask = primask::read();
        interrupt::disable();
        primask.is_active()
    }

    unsafe fn release(restore_state: RawRestoreState) {
        if restore_state {
            unsafe {
                interrupt::enable();
            }
        }
    }
}

/// Run state shared between the swing task (writer) and the display task
/// (reader/clearer).
static TRIGGER: RunTrigger = RunTrigger::new();

/// Encoded column sequence, fixed after startup configuration.
static COLUMNS: StaticCell<ColumnSequence> = StaticCell::new();

#[embassy_executor::main]
pub async fn main(spawner: Spawner) {
    let config = hal::Config::default();
    let hal::Peripherals {
        PA1,
        EXTI1,
        PB0,
        PB1,
        PB2,
        PB3,
        PB4,
        PB5,
        PB6,
        PB7,
        ..
    } = hal::init(config);

    let bus = LedColumnBus::new([
        Output::new(PB0, Level::Low, Speed::Low),
        Output::new(PB1, Level::Low, Speed::Low),
        Output::new(PB2, Level::Low, Speed::Low),
        Output::new(PB3, Level::Low, Speed::Low),
        Output::new(PB4, Level::Low, Speed::Low),
        Output::new(PB5, Level::Low, Speed::Low),
        Output::new(PB6, Level::Low, Speed::Low),
        Output::new(PB7, Level::Low, Speed::Low),
    ]);

    let motion = ExtiInput::new(PA1, EXTI1, Pull::None);

    // Configuration-time validation: a bad build constant stops here.
    let message = Message::try_from_str(STARTUP_MESSAGE).expect("startup message rejected");
    let columns = encoder::encode(&message).expect("startup message exceeds column capacity");
    let column_count = columns.len();
    let columns = COLUMNS.init(columns);

    defmt::info!(
        "displaying {=str}: {=usize} columns",
        message.as_str(),
        column_count
    );

    // Let the analog sensor output settle before motion events are serviced.
    Timer::after_millis(u64::from(SENSOR_SETTLE_MILLIS)).await;

    spawner
        .spawn(swing_task::run(motion, &TRIGGER, column_count))
        .expect("failed to spawn swing task");

    spawner
        .spawn(display_task::run(columns, &TRIGGER, bus))
        .expect("failed to spawn display task");

    core::future::pending::<()>().await;
}

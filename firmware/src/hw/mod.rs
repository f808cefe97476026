//! Hardware bindings for the wand board.
//!
//! Eight push-pull outputs drive the LED column bus, bit 0 on the first pin.
//! The comparator that squares up the accelerometer output lands on an EXTI
//! input owned by the swing task; this module only provides the output bus
//! and the tick clock the core abstractions bind to.

use embassy_stm32::gpio::Output;
use embassy_time::Instant;
use wand_core::display::ColumnBus;
use wand_core::font::ColumnPattern;
use wand_core::timing::{SwingClock, Ticks};

use crate::config::TICK_MICROS;

/// Parallel LED output bus, one GPIO per bit.
pub struct LedColumnBus {
    pins: [Output<'static>; 8],
}

impl LedColumnBus {
    /// Wraps the eight column outputs, least significant bit first.
    pub fn new(pins: [Output<'static>; 8]) -> Self {
        Self { pins }
    }
}

impl ColumnBus for LedColumnBus {
    fn write(&mut self, pattern: ColumnPattern) {
        for (bit, pin) in self.pins.iter_mut().enumerate() {
            if pattern & (1 << bit) == 0 {
                pin.set_low();
            } else {
                pin.set_high();
            }
        }
    }
}

/// Swing clock backed by the monotonic embassy instant, scaled to engine
/// ticks.
pub struct InstantSwingClock {
    started_at: Instant,
}

impl InstantSwingClock {
    /// Creates a clock measuring from now.
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }
}

impl Default for InstantSwingClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SwingClock for InstantSwingClock {
    fn restart(&mut self) {
        self.started_at = Instant::now();
    }

    fn elapsed(&mut self) -> Ticks {
        let micros = self.started_at.elapsed().as_micros();
        Ticks::try_from(micros / TICK_MICROS).unwrap_or(Ticks::MAX)
    }
}

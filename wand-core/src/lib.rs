#![no_std]

// Swing-synchronization logic for the POV wand.
//
// Everything here is `no_std` so the same glyph encoder, motion detector,
// run-state cell, and sequence driver compile into the firmware and into the
// host-side emulator unchanged. Hardware touches only happen behind the
// `ColumnBus`, `SwingClock`, and `ColumnPacer` traits.

pub mod display;
pub mod encoder;
pub mod font;
pub mod swing;
pub mod telemetry;
pub mod timing;
pub mod trigger;

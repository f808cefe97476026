//! Build-time wand configuration.
//!
//! The message is fixed at flash time; there is no runtime channel to change
//! it. Validation still happens through [`wand_core::encoder::Message`] at
//! startup so a bad build constant fails loudly instead of corrupting the
//! display.

/// Text shown by the wand. Uppercase letters and spaces only.
pub const STARTUP_MESSAGE: &str = "HELLO";

/// Engine tick length. At 64 us per tick the 14 000-tick swing-end debounce
/// corresponds to a minimum full-swing duration of roughly 0.9 s.
pub const TICK_MICROS: u64 = 64;

#[cfg(test)]
mod tests {
    use wand_core::encoder::Message;

    use super::STARTUP_MESSAGE;

    #[test]
    fn startup_message_is_valid() {
        Message::try_from_str(STARTUP_MESSAGE).expect("startup message rejected");
    }
}

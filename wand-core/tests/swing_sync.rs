use wand_core::swing::{
    END_DEBOUNCE_TICKS, START_DEBOUNCE_TICKS, SwingDetector, SwingDirection, SwingEvent,
    column_interval,
};
use wand_core::timing::{ManualClock, SwingClock};
use wand_core::trigger::RunTrigger;

#[test]
fn left_transitions_below_threshold_never_arm_a_run() {
    let detector = SwingDetector::new();
    let trigger = RunTrigger::new();

    for elapsed in [0, 1, 100, 1_499] {
        let event = detector.observe(SwingDirection::Left, elapsed, 10, &trigger);
        assert_eq!(event, SwingEvent::Noise, "elapsed={elapsed}");
        assert!(!trigger.is_triggered(), "elapsed={elapsed}");
    }
}

#[test]
fn right_transitions_below_threshold_never_force_abort() {
    let detector = SwingDetector::new();
    let trigger = RunTrigger::new();
    trigger.start(200);

    for elapsed in [0, 1_500, 13_999] {
        let event = detector.observe(SwingDirection::Right, elapsed, 10, &trigger);
        assert_eq!(event, SwingEvent::Noise, "elapsed={elapsed}");
        assert!(!trigger.abort_requested(), "elapsed={elapsed}");
        assert_eq!(trigger.interval(), 200, "elapsed={elapsed}");
    }
}

#[test]
fn accepted_starts_compute_the_calibrated_interval() {
    let detector = SwingDetector::new();

    for (elapsed, columns, expected) in [
        (4_800, 10, 200),
        (START_DEBOUNCE_TICKS, 10, 62),
        (24_000, 10, 1_000),
        (24_000, 40, 250),
    ] {
        let event = detector.classify(SwingDirection::Left, elapsed, columns);
        assert_eq!(
            event,
            SwingEvent::Start { interval: expected },
            "elapsed={elapsed} columns={columns}"
        );
        assert_eq!(column_interval(elapsed, columns), expected);
    }
}

#[test]
fn end_threshold_is_inclusive() {
    let detector = SwingDetector::new();
    assert_eq!(
        detector.classify(SwingDirection::Right, END_DEBOUNCE_TICKS, 10),
        SwingEvent::End
    );
}

// The clock restarts on every transition, accepted or not, so noise resets
// the measurement window instead of accumulating across rejects.
#[test]
fn clock_restart_on_noise_resets_the_measurement_window() {
    let detector = SwingDetector::new();
    let trigger = RunTrigger::new();
    let mut clock = ManualClock::new();

    // A noise blip 1 000 ticks in: rejected, but the clock still restarts.
    clock.advance(1_000);
    let elapsed = clock.split_elapsed();
    assert_eq!(
        detector.observe(SwingDirection::Left, elapsed, 10, &trigger),
        SwingEvent::Noise
    );

    // 1 000 more ticks would have cleared the start threshold had the two
    // windows accumulated; they must not.
    clock.advance(1_000);
    let elapsed = clock.split_elapsed();
    assert_eq!(
        detector.observe(SwingDirection::Left, elapsed, 10, &trigger),
        SwingEvent::Noise
    );
    assert!(!trigger.is_triggered());

    // A genuine swing after the noise still measures only its own window.
    clock.advance(4_800);
    let elapsed = clock.split_elapsed();
    assert_eq!(
        detector.observe(SwingDirection::Left, elapsed, 10, &trigger),
        SwingEvent::Start { interval: 200 }
    );
    assert_eq!(clock.elapsed(), 0);
}

#[test]
fn degenerate_intervals_are_zero_for_any_column_count() {
    assert_eq!(column_interval(0, 10), 0);
    assert_eq!(column_interval(1_500, 0), 0);
    // Huge sequence relative to the swing rounds to zero, never faults.
    assert_eq!(column_interval(1_500, 1_000), 0);
}

#[test]
fn custom_thresholds_are_honored() {
    let detector = SwingDetector::with_thresholds(100, 500);
    assert_eq!(
        detector.classify(SwingDirection::Left, 99, 10),
        SwingEvent::Noise
    );
    assert!(matches!(
        detector.classify(SwingDirection::Left, 100, 10),
        SwingEvent::Start { .. }
    ));
    assert_eq!(
        detector.classify(SwingDirection::Right, 499, 10),
        SwingEvent::Noise
    );
    assert_eq!(
        detector.classify(SwingDirection::Right, 500, 10),
        SwingEvent::End
    );
}

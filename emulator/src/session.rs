use wand_core::display::{ColumnBus, RunOutcome, SequenceDriver, poll_once};
use wand_core::encoder::{ColumnSequence, Message, MessageError, encode};
use wand_core::font::ColumnPattern;
use wand_core::swing::{SwingDetector, SwingDirection, SwingEvent};
use wand_core::telemetry::{EventLog, WandEventKind};
use wand_core::timing::{CountingPacer, ManualClock, SwingClock};
use wand_core::trigger::RunTrigger;

/// Message used when none is supplied on the command line.
pub const DEFAULT_MESSAGE: &str = "HELLO";

pub const HELP_TOPICS: &[(&str, &str)] = &[
    (
        "message",
        "message <TEXT>   - set and encode the display text (A-Z and space)",
    ),
    (
        "left",
        "left <ticks>     - leftward transition after <ticks> on the swing clock",
    ),
    (
        "right",
        "right <ticks>    - rightward transition after <ticks> on the swing clock",
    ),
    (
        "run",
        "run              - one control-loop poll; drives the sequence if armed",
    ),
    (
        "frames",
        "frames           - show the bus writes recorded by the last run",
    ),
    (
        "events",
        "events           - show the telemetry log, oldest first",
    ),
    ("status", "status           - display message and run state"),
    ("help", "help             - show this text"),
];

/// Bus that records every write so a run can be inspected afterwards.
#[derive(Debug, Default)]
struct RecordingBus {
    writes: Vec<ColumnPattern>,
}

impl ColumnBus for RecordingBus {
    fn write(&mut self, pattern: ColumnPattern) {
        self.writes.push(pattern);
    }
}

pub struct Session {
    message: Message,
    columns: ColumnSequence,
    detector: SwingDetector,
    driver: SequenceDriver,
    trigger: RunTrigger,
    clock: ManualClock,
    log: EventLog,
    last_frames: Vec<ColumnPattern>,
}

impl Session {
    pub fn new(message: &str) -> Result<Self, MessageError> {
        let message = Message::try_from_str(message)?;
        let columns = encode(&message).expect("validated message must encode");

        Ok(Self {
            message,
            columns,
            detector: SwingDetector::new(),
            driver: SequenceDriver::new(),
            trigger: RunTrigger::new(),
            clock: ManualClock::new(),
            log: EventLog::new(),
            last_frames: Vec::new(),
        })
    }

    pub fn handle_command(&mut self, input: &str) -> Vec<String> {
        let input = input.trim_start();
        let mut parts = input.split_whitespace();
        let Some(command) = parts.next() else {
            return Vec::new();
        };

        match command.to_ascii_lowercase().as_str() {
            "message" => {
                let text = input[command.len()..].trim();
                self.set_message(text)
            }
            "left" => self.transition(SwingDirection::Left, parts.next()),
            "right" => self.transition(SwingDirection::Right, parts.next()),
            "run" => self.poll(),
            "frames" => self.frames(),
            "events" => self.events(),
            "status" => self.status(),
            "help" => HELP_TOPICS
                .iter()
                .map(|(_, text)| (*text).to_string())
                .collect(),
            other => vec![format!("Unknown command `{other}`; try `help`.")],
        }
    }

    fn set_message(&mut self, text: &str) -> Vec<String> {
        if self.trigger.is_triggered() {
            return vec!["A run is armed; `run` it before changing the message.".to_string()];
        }

        match Message::try_from_str(text) {
            Ok(message) => {
                self.columns = encode(&message).expect("validated message must encode");
                self.message = message;
                vec![format!(
                    "Message set to {:?} ({} columns).",
                    self.message.as_str(),
                    self.columns.len()
                )]
            }
            Err(err) => vec![format!("Rejected: {err}")],
        }
    }

    fn transition(&mut self, direction: SwingDirection, ticks: Option<&str>) -> Vec<String> {
        let Some(ticks) = ticks.and_then(|raw| raw.parse::<u32>().ok()) else {
            return vec!["Expected a tick count, e.g. `left 4800`.".to_string()];
        };

        // The clock restarts on every transition, accepted or rejected.
        self.clock.advance(ticks);
        let elapsed = self.clock.split_elapsed();
        let event = self
            .detector
            .observe(direction, elapsed, self.columns.len(), &self.trigger);
        self.log
            .record(WandEventKind::from_swing_event(event, direction));

        match event {
            SwingEvent::Start { interval } => {
                vec![format!("Swing start: {interval} ticks/column; run armed.")]
            }
            SwingEvent::End => vec!["Swing end: abort requested, interval zeroed.".to_string()],
            SwingEvent::Noise => vec![format!("Noise: {elapsed} ticks below debounce; ignored.")],
        }
    }

    fn poll(&mut self) -> Vec<String> {
        let mut bus = RecordingBus::default();
        let mut pacer = CountingPacer::new();

        let Some(outcome) = poll_once(
            &self.driver,
            &self.columns,
            &self.trigger,
            &mut bus,
            &mut pacer,
        ) else {
            return vec!["Idle: no run armed.".to_string()];
        };

        self.log.record(WandEventKind::from_run_outcome(outcome));
        self.last_frames = bus.writes;

        let label = match outcome {
            RunOutcome::Completed => "completed",
            RunOutcome::Aborted => "aborted early",
        };
        vec![format!(
            "Run {label}: {} bus writes, {} ticks of hold time.",
            self.last_frames.len(),
            pacer.total_waited()
        )]
    }

    fn frames(&self) -> Vec<String> {
        if self.last_frames.is_empty() {
            return vec!["No frames recorded yet; `run` a sequence first.".to_string()];
        }

        self.last_frames
            .iter()
            .enumerate()
            .map(|(step, pattern)| format!("{step:3}: {pattern:08b}"))
            .collect()
    }

    fn events(&self) -> Vec<String> {
        if self.log.is_empty() {
            return vec!["No telemetry recorded yet.".to_string()];
        }

        self.log
            .iter_oldest_first()
            .map(ToString::to_string)
            .collect()
    }

    fn status(&self) -> Vec<String> {
        vec![
            format!(
                "Message {:?}: {} columns.",
                self.message.as_str(),
                self.columns.len()
            ),
            format!(
                "Trigger: armed={} interval={} abort={}.",
                self.trigger.is_triggered(),
                self.trigger.interval(),
                self.trigger.abort_requested()
            ),
        ]
    }
}

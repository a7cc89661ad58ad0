//! Replays a recorded session on a manual clock.
//!
//! A recording is JSON lines, one timestamped event per line:
//!
//! ```text
//! {"time": "2025-01-01T23:00:00", "kind": "motion", "magnitude": 0.4}
//! {"time": "2025-01-01T23:00:05", "kind": "audio", "decibels": 65.0}
//! {"time": "2025-01-01T23:10:00", "kind": "environment", "room_temperature": 21.0}
//! {"time": "2025-01-02T07:00:00", "kind": "stop"}
//! ```
//!
//! The session starts at the first event and stops at the `stop` event, or at
//! the last event when there is none. Classification ticks fire at every
//! interval boundary in between.

use std::{io::BufRead, sync::Arc};

use chrono::{NaiveDateTime, TimeDelta};
use serde::Deserialize;
use sleepwatch_algos::AnalysisConfig;
use sleepwatch_types::{AnalysisResult, EnvironmentReading};
use uuid::Uuid;

use crate::{Clock, ManualClock, Sample, SleepSession, SleepwatchError};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecordedEvent {
    pub time: NaiveDateTime,
    /// `None` marks the end of the session.
    pub sample: Option<Sample>,
}

#[derive(Deserialize)]
struct RecordingLine {
    time: NaiveDateTime,
    #[serde(flatten)]
    entry: RecordingEntry,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RecordingEntry {
    Motion { magnitude: f64 },
    Audio { decibels: f64 },
    Environment(EnvironmentReading),
    Stop,
}

impl From<RecordingLine> for RecordedEvent {
    fn from(line: RecordingLine) -> Self {
        let sample = match line.entry {
            RecordingEntry::Motion { magnitude } => Some(Sample::Motion { magnitude }),
            RecordingEntry::Audio { decibels } => Some(Sample::Audio { decibels }),
            RecordingEntry::Environment(reading) => Some(Sample::Environment(reading)),
            RecordingEntry::Stop => None,
        };

        Self {
            time: line.time,
            sample,
        }
    }
}

/// Parses a recording. Blank lines are skipped; line numbers in errors are
/// 1-based.
pub fn parse_recording(reader: impl BufRead) -> Result<Vec<RecordedEvent>, SleepwatchError> {
    let mut events = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let parsed = serde_json::from_str::<RecordingLine>(&line).map_err(|source| {
            SleepwatchError::Recording {
                line: index + 1,
                source,
            }
        })?;
        events.push(parsed.into());
    }

    Ok(events)
}

pub fn replay(
    reader: impl BufRead,
    config: AnalysisConfig,
) -> Result<AnalysisResult, SleepwatchError> {
    let events = parse_recording(reader)?;
    replay_events(&events, config)
}

/// Events are expected in time order; an event earlier than its predecessor
/// is treated as happening at the predecessor's time.
pub fn replay_events(
    events: &[RecordedEvent],
    config: AnalysisConfig,
) -> Result<AnalysisResult, SleepwatchError> {
    let interval = config.classify_interval;
    if interval <= TimeDelta::zero() {
        return Err(SleepwatchError::InvalidInterval);
    }
    let first = events.first().ok_or(SleepwatchError::EmptyRecording)?.time;

    let clock = Arc::new(ManualClock::new(first));
    let mut session = SleepSession::start(Uuid::new_v4(), Arc::clone(&clock), config);
    session.tick();

    let mut next_tick = first + interval;
    let mut last = first;

    for event in events {
        let time = event.time.max(last);
        while next_tick <= time {
            clock.set(next_tick);
            session.tick();
            next_tick += interval;
        }
        clock.set(time);
        last = time;

        match event.sample {
            Some(sample) => {
                session.record(sample);
            }
            None => break,
        }
    }

    debug!("replayed {} events up to {}", events.len(), clock.now());
    Ok(session.stop())
}

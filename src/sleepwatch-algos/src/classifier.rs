use chrono::{NaiveDateTime, TimeDelta};
use sleepwatch_types::{QualityFactors, SleepStage};

use crate::AnalysisConfig;

/// Maps accumulated signals and the position inside a nominal 90 minute
/// cycle to a sleep stage.
///
/// Windows are half open, so a boundary second belongs to the later window:
/// `[0, 45m)` Light, `[45m, 60m)` Deep, `[60m, 75m)` REM, rest Light.
#[derive(Clone, Debug)]
pub struct StageClassifier {
    awake_movement: f64,
    cycle_length: i64,
    light_end: i64,
    deep_end: i64,
    rem_end: i64,
}

impl StageClassifier {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            awake_movement: config.awake_movement,
            cycle_length: config.cycle_length.num_seconds().max(1),
            light_end: config.light_end.num_seconds(),
            deep_end: config.deep_end.num_seconds(),
            rem_end: config.rem_end.num_seconds(),
        }
    }

    pub fn classify(
        &self,
        signals: &QualityFactors,
        session_start: NaiveDateTime,
        now: NaiveDateTime,
    ) -> SleepStage {
        if signals.movement > self.awake_movement {
            return SleepStage::Awake;
        }

        self.stage_at(Self::elapsed(session_start, now))
    }

    /// Time since `session_start`, clamped to zero for clocks running backwards.
    pub fn elapsed(session_start: NaiveDateTime, now: NaiveDateTime) -> TimeDelta {
        (now - session_start).max(TimeDelta::zero())
    }

    fn stage_at(&self, elapsed: TimeDelta) -> SleepStage {
        let position = elapsed.num_seconds().rem_euclid(self.cycle_length);

        if position < self.light_end {
            SleepStage::Light
        } else if position < self.deep_end {
            SleepStage::Deep
        } else if position < self.rem_end {
            SleepStage::REM
        } else {
            SleepStage::Light
        }
    }
}

impl Default for StageClassifier {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

use std::ops::RangeInclusive;

use chrono::TimeDelta;

/// Tunables of the sleep heuristic. `Default` holds the reference values.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisConfig {
    /// Motion magnitude above which a sample counts as movement.
    pub movement_threshold: f64,
    /// Sound level in dB above which a sample counts as snoring.
    pub snoring_threshold: f64,
    /// Amount added to an accumulator per qualifying sample.
    pub accumulation_step: f64,
    /// Movement level above which the sleeper is considered awake.
    pub awake_movement: f64,
    pub cycle_length: TimeDelta,
    pub light_end: TimeDelta,
    pub deep_end: TimeDelta,
    pub rem_end: TimeDelta,
    pub classify_interval: TimeDelta,
    /// Not enforced when sealing cycles.
    pub cycle_min_duration: TimeDelta,
    pub efficiency_target: f64,
    pub target_sleep: TimeDelta,
    /// Celsius
    pub comfortable_temperature: RangeInclusive<f64>,
    pub snoring_concern: f64,
}

impl AnalysisConfig {
    pub const CLASSIFY_INTERVAL_SECS: i64 = 300;

    pub fn with_classify_interval(mut self, interval: TimeDelta) -> Self {
        self.classify_interval = interval;
        self
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            movement_threshold: 0.1,
            snoring_threshold: 60.0,
            accumulation_step: 0.1,
            awake_movement: 0.7,
            cycle_length: TimeDelta::minutes(90),
            light_end: TimeDelta::minutes(45),
            deep_end: TimeDelta::minutes(60),
            rem_end: TimeDelta::minutes(75),
            classify_interval: TimeDelta::seconds(Self::CLASSIFY_INTERVAL_SECS),
            cycle_min_duration: TimeDelta::minutes(15),
            efficiency_target: 0.85,
            target_sleep: TimeDelta::hours(7),
            comfortable_temperature: 16.0..=24.0,
            snoring_concern: 0.3,
        }
    }
}

use std::sync::{Mutex, MutexGuard, PoisonError};

use sleepwatch_types::{EnvironmentReading, QualityFactors};

use crate::AnalysisConfig;

/// Accumulates motion and audio samples into bounded movement and snoring
/// levels.
///
/// Samples may arrive from independent producers while a classifier reads
/// snapshots, so all state sits behind one mutex. The lock is held for a
/// single update or copy, never across classification.
pub struct SignalAggregator {
    movement_threshold: f64,
    snoring_threshold: f64,
    step: f64,
    state: Mutex<AggregatorState>,
}

#[derive(Default)]
struct AggregatorState {
    factors: QualityFactors,
    motion_samples: u32,
    audio_samples: u32,
    closed: bool,
}

impl SignalAggregator {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            movement_threshold: config.movement_threshold,
            snoring_threshold: config.snoring_threshold,
            step: config.accumulation_step,
            state: Mutex::new(AggregatorState::default()),
        }
    }

    /// Returns `true` when the sample raised the movement level.
    pub fn record_motion_sample(&self, magnitude: f64) -> bool {
        if !magnitude.is_finite() || magnitude < 0.0 {
            trace!("dropping motion sample {}", magnitude);
            return false;
        }
        if magnitude <= self.movement_threshold {
            return false;
        }

        self.update(|state, step| {
            state.motion_samples = state.motion_samples.saturating_add(1);
            state.factors.movement = accumulate(state.motion_samples, step);
        })
    }

    /// Returns `true` when the sample raised the snoring level.
    pub fn record_audio_level(&self, decibels: f64) -> bool {
        if !decibels.is_finite() {
            trace!("dropping audio sample {}", decibels);
            return false;
        }
        if decibels <= self.snoring_threshold {
            return false;
        }

        self.update(|state, step| {
            state.audio_samples = state.audio_samples.saturating_add(1);
            state.factors.snoring = accumulate(state.audio_samples, step);
        })
    }

    pub fn record_environment(&self, reading: EnvironmentReading) -> bool {
        self.update(|state, _| state.factors.apply(reading))
    }

    pub fn snapshot(&self) -> QualityFactors {
        self.lock().factors
    }

    /// Stops accepting samples and returns the final snapshot.
    ///
    /// `at` runs while the lock is held, so a timestamp taken there is
    /// ordered after every sample that made it into the snapshot.
    pub fn close_with<T>(&self, at: impl FnOnce() -> T) -> (T, QualityFactors) {
        let mut state = self.lock();
        state.closed = true;
        (at(), state.factors)
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn update(&self, apply: impl FnOnce(&mut AggregatorState, f64)) -> bool {
        let mut state = self.lock();
        if state.closed {
            trace!("aggregator closed, sample ignored");
            return false;
        }
        apply(&mut state, self.step);
        true
    }

    fn lock(&self) -> MutexGuard<'_, AggregatorState> {
        // Every update is a single assignment, so a poisoned state is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Level after `samples` qualifying samples.
///
/// Dividing the count by the number of steps to saturation keeps ten 0.1 steps
/// at exactly 1.0 and three at exactly 0.3, for any step size.
fn accumulate(samples: u32, step: f64) -> f64 {
    if step <= 0.0 {
        return 0.0;
    }
    (f64::from(samples) / step.recip()).min(1.0)
}

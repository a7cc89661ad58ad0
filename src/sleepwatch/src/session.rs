use std::sync::Arc;

use chrono::NaiveDateTime;
use sleepwatch_algos::{
    AnalysisConfig, CycleTracker, RecommendationEngine, SignalAggregator, SleepScorer,
    StageClassifier, TrackerState,
};
use sleepwatch_types::{AnalysisResult, Cycle, EnvironmentReading, QualityFactors, SleepStage};
use uuid::Uuid;

use crate::{Clock, Sample};

/// One monitoring session, from start to stop.
///
/// Owns its aggregator and cycle tracker. Producers that run on other
/// threads can hold the aggregator through [`SleepSession::aggregator`];
/// everything else goes through the session. Stopping consumes the session
/// and yields the report.
pub struct SleepSession<C: Clock> {
    id: Uuid,
    clock: C,
    started_at: NaiveDateTime,
    config: AnalysisConfig,
    aggregator: Arc<SignalAggregator>,
    classifier: StageClassifier,
    tracker: CycleTracker,
}

impl<C: Clock> SleepSession<C> {
    pub fn start(id: Uuid, clock: C, config: AnalysisConfig) -> Self {
        let started_at = clock.now();
        info!("session {} started at {}", id, started_at);

        Self {
            id,
            started_at,
            aggregator: Arc::new(SignalAggregator::new(&config)),
            classifier: StageClassifier::new(&config),
            tracker: CycleTracker::new(),
            clock,
            config,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> NaiveDateTime {
        self.started_at
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn aggregator(&self) -> Arc<SignalAggregator> {
        Arc::clone(&self.aggregator)
    }

    pub fn record_motion_sample(&self, magnitude: f64) -> bool {
        self.aggregator.record_motion_sample(magnitude)
    }

    pub fn record_audio_level(&self, decibels: f64) -> bool {
        self.aggregator.record_audio_level(decibels)
    }

    pub fn record_environment(&self, reading: EnvironmentReading) -> bool {
        self.aggregator.record_environment(reading)
    }

    pub fn record(&self, sample: Sample) -> bool {
        match sample {
            Sample::Motion { magnitude } => self.record_motion_sample(magnitude),
            Sample::Audio { decibels } => self.record_audio_level(decibels),
            Sample::Environment(reading) => self.record_environment(reading),
        }
    }

    /// Classifies the current signals and feeds the result to the tracker.
    pub fn tick(&mut self) -> SleepStage {
        let now = self.clock.now();
        let signals = self.aggregator.snapshot();
        let stage = self.classifier.classify(&signals, self.started_at, now);

        if self.current_stage() != Some(stage) {
            debug!("session {}: {} at {}", self.id, stage, now);
        }
        if let Some(cycle) = self.tracker.observe(stage, now) {
            trace!("session {}: sealed cycle {}", self.id, cycle.id);
        }

        stage
    }

    /// Stage of the open cycle, `None` before the first tick.
    pub fn current_stage(&self) -> Option<SleepStage> {
        match self.tracker.state() {
            TrackerState::NoActiveCycle => None,
            TrackerState::ActiveCycle { stage, .. } => Some(stage),
        }
    }

    pub fn current_cycle(&self) -> Option<Cycle> {
        self.tracker.current(self.clock.now())
    }

    pub fn sealed_cycles(&self) -> &[Cycle] {
        self.tracker.sealed()
    }

    pub fn snapshot(&self) -> QualityFactors {
        self.aggregator.snapshot()
    }

    /// Closes the aggregator, seals the open cycle and builds the report.
    ///
    /// The stop time is read while the aggregator is being closed, so samples
    /// arriving after it are never part of the report.
    pub fn stop(self) -> AnalysisResult {
        let (stopped_at, factors) = self.aggregator.close_with(|| self.clock.now());
        let cycles = self.tracker.finish(stopped_at);

        let sleep_score = SleepScorer::new(&self.config).score(&cycles, &factors);
        let recommendations = RecommendationEngine::new(&self.config).recommend(&cycles, &factors);

        info!(
            "session {} stopped at {}: {} cycles, score {}",
            self.id,
            stopped_at,
            cycles.len(),
            sleep_score
        );

        AnalysisResult {
            id: Uuid::new_v4(),
            session_id: self.id,
            date: stopped_at.date(),
            cycles,
            quality_factors: factors,
            sleep_score,
            recommendations,
        }
    }
}

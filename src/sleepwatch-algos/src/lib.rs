#[macro_use]
extern crate log;

pub(crate) mod config;
pub use config::AnalysisConfig;

pub(crate) mod aggregator;
pub use aggregator::SignalAggregator;

pub(crate) mod classifier;
pub use classifier::StageClassifier;

pub(crate) mod cycle_tracker;
pub use cycle_tracker::{CycleTracker, TrackerState};

pub(crate) mod scoring;
pub use scoring::SleepScorer;

pub(crate) mod recommendations;
pub use recommendations::RecommendationEngine;

pub(crate) mod trend;
pub use trend::SessionTrend;

pub mod helpers;

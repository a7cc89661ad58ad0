use std::ops::RangeInclusive;

use chrono::TimeDelta;
use sleepwatch_types::{
    Cycle, QualityFactors, Recommendation, RecommendationCategory, format_hm::FormatHM,
};

use crate::{
    AnalysisConfig,
    scoring::{efficiency, total_time},
};

/// Evaluates fixed advisory rules against a finished session.
///
/// Rules run in a fixed order and never suppress each other; the output
/// keeps that order regardless of priority.
pub struct RecommendationEngine {
    target_sleep: TimeDelta,
    efficiency_target: f64,
    comfortable_temperature: RangeInclusive<f64>,
    snoring_concern: f64,
}

impl RecommendationEngine {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            target_sleep: config.target_sleep,
            efficiency_target: config.efficiency_target,
            comfortable_temperature: config.comfortable_temperature.clone(),
            snoring_concern: config.snoring_concern,
        }
    }

    pub fn recommend(&self, cycles: &[Cycle], factors: &QualityFactors) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();
        let mut push = |category, priority, title: &str, description: String| {
            recommendations.push(Recommendation {
                id: recommendations.len() as u32 + 1,
                category,
                title: title.to_owned(),
                description,
                priority,
            });
        };

        let total = total_time(cycles);
        if total < self.target_sleep {
            push(
                RecommendationCategory::Schedule,
                5,
                "Increase Sleep Duration",
                format!(
                    "You slept {} (hh:mm). Aim for at least {} by going to bed earlier.",
                    total.format_hm(),
                    self.target_sleep.format_hm()
                ),
            );
        }

        if let Some(efficiency) = efficiency(cycles).filter(|e| *e < self.efficiency_target) {
            push(
                RecommendationCategory::Habits,
                4,
                "Improve Sleep Efficiency",
                format!(
                    "Only {:.0}% of your time in bed was spent asleep. Keep a regular \
                     bedtime and avoid screens before sleeping.",
                    efficiency * 100.0
                ),
            );
        }

        if let Some(temperature) = factors
            .room_temperature
            .filter(|t| !self.comfortable_temperature.contains(t))
        {
            push(
                RecommendationCategory::Environment,
                3,
                "Optimize Room Temperature",
                format!(
                    "Your room was {:.1}°C. Keep it between {:.0}°C and {:.0}°C.",
                    temperature,
                    self.comfortable_temperature.start(),
                    self.comfortable_temperature.end()
                ),
            );
        }

        if factors.snoring > self.snoring_concern {
            push(
                RecommendationCategory::Medical,
                4,
                "Address Snoring",
                "Frequent snoring was detected. Consider sleeping on your side and \
                 consult a doctor if it persists."
                    .to_owned(),
            );
        }

        recommendations
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

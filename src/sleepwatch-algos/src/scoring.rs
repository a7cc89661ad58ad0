use chrono::TimeDelta;
use sleepwatch_types::{Cycle, QualityFactors, SleepStage};

use crate::AnalysisConfig;

/// Scores a finished session from 0 to 100.
///
/// Starts at 100 and deducts for efficiency below target, movement and
/// snoring. Deductions are truncated toward zero.
pub struct SleepScorer {
    efficiency_target: f64,
}

impl SleepScorer {
    const MAX_SCORE: i32 = 100;
    const SIGNAL_WEIGHT: f64 = 20.0;

    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            efficiency_target: config.efficiency_target,
        }
    }

    pub fn score(&self, cycles: &[Cycle], factors: &QualityFactors) -> u8 {
        let mut score = Self::MAX_SCORE;

        if let Some(efficiency) = efficiency(cycles) {
            if efficiency < self.efficiency_target {
                score -= ((self.efficiency_target - efficiency) * 100.0) as i32;
            }
        }

        score -= (factors.movement * Self::SIGNAL_WEIGHT) as i32;
        score -= (factors.snoring * Self::SIGNAL_WEIGHT) as i32;

        score.clamp(0, Self::MAX_SCORE) as u8
    }
}

impl Default for SleepScorer {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

pub(crate) fn total_time(cycles: &[Cycle]) -> TimeDelta {
    cycles.iter().map(|c| c.duration).sum()
}

/// Share of non-awake time, `None` when the cycles cover no time at all.
pub(crate) fn efficiency(cycles: &[Cycle]) -> Option<f64> {
    let total = total_time(cycles).num_seconds();
    if total <= 0 {
        return None;
    }

    let awake = cycles
        .iter()
        .filter(|c| c.stage == SleepStage::Awake)
        .map(|c| c.duration.num_seconds())
        .sum::<i64>();

    Some((total - awake) as f64 / total as f64)
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::{NaiveDate, TimeDelta};
    use rand::Rng;

    use super::*;

    pub(crate) fn cycles(stages: &[(SleepStage, i64)]) -> Vec<Cycle> {
        let mut start = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(23, 0, 0)
            .unwrap();

        stages
            .iter()
            .enumerate()
            .map(|(i, &(stage, minutes))| {
                let cycle = Cycle {
                    id: i as u32 + 1,
                    stage,
                    start,
                    duration: TimeDelta::minutes(minutes),
                };
                start = cycle.end();
                cycle
            })
            .collect()
    }

    #[test]
    fn quiet_night_scores_full() {
        let night = cycles(&[(SleepStage::Light, 480)]);
        assert_eq!(SleepScorer::default().score(&night, &QualityFactors::default()), 100);
    }

    #[test]
    fn empty_session_skips_efficiency() {
        assert_eq!(efficiency(&[]), None);
        assert_eq!(SleepScorer::default().score(&[], &QualityFactors::default()), 100);
    }

    #[test]
    fn zero_length_cycles_skip_efficiency() {
        let night = cycles(&[(SleepStage::Awake, 0)]);
        assert_eq!(efficiency(&night), None);
        assert_eq!(SleepScorer::default().score(&night, &QualityFactors::default()), 100);
    }

    #[test]
    fn low_efficiency_is_deducted() {
        // 60 awake of 200 minutes -> efficiency 0.7 -> deduction trunc(15.0...) = 15
        let night = cycles(&[(SleepStage::Awake, 60), (SleepStage::Light, 140)]);
        let score = SleepScorer::default().score(&night, &QualityFactors::default());
        assert_eq!(efficiency(&night), Some(0.7));
        assert_eq!(score, 85);
    }

    #[test]
    fn signal_deductions_truncate() {
        let night = cycles(&[(SleepStage::Light, 480)]);
        let factors = QualityFactors {
            movement: 0.37,
            snoring: 0.5,
            ..Default::default()
        };
        // movement: trunc(7.4) = 7, snoring: trunc(10.0) = 10
        assert_eq!(SleepScorer::default().score(&night, &factors), 83);
    }

    #[test]
    fn all_awake_and_saturated_clamps_to_zero() {
        let night = cycles(&[(SleepStage::Awake, 120)]);
        let factors = QualityFactors {
            movement: 1.0,
            snoring: 1.0,
            ..Default::default()
        };
        // 100 - 85 - 20 - 20 < 0
        assert_eq!(SleepScorer::default().score(&night, &factors), 0);
    }

    #[test]
    fn random_inputs_stay_in_bounds() {
        let mut rng = rand::rng();
        let scorer = SleepScorer::default();

        for _ in 0..200 {
            let stages = (0..rng.random_range(0..12))
                .map(|_| {
                    (
                        SleepStage::ALL[rng.random_range(0..SleepStage::ALL.len())],
                        rng.random_range(0..120),
                    )
                })
                .collect::<Vec<_>>();
            let factors = QualityFactors {
                movement: rng.random_range(0.0..=1.0),
                snoring: rng.random_range(0.0..=1.0),
                ..Default::default()
            };
            let score = scorer.score(&cycles(&stages), &factors);
            assert!(score <= 100);
        }
    }
}

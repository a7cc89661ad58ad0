use std::fmt::Display;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use uuid::Uuid;

use crate::{Cycle, QualityFactors, Recommendation, SleepStage, format_hm::FormatHM};

/// The finished report of one monitoring session.
///
/// Aggregates such as total sleep time and efficiency are derived from
/// `cycles` on demand and never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: Uuid,
    pub session_id: Uuid,
    pub date: NaiveDate,
    pub cycles: Vec<Cycle>,
    pub quality_factors: QualityFactors,
    pub sleep_score: u8,
    pub recommendations: Vec<Recommendation>,
}

impl AnalysisResult {
    pub fn total_sleep_time(&self) -> TimeDelta {
        self.cycles.iter().map(|c| c.duration).sum()
    }

    pub fn time_in_stage(&self, stage: SleepStage) -> TimeDelta {
        self.cycles
            .iter()
            .filter(|c| c.stage == stage)
            .map(|c| c.duration)
            .sum()
    }

    /// Share of the session not spent awake, `0.0` for an empty session.
    pub fn efficiency(&self) -> f64 {
        let total = self.total_sleep_time().num_seconds();
        if total == 0 {
            return 0.0;
        }
        let awake = self.time_in_stage(SleepStage::Awake).num_seconds();
        (total - awake) as f64 / total as f64
    }

    pub fn stage_percentage(&self, stage: SleepStage) -> f64 {
        let total = self.total_sleep_time().num_seconds();
        if total == 0 {
            return 0.0;
        }
        self.time_in_stage(stage).num_seconds() as f64 / total as f64 * 100.0
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.cycles.first().map(|c| c.start)
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.cycles.last().map(Cycle::end)
    }
}

impl Display for AnalysisResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "Session {} ({})\nSleep score: {}\nTotal: {}\nEfficiency: {:.1}%\n",
            self.session_id,
            self.date,
            self.sleep_score,
            self.total_sleep_time().format_hm(),
            self.efficiency() * 100.0,
        ))?;

        f.write_str("Stages:\n")?;
        for stage in SleepStage::ALL {
            f.write_fmt(format_args!(
                "\t{}: {} ({:.1}%)\n",
                stage,
                self.time_in_stage(stage).format_hm(),
                self.stage_percentage(stage)
            ))?;
        }

        f.write_fmt(format_args!(
            "Movement: {:.2}\nSnoring: {:.2}\n",
            self.quality_factors.movement, self.quality_factors.snoring
        ))?;
        if let Some(temperature) = self.quality_factors.room_temperature {
            f.write_fmt(format_args!("Room temperature: {:.1}°C\n", temperature))?;
        }
        if let Some(heart_rate) = self.quality_factors.heart_rate {
            f.write_fmt(format_args!("Heart rate: {:.0} bpm\n", heart_rate))?;
        }

        if self.recommendations.is_empty() {
            return f.write_str("No recommendations");
        }
        f.write_str("Recommendations:")?;
        for recommendation in &self.recommendations {
            f.write_fmt(format_args!("\n\t{}", recommendation))?;
        }
        Ok(())
    }
}

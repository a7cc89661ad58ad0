use std::fmt::Display;

use chrono::{NaiveTime, TimeDelta};
use sleepwatch_types::{AnalysisResult, format_hm::FormatHM};

use crate::helpers::time_math::{mean, mean_deltas, mean_time, round_float, std_time};

/// Summary over several finished sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionTrend {
    pub sessions: usize,
    pub mean_score: f64,
    pub mean_total_sleep: TimeDelta,
    pub mean_efficiency: f64,
    pub mean_bedtime: NaiveTime,
    pub bedtime_std: TimeDelta,
}

impl SessionTrend {
    pub fn new(reports: &[AnalysisResult]) -> Self {
        if reports.is_empty() {
            return Self::default();
        }

        let scores = reports
            .iter()
            .map(|r| f64::from(r.sleep_score))
            .collect::<Vec<_>>();
        let totals = reports
            .iter()
            .map(AnalysisResult::total_sleep_time)
            .collect::<Vec<_>>();
        // Efficiency is undefined for sessions without recorded time.
        let efficiencies = reports
            .iter()
            .filter(|r| r.total_sleep_time() > TimeDelta::zero())
            .map(AnalysisResult::efficiency)
            .collect::<Vec<_>>();
        // Sessions without cycles have no bedtime.
        let bedtimes = reports
            .iter()
            .filter_map(|r| r.start().map(|s| s.time()))
            .collect::<Vec<_>>();

        let mean_bedtime = mean_time(&bedtimes);

        Self {
            sessions: reports.len(),
            mean_score: round_float(mean(&scores)),
            mean_total_sleep: mean_deltas(&totals),
            mean_efficiency: round_float(mean(&efficiencies)),
            mean_bedtime,
            bedtime_std: std_time(&bedtimes, &mean_bedtime),
        }
    }
}

impl Display for SessionTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "Sessions: {}\nMean score: {}\nMean total sleep: {}\nMean efficiency: {:.0}%\n",
            self.sessions,
            self.mean_score,
            self.mean_total_sleep.format_hm(),
            self.mean_efficiency * 100.0,
        ))?;
        f.write_fmt(format_args!(
            "Bedtime: {} (STD: {})",
            self.mean_bedtime.format_hm(),
            self.bedtime_std.format_hm()
        ))
    }
}

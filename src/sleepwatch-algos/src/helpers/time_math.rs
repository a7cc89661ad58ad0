use chrono::{NaiveTime, TimeDelta, Timelike as _};

const DAY_SECONDS: i64 = 86_400;

/// Seconds from midnight, with afternoon and evening times counted negative
/// so that bedtimes on both sides of midnight average sensibly.
pub fn signed_seconds(time: &NaiveTime) -> i64 {
    let seconds = time.num_seconds_from_midnight() as i64;
    if time.hour() >= 12 {
        seconds - DAY_SECONDS
    } else {
        seconds
    }
}

fn time_from_seconds(seconds: i64) -> NaiveTime {
    let seconds = seconds.rem_euclid(DAY_SECONDS) as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).unwrap_or_default()
}

pub fn mean_time(times: &[NaiveTime]) -> NaiveTime {
    if times.is_empty() {
        return NaiveTime::default();
    }
    let mean = times.iter().map(signed_seconds).sum::<i64>() / times.len() as i64;
    time_from_seconds(mean)
}

pub fn std_time(times: &[NaiveTime], mean: &NaiveTime) -> TimeDelta {
    if times.is_empty() {
        return TimeDelta::zero();
    }
    let mean = signed_seconds(mean);
    let variance = times
        .iter()
        .map(signed_seconds)
        .map(|x| (x - mean).pow(2))
        .sum::<i64>()
        / times.len() as i64;

    TimeDelta::seconds(variance.isqrt())
}

pub fn mean_deltas(durations: &[TimeDelta]) -> TimeDelta {
    if durations.is_empty() {
        TimeDelta::zero()
    } else {
        durations.iter().sum::<TimeDelta>() / durations.len() as i32
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0_f64
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

pub fn round_float(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

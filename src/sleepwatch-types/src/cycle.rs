use chrono::{NaiveDateTime, TimeDelta};

use crate::SleepStage;

/// A span of time during which the classified stage did not change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    pub id: u32,
    pub stage: SleepStage,
    pub start: NaiveDateTime,
    #[serde(with = "crate::seconds")]
    pub duration: TimeDelta,
}

impl Cycle {
    pub fn end(&self) -> NaiveDateTime {
        self.start + self.duration
    }

    pub fn overlaps(&self, other: &Cycle) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeDelta};

    use super::*;

    fn cycle(id: u32, minute: i64, minutes: i64) -> Cycle {
        let base = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(23, 0, 0)
            .unwrap();
        Cycle {
            id,
            stage: SleepStage::Light,
            start: base + TimeDelta::minutes(minute),
            duration: TimeDelta::minutes(minutes),
        }
    }

    #[test]
    fn end_adds_duration() {
        let c = cycle(1, 0, 45);
        assert_eq!(c.end() - c.start, TimeDelta::minutes(45));
    }

    #[test]
    fn adjacent_cycles_do_not_overlap() {
        let a = cycle(1, 0, 45);
        let b = cycle(2, 45, 15);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&cycle(3, 30, 30)));
    }
}

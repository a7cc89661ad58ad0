use chrono::{NaiveTime, TimeDelta, Timelike as _};

pub trait FormatHM {
    fn format_hm(&self) -> String;
}

impl FormatHM for TimeDelta {
    fn format_hm(&self) -> String {
        let minutes = self.num_minutes().max(0);
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    }
}

impl FormatHM for NaiveTime {
    fn format_hm(&self) -> String {
        format!("{:02}:{:02}", self.hour(), self.minute())
    }
}
